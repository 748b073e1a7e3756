use crate::geometry::camera::Camera;
use crate::geometry::transform::transform_direction;
use nalgebra::Vector3;

/// 镜面反射指数
pub const SPECULAR_EXPONENT: i32 = 50;

/// 光源类型，每个变体只携带自己需要的字段
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// 环境光，无条件叠加
    Ambient { intensity: f32 },
    /// 定向光，direction 为世界空间中指向光源的方向
    Directional {
        intensity: f32,
        direction: Vector3<f32>,
    },
    /// 点光源，position 为世界空间位置
    Point {
        intensity: f32,
        position: Vector3<f32>,
    },
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient { intensity }
    }

    pub fn directional(intensity: f32, direction: Vector3<f32>) -> Self {
        Light::Directional {
            intensity,
            direction,
        }
    }

    pub fn point(intensity: f32, position: Vector3<f32>) -> Self {
        Light::Point {
            intensity,
            position,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient { intensity }
            | Light::Directional { intensity, .. }
            | Light::Point { intensity, .. } => *intensity,
        }
    }

    /// 相机空间中从表面点指向光源的向量；环境光没有方向
    pub fn light_vector(&self, point: &Vector3<f32>, camera: &Camera) -> Option<Vector3<f32>> {
        match self {
            Light::Ambient { .. } => None,
            Light::Directional { direction, .. } => {
                Some(transform_direction(&camera.rotation_matrix(), direction))
            }
            Light::Point { position, .. } => Some(camera.world_to_camera(position) - point),
        }
    }
}

/// 启用的光照项，漫反射与镜面反射互相独立
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightingModel {
    pub diffuse: bool,
    pub specular: bool,
}

impl LightingModel {
    #[cfg(test)]
    pub const DIFFUSE_ONLY: Self = Self {
        diffuse: true,
        specular: false,
    };
    #[cfg(test)]
    pub const SPECULAR_ONLY: Self = Self {
        diffuse: false,
        specular: true,
    };
}

impl Default for LightingModel {
    fn default() -> Self {
        Self {
            diffuse: true,
            specular: true,
        }
    }
}

/// 计算相机空间中某点的光照强度（非负标量，各光源累加）
///
/// `point` 与 `normal` 均在相机空间；法线无需归一化
pub fn compute_illumination(
    point: &Vector3<f32>,
    normal: &Vector3<f32>,
    camera: &Camera,
    lights: &[Light],
    lighting: LightingModel,
) -> f32 {
    let normal_length = normal.norm();

    lights
        .iter()
        .map(|light| {
            let Some(light_vector) = light.light_vector(point, camera) else {
                return light.intensity();
            };

            let light_length = light_vector.norm();
            if light_length <= f32::EPSILON || normal_length <= f32::EPSILON {
                return 0.0;
            }

            let mut contribution = 0.0;

            if lighting.diffuse {
                let cos_alpha = light_vector.dot(normal) / (light_length * normal_length);
                if cos_alpha > 0.0 {
                    contribution += cos_alpha * light.intensity();
                }
            }

            if lighting.specular {
                let unit_normal = normal / normal_length;
                let reflected = unit_normal * (2.0 * unit_normal.dot(&light_vector)) - light_vector;
                let view = camera.position - point;
                let denominator = reflected.norm() * view.norm();
                if denominator > f32::EPSILON {
                    let cos_beta = reflected.dot(&view) / denominator;
                    if cos_beta > 0.0 {
                        contribution += cos_beta.powi(SPECULAR_EXPONENT) * light.intensity();
                    }
                }
            }

            contribution
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::TransformFactory;
    use nalgebra::Matrix4;

    const EPS: f32 = 1e-4;

    fn camera() -> Camera {
        Camera::default()
    }

    #[test]
    fn ambient_is_added_unconditionally() {
        let lights = [Light::ambient(0.2), Light::ambient(0.3)];
        let value = compute_illumination(
            &Vector3::new(0.0, 0.0, 5.0),
            &Vector3::new(0.0, 0.0, -1.0),
            &camera(),
            &lights,
            LightingModel::default(),
        );
        assert!((value - 0.5).abs() < EPS);
    }

    #[test]
    fn diffuse_follows_cosine_and_clamps() {
        let lights = [Light::point(1.0, Vector3::new(0.0, 0.0, 0.0))];
        let point = Vector3::new(0.0, 0.0, 5.0);

        let facing = compute_illumination(
            &point,
            &Vector3::new(0.0, 0.0, -2.0),
            &camera(),
            &lights,
            LightingModel::DIFFUSE_ONLY,
        );
        assert!((facing - 1.0).abs() < EPS);

        let away = compute_illumination(
            &point,
            &Vector3::new(0.0, 0.0, 1.0),
            &camera(),
            &lights,
            LightingModel::DIFFUSE_ONLY,
        );
        assert_eq!(away, 0.0);

        let tilted = compute_illumination(
            &point,
            &Vector3::new(1.0, 0.0, -1.0),
            &camera(),
            &lights,
            LightingModel::DIFFUSE_ONLY,
        );
        assert!((tilted - std::f32::consts::FRAC_1_SQRT_2).abs() < EPS);
    }

    #[test]
    fn specular_peaks_on_mirror_direction() {
        // 光源与相机重合，正对表面时反射方向与视线一致
        let lights = [Light::point(1.0, Vector3::zeros())];
        let value = compute_illumination(
            &Vector3::new(0.0, 0.0, 5.0),
            &Vector3::new(0.0, 0.0, -1.0),
            &camera(),
            &lights,
            LightingModel::SPECULAR_ONLY,
        );
        assert!((value - 1.0).abs() < EPS);
    }

    #[test]
    fn specular_ignores_normal_length() {
        let lights = [Light::point(1.0, Vector3::new(1.0, 0.0, 0.0))];
        let point = Vector3::new(0.0, 0.0, 5.0);
        let a = compute_illumination(
            &point,
            &Vector3::new(0.0, 0.0, -1.0),
            &camera(),
            &lights,
            LightingModel::SPECULAR_ONLY,
        );
        let b = compute_illumination(
            &point,
            &Vector3::new(0.0, 0.0, -4.0),
            &camera(),
            &lights,
            LightingModel::SPECULAR_ONLY,
        );
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn directional_light_rotates_with_camera() {
        let lights = [Light::directional(1.0, Vector3::new(1.0, 0.0, 0.0))];
        let point = Vector3::new(0.0, 0.0, 5.0);
        let normal = Vector3::new(0.0, 0.0, -1.0);

        // 相机不旋转时光线与法线垂直
        let straight = compute_illumination(
            &point,
            &normal,
            &camera(),
            &lights,
            LightingModel::DIFFUSE_ONLY,
        );
        assert!(straight.abs() < EPS);

        // 相机绕 Y 轴转 90°，世界 +X 在相机空间中变为 -Z
        let rotated_camera = Camera::new(Vector3::zeros(), TransformFactory::rotation_y_degrees(90.0));
        let turned = compute_illumination(
            &point,
            &normal,
            &rotated_camera,
            &lights,
            LightingModel::DIFFUSE_ONLY,
        );
        assert!((turned - 1.0).abs() < EPS);
    }

    #[test]
    fn point_light_is_moved_into_camera_space() {
        let camera = Camera::new(Vector3::new(0.0, 0.0, -5.0), Matrix4::identity());
        let lights = [Light::point(1.0, Vector3::new(0.0, 0.0, -5.0))];
        // 相机空间中光源位于原点
        let value = compute_illumination(
            &Vector3::new(0.0, 0.0, 5.0),
            &Vector3::new(0.0, 0.0, -1.0),
            &camera,
            &lights,
            LightingModel::DIFFUSE_ONLY,
        );
        assert!((value - 1.0).abs() < EPS);
    }

    #[test]
    fn zero_normal_contributes_nothing() {
        let lights = [Light::point(1.0, Vector3::zeros())];
        let value = compute_illumination(
            &Vector3::new(0.0, 0.0, 5.0),
            &Vector3::zeros(),
            &camera(),
            &lights,
            LightingModel::default(),
        );
        assert_eq!(value, 0.0);
    }
}
