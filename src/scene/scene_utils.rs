use crate::geometry::camera::Camera;
use crate::geometry::transform::TransformFactory;
use crate::io::render_settings::{FigureType, RenderSettings};
use crate::material_system::light::Light;
use crate::scene::model_types::Instance;
use crate::scene::primitives::{cube, generate_sphere};
use log::debug;

/// 一次渲染所需的场景：相机、实例与光源
///
/// 每次渲染都从当前设置重新构建，不在帧之间保留
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub instances: Vec<Instance>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// 从渲染设置创建完整场景
    pub fn from_settings(settings: &RenderSettings) -> Result<Self, String> {
        let model = match settings.figure {
            FigureType::Cube => cube()?,
            FigureType::Sphere => {
                generate_sphere(settings.sphere_divisions, settings.sphere_color)?
            }
        };
        debug!(
            "图形 {}: {} 个顶点, {} 个三角形",
            settings.figure.name(),
            model.vertices.len(),
            model.triangles.len()
        );

        let instance = Instance::new(
            model,
            settings.figure_position,
            TransformFactory::rotation_y_degrees(settings.figure_rotation),
            settings.figure_scale,
        );
        debug!(
            "实例位置 {:?}, 缩放 {}",
            instance.position(),
            instance.scale()
        );

        let camera_orientation = TransformFactory::rotation_y_degrees(settings.camera_rotation);
        // 关闭裁剪时不设任何裁剪平面
        let planes = if settings.use_clipping {
            Camera::default_frustum()
        } else {
            Vec::new()
        };
        let camera =
            Camera::new(settings.camera_position, camera_orientation).with_clipping_planes(planes);

        Ok(Scene {
            camera,
            instances: vec![instance],
            lights: settings.lights.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn default_settings_build_cube_scene() {
        let scene = Scene::from_settings(&RenderSettings::default()).unwrap();
        assert_eq!(scene.instances.len(), 1);
        assert_eq!(scene.instances[0].model().triangles.len(), 12);
        assert_eq!(scene.instances[0].position(), Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(scene.camera.clipping_planes.len(), 5);
        assert_eq!(scene.lights.len(), 3);
    }

    #[test]
    fn sphere_and_unclipped_camera() {
        let settings = RenderSettings {
            figure: FigureType::Sphere,
            sphere_divisions: 6,
            use_clipping: false,
            figure_scale: 2.0,
            ..Default::default()
        };
        let scene = Scene::from_settings(&settings).unwrap();
        assert_eq!(scene.instances[0].model().vertices.len(), 7 * 6);
        assert_eq!(scene.instances[0].scale(), 2.0);
        assert!(scene.camera.clipping_planes.is_empty());
    }
}
