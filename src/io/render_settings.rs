use crate::core::render_config::{RenderConfig, ShadingModel};
use crate::material_system::color::{GREEN, WHITE};
use crate::material_system::light::Light;
use crate::scene::model_types::Rgb;
use nalgebra::Vector3;

/// 场景中的图形类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FigureType {
    #[default]
    Cube,
    Sphere,
}

impl FigureType {
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "cube" => Ok(FigureType::Cube),
            "sphere" => Ok(FigureType::Sphere),
            _ => Err(format!("未知的图形类型: {}", name)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FigureType::Cube => "cube",
            FigureType::Sphere => "sphere",
        }
    }
}

/// 渲染设置：配置文件与命令行的合并结果
#[derive(Debug, Clone)]
pub struct RenderSettings {
    // ===== 输出 =====
    /// 输出文件名（不含扩展名）
    pub output: String,
    pub output_dir: String,
    /// 是否额外保存 1/z 深度图
    pub save_depth: bool,

    // ===== 渲染 =====
    pub width: usize,
    pub height: usize,
    pub background: Rgb,
    pub shading: ShadingModel,
    pub use_diffuse: bool,
    pub use_specular: bool,
    pub use_vertex_normals: bool,
    pub viewport_size: f32,
    pub projection_plane_z: f32,
    /// 关闭后相机不带裁剪平面，只剔除无法投影的三角形
    pub use_clipping: bool,

    // ===== 相机 =====
    pub camera_position: Vector3<f32>,
    /// 绕 Y 轴的旋转角（度）
    pub camera_rotation: f32,

    // ===== 图形 =====
    pub figure: FigureType,
    pub figure_position: Vector3<f32>,
    /// 绕 Y 轴的旋转角（度）
    pub figure_rotation: f32,
    pub figure_scale: f32,
    pub sphere_divisions: usize,
    pub sphere_color: Rgb,

    // ===== 光源 =====
    pub lights: Vec<Light>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output: "output".to_string(),
            output_dir: "output_rust".to_string(),
            save_depth: false,

            width: 601,
            height: 601,
            background: WHITE,
            shading: ShadingModel::Flat,
            use_diffuse: true,
            use_specular: true,
            use_vertex_normals: true,
            viewport_size: 1.0,
            projection_plane_z: 1.0,
            use_clipping: true,

            camera_position: Vector3::zeros(),
            camera_rotation: 0.0,

            figure: FigureType::Cube,
            figure_position: Vector3::new(0.0, 0.0, 5.0),
            figure_rotation: 0.0,
            figure_scale: 1.0,
            sphere_divisions: 25,
            sphere_color: GREEN,

            lights: default_lights(),
        }
    }
}

/// 默认光源：环境光 + 定向光 + 点光源
pub fn default_lights() -> Vec<Light> {
    vec![
        Light::ambient(0.2),
        Light::directional(0.2, Vector3::new(-1.0, 0.0, 1.0)),
        Light::point(1.0, Vector3::new(1.0, 1.0, 1.0)),
    ]
}

impl RenderSettings {
    /// 提取渲染核心所需的配置
    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_shading(self.shading)
            .with_lighting(self.use_diffuse, self.use_specular)
            .with_vertex_normals(self.use_vertex_normals)
            .with_viewport(self.viewport_size, self.projection_plane_z)
    }

    /// 检查无法渲染的数值组合
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("图像尺寸必须为正: {}x{}", self.width, self.height));
        }
        if !(self.viewport_size > 0.0 && self.viewport_size.is_finite()) {
            return Err(format!("视口大小必须为正: {}", self.viewport_size));
        }
        if !(self.projection_plane_z > 0.0 && self.projection_plane_z.is_finite()) {
            return Err(format!("投影平面距离必须为正: {}", self.projection_plane_z));
        }
        if !(self.figure_scale > 0.0 && self.figure_scale.is_finite()) {
            return Err(format!("图形缩放必须为正: {}", self.figure_scale));
        }
        if self.output.is_empty() {
            return Err("输出文件名不能为空".to_string());
        }
        Ok(())
    }
}

/// 解析 "x,y,z" 形式的向量
pub fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("'{}' 需要3个逗号分隔的值", s));
    }
    let mut values = [0.0f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("无效数字 '{}': {}", part.trim(), e))?;
    }
    Ok(Vector3::from(values))
}

/// 格式化为 "x,y,z"，与 [`parse_vec3`] 对应
pub fn format_vec3(v: &Vector3<f32>) -> String {
    format!("{},{},{}", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_spaces() {
        let v = parse_vec3(" 1, -2.5 ,3").unwrap();
        assert_eq!(v, Vector3::new(1.0, -2.5, 3.0));
        assert_eq!(parse_vec3(&format_vec3(&v)).unwrap(), v);
    }

    #[test]
    fn parse_vec3_rejects_bad_input() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,3,4").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn defaults_describe_cube_scene() {
        let settings = RenderSettings::default();
        assert_eq!((settings.width, settings.height), (601, 601));
        assert_eq!(settings.figure, FigureType::Cube);
        assert_eq!(settings.figure_position, Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(settings.lights.len(), 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn render_config_follows_settings() {
        let settings = RenderSettings {
            shading: ShadingModel::Phong,
            use_specular: false,
            viewport_size: 2.0,
            ..Default::default()
        };
        let config = settings.to_render_config();
        assert_eq!(config.shading, ShadingModel::Phong);
        assert!(config.lighting.diffuse);
        assert!(!config.lighting.specular);
        assert_eq!(config.viewport_size, 2.0);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let zero_width = RenderSettings {
            width: 0,
            ..Default::default()
        };
        assert!(zero_width.validate().is_err());

        let negative_scale = RenderSettings {
            figure_scale: -1.0,
            ..Default::default()
        };
        assert!(negative_scale.validate().is_err());
    }

    #[test]
    fn figure_names_round_trip() {
        for figure in [FigureType::Cube, FigureType::Sphere] {
            assert_eq!(FigureType::from_name(figure.name()).unwrap(), figure);
        }
        assert!(FigureType::from_name("torus").is_err());
    }
}
