use crate::material_system::light::LightingModel;

/// 着色模型，每次渲染只启用一种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingModel {
    /// 每个三角形在重心处计算一次光照
    #[default]
    Flat,
    /// 逐顶点计算光照并插值
    Gouraud,
    /// 插值法线，逐像素计算光照
    Phong,
}

impl ShadingModel {
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "flat" => Ok(ShadingModel::Flat),
            "gouraud" => Ok(ShadingModel::Gouraud),
            "phong" => Ok(ShadingModel::Phong),
            _ => Err(format!("未知的着色模型: {}", name)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShadingModel::Flat => "flat",
            ShadingModel::Gouraud => "gouraud",
            ShadingModel::Phong => "phong",
        }
    }
}

/// 渲染配置：着色与光照选项作为渲染调用的显式输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// 着色模型
    pub shading: ShadingModel,
    /// 启用的光照项
    pub lighting: LightingModel,
    /// Gouraud/Phong 是否使用逐顶点法线（否则使用面法线）
    pub use_vertex_normals: bool,
    /// 视口大小（投影平面单位）
    pub viewport_size: f32,
    /// 投影平面到相机的距离
    pub projection_plane_z: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading: ShadingModel::Flat,
            lighting: LightingModel::default(),
            use_vertex_normals: true,
            viewport_size: 1.0,
            projection_plane_z: 1.0,
        }
    }
}

impl RenderConfig {
    // 构建器方法，便于链式配置
    pub fn with_shading(mut self, shading: ShadingModel) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_lighting(mut self, diffuse: bool, specular: bool) -> Self {
        self.lighting = LightingModel { diffuse, specular };
        self
    }

    pub fn with_vertex_normals(mut self, use_vertex_normals: bool) -> Self {
        self.use_vertex_normals = use_vertex_normals;
        self
    }

    pub fn with_viewport(mut self, size: f32, projection_plane_z: f32) -> Self {
        self.viewport_size = size;
        self.projection_plane_z = projection_plane_z;
        self
    }

    /// 获取光照模型的描述字符串
    pub fn get_lighting_description(&self) -> String {
        let terms = match (self.lighting.diffuse, self.lighting.specular) {
            (true, true) => "漫反射+镜面反射",
            (true, false) => "漫反射",
            (false, true) => "镜面反射",
            (false, false) => "仅环境光",
        };
        format!("{}着色, {}", self.shading.name(), terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_both_terms() {
        let config = RenderConfig::default();
        assert_eq!(config.shading, ShadingModel::Flat);
        assert!(config.lighting.diffuse && config.lighting.specular);
        assert!(config.use_vertex_normals);
    }

    #[test]
    fn parses_shading_names() {
        assert_eq!(ShadingModel::from_name("Phong").unwrap(), ShadingModel::Phong);
        assert_eq!(ShadingModel::from_name("gouraud").unwrap(), ShadingModel::Gouraud);
        assert!(ShadingModel::from_name("toon").is_err());
    }

    #[test]
    fn builder_chains() {
        let config = RenderConfig::default()
            .with_shading(ShadingModel::Gouraud)
            .with_lighting(true, false)
            .with_vertex_normals(false);
        assert_eq!(config.shading, ShadingModel::Gouraud);
        assert_eq!(config.lighting, LightingModel::DIFFUSE_ONLY);
        assert!(!config.use_vertex_normals);
        assert!(config.get_lighting_description().contains("gouraud"));
    }
}
