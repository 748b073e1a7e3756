use crate::core::render_config::ShadingModel;
use crate::io::render_settings::{FigureType, RenderSettings, format_vec3, parse_vec3};
use crate::material_system::color::{named_color, parse_rgb};
use crate::material_system::light::Light;
use crate::scene::model_types::Rgb;
use log::warn;
use std::path::Path;
use toml::Value;

/// 球体细分数下限，低于该值无法构成封闭网格
const MIN_SPHERE_DIVISIONS: usize = 3;

/// TOML配置管理器 - 统一处理所有配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载完整配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("读取配置文件失败: {}", e))?;

        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置
    pub fn load_from_content(content: &str) -> Result<RenderSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("解析TOML失败: {}", e))?;

        Self::parse_toml_to_settings(toml_value)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    /// 以默认设置生成示例配置文件
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        Self::save_to_file(&RenderSettings::default(), path)
            .map_err(|e| format!("创建示例配置失败: {}", e))
    }

    // ===== TOML -> RenderSettings 转换 =====

    fn parse_toml_to_settings(toml: Value) -> Result<RenderSettings, String> {
        let mut settings = RenderSettings::default();

        if let Some(root) = toml.as_table() {
            warn_unknown_keys("", root, &["files", "render", "camera", "figure", "light"]);
        }

        // [files] 部分
        if let Some(files) = toml.get("files").and_then(|v| v.as_table()) {
            Self::parse_files_section(&mut settings, files)?;
        }

        // [render] 部分
        if let Some(render) = toml.get("render").and_then(|v| v.as_table()) {
            Self::parse_render_section(&mut settings, render)?;
        }

        // [camera] 部分
        if let Some(camera) = toml.get("camera").and_then(|v| v.as_table()) {
            Self::parse_camera_section(&mut settings, camera)?;
        }

        // [figure] 部分
        if let Some(figure) = toml.get("figure").and_then(|v| v.as_table()) {
            Self::parse_figure_section(&mut settings, figure)?;
        }

        // [[light]] 数组，存在时整体替换默认光源
        if let Some(lights) = Self::parse_lights_array(&toml)? {
            settings.lights = lights;
        }

        Ok(settings)
    }

    // ===== 各个section的解析方法 =====

    fn parse_files_section(
        settings: &mut RenderSettings,
        files: &toml::Table,
    ) -> Result<(), String> {
        warn_unknown_keys("files", files, &["output", "output_dir", "save_depth"]);

        if let Some(output) = files.get("output").and_then(|v| v.as_str()) {
            settings.output = output.to_string();
        }
        if let Some(output_dir) = files.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
        if let Some(save_depth) = files.get("save_depth").and_then(|v| v.as_bool()) {
            settings.save_depth = save_depth;
        }
        Ok(())
    }

    fn parse_render_section(
        settings: &mut RenderSettings,
        render: &toml::Table,
    ) -> Result<(), String> {
        warn_unknown_keys(
            "render",
            render,
            &[
                "width",
                "height",
                "background",
                "shading",
                "diffuse",
                "specular",
                "use_vertex_normals",
                "viewport_size",
                "projection_plane_z",
                "clipping",
            ],
        );

        if let Some(width) = get_dimension(render, "width")? {
            settings.width = width;
        }
        if let Some(height) = get_dimension(render, "height")? {
            settings.height = height;
        }
        if let Some(background) = render.get("background").and_then(|v| v.as_str()) {
            settings.background =
                parse_color(background).map_err(|e| format!("解析背景颜色失败: {}", e))?;
        }
        if let Some(shading) = render.get("shading").and_then(|v| v.as_str()) {
            settings.shading = ShadingModel::from_name(shading)?;
        }
        if let Some(diffuse) = render.get("diffuse").and_then(|v| v.as_bool()) {
            settings.use_diffuse = diffuse;
        }
        if let Some(specular) = render.get("specular").and_then(|v| v.as_bool()) {
            settings.use_specular = specular;
        }
        if let Some(use_vertex_normals) =
            render.get("use_vertex_normals").and_then(|v| v.as_bool())
        {
            settings.use_vertex_normals = use_vertex_normals;
        }
        if let Some(viewport_size) = get_float(render, "viewport_size") {
            settings.viewport_size = viewport_size;
        }
        if let Some(projection_plane_z) = get_float(render, "projection_plane_z") {
            settings.projection_plane_z = projection_plane_z;
        }
        if let Some(clipping) = render.get("clipping").and_then(|v| v.as_bool()) {
            settings.use_clipping = clipping;
        }
        Ok(())
    }

    fn parse_camera_section(
        settings: &mut RenderSettings,
        camera: &toml::Table,
    ) -> Result<(), String> {
        warn_unknown_keys("camera", camera, &["position", "rotation"]);

        if let Some(position) = camera.get("position").and_then(|v| v.as_str()) {
            settings.camera_position =
                parse_vec3(position).map_err(|e| format!("解析相机位置失败: {}", e))?;
        }
        if let Some(rotation) = get_float(camera, "rotation") {
            settings.camera_rotation = rotation;
        }
        Ok(())
    }

    fn parse_figure_section(
        settings: &mut RenderSettings,
        figure: &toml::Table,
    ) -> Result<(), String> {
        warn_unknown_keys(
            "figure",
            figure,
            &[
                "type",
                "position",
                "rotation",
                "scale",
                "sphere_divisions",
                "sphere_color",
            ],
        );

        if let Some(figure_type) = figure.get("type").and_then(|v| v.as_str()) {
            settings.figure = FigureType::from_name(figure_type)?;
        }
        if let Some(position) = figure.get("position").and_then(|v| v.as_str()) {
            settings.figure_position =
                parse_vec3(position).map_err(|e| format!("解析图形位置失败: {}", e))?;
        }
        if let Some(rotation) = get_float(figure, "rotation") {
            settings.figure_rotation = rotation;
        }
        if let Some(scale) = get_float(figure, "scale") {
            settings.figure_scale = scale;
        }
        if let Some(divisions) = figure.get("sphere_divisions").and_then(|v| v.as_integer()) {
            if divisions < MIN_SPHERE_DIVISIONS as i64 {
                warn!(
                    "球体细分数 {} 过小, 使用最小值 {}",
                    divisions, MIN_SPHERE_DIVISIONS
                );
                settings.sphere_divisions = MIN_SPHERE_DIVISIONS;
            } else {
                settings.sphere_divisions = divisions as usize;
            }
        }
        if let Some(color) = figure.get("sphere_color").and_then(|v| v.as_str()) {
            settings.sphere_color =
                parse_color(color).map_err(|e| format!("解析球体颜色失败: {}", e))?;
        }
        Ok(())
    }

    /// 没有 `[[light]]` 时返回 `None`，保留默认光源
    fn parse_lights_array(toml: &Value) -> Result<Option<Vec<Light>>, String> {
        let Some(lights_array) = toml.get("light").and_then(|v| v.as_array()) else {
            return Ok(None);
        };

        let mut lights = Vec::with_capacity(lights_array.len());
        for (i, light_value) in lights_array.iter().enumerate() {
            let light_table = light_value
                .as_table()
                .ok_or_else(|| format!("第{}个光源不是表", i + 1))?;
            let light = Self::parse_single_light(light_table)
                .map_err(|e| format!("第{}个光源解析失败: {}", i + 1, e))?;
            if let Some(light) = light {
                lights.push(light);
            }
        }

        Ok(Some(lights))
    }

    /// `enabled = false` 的光源被跳过
    fn parse_single_light(light_table: &toml::Table) -> Result<Option<Light>, String> {
        let light_type = light_table
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or("光源缺少type字段")?;

        let enabled = light_table
            .get("enabled")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        let mut intensity = get_float(light_table, "intensity").unwrap_or(1.0);
        if intensity < 0.0 {
            warn!("光源强度 {} 为负, 按 0 处理", intensity);
            intensity = 0.0;
        }

        let light = match light_type {
            "ambient" => Light::ambient(intensity),
            "directional" => {
                let direction_str = light_table
                    .get("direction")
                    .and_then(|v| v.as_str())
                    .ok_or("方向光缺少direction字段")?;
                let direction = parse_vec3(direction_str)
                    .map_err(|e| format!("解析方向光方向失败: {}", e))?;
                Light::directional(intensity, direction)
            }
            "point" => {
                let position_str = light_table
                    .get("position")
                    .and_then(|v| v.as_str())
                    .ok_or("点光源缺少position字段")?;
                let position = parse_vec3(position_str)
                    .map_err(|e| format!("解析点光源位置失败: {}", e))?;
                Light::point(intensity, position)
            }
            _ => return Err(format!("未知的光源类型: {}", light_type)),
        };

        Ok(enabled.then_some(light))
    }

    // ===== RenderSettings -> TOML 转换 =====

    fn settings_to_toml(settings: &RenderSettings) -> String {
        let mut content = String::new();

        content.push_str("# 扫描线光栅化渲染器配置文件\n");
        content.push_str("# 基于RenderSettings默认值生成的示例配置\n\n");

        // [files] 部分
        content.push_str("[files]\n");
        content.push_str(&format!("output = \"{}\"\n", settings.output));
        content.push_str(&format!("output_dir = \"{}\"\n", settings.output_dir));
        content.push_str(&format!("save_depth = {}\n", settings.save_depth));
        content.push('\n');

        // [render] 部分
        content.push_str("[render]\n");
        content.push_str(&format!("width = {}\n", settings.width));
        content.push_str(&format!("height = {}\n", settings.height));
        content.push_str(&format!(
            "background = \"{}\"\n",
            format_rgb(settings.background)
        ));
        content.push_str("# flat / gouraud / phong\n");
        content.push_str(&format!("shading = \"{}\"\n", settings.shading.name()));
        content.push_str(&format!("diffuse = {}\n", settings.use_diffuse));
        content.push_str(&format!("specular = {}\n", settings.use_specular));
        content.push_str(&format!(
            "use_vertex_normals = {}\n",
            settings.use_vertex_normals
        ));
        content.push_str(&format!("viewport_size = {:?}\n", settings.viewport_size));
        content.push_str(&format!(
            "projection_plane_z = {:?}\n",
            settings.projection_plane_z
        ));
        content.push_str(&format!("clipping = {}\n", settings.use_clipping));
        content.push('\n');

        // [camera] 部分
        content.push_str("[camera]\n");
        content.push_str(&format!(
            "position = \"{}\"\n",
            format_vec3(&settings.camera_position)
        ));
        content.push_str(&format!("rotation = {:?}\n", settings.camera_rotation));
        content.push('\n');

        // [figure] 部分
        content.push_str("[figure]\n");
        content.push_str("# cube / sphere\n");
        content.push_str(&format!("type = \"{}\"\n", settings.figure.name()));
        content.push_str(&format!(
            "position = \"{}\"\n",
            format_vec3(&settings.figure_position)
        ));
        content.push_str(&format!("rotation = {:?}\n", settings.figure_rotation));
        content.push_str(&format!("scale = {:?}\n", settings.figure_scale));
        content.push_str(&format!(
            "sphere_divisions = {}\n",
            settings.sphere_divisions
        ));
        content.push_str(&format!(
            "sphere_color = \"{}\"\n",
            format_rgb(settings.sphere_color)
        ));

        // [[light]] 数组
        for light in &settings.lights {
            content.push_str("\n[[light]]\n");
            match light {
                Light::Ambient { intensity } => {
                    content.push_str("type = \"ambient\"\n");
                    content.push_str(&format!("intensity = {:?}\n", intensity));
                }
                Light::Directional {
                    intensity,
                    direction,
                } => {
                    content.push_str("type = \"directional\"\n");
                    content.push_str(&format!("intensity = {:?}\n", intensity));
                    content.push_str(&format!("direction = \"{}\"\n", format_vec3(direction)));
                }
                Light::Point {
                    intensity,
                    position,
                } => {
                    content.push_str("type = \"point\"\n");
                    content.push_str(&format!("intensity = {:?}\n", intensity));
                    content.push_str(&format!("position = \"{}\"\n", format_vec3(position)));
                }
            }
        }

        content
    }
}

/// 浮点字段同时接受整数写法
fn get_float(table: &toml::Table, key: &str) -> Option<f32> {
    table
        .get(key)
        .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
        .map(|f| f as f32)
}

fn get_dimension(table: &toml::Table, key: &str) -> Result<Option<usize>, String> {
    match table.get(key).and_then(|v| v.as_integer()) {
        Some(value) if value > 0 => Ok(Some(value as usize)),
        Some(value) => Err(format!("{} 必须为正整数: {}", key, value)),
        None => Ok(None),
    }
}

/// 颜色可以是内置名称或 "r,g,b"
fn parse_color(s: &str) -> Result<Rgb, String> {
    named_color(s.trim()).map_or_else(|| parse_rgb(s), Ok)
}

fn format_rgb(rgb: Rgb) -> String {
    format!("{},{},{}", rgb[0], rgb[1], rgb[2])
}

fn warn_unknown_keys(section: &str, table: &toml::Table, known: &[&str]) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            if section.is_empty() {
                warn!("忽略未知配置项: {}", key);
            } else {
                warn!("忽略未知配置项: [{}] {}", section, key);
            }
        }
    }
}
