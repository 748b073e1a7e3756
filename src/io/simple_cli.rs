use crate::core::render_config::ShadingModel;
use crate::io::config_loader::TomlConfigLoader;
use crate::io::render_settings::{FigureType, RenderSettings};
use clap::Parser;
use log::info;

/// 极简CLI：TOML 配置文件 + 少量覆盖参数
#[derive(Parser, Debug)]
#[command(name = "scanline-rasterizer")]
#[command(about = "TOML驱动的扫描线光栅化渲染器")]
pub struct SimpleCli {
    /// 配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// 使用示例配置（写入 temp_example_config.toml 并加载）
    #[arg(long)]
    pub use_example_config: bool,

    /// 输出文件名（不含扩展名）
    #[arg(short, long)]
    pub output: Option<String>,

    /// 输出目录
    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long)]
    pub width: Option<usize>,

    #[arg(long)]
    pub height: Option<usize>,

    /// 着色模型：flat / gouraud / phong
    #[arg(long)]
    pub shading: Option<String>,

    /// 图形：cube / sphere
    #[arg(long)]
    pub figure: Option<String>,

    /// 同时保存深度图
    #[arg(long)]
    pub save_depth: bool,
}

impl SimpleCli {
    /// 解析命令行参数并返回最终的 RenderSettings
    pub fn process() -> Result<RenderSettings, String> {
        Self::parse().into_settings()
    }

    fn into_settings(self) -> Result<RenderSettings, String> {
        let mut settings = if self.use_example_config {
            let temp_config_path = "temp_example_config.toml";

            TomlConfigLoader::create_example_config(temp_config_path)?;
            info!("已创建临时示例配置: {}", temp_config_path);

            // 保留文件，用户可以当模板
            TomlConfigLoader::load_from_file(temp_config_path)
                .map_err(|e| format!("加载示例配置失败: {}", e))?
        } else if let Some(config_path) = &self.config {
            info!("加载配置文件: {}", config_path);
            TomlConfigLoader::load_from_file(config_path)
                .map_err(|e| format!("配置文件加载失败: {}", e))?
        } else {
            info!("使用默认设置");
            RenderSettings::default()
        };

        if let Some(output) = self.output {
            settings.output = output;
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(shading) = &self.shading {
            settings.shading = ShadingModel::from_name(shading)?;
        }
        if let Some(figure) = &self.figure {
            settings.figure = FigureType::from_name(figure)?;
        }
        if self.save_depth {
            settings.save_depth = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = SimpleCli::parse_from([
            "scanline-rasterizer",
            "--width",
            "200",
            "--shading",
            "gouraud",
            "--figure",
            "sphere",
            "--save-depth",
            "-o",
            "frame",
        ]);
        let settings = cli.into_settings().unwrap();
        assert_eq!(settings.width, 200);
        assert_eq!(settings.height, RenderSettings::default().height);
        assert_eq!(settings.shading, ShadingModel::Gouraud);
        assert_eq!(settings.figure, FigureType::Sphere);
        assert!(settings.save_depth);
        assert_eq!(settings.output, "frame");
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let cli = SimpleCli::parse_from(["scanline-rasterizer", "--shading", "toon"]);
        assert!(cli.into_settings().is_err());

        let cli = SimpleCli::parse_from(["scanline-rasterizer", "--width", "0"]);
        assert!(cli.into_settings().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = SimpleCli::parse_from([
            "scanline-rasterizer",
            "--config",
            "/nonexistent/scene.toml",
        ]);
        assert!(cli.into_settings().is_err());
    }
}
