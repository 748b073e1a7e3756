use crate::core::frame_buffer::{Canvas, DepthBuffer};
use image::ColorType;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// 保存RGB图像数据到PNG文件
pub fn save_image(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), String> {
    image::save_buffer(path, data, width, height, ColorType::Rgb8)
        .map_err(|e| format!("保存图像到 {} 时出错: {}", path.display(), e))?;
    info!("图像已保存到 {}", path.display());
    Ok(())
}

/// 将 1/z 深度归一化到 [0, 1]，越近越亮；未写入的像素为 0
pub fn normalize_depth(values: &[Option<f32>]) -> Vec<f32> {
    let (min, max) = values
        .iter()
        .flatten()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return vec![0.0; values.len()];
    }

    let range = max - min;
    debug!("深度图 1/z 范围: [{:.4}, {:.4}]", min, max);

    values
        .iter()
        .map(|value| match value {
            // 全部像素深度相同时统一为最亮
            Some(_) if range < 1e-9 => 1.0,
            // 保留一段亮度下限，区分最远表面与背景
            Some(v) => 0.2 + 0.8 * ((v - min) / range).clamp(0.0, 1.0),
            None => 0.0,
        })
        .collect()
}

/// 深度缓冲区转为灰度 RGB 字节
pub fn depth_to_rgb_bytes(depth: &DepthBuffer) -> Vec<u8> {
    normalize_depth(depth.values())
        .into_iter()
        .flat_map(|d| {
            let level = (d * 255.0).round() as u8;
            [level, level, level]
        })
        .collect()
}

/// 保存渲染结果（彩色图像和可选的深度图），返回写入的文件路径
pub fn save_render_result(
    canvas: &Canvas,
    depth: Option<&DepthBuffer>,
    output_dir: &str,
    output_name: &str,
) -> Result<Vec<PathBuf>, String> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("创建输出目录 '{}' 失败: {}", output_dir, e))?;

    let width = canvas.width as u32;
    let height = canvas.height as u32;
    let mut written = Vec::new();

    let color_path = Path::new(output_dir).join(format!("{}_color.png", output_name));
    canvas
        .to_rgb_image()?
        .save(&color_path)
        .map_err(|e| format!("保存图像到 {} 时出错: {}", color_path.display(), e))?;
    info!("图像已保存到 {}", color_path.display());
    written.push(color_path);

    if let Some(depth) = depth {
        let depth_path = Path::new(output_dir).join(format!("{}_depth.png", output_name));
        save_image(&depth_path, &depth_to_rgb_bytes(depth), width, height)?;
        written.push(depth_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearer_pixels_are_brighter() {
        let normalized = normalize_depth(&[Some(0.1), None, Some(0.5), Some(0.3)]);
        assert_eq!(normalized[1], 0.0);
        assert!((normalized[0] - 0.2).abs() < 1e-6);
        assert!((normalized[2] - 1.0).abs() < 1e-6);
        assert!(normalized[3] > normalized[0] && normalized[3] < normalized[2]);
    }

    #[test]
    fn empty_depth_is_black() {
        assert_eq!(normalize_depth(&[None, None]), vec![0.0, 0.0]);
        assert_eq!(normalize_depth(&[Some(0.25)]), vec![1.0]);
    }

    #[test]
    fn saves_color_and_depth_files() {
        let canvas = Canvas::new(4, 3, [10, 20, 30]);
        let mut depth = DepthBuffer::new(4, 3);
        depth.update_if_closer(0, 0, 0.5);

        let dir = std::env::temp_dir().join("scanline_rasterizer_save_test");
        let dir_str = dir.to_string_lossy().to_string();
        let files = save_render_result(&canvas, Some(&depth), &dir_str, "frame").unwrap();

        assert_eq!(files.len(), 2);
        for file in &files {
            let image = image::open(file).unwrap();
            assert_eq!((image.width(), image.height()), (4, 3));
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
