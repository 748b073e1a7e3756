use crate::scene::model_types::Rgb;

pub const RED: Rgb = [255, 0, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const BLUE: Rgb = [0, 0, 255];
pub const YELLOW: Rgb = [255, 255, 0];
pub const PURPLE: Rgb = [255, 0, 255];
pub const CYAN: Rgb = [0, 255, 255];
pub const WHITE: Rgb = [255, 255, 255];

/// 将通道值限制在 [0, 255]，NaN 视为 0
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

/// 颜色按光照强度缩放，逐通道截断
pub fn scale_color(color: Rgb, intensity: f32) -> Rgb {
    color.map(|c| clamp_channel(c as f32 * intensity))
}

/// 解析 "r,g,b" 形式的 0-255 整数颜色
pub fn parse_rgb(s: &str) -> Result<Rgb, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("颜色 '{}' 需要3个逗号分隔的值", s));
    }
    let mut rgb = [0u8; 3];
    for (channel, part) in rgb.iter_mut().zip(&parts) {
        *channel = part
            .trim()
            .parse::<u8>()
            .map_err(|e| format!("无效颜色分量 '{}': {}", part, e))?;
    }
    Ok(rgb)
}

/// 按名称查找内置颜色
pub fn named_color(name: &str) -> Option<Rgb> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "purple" => Some(PURPLE),
        "cyan" => Some(CYAN),
        "white" => Some(WHITE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_clamps_each_channel() {
        assert_eq!(scale_color([200, 100, 0], 1.5), [255, 150, 0]);
        assert_eq!(scale_color([200, 100, 50], -1.0), [0, 0, 0]);
        assert_eq!(scale_color([200, 100, 50], f32::NAN), [0, 0, 0]);
    }

    #[test]
    fn parses_rgb_strings() {
        assert_eq!(parse_rgb("0, 128,255").unwrap(), [0, 128, 255]);
        assert!(parse_rgb("0,128").is_err());
        assert!(parse_rgb("0,128,256").is_err());
        assert_eq!(named_color("Cyan"), Some(CYAN));
    }
}
