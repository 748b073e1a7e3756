use crate::scene::model_types::Rgb;
use image::RgbImage;

/// 画布坐标（原点在中心，+y 向上）→ 缓冲区行列；越界返回 `None`
///
/// 颜色与深度写入共用这一映射
#[inline]
fn canvas_to_buffer(width: usize, height: usize, x: i32, y: i32) -> Option<usize> {
    let column = (width / 2) as i64 + x as i64;
    let row = (height / 2) as i64 - y as i64 - 1;
    if column < 0 || row < 0 || column >= width as i64 || row >= height as i64 {
        return None;
    }
    Some(row as usize * width + column as usize)
}

/// RGB 图像缓冲区
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    /// 按行存储的 RGB 像素
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    /// 在画布坐标处写像素，越界时静默丢弃
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        match canvas_to_buffer(self.width, self.height, x, y) {
            Some(offset) => {
                self.pixels[offset] = color;
                true
            }
            None => false,
        }
    }

    /// 画布坐标中可见的 x 范围（左闭右开）
    pub fn visible_x_range(&self) -> (i32, i32) {
        let half = (self.width / 2) as i32;
        (-half, self.width as i32 - half)
    }

    /// 画布坐标中可见的 y 范围（左闭右开）
    pub fn visible_y_range(&self) -> (i32, i32) {
        let half = (self.height / 2) as i32;
        (half - self.height as i32, half)
    }

    /// 读取画布坐标处的像素
    #[cfg(test)]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        canvas_to_buffer(self.width, self.height, x, y).map(|offset| self.pixels[offset])
    }

    /// 按缓冲区行列读取像素（左上角为原点）
    #[cfg(test)]
    pub fn pixel_at(&self, column: usize, row: usize) -> Rgb {
        self.pixels[row * self.width + column]
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// 颜色缓冲区的字节数据（RGB8）
    pub fn get_color_buffer_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|rgb| rgb.iter().copied()).collect()
    }

    pub fn to_rgb_image(&self) -> Result<RgbImage, String> {
        RgbImage::from_raw(
            self.width as u32,
            self.height as u32,
            self.get_color_buffer_bytes(),
        )
        .ok_or_else(|| format!("无法从 {}x{} 的缓冲区创建图像", self.width, self.height))
    }
}

/// 深度缓冲区，存储 1/z，`None` 表示尚未写入
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    pub width: usize,
    pub height: usize,
    values: Vec<Option<f32>>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![None; width * height],
        }
    }

    /// 当 `inv_z` 严格大于已存值（或尚未写入）时更新并返回 true
    ///
    /// 相等时保留先绘制的像素；越界返回 false
    pub fn update_if_closer(&mut self, x: i32, y: i32, inv_z: f32) -> bool {
        let Some(offset) = canvas_to_buffer(self.width, self.height, x, y) else {
            return false;
        };
        if !inv_z.is_finite() {
            return false;
        }
        match self.values[offset] {
            Some(stored) if stored >= inv_z => false,
            _ => {
                self.values[offset] = Some(inv_z);
                true
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        canvas_to_buffer(self.width, self.height, x, y).and_then(|offset| self.values[offset])
    }

    /// 按行存储的原始 1/z 数据
    pub fn values(&self) -> &[Option<f32>] {
        &self.values
    }
}
