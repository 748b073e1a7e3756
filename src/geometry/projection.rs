use nalgebra::Vector3;

/// 透视除法时允许的最小深度
pub const MIN_DEPTH: f32 = 1e-6;

/// 画布空间中的整数像素坐标，原点在画布中心，+y 向上
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

/// 视口：投影平面上的归一化窗口，以及到画布像素的缩放
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// 视口宽高（投影平面上的单位）
    pub size: f32,
    /// 投影平面到相机的距离
    pub projection_plane_z: f32,
    pub canvas_width: usize,
    pub canvas_height: usize,
}

impl Viewport {
    pub fn new(size: f32, projection_plane_z: f32, canvas_width: usize, canvas_height: usize) -> Self {
        Self {
            size,
            projection_plane_z,
            canvas_width,
            canvas_height,
        }
    }

    /// 视口坐标 → 画布坐标，向零截断
    pub fn viewport_to_canvas(&self, x: f32, y: f32) -> CanvasPoint {
        CanvasPoint {
            x: (x * self.canvas_width as f32 / self.size) as i32,
            y: (y * self.canvas_height as f32 / self.size) as i32,
        }
    }

    /// 画布坐标 → 视口坐标
    pub fn canvas_to_viewport(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.size / self.canvas_width as f32,
            y * self.size / self.canvas_height as f32,
        )
    }

    /// 相机空间顶点透视投影到画布；z 不大于 `MIN_DEPTH` 或结果非有限时返回 `None`
    pub fn project_vertex(&self, v: &Vector3<f32>) -> Option<CanvasPoint> {
        if v.z <= MIN_DEPTH {
            return None;
        }
        let x = v.x * self.projection_plane_z / v.z;
        let y = v.y * self.projection_plane_z / v.z;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(self.viewport_to_canvas(x, y))
    }

    /// 由画布坐标和 1/z 反推相机空间位置；`inv_z` 为 0 时返回 `None`
    pub fn unproject_vertex(&self, x: i32, y: i32, inv_z: f32) -> Option<Vector3<f32>> {
        if inv_z == 0.0 || !inv_z.is_finite() {
            return None;
        }
        let z = 1.0 / inv_z;
        let ux = x as f32 * z / self.projection_plane_z;
        let uy = y as f32 * z / self.projection_plane_z;
        let (vx, vy) = self.canvas_to_viewport(ux, uy);
        Some(Vector3::new(vx, vy, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1.0, 1.0, 601, 601)
    }

    #[test]
    fn projects_onto_canvas_with_truncation() {
        let p = viewport()
            .project_vertex(&Vector3::new(1.0, -1.0, 4.0))
            .unwrap();
        // 0.25 * 601 = 150.25
        assert_eq!(p, CanvasPoint { x: 150, y: -150 });
    }

    #[test]
    fn rejects_vertices_at_or_behind_camera() {
        assert!(viewport().project_vertex(&Vector3::new(1.0, 1.0, 0.0)).is_none());
        assert!(viewport().project_vertex(&Vector3::new(1.0, 1.0, -2.0)).is_none());
    }

    #[test]
    fn unproject_recovers_position_within_a_pixel() {
        let vp = viewport();
        for v in [
            Vector3::new(0.3, -0.2, 2.0),
            Vector3::new(-1.5, 0.7, 5.0),
            Vector3::new(0.0, 0.0, 1.0),
        ] {
            let p = vp.project_vertex(&v).unwrap();
            let back = vp.unproject_vertex(p.x, p.y, 1.0 / v.z).unwrap();
            // 一个像素对应的相机空间宽度为 z / 601
            let tolerance = v.z / 601.0 + 1e-5;
            assert!((back.x - v.x).abs() <= tolerance);
            assert!((back.y - v.y).abs() <= tolerance);
            assert!((back.z - v.z).abs() < 1e-5);
        }
    }

    #[test]
    fn unproject_rejects_zero_inverse_depth() {
        assert!(viewport().unproject_vertex(10, 10, 0.0).is_none());
    }
}
