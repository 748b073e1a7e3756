use crate::geometry::transform::{TransformFactory, transform_vertex};
use nalgebra::{Matrix4, Vector3};

/// 裁剪平面：外法线 + 有符号距离
///
/// 满足 `dot(normal, p) + distance > 0` 的点位于平面内侧
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// 点到平面的有符号距离（法线未归一化时按比例缩放）
    #[inline]
    pub fn signed_distance(&self, point: &Vector3<f32>) -> f32 {
        self.normal.dot(point) + self.distance
    }

    #[inline]
    pub fn is_inside(&self, point: &Vector3<f32>) -> bool {
        self.signed_distance(point) > 0.0
    }
}

/// 相机：位置、朝向矩阵和有序的裁剪平面列表
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub orientation: Matrix4<f32>,
    pub clipping_planes: Vec<Plane>,
}

impl Camera {
    /// 创建不带裁剪平面的相机
    pub fn new(position: Vector3<f32>, orientation: Matrix4<f32>) -> Self {
        Self {
            position,
            orientation,
            clipping_planes: Vec::new(),
        }
    }

    /// 创建带默认视锥的相机（近平面 z=1，左右上下四个 45° 平面）
    pub fn with_default_frustum(position: Vector3<f32>, orientation: Matrix4<f32>) -> Self {
        Self {
            position,
            orientation,
            clipping_planes: Self::default_frustum(),
        }
    }

    /// 默认视锥的五个裁剪平面，与视口大小 1、投影平面 z=1 对应
    pub fn default_frustum() -> Vec<Plane> {
        let s2 = std::f32::consts::FRAC_1_SQRT_2;
        vec![
            Plane::new(Vector3::new(0.0, 0.0, 1.0), -1.0), // 近
            Plane::new(Vector3::new(s2, 0.0, s2), 0.0),    // 左
            Plane::new(Vector3::new(-s2, 0.0, s2), 0.0),   // 右
            Plane::new(Vector3::new(0.0, -s2, s2), 0.0),   // 上
            Plane::new(Vector3::new(0.0, s2, s2), 0.0),    // 下
        ]
    }

    pub fn with_clipping_planes(mut self, planes: Vec<Plane>) -> Self {
        self.clipping_planes = planes;
        self
    }

    /// 世界空间到相机空间的视图矩阵
    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.orientation, &self.position)
    }

    /// 只包含旋转部分的视图矩阵，用于方向量（方向光、法线）
    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        self.orientation.transpose()
    }

    /// 把世界空间中的点变换到相机空间
    pub fn world_to_camera(&self, point: &Vector3<f32>) -> Vector3<f32> {
        transform_vertex(&self.view_matrix(), point)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::with_default_frustum(Vector3::zeros(), Matrix4::identity())
    }
}
