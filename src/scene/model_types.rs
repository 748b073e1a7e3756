use crate::geometry::transform::TransformFactory;
use nalgebra::{Matrix4, Vector3};
use std::sync::Arc;

/// RGB 颜色，分量范围 [0, 255]
pub type Rgb = [u8; 3];

/// 三角形：顶点索引 + 平面颜色 + 与索引平行的逐顶点法线
///
/// 索引顺序决定绕序，背面剔除依赖该绕序
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub color: Rgb,
    pub normals: [Vector3<f32>; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3], color: Rgb, normals: [Vector3<f32>; 3]) -> Self {
        Self {
            indices,
            color,
            normals,
        }
    }

    /// 三个顶点共用同一法线
    pub fn with_face_normal(indices: [usize; 3], color: Rgb, normal: Vector3<f32>) -> Self {
        Self::new(indices, color, [normal; 3])
    }

    /// 将索引和法线一起循环左移 `shift` 位，绕序保持不变
    pub(crate) fn rotated(&self, shift: usize) -> Self {
        let mut indices = self.indices;
        let mut normals = self.normals;
        indices.rotate_left(shift % 3);
        normals.rotate_left(shift % 3);
        Self {
            indices,
            color: self.color,
            normals,
        }
    }
}

/// 模型：顶点列表 + 三角形列表 + 包围球
#[derive(Debug, Clone)]
pub struct Model {
    pub vertices: Vec<Vector3<f32>>,
    pub triangles: Vec<Triangle>,
    pub bounds_center: Vector3<f32>,
    pub bounds_radius: f32,
}

impl Model {
    /// 创建模型并校验所有三角形索引都在顶点列表范围内
    pub fn new(
        vertices: Vec<Vector3<f32>>,
        triangles: Vec<Triangle>,
        bounds_center: Vector3<f32>,
        bounds_radius: f32,
    ) -> Result<Self, String> {
        if let Some((face, triangle)) = triangles
            .iter()
            .enumerate()
            .find(|(_, t)| t.indices.iter().any(|&i| i >= vertices.len()))
        {
            return Err(format!(
                "三角形 {} 的索引 {:?} 超出顶点数量 {}",
                face,
                triangle.indices,
                vertices.len()
            ));
        }

        Ok(Self {
            vertices,
            triangles,
            bounds_center,
            bounds_radius,
        })
    }

    /// 根据顶点计算包围球（中心取顶点均值，半径取最远顶点距离）
    pub fn from_geometry(
        vertices: Vec<Vector3<f32>>,
        triangles: Vec<Triangle>,
    ) -> Result<Self, String> {
        let center = if vertices.is_empty() {
            Vector3::zeros()
        } else {
            vertices.iter().sum::<Vector3<f32>>() / vertices.len() as f32
        };
        let radius = vertices
            .iter()
            .map(|v| (v - center).norm())
            .fold(0.0_f32, f32::max);

        Self::new(vertices, triangles, center, radius)
    }
}

/// 模型实例：共享只读模型 + 位置 + 朝向 + 均匀缩放
///
/// 构造时缓存世界变换 T·R·S；参数变化时重建实例而不是修改它
#[derive(Debug, Clone)]
pub struct Instance {
    model: Arc<Model>,
    position: Vector3<f32>,
    orientation: Matrix4<f32>,
    scale: f32,
    transform: Matrix4<f32>,
}

impl Instance {
    pub fn new(
        model: Arc<Model>,
        position: Vector3<f32>,
        orientation: Matrix4<f32>,
        scale: f32,
    ) -> Self {
        let transform = TransformFactory::world(&position, &orientation, scale);
        Self {
            model,
            position,
            orientation,
            scale,
            transform,
        }
    }

    /// 无旋转、缩放为 1 的实例
    #[cfg(test)]
    pub fn at(model: Arc<Model>, position: Vector3<f32>) -> Self {
        Self::new(model, position, Matrix4::identity(), 1.0)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn orientation(&self) -> &Matrix4<f32> {
        &self.orientation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn transform(&self) -> &Matrix4<f32> {
        &self.transform
    }
}
