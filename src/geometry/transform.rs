use nalgebra::{Matrix4, Vector3, Vector4};

/// 变换矩阵工厂，提供创建各种变换矩阵的静态方法
pub struct TransformFactory;

impl TransformFactory {
    /// 创建绕Y轴旋转的变换矩阵（角度制）
    ///
    /// 与控制面板的约定一致：正角度使 +Z 轴转向 +X 轴的反方向
    pub fn rotation_y_degrees(degrees: f32) -> Matrix4<f32> {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Matrix4::new(
            cos, 0.0, -sin, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            sin, 0.0, cos, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// 创建平移矩阵
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(translation)
    }

    /// 创建均匀缩放矩阵（w 分量保持为 1）
    pub fn scaling(scale: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(scale, scale, scale))
    }

    /// 创建实例的世界变换：T(position) · R(orientation) · S(scale)
    pub fn world(position: &Vector3<f32>, orientation: &Matrix4<f32>, scale: f32) -> Matrix4<f32> {
        Self::translation(position) * orientation * Self::scaling(scale)
    }

    /// 创建相机视图矩阵：transpose(orientation) · T(-position)
    ///
    /// 正交旋转矩阵的转置即其逆矩阵
    pub fn view(orientation: &Matrix4<f32>, position: &Vector3<f32>) -> Matrix4<f32> {
        orientation.transpose() * Self::translation(&(-position))
    }
}

/// 以 w=1 的齐次坐标对顶点应用 4x4 变换，丢弃结果的 w 分量
#[inline]
pub fn transform_vertex(matrix: &Matrix4<f32>, vertex: &Vector3<f32>) -> Vector3<f32> {
    let homogeneous: Vector4<f32> = matrix * vertex.push(1.0);
    homogeneous.xyz()
}

/// 只应用 4x4 变换的线性部分（w=0），用于法线和方向
#[inline]
pub fn transform_direction(matrix: &Matrix4<f32>, direction: &Vector3<f32>) -> Vector3<f32> {
    matrix.fixed_view::<3, 3>(0, 0) * direction
}

/// 批量变换顶点
pub fn transform_vertices(matrix: &Matrix4<f32>, vertices: &[Vector3<f32>]) -> Vec<Vector3<f32>> {
    vertices
        .iter()
        .map(|vertex| transform_vertex(matrix, vertex))
        .collect()
}

/// 由三个顶点按给定绕序计算（未归一化的）面法线
pub fn triangle_normal(v0: &Vector3<f32>, v1: &Vector3<f32>, v2: &Vector3<f32>) -> Vector3<f32> {
    (v1 - v0).cross(&(v2 - v0))
}
