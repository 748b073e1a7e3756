use crate::material_system::color::{BLUE, CYAN, GREEN, PURPLE, RED, YELLOW};
use crate::scene::model_types::{Model, Rgb, Triangle};
use nalgebra::Vector3;
use std::f32::consts::PI;
use std::sync::Arc;

/// 边长为 2、中心在原点的立方体，每个面一种颜色
///
/// 所有三角形从外侧看为逆时针绕序，法线指向面外
pub fn cube() -> Result<Arc<Model>, String> {
    let vertices = vec![
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(-1.0, 1.0, 1.0),
        Vector3::new(-1.0, -1.0, 1.0),
        Vector3::new(1.0, -1.0, 1.0),
        Vector3::new(1.0, 1.0, -1.0),
        Vector3::new(-1.0, 1.0, -1.0),
        Vector3::new(-1.0, -1.0, -1.0),
        Vector3::new(1.0, -1.0, -1.0),
    ];

    let faces: [([usize; 3], Rgb, Vector3<f32>); 12] = [
        ([0, 1, 2], RED, Vector3::z()),
        ([0, 2, 3], RED, Vector3::z()),
        ([4, 0, 3], GREEN, Vector3::x()),
        ([4, 3, 7], GREEN, Vector3::x()),
        ([5, 4, 7], BLUE, -Vector3::z()),
        ([5, 7, 6], BLUE, -Vector3::z()),
        ([1, 5, 6], YELLOW, -Vector3::x()),
        ([1, 6, 2], YELLOW, -Vector3::x()),
        ([1, 0, 5], PURPLE, Vector3::y()),
        ([5, 0, 4], PURPLE, Vector3::y()),
        ([2, 6, 7], CYAN, -Vector3::y()),
        ([2, 7, 3], CYAN, -Vector3::y()),
    ];
    let triangles = faces
        .into_iter()
        .map(|(indices, color, normal)| Triangle::with_face_normal(indices, color, normal))
        .collect();

    Model::from_geometry(vertices, triangles).map(Arc::new)
}

/// 生成单位球：`divs` 条纬线带，每条 `divs` 段
///
/// 顶点按纬度从 y=-1 到 y=1 排列，顶点法线即顶点位置
pub fn generate_sphere(divs: usize, color: Rgb) -> Result<Arc<Model>, String> {
    let divs = divs.max(3);
    let delta_angle = 2.0 * PI / divs as f32;

    let mut vertices = Vec::with_capacity((divs + 1) * divs);
    for d in 0..=divs {
        let y = (2.0 / divs as f32) * (d as f32 - divs as f32 / 2.0);
        // 两极处舍入误差可能使 1 - y² 略小于 0
        let radius = (1.0 - y * y).max(0.0).sqrt();
        for i in 0..divs {
            let (sin, cos) = (i as f32 * delta_angle).sin_cos();
            vertices.push(Vector3::new(radius * cos, y, radius * sin));
        }
    }

    let mut triangles = Vec::with_capacity(2 * divs * divs);
    for d in 0..divs {
        for i in 0..divs {
            let i0 = d * divs + i;
            let i1 = (d + 1) * divs + (i + 1) % divs;
            let i2 = d * divs + (i + 1) % divs;
            for indices in [[i0, i1, i2], [i0, i0 + divs, i1]] {
                let normals = indices.map(|index| vertices[index]);
                triangles.push(Triangle::new(indices, color, normals));
            }
        }
    }

    Model::new(vertices, triangles, Vector3::zeros(), 1.0).map(Arc::new)
}
