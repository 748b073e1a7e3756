//! # 视锥裁剪
//!
//! 包围球粗剔除 + 逐平面三角形裁剪。裁剪产生的新顶点追加到顶点列表末尾，
//! 三角形始终以索引引用顶点。

use crate::geometry::camera::Plane;
use crate::geometry::transform::{transform_vertex, transform_vertices};
use crate::scene::model_types::{Model, Triangle};
use log::trace;
use nalgebra::{Matrix4, Vector3};

/// 相机空间中经过裁剪的模型
#[derive(Debug, Clone)]
pub struct ClippedModel {
    pub vertices: Vec<Vector3<f32>>,
    pub triangles: Vec<Triangle>,
}

/// 包围球是否完全位于某个裁剪平面之外
pub fn is_sphere_outside(planes: &[Plane], center: &Vector3<f32>, radius: f32) -> bool {
    planes
        .iter()
        .any(|plane| plane.signed_distance(center) < -radius)
}

/// 变换模型到相机空间并依次对每个平面裁剪
///
/// 包围球完全在任一平面之外时直接返回 `None`
pub fn transform_and_clip(
    planes: &[Plane],
    model: &Model,
    scale: f32,
    transform: &Matrix4<f32>,
) -> Option<ClippedModel> {
    let center = transform_vertex(transform, &model.bounds_center);
    let radius = model.bounds_radius * scale;
    if is_sphere_outside(planes, &center, radius) {
        trace!("包围球 {:?} (r={}) 位于视锥之外", center, radius);
        return None;
    }

    let mut vertices = transform_vertices(transform, &model.vertices);

    let mut triangles = model.triangles.clone();
    for plane in planes {
        let mut clipped = Vec::with_capacity(triangles.len());
        for triangle in &triangles {
            clip_triangle(triangle, plane, &mut clipped, &mut vertices);
        }
        triangles = clipped;
    }

    Some(ClippedModel {
        vertices,
        triangles,
    })
}

/// 用单个平面裁剪三角形，结果追加到 `triangles`，新顶点追加到 `vertices`
pub fn clip_triangle(
    triangle: &Triangle,
    plane: &Plane,
    triangles: &mut Vec<Triangle>,
    vertices: &mut Vec<Vector3<f32>>,
) {
    let inside = triangle
        .indices
        .map(|index| plane.is_inside(&vertices[index]));
    let in_count = inside.iter().filter(|&&flag| flag).count();

    match in_count {
        0 => {}
        3 => triangles.push(triangle.clone()),
        1 => {
            // 把唯一的内侧顶点旋转到首位：[A(内), B(外), C(外)]
            let shift = inside.iter().position(|&flag| flag).unwrap_or(0);
            let t = triangle.rotated(shift);
            let [a, b, c] = t.indices;

            let (b_prime, nb) = split_edge(plane, vertices, a, b, &t.normals[0], &t.normals[1]);
            let (c_prime, nc) = split_edge(plane, vertices, a, c, &t.normals[0], &t.normals[2]);

            triangles.push(Triangle::new(
                [a, b_prime, c_prime],
                t.color,
                [t.normals[0], nb, nc],
            ));
        }
        _ => {
            // 把唯一的外侧顶点旋转到末位：[A(内), B(内), C(外)]
            let outside = inside.iter().position(|&flag| !flag).unwrap_or(2);
            let t = triangle.rotated((outside + 1) % 3);
            let [a, b, c] = t.indices;

            let (a_prime, na) = split_edge(plane, vertices, a, c, &t.normals[0], &t.normals[2]);
            let (b_prime, nb) = split_edge(plane, vertices, b, c, &t.normals[1], &t.normals[2]);

            // 四边形 A, B, B', A'
            triangles.push(Triangle::new(
                [a, b, b_prime],
                t.color,
                [t.normals[0], t.normals[1], nb],
            ));
            triangles.push(Triangle::new(
                [a, b_prime, a_prime],
                t.color,
                [t.normals[0], nb, na],
            ));
        }
    }
}

/// 求边 (from, to) 与平面的交点，追加为新顶点，返回其索引和插值法线
fn split_edge(
    plane: &Plane,
    vertices: &mut Vec<Vector3<f32>>,
    from: usize,
    to: usize,
    from_normal: &Vector3<f32>,
    to_normal: &Vector3<f32>,
) -> (usize, Vector3<f32>) {
    let a = vertices[from];
    let b = vertices[to];
    let t = intersection_parameter(plane, &a, &b);

    vertices.push(a + (b - a) * t);
    (vertices.len() - 1, from_normal + (to_normal - from_normal) * t)
}

/// 线段 a + t(b - a) 与平面交点的参数 t，限制在 [0, 1]
pub fn intersection_parameter(plane: &Plane, a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    let denominator = plane.normal.dot(&(b - a));
    if denominator.abs() <= f32::EPSILON {
        return 0.0;
    }
    ((-plane.distance - plane.normal.dot(a)) / denominator).clamp(0.0, 1.0)
}
