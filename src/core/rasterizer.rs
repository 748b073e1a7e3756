//! # 扫描线光栅化
//!
//! 按行填充三角形：边插值 → 左右边界 → 行内插值 1/z 并做深度测试。
//! 平面、Gouraud、Phong 三种着色模型共用同一套填充流程，
//! 只是光照计算的粒度不同。

use crate::core::frame_buffer::{Canvas, DepthBuffer};
use crate::core::render_config::{RenderConfig, ShadingModel};
use crate::geometry::camera::Camera;
use crate::geometry::interpolation::{edge_interpolate, interpolate};
use crate::geometry::projection::{CanvasPoint, Viewport};
use crate::geometry::transform::{transform_direction, triangle_normal};
use crate::material_system::color::scale_color;
use crate::material_system::light::{Light, compute_illumination};
use crate::scene::model_types::Triangle;
use log::trace;
use nalgebra::{Matrix4, Vector3};

/// 投影坐标允许的最大绝对值，超出则视为退化三角形
pub const MAX_CANVAS_EXTENT: i32 = 1 << 15;

/// 光栅化单个模型时共享的只读上下文
pub struct RasterContext<'a> {
    pub camera: &'a Camera,
    pub lights: &'a [Light],
    pub config: &'a RenderConfig,
    pub viewport: &'a Viewport,
    /// 模型空间法线到相机空间的旋转：transpose(camera) · instance
    pub normal_transform: Matrix4<f32>,
}

impl<'a> RasterContext<'a> {
    pub fn new(
        camera: &'a Camera,
        lights: &'a [Light],
        config: &'a RenderConfig,
        viewport: &'a Viewport,
        instance_orientation: &Matrix4<f32>,
    ) -> Self {
        Self {
            camera,
            lights,
            config,
            viewport,
            normal_transform: camera.rotation_matrix() * instance_orientation,
        }
    }

    #[inline]
    fn illumination(&self, point: &Vector3<f32>, normal: &Vector3<f32>) -> f32 {
        compute_illumination(
            point,
            normal,
            self.camera,
            self.lights,
            self.config.lighting,
        )
    }
}

/// 按投影后的 y 升序排列三角形的三个顶点位置，y 相同时保持原顺序
///
/// 返回值是 `triangle.indices` 中的位置，而不是顶点索引本身
pub fn sorted_vertex_indexes(projected: &[CanvasPoint; 3]) -> [usize; 3] {
    let mut order = [0usize, 1, 2];
    order.sort_by_key(|&position| projected[position].y);
    order
}

/// 背面剔除：面法线由未排序的绕序计算，朝向远离原点时剔除
#[inline]
pub fn is_backface(vertex: &Vector3<f32>, normal: &Vector3<f32>) -> bool {
    vertex.dot(normal) >= 0.0
}

/// 一条扫描线上某种着色所需的左右边界属性
enum ShadingEdges {
    Flat(f32),
    Gouraud {
        left: Vec<f32>,
        right: Vec<f32>,
    },
    Phong {
        left: [Vec<f32>; 3],
        right: [Vec<f32>; 3],
    },
}

/// 光栅化一个三角形，返回写入的像素数
///
/// 含无法投影的顶点、投影范围过大或背面朝向相机的三角形返回 `None`
pub fn render_triangle(
    canvas: &mut Canvas,
    depth_buffer: &mut DepthBuffer,
    triangle: &Triangle,
    vertices: &[Vector3<f32>],
    projected: &[Option<CanvasPoint>],
    context: &RasterContext,
) -> Option<usize> {
    let [Some(q0), Some(q1), Some(q2)] = triangle.indices.map(|i| projected[i]) else {
        trace!("三角形 {:?} 含有无法投影的顶点，跳过", triangle.indices);
        return None;
    };
    let points = [q0, q1, q2];
    if points
        .iter()
        .any(|p| p.x.abs() > MAX_CANVAS_EXTENT || p.y.abs() > MAX_CANVAS_EXTENT)
    {
        trace!("三角形 {:?} 投影范围过大，跳过", triangle.indices);
        return None;
    }

    let [i0, i1, i2] = sorted_vertex_indexes(&points);
    let v = triangle.indices.map(|i| vertices[i]);

    // 使用未排序的顶点计算面法线，否则绕序可能改变
    let normal = triangle_normal(&v[0], &v[1], &v[2]);
    if is_backface(&v[0], &normal) {
        return None;
    }

    let (p0, p1, p2) = (points[i0], points[i1], points[i2]);
    let (v0, v1, v2) = (v[i0], v[i1], v[i2]);

    // 顶点属性 (x, 1/z) 的边插值
    let (x02, x012) = edge_interpolate(p0.y, p0.x as f32, p1.y, p1.x as f32, p2.y, p2.x as f32);
    let (iz02, iz012) = edge_interpolate(p0.y, 1.0 / v0.z, p1.y, 1.0 / v1.z, p2.y, 1.0 / v2.z);

    let (n0, n1, n2) = if context.config.use_vertex_normals {
        (
            transform_direction(&context.normal_transform, &triangle.normals[i0]),
            transform_direction(&context.normal_transform, &triangle.normals[i1]),
            transform_direction(&context.normal_transform, &triangle.normals[i2]),
        )
    } else {
        (normal, normal, normal)
    };

    // 在中间一行比较 x，较小的一侧为左边界
    let middle = x02.len() / 2;
    let long_is_left = x02[middle] < x012[middle];

    let shading = match context.config.shading {
        ShadingModel::Flat => {
            let center = (v0 + v1 + v2) / 3.0;
            ShadingEdges::Flat(context.illumination(&center, &normal))
        }
        ShadingModel::Gouraud => {
            let l0 = context.illumination(&v0, &n0);
            let l1 = context.illumination(&v1, &n1);
            let l2 = context.illumination(&v2, &n2);
            let (left, right) =
                pick_pair(edge_interpolate(p0.y, l0, p1.y, l1, p2.y, l2), long_is_left);
            ShadingEdges::Gouraud { left, right }
        }
        ShadingModel::Phong => {
            let (lx, rx) = pick_pair(
                edge_interpolate(p0.y, n0.x, p1.y, n1.x, p2.y, n2.x),
                long_is_left,
            );
            let (ly, ry) = pick_pair(
                edge_interpolate(p0.y, n0.y, p1.y, n1.y, p2.y, n2.y),
                long_is_left,
            );
            let (lz, rz) = pick_pair(
                edge_interpolate(p0.y, n0.z, p1.y, n1.z, p2.y, n2.z),
                long_is_left,
            );
            ShadingEdges::Phong {
                left: [lx, ly, lz],
                right: [rx, ry, rz],
            }
        }
    };

    let (x_left, x_right) = pick_pair((x02, x012), long_is_left);
    let (iz_left, iz_right) = pick_pair((iz02, iz012), long_is_left);

    let (visible_x0, visible_x1) = canvas.visible_x_range();
    let (visible_y0, visible_y1) = canvas.visible_y_range();
    let mut written = 0;

    for y in p0.y.max(visible_y0)..=p2.y.min(visible_y1 - 1) {
        let row = (y - p0.y) as usize;
        let xl = x_left[row] as i32;
        let xr = x_right[row] as i32;
        if xr <= xl {
            continue;
        }

        let zscan = interpolate(xl, iz_left[row], xr, iz_right[row]);
        let row_shading = RowShading::new(&shading, row, xl, xr);

        for x in xl.max(visible_x0)..xr.min(visible_x1) {
            let column = (x - xl) as usize;
            let inv_z = zscan[column];
            if !depth_buffer.update_if_closer(x, y, inv_z) {
                continue;
            }

            let intensity = match &row_shading {
                RowShading::Flat(intensity) => *intensity,
                RowShading::Gouraud(iscan) => iscan[column],
                RowShading::Phong([nx, ny, nz]) => {
                    let normal = Vector3::new(nx[column], ny[column], nz[column]);
                    context
                        .viewport
                        .unproject_vertex(x, y, inv_z)
                        .map_or(0.0, |point| context.illumination(&point, &normal))
                }
            };

            canvas.put_pixel(x, y, scale_color(triangle.color, intensity));
            written += 1;
        }
    }

    Some(written)
}

/// 按左右关系拆分 `edge_interpolate` 的结果
#[inline]
fn pick_pair((long, short): (Vec<f32>, Vec<f32>), long_is_left: bool) -> (Vec<f32>, Vec<f32>) {
    if long_is_left {
        (long, short)
    } else {
        (short, long)
    }
}

/// 单条扫描线内逐像素的光照数据
enum RowShading {
    Flat(f32),
    Gouraud(Vec<f32>),
    Phong([Vec<f32>; 3]),
}

impl RowShading {
    fn new(edges: &ShadingEdges, row: usize, xl: i32, xr: i32) -> Self {
        match edges {
            ShadingEdges::Flat(intensity) => RowShading::Flat(*intensity),
            ShadingEdges::Gouraud { left, right } => {
                RowShading::Gouraud(interpolate(xl, left[row], xr, right[row]))
            }
            ShadingEdges::Phong { left, right } => RowShading::Phong([
                interpolate(xl, left[0][row], xr, right[0][row]),
                interpolate(xl, left[1][row], xr, right[1][row]),
                interpolate(xl, left[2][row], xr, right[2][row]),
            ]),
        }
    }
}
