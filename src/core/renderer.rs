use crate::core::frame_buffer::{Canvas, DepthBuffer};
use crate::core::rasterizer::{RasterContext, render_triangle};
use crate::core::render_config::RenderConfig;
use crate::geometry::camera::Camera;
use crate::geometry::clipping::{ClippedModel, transform_and_clip};
use crate::geometry::projection::{CanvasPoint, Viewport};
use crate::material_system::light::Light;
use crate::scene::model_types::Instance;
use log::debug;

/// 单帧渲染统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// 被包围球整体剔除的实例数
    pub instances_culled: usize,
    /// 通过投影检查和背面剔除、进入扫描线填充的三角形数
    pub triangles_rasterized: usize,
    /// 通过深度测试并写入的像素数
    pub pixels_written: usize,
}

/// 渲染整个场景到图像与深度缓冲区
///
/// 视图矩阵只计算一次；每个实例独立地完成 剔除 → 裁剪 → 投影 → 光栅化，
/// 重叠部分由深度缓冲区决定，与实例顺序无关
pub fn render_scene(
    canvas: &mut Canvas,
    depth_buffer: &mut DepthBuffer,
    camera: &Camera,
    instances: &[Instance],
    lights: &[Light],
    config: &RenderConfig,
) -> Result<RenderStats, String> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(format!(
            "图像尺寸无效: {}x{}",
            canvas.width, canvas.height
        ));
    }
    if canvas.width != depth_buffer.width || canvas.height != depth_buffer.height {
        return Err(format!(
            "图像尺寸 {}x{} 与深度缓冲区尺寸 {}x{} 不一致",
            canvas.width, canvas.height, depth_buffer.width, depth_buffer.height
        ));
    }

    let viewport = Viewport::new(
        config.viewport_size,
        config.projection_plane_z,
        canvas.width,
        canvas.height,
    );
    let camera_matrix = camera.view_matrix();
    let mut stats = RenderStats::default();

    for (index, instance) in instances.iter().enumerate() {
        let transform = camera_matrix * instance.transform();
        let Some(clipped) = transform_and_clip(
            &camera.clipping_planes,
            instance.model(),
            instance.scale(),
            &transform,
        ) else {
            debug!("实例 {} 位于视锥之外，已剔除", index);
            stats.instances_culled += 1;
            continue;
        };

        let context = RasterContext::new(camera, lights, config, &viewport, instance.orientation());
        render_model(canvas, depth_buffer, &clipped, &context, &mut stats);
    }

    Ok(stats)
}

/// 投影裁剪后的模型并光栅化其全部三角形
fn render_model(
    canvas: &mut Canvas,
    depth_buffer: &mut DepthBuffer,
    model: &ClippedModel,
    context: &RasterContext,
    stats: &mut RenderStats,
) {
    let projected: Vec<Option<CanvasPoint>> = model
        .vertices
        .iter()
        .map(|vertex| context.viewport.project_vertex(vertex))
        .collect();

    for triangle in &model.triangles {
        if let Some(written) = render_triangle(
            canvas,
            depth_buffer,
            triangle,
            &model.vertices,
            &projected,
            context,
        ) {
            stats.triangles_rasterized += 1;
            stats.pixels_written += written;
        }
    }
}
