use log::{debug, error, info};
use std::time::Instant;

mod core;
mod geometry;
mod io;
mod material_system;
mod scene;
mod utils;

use crate::core::frame_buffer::{Canvas, DepthBuffer};
use crate::core::renderer::render_scene;
use crate::io::render_settings::RenderSettings;
use crate::io::simple_cli::SimpleCli;
use crate::scene::scene_utils::Scene;
use crate::utils::save_utils::save_render_result;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = SimpleCli::process().and_then(|settings| run(&settings)) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(settings: &RenderSettings) -> Result<(), String> {
    let start_time = Instant::now();
    let config = settings.to_render_config();
    info!(
        "渲染 {}x{} {}, {}",
        settings.width,
        settings.height,
        settings.figure.name(),
        config.get_lighting_description()
    );

    let scene = Scene::from_settings(settings)?;
    let mut canvas = Canvas::new(settings.width, settings.height, settings.background);
    let mut depth_buffer = DepthBuffer::new(settings.width, settings.height);

    let stats = render_scene(
        &mut canvas,
        &mut depth_buffer,
        &scene.camera,
        &scene.instances,
        &scene.lights,
        &config,
    )?;
    debug!(
        "剔除实例: {}, 光栅化三角形: {}, 写入像素: {}",
        stats.instances_culled, stats.triangles_rasterized, stats.pixels_written
    );
    info!("渲染完成，耗时 {:?}", start_time.elapsed());

    let depth = settings.save_depth.then_some(&depth_buffer);
    save_render_result(&canvas, depth, &settings.output_dir, &settings.output)?;

    Ok(())
}
