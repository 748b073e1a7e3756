pub mod frame_buffer;
pub mod rasterizer;
pub mod render_config;
pub mod renderer;
