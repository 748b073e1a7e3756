pub mod color;
pub mod light;
