// geometry/mod.rs
// 导出几何、投影与裁剪相关模块
pub mod camera;
pub mod clipping;
pub mod interpolation;
pub mod projection;
pub mod transform;
