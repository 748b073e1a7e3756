pub mod model_types;
pub mod primitives;
pub mod scene_utils;
