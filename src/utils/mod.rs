// utils/mod.rs
pub mod save_utils;
