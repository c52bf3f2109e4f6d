//! Camera configuration module

pub mod types;

pub use types::{CameraConfig, CameraConfigBuilder, TiffCompression};
