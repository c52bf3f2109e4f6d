pub mod camera_pipeline;
pub mod logger;
