use std::io::Write;

use crate::camera_pipeline::common::error::Result;
use crate::camera_pipeline::config::CameraConfig;
use crate::camera_pipeline::image::ChannelImage;

pub trait SnapshotWriter {
    fn write_snapshot(
        &self,
        image: &ChannelImage,
        output: &mut dyn Write,
        config: &CameraConfig,
    ) -> Result<()>;
}
