use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::convert::check_buffer;
use crate::camera_pipeline::image::ColorImage;
use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer};

/// Color filter layout of the top-left 2x2 tile of a Bayer sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BayerPattern {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl From<BayerPattern> for CFA {
    fn from(pattern: BayerPattern) -> Self {
        match pattern {
            BayerPattern::Rggb => CFA::RGGB,
            BayerPattern::Bggr => CFA::BGGR,
            BayerPattern::Grbg => CFA::GRBG,
            BayerPattern::Gbrg => CFA::GBRG,
        }
    }
}

/// Demosaics an 8-bit Bayer mosaic into RGB with linear interpolation.
pub fn convert_bayer(buffer: &RawFrameBuffer<'_>, pattern: BayerPattern) -> Result<ColorImage> {
    check_buffer(buffer, &[PixelFormat::Bayer8])?;
    demosaic(buffer, pattern).map_err(|e| CameraError::Debayer(e.to_string()))
}

fn demosaic(buffer: &RawFrameBuffer<'_>, pattern: BayerPattern) -> anyhow::Result<ColorImage> {
    let width = buffer.width;
    let height = buffer.height;
    debug!("Demosaicing {}x{} mosaic, CFA={:?}", width, height, pattern);

    let mut output_buf = vec![0u8; width * height * 3];
    let mut cursor = Cursor::new(&buffer.data[..width * height]);

    let mut output_raster = RasterMut::new(
        width,
        height,
        RasterDepth::Depth8,
        &mut output_buf,
    );

    bayer::run_demosaic(
        &mut cursor,
        BayerDepth::Depth8,
        pattern.into(),
        Demosaic::Linear,
        &mut output_raster,
    )
    .map_err(|e| anyhow::anyhow!("Demosaic failed: {:?}", e))?;

    let data = output_buf
        .chunks_exact(3)
        .map(|rgb| [rgb[0], rgb[1], rgb[2]])
        .collect();

    Ok(ColorImage::from_vec(width, height, data))
}
