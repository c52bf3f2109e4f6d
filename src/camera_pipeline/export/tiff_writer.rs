use std::io::{Cursor, Write};

use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, TiffValue};
use tracing::debug;

use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::config::{CameraConfig, TiffCompression};
use crate::camera_pipeline::export::writer::SnapshotWriter;
use crate::camera_pipeline::image::ChannelImage;

/// Color channels as RGB8, float channels as Gray32Float, 16-bit infrared as
/// Gray16 and point clouds as RGB32Float with x, y, z in the three samples.
pub struct TiffSnapshotWriter;

fn encode<C>(
    buffer: &mut Vec<u8>,
    width: usize,
    height: usize,
    data: &[C::Inner],
    compression: Compression,
) -> Result<()>
where
    C: ColorType,
    [C::Inner]: TiffValue,
{
    let mut encoder = TiffEncoder::new(Cursor::new(buffer))
        .map_err(|e| CameraError::EncodeError(e.to_string()))?
        .with_compression(compression);

    encoder
        .write_image::<C>(width as u32, height as u32, data)
        .map_err(|e| CameraError::EncodeError(e.to_string()))
}

impl SnapshotWriter for TiffSnapshotWriter {
    fn write_snapshot(
        &self,
        image: &ChannelImage,
        output: &mut dyn Write,
        config: &CameraConfig,
    ) -> Result<()> {
        let (width, height) = (image.width(), image.height());
        debug!("Encoding TIFF snapshot: {}x{}", width, height);

        if width == 0 || height == 0 {
            return Err(CameraError::InvalidDimensions(width, height));
        }

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut buffer = Vec::new();
        match image {
            ChannelImage::Color(color) => {
                let samples: &[u8] = bytemuck::cast_slice(&color.data);
                encode::<colortype::RGB8>(&mut buffer, width, height, samples, compression)?;
            }
            ChannelImage::Float(float) => {
                let samples = &float.data;
                encode::<colortype::Gray32Float>(&mut buffer, width, height, samples, compression)?;
            }
            ChannelImage::UShort(gray) => {
                encode::<colortype::Gray16>(&mut buffer, width, height, &gray.data, compression)?;
            }
            ChannelImage::Points(points) => {
                let samples: &[f32] = bytemuck::cast_slice(&points.data);
                encode::<colortype::RGB32Float>(&mut buffer, width, height, samples, compression)?;
            }
        }

        output.write_all(&buffer)?;

        debug!("TIFF snapshot complete, {} bytes", buffer.len());
        Ok(())
    }
}
