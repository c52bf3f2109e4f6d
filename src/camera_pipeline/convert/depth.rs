use crate::camera_pipeline::common::error::Result;
use crate::camera_pipeline::convert::check_buffer;
use crate::camera_pipeline::image::FloatImage;
use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer};

pub const MILLIMETERS_TO_METERS: f32 = 0.001;

/// Reinterprets a little-endian f32 depth buffer. Values stay in meters.
pub fn convert_depth_f32(buffer: &RawFrameBuffer<'_>) -> Result<FloatImage> {
    let len = check_buffer(buffer, &[PixelFormat::Float32Depth])?;
    Ok(FloatImage::from_vec(buffer.width, buffer.height, read_f32(&buffer.data[..len])))
}

/// Millimeter depth to meters.
pub fn convert_depth_mm_to_m(buffer: &RawFrameBuffer<'_>) -> Result<FloatImage> {
    let len = check_buffer(buffer, &[PixelFormat::DepthMillimeters16])?;

    let data = read_u16(&buffer.data[..len])
        .map(|mm| mm as f32 * MILLIMETERS_TO_METERS)
        .collect();
    Ok(FloatImage::from_vec(buffer.width, buffer.height, data))
}

/// Depth in whatever unit the sensor reports, as f32.
///
/// The reprojector applies the per-vendor unit scale, so millimeter sensors are
/// widened here without scaling.
pub fn widen_depth_native(buffer: &RawFrameBuffer<'_>) -> Result<FloatImage> {
    let len = check_buffer(
        buffer,
        &[PixelFormat::Float32Depth, PixelFormat::DepthMillimeters16],
    )?;

    let payload = &buffer.data[..len];
    let data = match buffer.format {
        PixelFormat::Float32Depth => read_f32(payload),
        _ => read_u16(payload).map(|mm| mm as f32).collect(),
    };
    Ok(FloatImage::from_vec(buffer.width, buffer.height, data))
}

fn read_f32(payload: &[u8]) -> Vec<f32> {
    // Vendor buffers carry no alignment guarantee
    payload
        .chunks_exact(4)
        .map(|bytes| f32::from_bits(u32::from_le(bytemuck::pod_read_unaligned(bytes))))
        .collect()
}

fn read_u16(payload: &[u8]) -> impl Iterator<Item = u16> + '_ {
    payload
        .chunks_exact(2)
        .map(|bytes| u16::from_le_bytes([bytes[0], bytes[1]]))
}
