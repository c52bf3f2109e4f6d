use crate::camera_pipeline::common::error::Result;
use crate::camera_pipeline::convert::check_buffer;
use crate::camera_pipeline::image::{FloatImage, UShortImage};
use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer};

/// Widens 8-bit gray to f32 without scaling.
pub fn convert_gray8(buffer: &RawFrameBuffer<'_>) -> Result<FloatImage> {
    check_buffer(buffer, &[PixelFormat::Gray8])?;

    let pixels = buffer.width * buffer.height;
    let data = buffer.data[..pixels].iter().map(|&v| v as f32).collect();
    Ok(FloatImage::from_vec(buffer.width, buffer.height, data))
}

/// Copies 16-bit gray as is.
pub fn convert_gray16(buffer: &RawFrameBuffer<'_>) -> Result<UShortImage> {
    convert_gray16_with_row_offset(buffer, 0)
}

/// Copies 16-bit gray shifted down by `row_offset` scanlines.
///
/// Rows `[0, row_offset)` are zero, output row `y` is source row `y - row_offset`,
/// and the last `row_offset` source rows are dropped.
pub fn convert_gray16_with_row_offset(
    buffer: &RawFrameBuffer<'_>,
    row_offset: usize,
) -> Result<UShortImage> {
    check_buffer(buffer, &[PixelFormat::Gray16])?;

    let width = buffer.width;
    let height = buffer.height;
    let mut image = UShortImage::new(width, height);
    let shift = row_offset.min(height);
    let row_bytes = width * 2;

    for y in shift..height {
        let src = &buffer.data[(y - shift) * row_bytes..(y - shift + 1) * row_bytes];
        let dst = &mut image.data[y * width..(y + 1) * width];
        for (out, sample) in dst.iter_mut().zip(src.chunks_exact(2)) {
            *out = u16::from_le_bytes([sample[0], sample[1]]);
        }
    }

    Ok(image)
}
