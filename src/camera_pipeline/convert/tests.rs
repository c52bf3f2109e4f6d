#[cfg(test)]
mod tests {
    use crate::camera_pipeline::common::error::CameraError;
    use crate::camera_pipeline::convert::{
        convert_bayer, convert_color, convert_depth_f32, convert_depth_mm_to_m,
        convert_gray16_with_row_offset, convert_gray8, widen_depth_native, BayerPattern,
    };
    use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer};

    fn gray16_bytes(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_bgra_to_rgb_drops_alpha() {
        let bgra = [10u8, 20, 30, 255, 1, 2, 3, 0];
        let image = convert_color(&RawFrameBuffer::new(2, 1, PixelFormat::Bgra8, &bgra)).unwrap();

        assert_eq!(image.data, vec![[30, 20, 10], [3, 2, 1]]);
    }

    #[test]
    fn test_bgr_to_rgb() {
        let bgr = [1u8, 2, 3, 4, 5, 6];
        let image = convert_color(&RawFrameBuffer::new(1, 2, PixelFormat::Bgr8, &bgr)).unwrap();

        assert_eq!(image.width, 1);
        assert_eq!(image.height, 2);
        assert_eq!(image.data, vec![[3, 2, 1], [6, 5, 4]]);
    }

    #[test]
    fn test_color_rejects_gray_input() {
        let result = convert_color(&RawFrameBuffer::new(2, 2, PixelFormat::Gray8, &[0u8; 4]));
        assert!(matches!(result.unwrap_err(), CameraError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_gray8_widens_without_scaling() {
        let buffer = RawFrameBuffer::new(3, 1, PixelFormat::Gray8, &[0, 128, 255]);
        let image = convert_gray8(&buffer).unwrap();
        assert_eq!(image.data, vec![0.0, 128.0, 255.0]);
    }

    #[test]
    fn test_row_offset_correction_640x480() {
        let (width, height, offset) = (640, 480, 8);
        let source: Vec<u16> = (0..width * height).map(|i| (i % 65521) as u16 + 1).collect();
        let bytes = gray16_bytes(&source);

        let image = convert_gray16_with_row_offset(
            &RawFrameBuffer::new(width, height, PixelFormat::Gray16, &bytes),
            offset,
        )
        .unwrap();

        for y in 0..offset {
            assert!(image.row(y).iter().all(|&v| v == 0), "row {} not zeroed", y);
        }
        assert_eq!(*image.at(0, 8), source[0]);
        for y in offset..height {
            assert_eq!(image.row(y), &source[(y - offset) * width..(y - offset + 1) * width]);
        }
    }

    #[test]
    fn test_row_offset_larger_than_image_is_all_zero() {
        let bytes = gray16_bytes(&[5, 6, 7, 8]);
        let buffer = RawFrameBuffer::new(2, 2, PixelFormat::Gray16, &bytes);
        let image = convert_gray16_with_row_offset(&buffer, 8).unwrap();
        assert!(image.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_depth_f32_reinterprets_bytes() {
        let values = [0.5f32, 1.25, -1.0, 3.0];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();

        let buffer = RawFrameBuffer::new(2, 2, PixelFormat::Float32Depth, &bytes);
        let image = convert_depth_f32(&buffer).unwrap();
        assert_eq!(image.data, values.to_vec());
    }

    #[test]
    fn test_depth_f32_from_unaligned_slice() {
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(&2.5f32.to_le_bytes());

        let buffer = RawFrameBuffer::new(1, 1, PixelFormat::Float32Depth, &bytes[1..]);
        let image = convert_depth_f32(&buffer).unwrap();
        assert_eq!(image.data, vec![2.5]);
    }

    #[test]
    fn test_millimeters_to_meters() {
        let bytes = gray16_bytes(&[0, 1000, 2500]);
        let buffer = RawFrameBuffer::new(3, 1, PixelFormat::DepthMillimeters16, &bytes);
        let image = convert_depth_mm_to_m(&buffer).unwrap();

        assert_eq!(image.data[0], 0.0);
        assert!((image.data[1] - 1.0).abs() < 1e-6);
        assert!((image.data[2] - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_widen_native_keeps_millimeters() {
        let bytes = gray16_bytes(&[1200]);
        let buffer = RawFrameBuffer::new(1, 1, PixelFormat::DepthMillimeters16, &bytes);
        let image = widen_depth_native(&buffer).unwrap();
        assert_eq!(image.data, vec![1200.0]);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let buffer = RawFrameBuffer::new(4, 4, PixelFormat::Float32Depth, &[0u8; 8]);
        let result = convert_depth_f32(&buffer);
        assert!(matches!(result.unwrap_err(), CameraError::InvalidDimensions(4, 4)));
    }

    #[test]
    fn test_overflowing_geometry_is_rejected() {
        let width = usize::MAX / 2 + 1;
        let buffer = RawFrameBuffer::new(width, 2, PixelFormat::Float32Depth, &[0u8; 16]);

        assert_eq!(buffer.expected_len(), None);
        assert!(!buffer.is_complete());
        assert!(matches!(
            widen_depth_native(&buffer).unwrap_err(),
            CameraError::InvalidDimensions(w, 2) if w == width
        ));
    }

    #[test]
    fn test_bayer_flat_gray_stays_gray() {
        let mosaic = vec![100u8; 8 * 8];
        let buffer = RawFrameBuffer::new(8, 8, PixelFormat::Bayer8, &mosaic);
        let image = convert_bayer(&buffer, BayerPattern::Rggb).unwrap();

        assert_eq!(image.len(), 64);
        assert_eq!(*image.at(4, 4), [100, 100, 100]);
    }
}
