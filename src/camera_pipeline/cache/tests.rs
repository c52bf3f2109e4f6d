#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::camera_pipeline::adapter::VendorProfile;
    use crate::camera_pipeline::buffer::FrameBuffers;
    use crate::camera_pipeline::cache::FrameCache;
    use crate::camera_pipeline::channel::ChannelKind;
    use crate::camera_pipeline::common::error::CameraError;
    use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer, RawFrameSet, Stream};

    fn depth_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn buffers_with_depth(width: usize, height: usize, depth: &[f32]) -> FrameBuffers {
        let bytes = depth_bytes(depth);
        let mut frame = RawFrameSet::new()
            .with_buffer(
                Stream::Depth,
                RawFrameBuffer::new(width, height, PixelFormat::Float32Depth, &bytes),
            );
        frame.focal_length = Some(2.0);

        let mut buffers = FrameBuffers::new();
        buffers.store_frame(&frame).unwrap();
        buffers
    }

    #[test]
    fn test_idle_cache_returns_nothing() {
        let buffers = buffers_with_depth(2, 2, &[1.0; 4]);
        let mut cache = FrameCache::new();

        let image = cache.request(ChannelKind::Distance, &buffers, &VendorProfile::mv6d()).unwrap();

        assert!(image.is_none());
        assert_eq!(cache.compute_count(ChannelKind::Distance), 0);
    }

    #[test]
    fn test_repeated_request_computes_once() {
        let buffers = buffers_with_depth(4, 4, &[1.0; 16]);
        let profile = VendorProfile::mv6d();
        let mut cache = FrameCache::new();
        cache.begin_frame(1);

        let first = cache.request(ChannelKind::Distance, &buffers, &profile).unwrap().unwrap();
        let second = cache.request(ChannelKind::Distance, &buffers, &profile).unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert_eq!(cache.compute_count(ChannelKind::Distance), 1);
        assert_eq!(cache.compute_count(ChannelKind::Point3DImage), 1);
        assert_eq!(cache.compute_count(ChannelKind::RawDepth), 1);
    }

    #[test]
    fn test_dependencies_are_shared_between_channels() {
        let buffers = buffers_with_depth(4, 4, &[1.0; 16]);
        let profile = VendorProfile::mv6d();
        let mut cache = FrameCache::new();
        cache.begin_frame(1);

        cache.request(ChannelKind::Distance, &buffers, &profile).unwrap();
        assert!(cache.is_cached(ChannelKind::Point3DImage));

        cache.request(ChannelKind::Point3DImage, &buffers, &profile).unwrap();
        assert_eq!(cache.compute_count(ChannelKind::Point3DImage), 1);
    }

    #[test]
    fn test_new_frame_invalidates_every_channel() {
        let profile = VendorProfile::mv6d();
        let mut cache = FrameCache::new();

        let buffers = buffers_with_depth(2, 2, &[1.0; 4]);
        cache.begin_frame(1);
        let before = cache.request(ChannelKind::ZImage, &buffers, &profile).unwrap().unwrap();

        let buffers = buffers_with_depth(2, 2, &[3.0; 4]);
        cache.begin_frame(2);
        assert!(!cache.is_cached(ChannelKind::ZImage));
        let after = cache.request(ChannelKind::ZImage, &buffers, &profile).unwrap().unwrap();

        assert_eq!(before.as_float().unwrap().data, vec![1.0; 4]);
        assert_eq!(after.as_float().unwrap().data, vec![3.0; 4]);
        assert_eq!(cache.compute_count(ChannelKind::ZImage), 2);
    }

    #[test]
    fn test_missing_stream_is_acquisition_incomplete() {
        let buffers = buffers_with_depth(2, 2, &[1.0; 4]);
        let mut cache = FrameCache::new();
        cache.begin_frame(1);

        let result = cache.request(ChannelKind::Color, &buffers, &VendorProfile::mv6d());

        assert!(matches!(
            result.unwrap_err(),
            CameraError::AcquisitionIncomplete {
                channel: ChannelKind::Color,
                stream: Stream::Color
            }
        ));
    }

    #[test]
    fn test_zero_sized_frame_short_circuits() {
        let buffers = buffers_with_depth(0, 0, &[1.0]);
        let mut cache = FrameCache::new();
        cache.begin_frame(1);

        let image = cache.request(ChannelKind::Distance, &buffers, &VendorProfile::mv6d()).unwrap();

        assert!(image.is_none());
        assert_eq!(cache.compute_count(ChannelKind::RawDepth), 0);
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let buffers = buffers_with_depth(2, 2, &[1.0; 4]);
        let mut cache = FrameCache::new();
        cache.begin_frame(7);
        cache.request(ChannelKind::ZImage, &buffers, &VendorProfile::mv6d()).unwrap();

        cache.clear();

        assert_eq!(cache.frame_id(), None);
        assert!(!cache.is_cached(ChannelKind::ZImage));
    }
}
