use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::camera_pipeline::adapter::VendorProfile;
use crate::camera_pipeline::buffer::FrameBuffers;
use crate::camera_pipeline::channel::{channel_spec, resolve_order, ChannelInputs, ChannelKind};
use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::image::ChannelImage;

/// Dirty-flag cache over the channels of the current frame.
///
/// Idle until the first `begin_frame`. Every `begin_frame` drops all cached
/// channels before any of them can be recomputed from the new data.
#[derive(Debug, Default)]
pub struct FrameCache {
    frame_id: Option<u64>,
    entries: HashMap<ChannelKind, Arc<ChannelImage>>,
    compute_counts: HashMap<ChannelKind, u64>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self, frame_id: u64) {
        self.entries.clear();
        self.frame_id = Some(frame_id);
    }

    /// Back to idle, as after disconnect.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.frame_id = None;
    }

    pub fn frame_id(&self) -> Option<u64> {
        self.frame_id
    }

    pub fn is_cached(&self, kind: ChannelKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// How often `kind` has been computed since this cache was created.
    pub fn compute_count(&self, kind: ChannelKind) -> u64 {
        self.compute_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Returns the cached image for `kind`, computing it and its dependencies first
    /// if needed.
    ///
    /// `Ok(None)` means there is nothing to show yet: no frame was captured or the
    /// source buffer has zero size. A stream that never delivered data is an
    /// `AcquisitionIncomplete` error.
    #[instrument(level = "debug", skip(self, buffers, profile), fields(frame = ?self.frame_id))]
    pub fn request(
        &mut self,
        kind: ChannelKind,
        buffers: &FrameBuffers,
        profile: &VendorProfile,
    ) -> Result<Option<Arc<ChannelImage>>> {
        if self.frame_id.is_none() {
            return Ok(None);
        }
        if let Some(image) = self.entries.get(&kind) {
            return Ok(Some(Arc::clone(image)));
        }

        for step in resolve_order(kind)? {
            if self.entries.contains_key(&step) {
                continue;
            }

            let spec = channel_spec(step);
            for &stream in spec.streams {
                match buffers.get(stream) {
                    None => {
                        return Err(CameraError::AcquisitionIncomplete { channel: kind, stream });
                    }
                    Some(buffer) if buffer.is_empty() => return Ok(None),
                    Some(_) => {}
                }
            }

            let image = (spec.compute)(&ChannelInputs {
                buffers,
                profile,
                computed: &self.entries,
            })?;
            debug!(
                channel = %step,
                width = image.width(),
                height = image.height(),
                "Computed channel"
            );

            *self.compute_counts.entry(step).or_insert(0) += 1;
            self.entries.insert(step, Arc::new(image));
        }

        Ok(self.entries.get(&kind).cloned())
    }
}
