use tracing::{debug, warn};

use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer};

/// A validated copy waiting to be committed, with a fresh allocation when the
/// byte size changed.
#[derive(Debug)]
pub(crate) struct StagedCopy {
    required: usize,
    fresh: Option<Vec<u8>>,
}

/// Stable copy of one vendor buffer.
///
/// Storage is reallocated only when the byte size of an incoming frame differs
/// from the current allocation and reused in place otherwise.
#[derive(Debug, Clone)]
pub struct OwnedImageBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    bytes: Vec<u8>,
}

impl OwnedImageBuffer {
    pub fn new(format: PixelFormat) -> Self {
        Self {
            width: 0,
            height: 0,
            format,
            bytes: Vec::new(),
        }
    }

    /// Copies `raw` into this buffer.
    ///
    /// Returns `Ok(false)` and keeps the previous contents when the vendor delivered
    /// no data, fewer bytes than its declared geometry needs, or a geometry whose
    /// size overflows.
    pub fn store(&mut self, raw: &RawFrameBuffer<'_>) -> Result<bool> {
        match self.stage(raw)? {
            Some(staged) => {
                self.commit(raw, staged);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Validates `raw` and allocates any storage it needs without touching the
    /// current contents. `None` means the buffer carries no usable data.
    pub(crate) fn stage(&self, raw: &RawFrameBuffer<'_>) -> Result<Option<StagedCopy>> {
        if raw.is_empty() {
            debug!("Empty {:?} buffer, keeping previous data", raw.format);
            return Ok(None);
        }

        let Some(required) = raw.expected_len() else {
            warn!(
                format = ?raw.format,
                width = raw.width,
                height = raw.height,
                "Vendor geometry overflows, keeping previous data"
            );
            return Ok(None);
        };
        if raw.data.len() < required {
            warn!(
                format = ?raw.format,
                expected = required,
                actual = raw.data.len(),
                "Short vendor buffer, keeping previous data"
            );
            return Ok(None);
        }

        let fresh = if self.bytes.len() != required {
            let mut fresh = Vec::new();
            fresh
                .try_reserve_exact(required)
                .map_err(|_| CameraError::Allocation(required))?;
            fresh.resize(required, 0);
            Some(fresh)
        } else {
            None
        };

        Ok(Some(StagedCopy { required, fresh }))
    }

    /// Copies `raw` using storage prepared by `stage`. Cannot fail.
    pub(crate) fn commit(&mut self, raw: &RawFrameBuffer<'_>, staged: StagedCopy) {
        if let Some(fresh) = staged.fresh {
            debug!(
                "Reallocating {:?} buffer: {} -> {} bytes",
                raw.format,
                self.bytes.len(),
                staged.required
            );
            self.bytes = fresh;
        }

        self.bytes.copy_from_slice(&raw.data[..staged.required]);
        self.width = raw.width;
        self.height = raw.height;
        self.format = raw.format;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// True until the first successful `store`, and for zero sized frames.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.bytes.is_empty()
    }

    pub fn as_raw(&self) -> RawFrameBuffer<'_> {
        RawFrameBuffer::new(self.width, self.height, self.format, &self.bytes)
    }
}
