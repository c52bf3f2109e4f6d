use std::collections::BTreeMap;

use crate::camera_pipeline::buffer::owned::OwnedImageBuffer;
use crate::camera_pipeline::common::error::Result;
use crate::camera_pipeline::raw::{RawFrameSet, Stream};

/// Owned copies of the latest data seen on each stream.
#[derive(Debug, Default)]
pub struct FrameBuffers {
    streams: BTreeMap<Stream, OwnedImageBuffer>,
    focal_length: Option<f32>,
}

impl FrameBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every buffer of `frame` and returns how many streams received new data.
    ///
    /// All storage is allocated before the first byte is copied, so on error the
    /// previous frame is left intact.
    pub fn store_frame(&mut self, frame: &RawFrameSet<'_>) -> Result<usize> {
        let mut staged = Vec::with_capacity(frame.buffers.len());
        for (stream, raw) in &frame.buffers {
            // first usable buffer of a stream wins
            if staged.iter().any(|(s, _, _)| s == stream) {
                continue;
            }
            let copy = match self.streams.get(stream) {
                Some(owned) => owned.stage(raw)?,
                None => OwnedImageBuffer::new(raw.format).stage(raw)?,
            };
            if let Some(copy) = copy {
                staged.push((*stream, raw, copy));
            }
        }

        let updated = staged.len();
        for (stream, raw, copy) in staged {
            self.streams
                .entry(stream)
                .or_insert_with(|| OwnedImageBuffer::new(raw.format))
                .commit(raw, copy);
        }
        if let Some(focal_length) = frame.focal_length {
            self.focal_length = Some(focal_length);
        }
        Ok(updated)
    }

    /// Buffer for `stream`, if that stream ever delivered data.
    pub fn get(&self, stream: Stream) -> Option<&OwnedImageBuffer> {
        self.streams.get(&stream)
    }

    /// Latest per-frame focal length, for sources that recalibrate continuously.
    pub fn focal_length(&self) -> Option<f32> {
        self.focal_length
    }

    pub fn set_focal_length(&mut self, focal_length: f32) {
        self.focal_length = Some(focal_length);
    }

    pub fn clear(&mut self) {
        self.streams.clear();
        self.focal_length = None;
    }
}
