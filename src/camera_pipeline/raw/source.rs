use std::fmt;
use std::time::Duration;

use crate::camera_pipeline::raw::types::RawFrameSet;

/// Error code and message as reported by a vendor SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorError {
    pub code: i32,
    pub message: String,
}

impl VendorError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for VendorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vendor error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for VendorError {}

/// Token for an acquired frame. It is consumed by `FrameSource::release_frame`,
/// so a frame cannot be released twice.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameHandle {
    sequence: u64,
}

impl FrameHandle {
    pub fn new(sequence: u64) -> Self {
        Self { sequence }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug)]
pub enum FrameWait {
    Frame(FrameHandle),
    Timeout,
}

/// Where the focal length of the depth sensor comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration {
    /// Fixed focal length in pixels
    FocalLength(f32),
    /// Horizontal field of view of a sensor `width` pixels wide
    HorizontalFov { radians: f32, width: usize },
    /// Delivered with every frame in `RawFrameSet::focal_length`
    PerFrame,
}

/// A vendor camera handle.
///
/// `acquire_frame` is the only call allowed to block. Every `Frame` it returns
/// must be handed back through `release_frame`.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<(), VendorError>;
    fn close(&mut self) -> Result<(), VendorError>;
    fn calibration(&self) -> Result<Calibration, VendorError>;
    fn acquire_frame(&mut self, timeout: Duration) -> Result<FrameWait, VendorError>;
    fn frame(&self, handle: &FrameHandle) -> RawFrameSet<'_>;
    fn release_frame(&mut self, handle: FrameHandle) -> Result<(), VendorError>;
}
