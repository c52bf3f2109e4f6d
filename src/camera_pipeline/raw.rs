//! Raw vendor frame module
//!
//! This module describes the buffers a vendor SDK hands out for one acquisition and
//! the `FrameSource` seam every camera backend implements.

mod source;
pub mod types;

pub use source::{Calibration, FrameHandle, FrameSource, FrameWait, VendorError};
pub use types::{FrameHealth, PixelFormat, RawFrameBuffer, RawFrameSet, Stream};
