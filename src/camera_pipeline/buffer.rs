//! Adapter owned frame storage
//!
//! Vendor buffers are recycled as soon as a frame is released, so every acquisition
//! is copied into buffers owned by the adapter before anything reads it.

mod owned;
mod frame_buffers;


pub use owned::OwnedImageBuffer;
pub use frame_buffers::FrameBuffers;
