//! Per-frame channel cache
//!
//! Derived channels are computed lazily, at most once per captured frame, and
//! dropped as soon as the next frame lands.

mod frame_cache;

#[cfg(test)]
mod tests;

pub use frame_cache::FrameCache;
