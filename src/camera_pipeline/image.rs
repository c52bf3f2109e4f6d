//! Typed channel images

pub mod types;

pub use types::{ChannelImage, ColorImage, FloatImage, Image, Point3f, Point3fImage, UShortImage};
