//! Channel image types

use bytemuck::{Pod, Zeroable};

/// Row-major single plane image
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixel data, `width * height` elements
    pub data: Vec<T>,
}

impl<T: Copy + Default> Image<T> {
    /// Image filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self { width, height, data }
    }

    pub fn at(&self, x: usize, y: usize) -> &T {
        &self.data[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A point in the depth sensor's camera frame, meters. All zero means no measurement.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Point3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3f {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_valid(&self) -> bool {
        *self != Point3f::default()
    }
}

/// RGB pixels, `[r, g, b]`
pub type ColorImage = Image<[u8; 3]>;
pub type FloatImage = Image<f32>;
pub type UShortImage = Image<u16>;
pub type Point3fImage = Image<Point3f>;

/// Output of a channel computation
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelImage {
    Color(ColorImage),
    Float(FloatImage),
    UShort(UShortImage),
    Points(Point3fImage),
}

impl ChannelImage {
    pub fn width(&self) -> usize {
        match self {
            ChannelImage::Color(image) => image.width,
            ChannelImage::Float(image) => image.width,
            ChannelImage::UShort(image) => image.width,
            ChannelImage::Points(image) => image.width,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            ChannelImage::Color(image) => image.height,
            ChannelImage::Float(image) => image.height,
            ChannelImage::UShort(image) => image.height,
            ChannelImage::Points(image) => image.height,
        }
    }

    pub fn as_float(&self) -> Option<&FloatImage> {
        match self {
            ChannelImage::Float(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&Point3fImage> {
        match self {
            ChannelImage::Points(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&ColorImage> {
        match self {
            ChannelImage::Color(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_ushort(&self) -> Option<&UShortImage> {
        match self {
            ChannelImage::UShort(image) => Some(image),
            _ => None,
        }
    }
}
