//! Raw frame data types

/// Pixel layout of a vendor buffer. Multi-byte samples are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed blue, green, red, alpha bytes
    Bgra8,
    /// Packed blue, green, red bytes
    Bgr8,
    /// One byte per pixel
    Gray8,
    /// One u16 per pixel
    Gray16,
    /// One f32 per pixel, distance in meters
    Float32Depth,
    /// One u16 per pixel, distance in millimeters
    DepthMillimeters16,
    /// Single channel 8-bit Bayer mosaic
    Bayer8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgra8 | PixelFormat::Float32Depth => 4,
            PixelFormat::Bgr8 => 3,
            PixelFormat::Gray16 | PixelFormat::DepthMillimeters16 => 2,
            PixelFormat::Gray8 | PixelFormat::Bayer8 => 1,
        }
    }
}

/// The sensor stream a buffer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stream {
    Color,
    Depth,
    Infrared,
    /// Left camera of a stereo head
    Left,
    /// Right camera of a stereo head
    Right,
}

/// A vendor owned buffer. Only valid until the frame it came from is released.
#[derive(Debug, Clone, Copy)]
pub struct RawFrameBuffer<'a> {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub data: &'a [u8],
}

impl<'a> RawFrameBuffer<'a> {
    pub fn new(width: usize, height: usize, format: PixelFormat, data: &'a [u8]) -> Self {
        Self { width, height, format, data }
    }

    /// Bytes the declared geometry needs, or `None` when it does not fit in `usize`.
    pub fn expected_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.format.bytes_per_pixel())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Non-empty and long enough for its declared geometry.
    pub fn is_complete(&self) -> bool {
        !self.is_empty()
            && self
                .expected_len()
                .is_some_and(|required| self.data.len() >= required)
    }
}

/// Whether the device reported a problem that does not stop streaming,
/// e.g. a degraded projector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FrameHealth {
    #[default]
    Nominal,
    Degraded(String),
}

/// Everything one acquisition produced.
#[derive(Debug, Default)]
pub struct RawFrameSet<'a> {
    pub buffers: Vec<(Stream, RawFrameBuffer<'a>)>,
    /// Set by sources that recalibrate every frame.
    pub focal_length: Option<f32>,
    pub health: FrameHealth,
}

impl<'a> RawFrameSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(mut self, stream: Stream, buffer: RawFrameBuffer<'a>) -> Self {
        self.buffers.push((stream, buffer));
        self
    }

    pub fn get(&self, stream: Stream) -> Option<&RawFrameBuffer<'a>> {
        self.buffers
            .iter()
            .find(|(s, _)| *s == stream)
            .map(|(_, buffer)| buffer)
    }
}
