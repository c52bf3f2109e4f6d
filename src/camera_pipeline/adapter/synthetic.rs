use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;

use crate::camera_pipeline::raw::{
    Calibration, FrameHandle, FrameHealth, FrameSource, FrameWait, PixelFormat,
    RawFrameBuffer, RawFrameSet, Stream, VendorError,
};

const BASE_DEPTH_M: f32 = 1.5;

/// Generated frames in the layouts real vendors deliver.
///
/// Each stream is backed by one buffer that is rewritten in place for every
/// acquisition, the way vendor SDKs recycle their frame memory.
pub struct SyntheticSource {
    width: usize,
    height: usize,
    streams: BTreeMap<Stream, (PixelFormat, Vec<u8>)>,
    calibration: Calibration,
    focal_length: f32,
    timeout_every: Option<u64>,
    health: FrameHealth,
    open: bool,
    acquisitions: u64,
    outstanding: Option<u64>,
    released: u64,
}

impl SyntheticSource {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            streams: BTreeMap::new(),
            calibration: Calibration::FocalLength(width as f32),
            focal_length: width as f32,
            timeout_every: None,
            health: FrameHealth::Nominal,
            open: false,
            acquisitions: 0,
            outstanding: None,
            released: 0,
        }
    }

    /// Stereo head: Bayer color, float depth, two gray cameras, focal length per frame.
    pub fn mv6d(width: usize, height: usize) -> Self {
        Self::new(width, height)
            .with_stream(Stream::Color, PixelFormat::Bayer8)
            .with_stream(Stream::Depth, PixelFormat::Float32Depth)
            .with_stream(Stream::Left, PixelFormat::Gray8)
            .with_stream(Stream::Right, PixelFormat::Gray8)
            .with_calibration(Calibration::PerFrame)
    }

    /// Structured light: BGR color, millimeter depth, 16-bit infrared, 60 degree FOV.
    pub fn astra(width: usize, height: usize) -> Self {
        Self::new(width, height)
            .with_stream(Stream::Color, PixelFormat::Bgr8)
            .with_stream(Stream::Depth, PixelFormat::DepthMillimeters16)
            .with_stream(Stream::Infrared, PixelFormat::Gray16)
            .with_calibration(Calibration::HorizontalFov {
                radians: 60f32.to_radians(),
                width,
            })
    }

    /// ToF module: float depth and 16-bit amplitude.
    pub fn ti_voxel(width: usize, height: usize) -> Self {
        Self::new(width, height)
            .with_stream(Stream::Depth, PixelFormat::Float32Depth)
            .with_stream(Stream::Infrared, PixelFormat::Gray16)
    }

    /// Webcam: BGRA color only.
    pub fn directshow(width: usize, height: usize) -> Self {
        Self::new(width, height).with_stream(Stream::Color, PixelFormat::Bgra8)
    }

    pub fn with_stream(mut self, stream: Stream, format: PixelFormat) -> Self {
        let len = self.width * self.height * format.bytes_per_pixel();
        self.streams.insert(stream, (format, vec![0; len]));
        self
    }

    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Every `n`th acquisition times out.
    pub fn with_timeouts_every(mut self, n: u64) -> Self {
        self.timeout_every = Some(n.max(1));
        self
    }

    pub fn with_health(mut self, health: FrameHealth) -> Self {
        self.health = health;
        self
    }

    pub fn frames_released(&self) -> u64 {
        self.released
    }

    /// Depth in meters the generator puts at pixel (x, y) of acquisition `sequence`.
    pub fn depth_at(x: usize, y: usize, sequence: u64) -> f32 {
        BASE_DEPTH_M + 0.05 * ((x + y + sequence as usize) % 20) as f32
    }

    fn render(&mut self, sequence: u64) {
        let (width, height) = (self.width, self.height);
        for (stream, (format, bytes)) in self.streams.iter_mut() {
            for y in 0..height {
                for x in 0..width {
                    let i = y * width + x;
                    let level = ((x + y + sequence as usize) % 256) as u8;
                    let depth = Self::depth_at(x, y, sequence);
                    match format {
                        PixelFormat::Bgra8 => {
                            let bgra = [level, level / 2, 255 - level, 0];
                            bytes[i * 4..i * 4 + 4].copy_from_slice(&bgra);
                        }
                        PixelFormat::Bgr8 => {
                            let bgr = [level, level / 2, 255 - level];
                            bytes[i * 3..i * 3 + 3].copy_from_slice(&bgr);
                        }
                        PixelFormat::Gray8 | PixelFormat::Bayer8 => {
                            let shift = if *stream == Stream::Right { 4 } else { 0 };
                            bytes[i] = level.wrapping_add(shift);
                        }
                        PixelFormat::Gray16 => {
                            let amplitude = (x * 7 + y * 3 + sequence as usize) as u16;
                            bytes[i * 2..i * 2 + 2].copy_from_slice(&amplitude.to_le_bytes());
                        }
                        PixelFormat::Float32Depth => {
                            bytes[i * 4..i * 4 + 4].copy_from_slice(&depth.to_le_bytes());
                        }
                        PixelFormat::DepthMillimeters16 => {
                            let mm = (depth * 1000.0).round() as u16;
                            bytes[i * 2..i * 2 + 2].copy_from_slice(&mm.to_le_bytes());
                        }
                    }
                }
            }
        }
        // slowly drifting calibration, as a self-calibrating stereo head reports
        self.focal_length = self.width as f32 + (sequence % 4) as f32 * 0.25;
    }
}

impl FrameSource for SyntheticSource {
    fn open(&mut self) -> Result<(), VendorError> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), VendorError> {
        self.open = false;
        self.outstanding = None;
        Ok(())
    }

    fn calibration(&self) -> Result<Calibration, VendorError> {
        Ok(self.calibration)
    }

    fn acquire_frame(&mut self, _timeout: Duration) -> Result<FrameWait, VendorError> {
        if !self.open {
            return Err(VendorError::new(-1, "device not open"));
        }
        if self.outstanding.is_some() {
            return Err(VendorError::new(-2, "previous frame not released"));
        }

        self.acquisitions += 1;
        let sequence = self.acquisitions;
        if self.timeout_every.is_some_and(|n| sequence % n == 0) {
            trace!(sequence, "Synthetic timeout");
            return Ok(FrameWait::Timeout);
        }

        self.render(sequence);
        self.outstanding = Some(sequence);
        Ok(FrameWait::Frame(FrameHandle::new(sequence)))
    }

    fn frame(&self, _handle: &FrameHandle) -> RawFrameSet<'_> {
        let mut frame = RawFrameSet::new();
        for (stream, (format, bytes)) in &self.streams {
            let buffer = RawFrameBuffer::new(self.width, self.height, *format, bytes);
            frame = frame.with_buffer(*stream, buffer);
        }
        if self.calibration == Calibration::PerFrame {
            frame.focal_length = Some(self.focal_length);
        }
        frame.health = self.health.clone();
        frame
    }

    fn release_frame(&mut self, handle: FrameHandle) -> Result<(), VendorError> {
        if self.outstanding != Some(handle.sequence()) {
            return Err(VendorError::new(-4, format!("unknown frame {}", handle.sequence())));
        }
        self.outstanding = None;
        self.released += 1;
        Ok(())
    }
}
