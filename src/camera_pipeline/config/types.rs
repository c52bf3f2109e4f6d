//! Camera configuration types

use std::time::Duration;

/// Compression applied to snapshot files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// Uncompressed strips; quickest to write from the capture loop
    None,
    /// LZW, smaller files for 8 bit colour and intensity snapshots
    Lzw,
    /// Deflate at its fastest level
    DeflateFast,
    /// Deflate at its strongest level, for archived depth maps
    DeflateBest,
    /// Deflate at the default level
    DeflateBalanced,
}

/// Configuration of one camera adapter
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Upper bound for one blocking wait on the vendor SDK
    pub acquire_timeout: Duration,
    /// Whether to drop buffers larger than `max_dimension`
    pub validate_dimensions: bool,
    /// Largest accepted width or height
    pub max_dimension: Option<usize>,
    /// Compression used by snapshot export
    pub compression: TiffCompression,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(2),
            validate_dimensions: true,
            max_dimension: None,
            compression: TiffCompression::None,
        }
    }
}

impl CameraConfig {
    pub fn builder() -> CameraConfigBuilder {
        CameraConfigBuilder::default()
    }
}

/// Builder for CameraConfig
#[derive(Default)]
pub struct CameraConfigBuilder {
    acquire_timeout: Option<Duration>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    compression: Option<TiffCompression>,
}

impl CameraConfigBuilder {
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn build(self) -> CameraConfig {
        let default = CameraConfig::default();
        CameraConfig {
            acquire_timeout: self.acquire_timeout.unwrap_or(default.acquire_timeout),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            compression: self.compression.unwrap_or(default.compression),
        }
    }
}
