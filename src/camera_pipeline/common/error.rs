use thiserror::Error;

use crate::camera_pipeline::channel::ChannelKind;
use crate::camera_pipeline::raw::Stream;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to connect to {vendor} camera (vendor code {code}): {message}")]
    Connection {
        vendor: String,
        code: i32,
        message: String,
    },

    #[error("Capture failed (vendor code {code}): {message}")]
    Capture { code: i32, message: String },

    #[error("Camera is not connected")]
    NotConnected,

    #[error("No such channel: {0}")]
    UnknownChannel(String),

    #[error("Acquisition incomplete: channel {channel} needs the {stream:?} stream")]
    AcquisitionIncomplete { channel: ChannelKind, stream: Stream },

    #[error("Channel dependency cycle through {0}")]
    DependencyCycle(ChannelKind),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid intrinsics: {0}")]
    InvalidIntrinsics(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to allocate {0} bytes for a frame buffer")]
    Allocation(usize),

    #[error("Debayer failed: {0}")]
    Debayer(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CameraError {
    /// Errors after which the connection has to be torn down and re-established.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CameraError::Allocation(_) | CameraError::Connection { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CameraError>;
