//! Depth camera channel pipeline
//!
//! This module turns vendor frame buffers into typed channel images: raw buffers are
//! copied into adapter-owned storage, converted on demand, reprojected into point
//! clouds, and cached per captured frame.

pub mod common;
pub mod raw;
pub mod buffer;
pub mod image;
pub mod convert;
pub mod reproject;
pub mod channel;
pub mod cache;
pub mod config;
pub mod export;
pub mod adapter;

pub use common::{
    CameraError,
    Result,
};

pub use raw::{
    FrameHandle,
    FrameHealth,
    FrameSource,
    FrameWait,
    PixelFormat,
    RawFrameBuffer,
    RawFrameSet,
    Stream,
    VendorError,
    Calibration,
};

pub use buffer::{
    FrameBuffers,
    OwnedImageBuffer,
};

pub use image::{
    ChannelImage,
    ColorImage,
    FloatImage,
    Image,
    Point3f,
    Point3fImage,
    UShortImage,
};

pub use reproject::{
    Intrinsics,
    ReprojectionParams,
    YAxis,
};

pub use channel::ChannelKind;

pub use cache::FrameCache;

pub use config::{
    CameraConfig,
    CameraConfigBuilder,
    TiffCompression,
};

pub use export::{
    SnapshotWriter,
    TiffSnapshotWriter,
};

pub use adapter::{
    BayerPattern,
    ContextLease,
    DepthCamera,
    NoopLifecycle,
    SdkContext,
    SdkLifecycle,
    SyntheticSource,
    UpdateOutcome,
    VendorProfile,
};
