//! Common utilities module
//!
//! This module contains shared utilities used across the camera pipeline.

pub mod error;

pub use error::{CameraError, Result};
