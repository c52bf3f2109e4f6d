use crate::camera_pipeline::common::error::{CameraError, Result};

/// Pinhole parameters of one channel. Square pixels, no skew, no distortion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    pub width: usize,
    pub height: usize,
    /// Focal length in pixels
    pub focal_length: f32,
    /// Principal point x in pixels
    pub cx: f32,
    /// Principal point y in pixels
    pub cy: f32,
}

impl Intrinsics {
    /// Principal point at the image center.
    pub fn centered(width: usize, height: usize, focal_length: f32) -> Self {
        Self {
            width,
            height,
            focal_length,
            cx: width as f32 / 2.0,
            cy: height as f32 / 2.0,
        }
    }

    /// Focal length of a sensor `width` pixels wide with the given horizontal field of view.
    pub fn focal_length_from_fov(horizontal_fov: f32, width: usize) -> Result<f32> {
        if !(horizontal_fov > 0.0 && horizontal_fov < std::f32::consts::PI) || width == 0 {
            return Err(CameraError::InvalidIntrinsics(format!(
                "field of view {} rad over {} px",
                horizontal_fov, width
            )));
        }
        Ok((width as f32 / 2.0) / (horizontal_fov / 2.0).tan())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.focal_length.is_finite() || self.focal_length <= 0.0 {
            return Err(CameraError::InvalidIntrinsics(format!(
                "focal length {}",
                self.focal_length
            )));
        }
        Ok(())
    }
}
