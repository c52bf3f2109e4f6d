use tracing::trace;

use crate::camera_pipeline::common::error::Result;
use crate::camera_pipeline::image::{FloatImage, Point3f, Point3fImage};
use crate::camera_pipeline::reproject::intrinsics::Intrinsics;

/// Direction of the camera frame y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxis {
    /// y grows with the image row index
    #[default]
    Down,
    /// y is negated, growing upwards
    Up,
}

/// Vendor specific conventions applied during back-projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReprojectionParams {
    /// Multiplier from depth sample units to meters
    pub depth_scale: f32,
    pub y_axis: YAxis,
}

impl Default for ReprojectionParams {
    fn default() -> Self {
        Self {
            depth_scale: 1.0,
            y_axis: YAxis::Down,
        }
    }
}

/// Back-projects every pixel with a positive depth sample.
///
/// Pixels with depth `<= 0` (or NaN) keep the all-zero invalid marker.
pub fn to_point_cloud(
    depth: &FloatImage,
    intrinsics: &Intrinsics,
    params: &ReprojectionParams,
) -> Result<Point3fImage> {
    intrinsics.validate()?;
    trace!(
        width = depth.width,
        height = depth.height,
        focal_length = intrinsics.focal_length,
        "Reprojecting depth image"
    );

    let f = intrinsics.focal_length;
    let y_sign = match params.y_axis {
        YAxis::Down => 1.0,
        YAxis::Up => -1.0,
    };
    let mut points = Point3fImage::new(depth.width, depth.height);

    for y in 0..depth.height {
        let row = depth.row(y);
        let out = &mut points.data[y * depth.width..(y + 1) * depth.width];
        for (x, (&d, point)) in row.iter().zip(out.iter_mut()).enumerate() {
            if d.is_nan() || d <= 0.0 {
                continue;
            }
            let wz = d * params.depth_scale;
            let wx = ((x as f32 - intrinsics.cx) / f) * wz;
            let wy = ((y as f32 - intrinsics.cy) / f) * wz * y_sign;
            *point = Point3f::new(wx, wy, wz);
        }
    }

    Ok(points)
}

/// Euclidean norm of every point. Invalid points give 0.
pub fn to_distance_image(points: &Point3fImage) -> FloatImage {
    let data = points.data.iter().map(Point3f::norm).collect();
    FloatImage::from_vec(points.width, points.height, data)
}
