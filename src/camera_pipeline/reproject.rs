//! Depth reprojection
//!
//! Pinhole back-projection of depth images into point clouds, and Euclidean
//! distance images from point clouds.

mod intrinsics;
mod point_cloud;


pub use intrinsics::Intrinsics;
pub use point_cloud::{to_distance_image, to_point_cloud, ReprojectionParams, YAxis};
