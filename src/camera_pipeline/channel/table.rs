use std::collections::HashMap;
use std::sync::Arc;

use crate::camera_pipeline::adapter::VendorProfile;
use crate::camera_pipeline::buffer::FrameBuffers;
use crate::camera_pipeline::channel::kind::ChannelKind;
use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::convert;
use crate::camera_pipeline::image::ChannelImage;
use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer, Stream};
use crate::camera_pipeline::reproject::{self, Intrinsics};

/// What a channel computation may read: the owned frame buffers, vendor facts,
/// and channels already computed for this frame.
pub struct ChannelInputs<'a> {
    pub buffers: &'a FrameBuffers,
    pub profile: &'a VendorProfile,
    pub computed: &'a HashMap<ChannelKind, Arc<ChannelImage>>,
}

impl<'a> ChannelInputs<'a> {
    fn stream(&self, stream: Stream) -> Result<RawFrameBuffer<'a>> {
        self.buffers
            .get(stream)
            .map(|buffer| buffer.as_raw())
            .ok_or_else(|| CameraError::UnsupportedFormat(format!("{:?} stream missing", stream)))
    }

    fn dependency(&self, kind: ChannelKind) -> Result<&'a ChannelImage> {
        self.computed
            .get(&kind)
            .map(|image| image.as_ref())
            .ok_or(CameraError::DependencyCycle(kind))
    }
}

pub type ComputeFn = fn(&ChannelInputs<'_>) -> Result<ChannelImage>;

/// Row of the channel table
pub struct ChannelSpec {
    pub kind: ChannelKind,
    /// Raw streams read directly
    pub streams: &'static [Stream],
    /// Channels that must be computed first
    pub dependencies: &'static [ChannelKind],
    pub compute: ComputeFn,
}

pub static CHANNEL_TABLE: [ChannelSpec; 8] = [
    ChannelSpec {
        kind: ChannelKind::Color,
        streams: &[Stream::Color],
        dependencies: &[],
        compute: compute_color,
    },
    ChannelSpec {
        kind: ChannelKind::RawDepth,
        streams: &[Stream::Depth],
        dependencies: &[],
        compute: compute_raw_depth,
    },
    ChannelSpec {
        kind: ChannelKind::ZImage,
        streams: &[Stream::Depth],
        dependencies: &[],
        compute: compute_z_image,
    },
    ChannelSpec {
        kind: ChannelKind::Point3DImage,
        streams: &[],
        dependencies: &[ChannelKind::RawDepth],
        compute: compute_point_cloud,
    },
    ChannelSpec {
        kind: ChannelKind::Distance,
        streams: &[],
        dependencies: &[ChannelKind::Point3DImage],
        compute: compute_distance,
    },
    ChannelSpec {
        kind: ChannelKind::Intensity,
        streams: &[Stream::Infrared],
        dependencies: &[],
        compute: compute_intensity,
    },
    ChannelSpec {
        kind: ChannelKind::Left,
        streams: &[Stream::Left],
        dependencies: &[],
        compute: compute_left,
    },
    ChannelSpec {
        kind: ChannelKind::Right,
        streams: &[Stream::Right],
        dependencies: &[],
        compute: compute_right,
    },
];

pub fn channel_spec(kind: ChannelKind) -> &'static ChannelSpec {
    // The table holds one row per variant, in declaration order
    &CHANNEL_TABLE[kind as usize]
}

/// Channels to compute, dependencies first, ending with `kind` itself.
pub fn resolve_order(kind: ChannelKind) -> Result<Vec<ChannelKind>> {
    fn visit(
        kind: ChannelKind,
        visiting: &mut Vec<ChannelKind>,
        order: &mut Vec<ChannelKind>,
    ) -> Result<()> {
        if order.contains(&kind) {
            return Ok(());
        }
        if visiting.contains(&kind) {
            return Err(CameraError::DependencyCycle(kind));
        }
        visiting.push(kind);
        for &dependency in channel_spec(kind).dependencies {
            visit(dependency, visiting, order)?;
        }
        visiting.pop();
        order.push(kind);
        Ok(())
    }

    let mut order = Vec::new();
    visit(kind, &mut Vec::new(), &mut order)?;
    Ok(order)
}

fn compute_color(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let raw = inputs.stream(Stream::Color)?;
    let image = match raw.format {
        PixelFormat::Bayer8 => convert::convert_bayer(&raw, inputs.profile.bayer_pattern)?,
        _ => convert::convert_color(&raw)?,
    };
    Ok(ChannelImage::Color(image))
}

fn compute_raw_depth(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let raw = inputs.stream(Stream::Depth)?;
    Ok(ChannelImage::Float(convert::widen_depth_native(&raw)?))
}

fn compute_z_image(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let raw = inputs.stream(Stream::Depth)?;
    let image = match raw.format {
        PixelFormat::DepthMillimeters16 => convert::convert_depth_mm_to_m(&raw)?,
        _ => convert::convert_depth_f32(&raw)?,
    };
    Ok(ChannelImage::Float(image))
}

fn compute_point_cloud(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let depth = inputs
        .dependency(ChannelKind::RawDepth)?
        .as_float()
        .ok_or_else(|| {
            CameraError::UnsupportedFormat("raw depth is not a float image".to_string())
        })?;
    let focal_length = inputs
        .buffers
        .focal_length()
        .ok_or_else(|| CameraError::InvalidIntrinsics("no focal length known yet".to_string()))?;

    let intrinsics = Intrinsics::centered(depth.width, depth.height, focal_length);
    let cloud = reproject::to_point_cloud(depth, &intrinsics, &inputs.profile.reprojection)?;
    Ok(ChannelImage::Points(cloud))
}

fn compute_distance(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let points = inputs
        .dependency(ChannelKind::Point3DImage)?
        .as_points()
        .ok_or_else(|| {
            CameraError::UnsupportedFormat("point cloud is not a point image".to_string())
        })?;
    Ok(ChannelImage::Float(reproject::to_distance_image(points)))
}

fn compute_intensity(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let raw = inputs.stream(Stream::Infrared)?;
    match raw.format {
        PixelFormat::Gray8 => Ok(ChannelImage::Float(convert::convert_gray8(&raw)?)),
        _ => Ok(ChannelImage::UShort(convert::convert_gray16_with_row_offset(
            &raw,
            inputs.profile.ir_row_offset,
        )?)),
    }
}

fn compute_left(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let raw = inputs.stream(Stream::Left)?;
    Ok(ChannelImage::Float(convert::convert_gray8(&raw)?))
}

fn compute_right(inputs: &ChannelInputs<'_>) -> Result<ChannelImage> {
    let raw = inputs.stream(Stream::Right)?;
    Ok(ChannelImage::Float(convert::convert_gray8(&raw)?))
}
