use std::fmt;
use std::str::FromStr;

use crate::camera_pipeline::common::error::CameraError;

/// Every output a camera can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    Color,
    /// Depth in the sensor's native unit, input to reprojection
    RawDepth,
    /// Depth along the optical axis in meters
    ZImage,
    Point3DImage,
    /// Euclidean distance from the camera center in meters
    Distance,
    Intensity,
    Left,
    Right,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 8] = [
        ChannelKind::Color,
        ChannelKind::RawDepth,
        ChannelKind::ZImage,
        ChannelKind::Point3DImage,
        ChannelKind::Distance,
        ChannelKind::Intensity,
        ChannelKind::Left,
        ChannelKind::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChannelKind::Color => "Color",
            ChannelKind::RawDepth => "RawDepth",
            ChannelKind::ZImage => "ZImage",
            ChannelKind::Point3DImage => "Point3DImage",
            ChannelKind::Distance => "Distance",
            ChannelKind::Intensity => "Intensity",
            ChannelKind::Left => "Left",
            ChannelKind::Right => "Right",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelKind {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CameraError::UnknownChannel(s.to_string()))
    }
}
