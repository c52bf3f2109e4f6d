use crate::camera_pipeline::channel::ChannelKind;
use crate::camera_pipeline::convert::{BayerPattern, MILLIMETERS_TO_METERS};
use crate::camera_pipeline::reproject::{ReprojectionParams, YAxis};

/// Scanlines the Astra infrared stream lags behind depth and color.
pub const ASTRA_IR_ROW_OFFSET: usize = 8;

/// Facts about one vendor's cameras that change how buffers are interpreted
#[derive(Debug, Clone, PartialEq)]
pub struct VendorProfile {
    pub name: &'static str,
    /// Channels the camera exposes
    pub channels: &'static [ChannelKind],
    /// Vertical shift applied to 16-bit infrared frames
    pub ir_row_offset: usize,
    pub reprojection: ReprojectionParams,
    /// Mosaic layout for `Bayer8` color streams
    pub bayer_pattern: BayerPattern,
}

impl VendorProfile {
    /// Matrix Vision mv6D stereo head: float depth in meters, recalibrated every frame.
    pub fn mv6d() -> Self {
        Self {
            name: "mv6D",
            channels: &[
                ChannelKind::Color,
                ChannelKind::ZImage,
                ChannelKind::Point3DImage,
                ChannelKind::Distance,
                ChannelKind::Left,
                ChannelKind::Right,
            ],
            ir_row_offset: 0,
            reprojection: ReprojectionParams::default(),
            bayer_pattern: BayerPattern::Rggb,
        }
    }

    /// Orbbec Astra through OpenNI: millimeter depth, infrared offset by 8 rows.
    pub fn astra_openni() -> Self {
        Self {
            name: "Astra (OpenNI)",
            channels: ASTRA_CHANNELS,
            ir_row_offset: ASTRA_IR_ROW_OFFSET,
            reprojection: ASTRA_REPROJECTION,
            bayer_pattern: BayerPattern::Rggb,
        }
    }

    /// Orbbec Astra through the Astra SDK, which aligns infrared itself.
    pub fn astra_sdk() -> Self {
        Self {
            name: "Astra (Astra SDK)",
            channels: ASTRA_CHANNELS,
            ir_row_offset: 0,
            reprojection: ASTRA_REPROJECTION,
            bayer_pattern: BayerPattern::Rggb,
        }
    }

    /// TI Voxel ToF module.
    pub fn ti_voxel() -> Self {
        Self {
            name: "TI Voxel",
            channels: &[
                ChannelKind::ZImage,
                ChannelKind::Point3DImage,
                ChannelKind::Distance,
                ChannelKind::Intensity,
            ],
            ir_row_offset: 0,
            reprojection: ReprojectionParams::default(),
            bayer_pattern: BayerPattern::Rggb,
        }
    }

    /// Plain DirectShow webcam.
    pub fn directshow() -> Self {
        Self {
            name: "DirectShow",
            channels: &[ChannelKind::Color],
            ir_row_offset: 0,
            reprojection: ReprojectionParams::default(),
            bayer_pattern: BayerPattern::Rggb,
        }
    }

    pub fn supports(&self, kind: ChannelKind) -> bool {
        self.channels.contains(&kind)
    }
}

const ASTRA_CHANNELS: &[ChannelKind] = &[
    ChannelKind::Color,
    ChannelKind::ZImage,
    ChannelKind::Point3DImage,
    ChannelKind::Distance,
    ChannelKind::Intensity,
];

const ASTRA_REPROJECTION: ReprojectionParams = ReprojectionParams {
    depth_scale: MILLIMETERS_TO_METERS,
    y_axis: YAxis::Up,
};
