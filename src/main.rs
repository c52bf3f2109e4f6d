use depthcam_pipeline::camera_pipeline::{
    CameraConfig, DepthCamera, NoopLifecycle, SdkContext, SyntheticSource, TiffCompression,
    UpdateOutcome, VendorProfile,
};
use depthcam_pipeline::logger;

use anyhow::Context;
use tracing::{error, info, warn};

const FRAMES: usize = 5;

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting depth camera pipeline demo...");

    let config = CameraConfig::builder()
        .compression(TiffCompression::DeflateBalanced)
        .max_dimension(Some(4096))
        .build();
    let context = SdkContext::new("synthetic", Box::new(NoopLifecycle));

    let camera = DepthCamera::new(
        SyntheticSource::astra(640, 480).with_timeouts_every(4),
        VendorProfile::astra_openni(),
        config,
        context,
    );

    camera.connect().context("connecting synthetic Astra")?;
    info!("Camera: {}", camera.profile().name);
    info!(
        "Channels: {}",
        camera
            .available_channels()
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    for _ in 0..FRAMES {
        match camera.update() {
            Ok(UpdateOutcome::Frame { frame_id }) => info!("Frame {} captured", frame_id),
            Ok(UpdateOutcome::Degraded { frame_id, reason }) => {
                warn!("Frame {} degraded: {}", frame_id, reason)
            }
            Ok(UpdateOutcome::NoData) => {
                info!("No data this cycle");
                continue;
            }
            Err(e) => {
                error!("Update failed: {}", e);
                break;
            }
        }

        for &kind in camera.available_channels() {
            match camera.channel(kind) {
                Ok(Some(image)) => info!("{}: {}x{}", kind, image.width(), image.height()),
                Ok(None) => info!("{}: no data yet", kind),
                Err(e) => warn!("{}: {}", kind, e),
            }
        }
    }

    let intrinsics = camera.intrinsics("Point3DImage")?;
    info!(
        "Depth intrinsics: f={:.2}px, principal point=({}, {})",
        intrinsics.focal_length, intrinsics.cx, intrinsics.cy
    );

    match camera.save_snapshot("Distance", "distance.tiff") {
        Ok(true) => info!("Snapshot written to distance.tiff"),
        Ok(false) => info!("No frame to snapshot"),
        Err(e) => error!("Snapshot failed: {}", e),
    }

    camera.disconnect()?;
    Ok(())
}
