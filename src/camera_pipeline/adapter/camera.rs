use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, instrument, warn};

use crate::camera_pipeline::adapter::context::{ContextLease, SdkContext};
use crate::camera_pipeline::adapter::profile::VendorProfile;
use crate::camera_pipeline::buffer::FrameBuffers;
use crate::camera_pipeline::cache::FrameCache;
use crate::camera_pipeline::channel::{channel_spec, resolve_order, ChannelKind};
use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::config::CameraConfig;
use crate::camera_pipeline::export::{SnapshotWriter, TiffSnapshotWriter};
use crate::camera_pipeline::image::ChannelImage;
use crate::camera_pipeline::raw::{
    Calibration, FrameHealth, FrameSource, FrameWait, RawFrameBuffer, RawFrameSet, VendorError,
};
use crate::camera_pipeline::reproject::Intrinsics;

/// Result of one update cycle. Hard failures are returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A new frame was copied in
    Frame { frame_id: u64 },
    /// A new frame was copied in, but the device reported a problem
    Degraded { frame_id: u64, reason: String },
    /// The wait timed out or the frame carried no usable data; retry next cycle
    NoData,
}

struct SourceSlot<S> {
    source: S,
    lease: Option<ContextLease>,
}

#[derive(Default)]
struct CaptureState {
    buffers: FrameBuffers,
    cache: FrameCache,
    frames: u64,
}

/// A camera adapter over any vendor `FrameSource`.
///
/// `update` is the producer and `calc_channel` the consumer; they may run on
/// different threads. Owned buffers and the channel cache sit behind one lock that
/// is never held while waiting on the vendor SDK.
pub struct DepthCamera<S: FrameSource> {
    profile: VendorProfile,
    config: CameraConfig,
    context: Arc<SdkContext>,
    // written under the source lock, readable without it
    connected: AtomicBool,
    source: Mutex<SourceSlot<S>>,
    state: Mutex<CaptureState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<S: FrameSource> DepthCamera<S> {
    pub fn new(
        source: S,
        profile: VendorProfile,
        config: CameraConfig,
        context: Arc<SdkContext>,
    ) -> Self {
        Self {
            profile,
            config,
            context,
            connected: AtomicBool::new(false),
            source: Mutex::new(SourceSlot { source, lease: None }),
            state: Mutex::new(CaptureState::default()),
        }
    }

    pub fn profile(&self) -> &VendorProfile {
        &self.profile
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Does not wait for an update that is blocked on the vendor SDK.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn available_channels(&self) -> &'static [ChannelKind] {
        self.profile.channels
    }

    fn connection_error(&self, e: VendorError) -> CameraError {
        error!(
            vendor = self.profile.name,
            code = e.code,
            "Vendor error while connecting: {}",
            e.message
        );
        CameraError::Connection {
            vendor: self.profile.name.to_string(),
            code: e.code,
            message: e.message,
        }
    }

    fn capture_error(&self, e: VendorError) -> CameraError {
        error!(
            vendor = self.profile.name,
            code = e.code,
            "Vendor error while capturing: {}",
            e.message
        );
        CameraError::Capture {
            code: e.code,
            message: e.message,
        }
    }

    #[instrument(skip(self), fields(vendor = self.profile.name))]
    pub fn connect(&self) -> Result<()> {
        let mut slot = lock(&self.source);
        if self.is_connected() {
            debug!("Already connected");
            return Ok(());
        }

        let lease = self.context.acquire()?;
        slot.source.open().map_err(|e| self.connection_error(e))?;

        let focal_length = match slot.source.calibration() {
            Ok(Calibration::FocalLength(f)) => Some(f),
            Ok(Calibration::HorizontalFov { radians, width }) => {
                match Intrinsics::focal_length_from_fov(radians, width) {
                    Ok(f) => Some(f),
                    Err(e) => {
                        let _ = slot.source.close();
                        return Err(e);
                    }
                }
            }
            Ok(Calibration::PerFrame) => None,
            Err(e) => {
                let _ = slot.source.close();
                return Err(self.connection_error(e));
            }
        };

        {
            let mut state = lock(&self.state);
            state.buffers.clear();
            state.cache.clear();
            if let Some(f) = focal_length {
                state.buffers.set_focal_length(f);
            }
        }

        slot.lease = Some(lease);
        self.connected.store(true, Ordering::Release);
        info!(focal_length = ?focal_length, "Camera connected");
        Ok(())
    }

    /// Frees the owned buffers, closes the source and releases the SDK context.
    /// Safe to call at any time, including when not connected.
    #[instrument(skip(self), fields(vendor = self.profile.name))]
    pub fn disconnect(&self) -> Result<()> {
        let mut slot = lock(&self.source);
        if !self.is_connected() {
            return Ok(());
        }

        {
            let mut state = lock(&self.state);
            state.buffers.clear();
            state.cache.clear();
        }

        let closed = slot.source.close();
        self.connected.store(false, Ordering::Release);
        slot.lease = None;
        info!("Camera disconnected");

        closed.map_err(|e| self.capture_error(e))
    }

    fn accept_dimensions(&self, raw: &RawFrameBuffer<'_>) -> bool {
        if !self.config.validate_dimensions {
            return true;
        }
        match self.config.max_dimension {
            Some(max) if raw.width > max || raw.height > max => {
                warn!(
                    width = raw.width,
                    height = raw.height,
                    max,
                    "Dropping oversized buffer"
                );
                false
            }
            _ => true,
        }
    }

    /// Waits for the next frame and copies it into the owned buffers.
    ///
    /// The frame is committed as a whole or not at all. If the vendor then fails to
    /// take the frame back, the copied frame is still reported, as `Degraded`.
    #[instrument(skip(self), fields(vendor = self.profile.name))]
    pub fn update(&self) -> Result<UpdateOutcome> {
        let mut slot = lock(&self.source);
        if !self.is_connected() {
            return Err(CameraError::NotConnected);
        }

        let wait = slot
            .source
            .acquire_frame(self.config.acquire_timeout)
            .map_err(|e| self.capture_error(e))?;
        let handle = match wait {
            FrameWait::Frame(handle) => handle,
            FrameWait::Timeout => {
                debug!(timeout = ?self.config.acquire_timeout, "No frame before timeout");
                return Ok(UpdateOutcome::NoData);
            }
        };

        let copied = {
            let mut frame = slot.source.frame(&handle);
            frame.buffers.retain(|(_, raw)| self.accept_dimensions(raw));
            if frame.buffers.iter().any(|(_, raw)| raw.is_complete()) {
                let sequence = handle.sequence();
                let _span = tracing::info_span!("copy_frame", sequence).entered();
                self.commit_frame(&frame)
            } else {
                Ok(None)
            }
        };

        let released = slot.source.release_frame(handle);

        match (copied, released) {
            (Err(e), Err(release)) => {
                error!(
                    code = release.code,
                    "Release failed after a failed copy: {}",
                    release.message
                );
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(None), Err(release)) => Err(self.capture_error(release)),
            (Ok(None), Ok(())) => {
                debug!("Frame carried no usable buffers");
                Ok(UpdateOutcome::NoData)
            }
            (Ok(Some((frame_id, _))), Err(release)) => {
                let release = self.capture_error(release);
                Ok(UpdateOutcome::Degraded {
                    frame_id,
                    reason: release.to_string(),
                })
            }
            (Ok(Some((frame_id, FrameHealth::Nominal))), Ok(())) => {
                debug!(frame_id, "Frame copied");
                Ok(UpdateOutcome::Frame { frame_id })
            }
            (Ok(Some((frame_id, FrameHealth::Degraded(reason)))), Ok(())) => {
                warn!(frame_id, "Device degraded: {}", reason);
                Ok(UpdateOutcome::Degraded { frame_id, reason })
            }
        }
    }

    /// Copies `frame` under the state lock and starts a new cache generation.
    /// Nothing changes when the copy fails or stores no stream.
    fn commit_frame(&self, frame: &RawFrameSet<'_>) -> Result<Option<(u64, FrameHealth)>> {
        let mut state = lock(&self.state);
        let streams = state.buffers.store_frame(frame)?;
        if streams == 0 {
            return Ok(None);
        }

        state.frames += 1;
        let frame_id = state.frames;
        state.cache.begin_frame(frame_id);
        debug!(frame_id, streams, "Streams stored");
        Ok(Some((frame_id, frame.health.clone())))
    }

    /// Typed form of `calc_channel`.
    pub fn channel(&self, kind: ChannelKind) -> Result<Option<Arc<ChannelImage>>> {
        if !self.profile.supports(kind) {
            return Err(CameraError::UnknownChannel(kind.name().to_string()));
        }
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        state.cache.request(kind, &state.buffers, &self.profile)
    }

    /// Computes or returns the cached image of the named channel for the current frame.
    ///
    /// `Ok(None)` when no frame has been captured yet.
    pub fn calc_channel(&self, name: &str) -> Result<Option<Arc<ChannelImage>>> {
        let kind: ChannelKind = name.parse()?;
        self.channel(kind)
    }

    /// Pinhole parameters of the named channel at its current image size.
    pub fn intrinsics(&self, name: &str) -> Result<Intrinsics> {
        let kind: ChannelKind = name.parse()?;
        if !self.profile.supports(kind) {
            return Err(CameraError::UnknownChannel(name.to_string()));
        }

        let stream = resolve_order(kind)?
            .into_iter()
            .flat_map(|step| channel_spec(step).streams.iter().copied())
            .next()
            .ok_or_else(|| CameraError::UnknownChannel(name.to_string()))?;

        let state = lock(&self.state);
        let buffer = state
            .buffers
            .get(stream)
            .ok_or(CameraError::AcquisitionIncomplete { channel: kind, stream })?;
        let focal_length = state
            .buffers
            .focal_length()
            .ok_or_else(|| {
                CameraError::InvalidIntrinsics("no focal length known yet".to_string())
            })?;

        let intrinsics = Intrinsics::centered(buffer.width(), buffer.height(), focal_length);
        intrinsics.validate()?;
        Ok(intrinsics)
    }

    /// How often `kind` has been computed since this camera was created.
    pub fn compute_count(&self, kind: ChannelKind) -> u64 {
        lock(&self.state).cache.compute_count(kind)
    }

    /// Writes the named channel of the current frame to a TIFF file.
    /// Returns `false` when there is no frame to save yet.
    #[instrument(skip(self, path))]
    pub fn save_snapshot<P: AsRef<Path>>(&self, name: &str, path: P) -> Result<bool> {
        let path = path.as_ref();
        let Some(image) = self.calc_channel(name)? else {
            return Ok(false);
        };

        let mut file = std::fs::File::create(path)?;
        TiffSnapshotWriter.write_snapshot(&image, &mut file, &self.config)?;
        info!(channel = name, path = %path.display(), "Snapshot saved");
        Ok(true)
    }
}

impl<S: FrameSource> Drop for DepthCamera<S> {
    fn drop(&mut self) {
        if let Err(e) = self.disconnect() {
            warn!("Disconnect on drop failed: {}", e);
        }
    }
}
