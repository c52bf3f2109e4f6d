//! Camera adapters
//!
//! `DepthCamera` drives any `FrameSource` through the connect / update / calc
//! channel lifecycle. Vendor differences live in `VendorProfile`.

mod camera;
mod context;
mod profile;
mod synthetic;


pub use crate::camera_pipeline::convert::BayerPattern;
pub use camera::{DepthCamera, UpdateOutcome};
pub use context::{ContextLease, NoopLifecycle, SdkContext, SdkLifecycle};
pub use profile::{VendorProfile, ASTRA_IR_ROW_OFFSET};
pub use synthetic::SyntheticSource;
