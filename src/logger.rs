use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber for the camera demo and tests.
///
/// `RUST_LOG` overrides the default filter. When debug output is enabled, span
/// close events are printed as well, which times `update` and `copy_frame`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let span_events = if filter.to_string().contains("debug") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let camera_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    // a second call, e.g. from another test, keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(camera_layer)
        .try_init();
}
