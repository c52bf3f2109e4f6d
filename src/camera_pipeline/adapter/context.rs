use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::raw::VendorError;

/// Process-wide SDK setup and teardown.
pub trait SdkLifecycle: Send + Sync {
    fn initialize(&self) -> std::result::Result<(), VendorError>;
    fn teardown(&self);
}

/// For SDKs that need no global setup.
#[derive(Debug, Default)]
pub struct NoopLifecycle;

impl SdkLifecycle for NoopLifecycle {
    fn initialize(&self) -> std::result::Result<(), VendorError> {
        Ok(())
    }

    fn teardown(&self) {}
}

/// Reference counted SDK context shared by every camera of one vendor.
///
/// The first lease initialises the SDK, dropping the last lease tears it down.
pub struct SdkContext {
    vendor: String,
    lifecycle: Box<dyn SdkLifecycle>,
    users: Mutex<usize>,
}

impl SdkContext {
    pub fn new(vendor: impl Into<String>, lifecycle: Box<dyn SdkLifecycle>) -> Arc<Self> {
        Arc::new(Self {
            vendor: vendor.into(),
            lifecycle,
            users: Mutex::new(0),
        })
    }

    pub fn acquire(self: &Arc<Self>) -> Result<ContextLease> {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        if *users == 0 {
            info!(vendor = %self.vendor, "Initialising SDK");
            self.lifecycle.initialize().map_err(|e| {
                warn!(
                    vendor = %self.vendor,
                    code = e.code,
                    "SDK initialisation failed: {}",
                    e.message
                );
                CameraError::Connection {
                    vendor: self.vendor.clone(),
                    code: e.code,
                    message: e.message,
                }
            })?;
        }
        *users += 1;
        debug!(vendor = %self.vendor, users = *users, "SDK context acquired");

        Ok(ContextLease {
            context: Arc::clone(self),
        })
    }

    pub fn users(&self) -> usize {
        *self.users.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }
}

/// Keeps the SDK initialised while alive.
pub struct ContextLease {
    context: Arc<SdkContext>,
}

impl ContextLease {
    pub fn context(&self) -> &Arc<SdkContext> {
        &self.context
    }
}

impl Drop for ContextLease {
    fn drop(&mut self) {
        let mut users = self.context.users.lock().unwrap_or_else(|e| e.into_inner());
        *users = users.saturating_sub(1);
        debug!(vendor = %self.context.vendor, users = *users, "SDK context released");
        if *users == 0 {
            info!(vendor = %self.context.vendor, "Tearing down SDK");
            self.context.lifecycle.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLifecycle {
        init: Arc<AtomicUsize>,
        teardown: Arc<AtomicUsize>,
        fail: bool,
    }

    impl SdkLifecycle for CountingLifecycle {
        fn initialize(&self) -> std::result::Result<(), VendorError> {
            if self.fail {
                return Err(VendorError::new(-3, "no license"));
            }
            self.init.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn teardown(&self) {
            self.teardown.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_first_lease_initialises_last_tears_down() {
        let init = Arc::new(AtomicUsize::new(0));
        let teardown = Arc::new(AtomicUsize::new(0));
        let context = SdkContext::new(
            "test",
            Box::new(CountingLifecycle {
                init: init.clone(),
                teardown: teardown.clone(),
                fail: false,
            }),
        );

        let first = context.acquire().unwrap();
        let second = context.acquire().unwrap();
        assert_eq!(init.load(Ordering::SeqCst), 1);
        assert_eq!(context.users(), 2);

        drop(first);
        assert_eq!(teardown.load(Ordering::SeqCst), 0);

        drop(second);
        assert_eq!(teardown.load(Ordering::SeqCst), 1);
        assert_eq!(context.users(), 0);

        let _again = context.acquire().unwrap();
        assert_eq!(init.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_initialisation_is_connection_error() {
        let context = SdkContext::new(
            "test",
            Box::new(CountingLifecycle {
                fail: true,
                ..Default::default()
            }),
        );

        let result = context.acquire();
        assert!(matches!(result, Err(CameraError::Connection { code: -3, .. })));
        assert_eq!(context.users(), 0);
    }
}
