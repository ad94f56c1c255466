//! Shared readiness flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide readiness flag.
///
/// Cloneable handle over one atomic bool. The orchestrator stops routing
/// traffic to the pod while the flag is cleared; clearing it is how both the
/// failure-injection endpoint and the shutdown path shed load.
#[derive(Debug, Clone)]
pub struct ReadinessFlag {
    inner: Arc<AtomicBool>,
}

impl ReadinessFlag {
    /// Create a new flag, initially ready.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    pub fn set_ready(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn set_not_ready(&self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}

impl Default for ReadinessFlag {
    fn default() -> Self {
        Self::new()
    }
}
