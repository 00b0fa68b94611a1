//! Cooperative cancellation checked between steps.
//!
//! A step that is already running is never interrupted; the run loop only
//! looks at the token before starting the next step.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag a host flips to stop a run at the next step boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
