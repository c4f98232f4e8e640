use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag, checked by the generator at every
/// search node. Clones share the same flag, so a signal listener on
/// another thread can trip a token the engine is polling.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    tripped: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self) {
        self.tripped.store(true, Ordering::Relaxed);
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }
}
