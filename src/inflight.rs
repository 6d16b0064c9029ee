//! Single-in-flight request guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Holds an in-flight flag and clears it on drop
///
/// The release lives in `Drop` rather than after the await: a request future
/// dropped mid-flight (client disconnect, task abort) still resets the flag.
pub struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    /// Try to set the flag; `None` when an operation is already in flight
    pub fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
