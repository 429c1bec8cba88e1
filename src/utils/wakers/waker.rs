use std::sync::{Arc, Mutex, PoisonError};
use std::task::Wake;

use super::ReadinessVec;

/// A waker for a single task which marks it as ready and wakes the wave.
#[derive(Debug, Clone)]
pub(crate) struct InlineWakerVec {
    pub(crate) id: usize,
    pub(crate) readiness: Arc<Mutex<ReadinessVec>>,
}

impl InlineWakerVec {
    /// Create a new instance of `InlineWakerVec`.
    pub(crate) fn new(id: usize, readiness: Arc<Mutex<ReadinessVec>>) -> Self {
        Self { id, readiness }
    }
}

impl Wake for InlineWakerVec {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref()
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let mut readiness = self
            .readiness
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !readiness.set_ready(self.id) {
            // Only wake the parent on the first wake since the last poll.
            if let Some(parent) = readiness.parent_waker() {
                parent.wake_by_ref();
            }
        }
    }
}
