use core::sync::atomic::{AtomicBool, Ordering};

/// A broadcast-once cancellation flag.
///
/// Raised at most once; every observer sees it from then on. Observing the
/// flag never interrupts work that is already running.
#[derive(Debug, Default)]
pub(crate) struct Signal {
    raised: AtomicBool,
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Raise the signal.
    ///
    /// Returns `true` if this call was the one that raised it.
    pub(crate) fn raise(&self) -> bool {
        !self.raised.swap(true, Ordering::AcqRel)
    }

    /// Returns `true` once the signal has been raised.
    pub(crate) fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
