use std::sync::Arc;
use std::task::Wake;

/// A waker which does nothing when woken.
pub(crate) struct DummyWaker();

impl Wake for DummyWaker {
    fn wake(self: Arc<Self>) {}
}
