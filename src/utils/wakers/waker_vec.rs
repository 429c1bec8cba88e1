use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::Waker;

use super::{InlineWakerVec, ReadinessVec};

/// One waker per task in a wave, all reporting to a shared readiness list.
pub(crate) struct WakerVec {
    wakers: Vec<Waker>,
    readiness: Arc<Mutex<ReadinessVec>>,
}

impl WakerVec {
    /// Create a new instance of `WakerVec`.
    pub(crate) fn new(len: usize) -> Self {
        let readiness = Arc::new(Mutex::new(ReadinessVec::new(len)));
        let wakers = (0..len)
            .map(|i| Arc::new(InlineWakerVec::new(i, readiness.clone())).into())
            .collect();
        Self { wakers, readiness }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Waker> {
        self.wakers.get(index)
    }

    /// Lock the `ReadinessVec`.
    pub(crate) fn readiness(&self) -> MutexGuard<'_, ReadinessVec> {
        self.readiness
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod test {
    use super::super::AwakeList;
    use super::*;

    #[test]
    fn wake_marks_ready() {
        let wakers = WakerVec::new(3);
        let mut list = AwakeList::new();
        wakers.readiness().drain_into(&mut list);
        assert_eq!(list.len(), 3);

        wakers.get(1).unwrap().wake_by_ref();
        wakers.readiness().drain_into(&mut list);
        assert_eq!(&list[..], &[1]);
        assert!(wakers.get(3).is_none());
    }
}
