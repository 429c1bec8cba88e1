use core::task::Waker;
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

/// Indexes woken since the last poll. Waves are usually small.
pub(crate) type AwakeList = SmallVec<[usize; 16]>;

/// Tracks which tasks of a wave have been woken and should be polled.
#[derive(Debug)]
pub(crate) struct ReadinessVec {
    ready_count: usize,
    readiness_list: FixedBitSet,
    parent_waker: Option<Waker>,
}

impl ReadinessVec {
    /// Create a new instance of readiness with every task marked as ready,
    /// so the first poll visits all of them.
    pub(crate) fn new(len: usize) -> Self {
        let mut readiness_list = FixedBitSet::with_capacity(len);
        readiness_list.insert_range(..);
        Self {
            ready_count: len,
            readiness_list,
            parent_waker: None,
        }
    }

    /// Set the ready state to `true` for the given index.
    ///
    /// Returns the old ready state for this index.
    pub(crate) fn set_ready(&mut self, index: usize) -> bool {
        let was_ready = self.readiness_list.put(index);
        if !was_ready {
            self.ready_count += 1;
        }
        was_ready
    }

    /// Returns `true` if any of the tasks are ready.
    pub(crate) fn any_ready(&self) -> bool {
        self.ready_count > 0
    }

    /// Move the indexes of all ready tasks into `list` in ascending order,
    /// marking them as not ready.
    pub(crate) fn drain_into(&mut self, list: &mut AwakeList) {
        list.clear();
        if !self.any_ready() {
            return;
        }
        list.extend(self.readiness_list.ones());
        self.readiness_list.clear();
        self.ready_count = 0;
    }

    /// Access the parent waker.
    #[inline]
    pub(crate) fn parent_waker(&self) -> Option<&Waker> {
        self.parent_waker.as_ref()
    }

    /// Set the parent `Waker`. This needs to be called at the start of every
    /// `poll` function.
    pub(crate) fn set_waker(&mut self, parent_waker: &Waker) {
        match &mut self.parent_waker {
            Some(prev) => prev.clone_from(parent_waker),
            None => self.parent_waker = Some(parent_waker.clone()),
        }
    }
}
