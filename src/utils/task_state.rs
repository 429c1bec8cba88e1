use core::ops::Deref;

/// The lifecycle of a single task inside a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum TaskState {
    /// The task exists but its body has not started executing.
    Launched,
    /// The task's body has started and must be driven to completion.
    Running,
    /// The task finished, or was skipped because the wave was cancelled.
    Done,
}

impl TaskState {
    /// Returns `true` if the state is [`Launched`][Self::Launched].
    #[must_use]
    #[inline]
    pub(crate) fn is_launched(&self) -> bool {
        matches!(self, Self::Launched)
    }

    /// Returns `true` if the state is [`Done`][Self::Done].
    #[must_use]
    #[inline]
    pub(crate) fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// The states of every task in a wave, plus the number not yet done.
pub(crate) struct TaskStates {
    states: Box<[TaskState]>,
    pending: usize,
}

impl TaskStates {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            states: vec![TaskState::Launched; len].into_boxed_slice(),
            pending: len,
        }
    }

    /// Mark the task at `index` as running.
    pub(crate) fn set_running(&mut self, index: usize) {
        debug_assert!(self.states[index].is_launched());
        self.states[index] = TaskState::Running;
    }

    /// Mark the task at `index` as done.
    ///
    /// Returns `false` if it was already done.
    pub(crate) fn set_done(&mut self, index: usize) -> bool {
        if self.states[index].is_done() {
            return false;
        }
        self.states[index] = TaskState::Done;
        self.pending -= 1;
        true
    }

    /// The number of tasks which are not done yet.
    pub(crate) fn pending(&self) -> usize {
        self.pending
    }
}

impl Deref for TaskStates {
    type Target = [TaskState];

    fn deref(&self) -> &Self::Target {
        &self.states
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut states = TaskStates::new(3);
        assert_eq!(states.pending(), 3);
        states.set_running(0);
        assert_eq!(states[0], TaskState::Running);
        assert!(states.set_done(0));
        assert!(!states.set_done(0));
        assert!(states.set_done(2));
        assert_eq!(states.pending(), 1);
        assert!(states[1].is_launched());
    }
}
