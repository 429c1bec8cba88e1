use std::sync::{Mutex, PoisonError};

/// A result slot which accepts a single value.
///
/// Filling never blocks on a full slot: the first writer wins and every later
/// value is handed back to its writer.
#[derive(Debug)]
pub(crate) struct OneShot<T> {
    value: Mutex<Option<T>>,
}

impl<T> OneShot<T> {
    pub(crate) fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    /// Store `value` unless the slot is already filled.
    pub(crate) fn try_fill(&self, value: T) -> Result<(), T> {
        let mut slot = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        match *slot {
            Some(_) => Err(value),
            None => {
                *slot = Some(value);
                Ok(())
            }
        }
    }

    pub(crate) fn into_inner(self) -> Option<T> {
        self.value
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
