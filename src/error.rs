use core::fmt;
use std::error::Error;

/// The error returned when a batch size of zero is requested.
///
/// A wave must be able to hold at least one task, so this is rejected before
/// any work is launched.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InvalidBatchSize {
    _private: (),
}

impl InvalidBatchSize {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

impl fmt::Debug for InvalidBatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidBatchSize").finish()
    }
}

impl fmt::Display for InvalidBatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch size must be at least 1")
    }
}

impl Error for InvalidBatchSize {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let err = InvalidBatchSize::new();
        assert_eq!(err.to_string(), "batch size must be at least 1");
        assert_eq!(format!("{err:?}"), "InvalidBatchSize");
    }
}
