//! Partitioning of a task set into sequential waves.

use crate::InvalidBatchSize;

use core::fmt;
use core::num::NonZeroUsize;
use core::ops::Range;

/// The maximum number of tasks that run concurrently in a single wave.
///
/// A `BatchSize` is never zero. Use [`BatchSize::UNBOUNDED`] (also the
/// [`Default`]) to race every task in one wave.
///
/// # Examples
///
/// ```
/// use workgroup::BatchSize;
///
/// let size = BatchSize::new(3).unwrap();
/// assert_eq!(size.get(), 3);
/// assert!(BatchSize::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    /// Race every task in a single wave.
    pub const UNBOUNDED: BatchSize = BatchSize(NonZeroUsize::MAX);

    /// Create a new batch size, rejecting zero.
    pub fn new(size: usize) -> Result<Self, InvalidBatchSize> {
        NonZeroUsize::new(size)
            .map(BatchSize)
            .ok_or_else(InvalidBatchSize::new)
    }

    /// Returns the batch size as a primitive type.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Returns `true` if this is [`BatchSize::UNBOUNDED`].
    pub fn is_unbounded(self) -> bool {
        self == Self::UNBOUNDED
    }

    /// Split `len` tasks into consecutive index ranges of at most this size.
    pub fn batches(self, len: usize) -> Batches {
        Batches {
            next: 0,
            len,
            size: self.get(),
        }
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl From<NonZeroUsize> for BatchSize {
    fn from(size: NonZeroUsize) -> Self {
        BatchSize(size)
    }
}

impl TryFrom<usize> for BatchSize {
    type Error = InvalidBatchSize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl fmt::Debug for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            f.write_str("BatchSize(unbounded)")
        } else {
            f.debug_tuple("BatchSize").field(&self.get()).finish()
        }
    }
}

/// An iterator over the index ranges of each wave.
///
/// This `struct` is created by [`BatchSize::batches`].
#[derive(Debug, Clone)]
pub struct Batches {
    next: usize,
    len: usize,
    size: usize,
}

impl Iterator for Batches {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let start = self.next;
        // The last wave may be shorter, but it always reaches `len`.
        let end = start.saturating_add(self.size).min(self.len);
        self.next = end;
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.next);
        let count = remaining / self.size + usize::from(remaining % self.size != 0);
        (count, Some(count))
    }
}

impl ExactSizeIterator for Batches {}

impl core::iter::FusedIterator for Batches {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(BatchSize::new(0).is_err());
        assert!(BatchSize::try_from(0).is_err());
        assert_eq!(BatchSize::new(1).unwrap().get(), 1);
    }

    #[test]
    fn uneven_tail_is_included() {
        let ranges: Vec<_> = BatchSize::new(3).unwrap().batches(7).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn even_split() {
        let ranges: Vec<_> = BatchSize::new(2).unwrap().batches(4).collect();
        assert_eq!(ranges, vec![0..2, 2..4]);
    }

    #[test]
    fn empty_yields_nothing() {
        assert_eq!(BatchSize::new(3).unwrap().batches(0).count(), 0);
        assert_eq!(BatchSize::UNBOUNDED.batches(0).count(), 0);
    }

    #[test]
    fn unbounded_is_a_single_wave() {
        let ranges: Vec<_> = BatchSize::UNBOUNDED.batches(5).collect();
        assert_eq!(ranges, vec![0..5]);
    }

    #[test]
    fn every_index_covered_once() {
        for len in 0..40 {
            for size in 1..12 {
                let batches = BatchSize::new(size).unwrap().batches(len);
                assert_eq!(batches.len(), len.div_ceil(size));
                let indexes: Vec<usize> = batches.flatten().collect();
                assert_eq!(indexes, (0..len).collect::<Vec<_>>(), "len={len} size={size}");
            }
        }
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", BatchSize::new(3).unwrap()), "BatchSize(3)");
        assert_eq!(format!("{:?}", BatchSize::default()), "BatchSize(unbounded)");
    }
}
