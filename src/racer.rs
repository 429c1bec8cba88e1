use crate::future::RaceBatched;
use crate::{blocking, BatchSize, InvalidBatchSize};

use core::future::IntoFuture;
use core::iter::Map;
use core::ops::Range;

/// Races tasks for the first non-empty result, in waves of bounded size.
///
/// A `Racer` only holds its configuration; every call creates fresh state and
/// drops it before returning. Tasks report success with `Some` and "nothing
/// found" with `None`.
///
/// # Examples
///
/// ```
/// use workgroup::Racer;
///
/// let phrase = "A small utility to manage the lifetime of a set of related goroutines.";
/// let keywords = ["function", "variable", "slice", "goroutine", "package"];
///
/// let racer = Racer::new(3)?;
/// let found = racer.run_template(keywords.len(), |i| {
///     phrase.contains(keywords[i]).then_some(keywords[i])
/// });
/// assert_eq!(found, Some("goroutine"));
/// # Ok::<(), workgroup::InvalidBatchSize>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Racer {
    batch_size: BatchSize,
}

impl Racer {
    /// Create a racer which runs at most `batch_size` tasks at once.
    ///
    /// Returns an error if `batch_size` is zero.
    pub fn new(batch_size: usize) -> Result<Self, InvalidBatchSize> {
        BatchSize::new(batch_size).map(Self::with_batch_size)
    }

    /// Create a racer from an already validated batch size.
    pub fn with_batch_size(batch_size: BatchSize) -> Self {
        Self { batch_size }
    }

    /// The maximum number of tasks in a single wave.
    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }

    /// Run `tasks` on scoped threads and return the first `Some`.
    ///
    /// Tasks are taken in waves of at most [`batch_size`][Self::batch_size]
    /// and every task of a wave gets its own thread. Once a task returns
    /// `Some`, the tasks of that wave which have not started yet return
    /// without running, the ones already running are waited for, and no
    /// further wave is started. Returns `None` if every task that ran returned
    /// `None`.
    ///
    /// When several tasks in the same wave succeed, whichever stores its value
    /// first wins.
    ///
    /// # Panics
    ///
    /// If a task panics, the remaining tasks of its wave are joined and the
    /// panic is then resumed on the calling thread.
    pub fn run<I, F, T>(&self, tasks: I) -> Option<T>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Option<T> + Send,
        T: Send,
    {
        blocking::run(tasks, self.batch_size)
    }

    /// Run `template(i)` for every `i` in `0..n` on scoped threads and return
    /// the first `Some`.
    ///
    /// Behaves like [`run`][Self::run] over `n` index-bound tasks. With
    /// `n == 0` the template is never called.
    pub fn run_template<F, T>(&self, n: usize, template: F) -> Option<T>
    where
        F: Fn(usize) -> Option<T> + Sync,
        T: Send,
    {
        blocking::run_template(n, template, self.batch_size)
    }

    /// Race futures in waves and resolve with the first `Some`.
    ///
    /// See [`RaceSome::race_batched`][crate::future::RaceSome::race_batched].
    pub fn race<I, T>(&self, tasks: I) -> RaceBatched<I::IntoIter, T>
    where
        I: IntoIterator,
        I::Item: IntoFuture<Output = Option<T>>,
    {
        RaceBatched::new(tasks.into_iter(), self.batch_size)
    }

    /// Race the futures returned by `template(i)` for every `i` in `0..n`.
    ///
    /// The template is only called when the wave containing `i` starts.
    pub fn race_template<F, Fut, T>(
        &self,
        n: usize,
        template: F,
    ) -> RaceBatched<Map<Range<usize>, F>, T>
    where
        F: FnMut(usize) -> Fut,
        Fut: IntoFuture<Output = Option<T>>,
    {
        RaceBatched::new((0..n).map(template), self.batch_size)
    }
}

impl From<BatchSize> for Racer {
    fn from(batch_size: BatchSize) -> Self {
        Self::with_batch_size(batch_size)
    }
}

/// Run `tasks` in waves of at most `batch_size` and return the first `Some`.
///
/// Fails with [`InvalidBatchSize`] before running anything if `batch_size` is
/// zero. See [`Racer::run`] for the full semantics.
///
/// # Examples
///
/// ```
/// let phrase = "Neko-chan the cat goes meow.";
/// let tasks: Vec<_> = ["dog", "camel", "cat", "wolf"]
///     .into_iter()
///     .map(|kw| move || phrase.contains(kw).then_some(kw))
///     .collect();
///
/// assert_eq!(workgroup::run(tasks, 3)?, Some("cat"));
/// # Ok::<(), workgroup::InvalidBatchSize>(())
/// ```
pub fn run<I, F, T>(tasks: I, batch_size: usize) -> Result<Option<T>, InvalidBatchSize>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Option<T> + Send,
    T: Send,
{
    Ok(Racer::new(batch_size)?.run(tasks))
}

/// Run `template(i)` for every `i` in `0..n` in waves of at most
/// `batch_size` and return the first `Some`.
///
/// Fails with [`InvalidBatchSize`] before running anything if `batch_size` is
/// zero. See [`Racer::run_template`] for the full semantics.
pub fn run_template<F, T>(
    n: usize,
    template: F,
    batch_size: usize,
) -> Result<Option<T>, InvalidBatchSize>
where
    F: Fn(usize) -> Option<T> + Sync,
    T: Send,
{
    Ok(Racer::new(batch_size)?.run_template(n, template))
}

#[cfg(test)]
mod test {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn zero_batch_size_runs_nothing() {
        let called = AtomicBool::new(false);
        let res = run_template(
            3,
            |_| {
                called.store(true, Ordering::SeqCst);
                Some(())
            },
            0,
        );
        assert!(res.is_err());
        assert!(!called.load(Ordering::SeqCst));
        assert!(Racer::new(0).is_err());
    }

    #[test]
    fn default_is_unbounded() {
        let racer = Racer::default();
        assert!(racer.batch_size().is_unbounded());
        assert_eq!(racer.run_template(5, |i| (i == 4).then_some(i)), Some(4));
    }

    #[test]
    fn race_template_is_lazy() {
        futures_lite::future::block_on(async {
            let racer = Racer::new(2).unwrap();
            let mut called = vec![];
            let res = racer
                .race_template(6, |i| {
                    called.push(i);
                    async move { (i == 1).then_some(i) }
                })
                .await;
            assert_eq!(res, Some(1));
            assert_eq!(called, vec![0, 1]);
        });
    }
}
