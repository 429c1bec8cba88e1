//! Racing closures on scoped threads.
//!
//! One thread is spawned per task of the current wave. The calling thread
//! blocks until every thread of the wave has been joined, so no task can
//! outlive the wave that launched it.

use crate::utils::{OneShot, Signal};
use crate::BatchSize;

use std::any::Any;
use std::panic;
use std::thread;

type Payload = Box<dyn Any + Send + 'static>;

/// Race `tasks` in waves of at most `batch_size` closures.
pub(crate) fn run<I, F, T>(tasks: I, batch_size: BatchSize) -> Option<T>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Option<T> + Send,
    T: Send,
{
    let mut tasks = tasks.into_iter().peekable();
    let mut wave = 0;
    while tasks.peek().is_some() {
        if let Some(value) = race_wave(wave, tasks.by_ref().take(batch_size.get())) {
            tracing::debug!(wave, "wave produced a result");
            return Some(value);
        }
        wave += 1;
    }
    tracing::debug!(waves = wave, "all waves drained without a result");
    None
}

/// Race `template(i)` for every `i` in `0..n`, in waves of at most `batch_size`.
pub(crate) fn run_template<F, T>(n: usize, template: F, batch_size: BatchSize) -> Option<T>
where
    F: Fn(usize) -> Option<T> + Sync,
    T: Send,
{
    let template = &template;
    for (wave, range) in batch_size.batches(n).enumerate() {
        if let Some(value) = race_wave(wave, range.map(|index| move || template(index))) {
            tracing::debug!(wave, "wave produced a result");
            return Some(value);
        }
    }
    tracing::debug!(n, "all waves drained without a result");
    None
}

/// Spawn every task of a single wave and wait for all of them.
///
/// A task which sees the wave's signal raised when it starts returns without
/// running its body. The first `Some` fills the slot and raises the signal.
/// If any task panicked, the first panic is resumed once the wave drained.
fn race_wave<I, F, T>(wave: usize, tasks: I) -> Option<T>
where
    I: Iterator<Item = F>,
    F: FnOnce() -> Option<T> + Send,
    T: Send,
{
    let cancelled = Signal::new();
    let slot = OneShot::new();

    let panicked: Option<Payload> = thread::scope(|scope| {
        let handles: Vec<_> = tasks
            .enumerate()
            .map(|(index, task)| {
                let cancelled = &cancelled;
                let slot = &slot;
                scope.spawn(move || match attempt(cancelled, slot, task) {
                    Attempt::Skipped => {
                        tracing::trace!(wave, index, "task skipped, wave already has a result");
                    }
                    Attempt::Won => tracing::trace!(wave, index, "task produced a result"),
                    Attempt::Empty | Attempt::Lost => {}
                })
            })
            .collect();
        tracing::trace!(wave, len = handles.len(), "launched wave");

        let mut first = None;
        for handle in handles {
            if let Err(payload) = handle.join() {
                first.get_or_insert(payload);
            }
        }
        first
    });

    if let Some(payload) = panicked {
        panic::resume_unwind(payload);
    }
    slot.into_inner()
}

/// What a single task did once its thread started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// The signal was already raised, the body never ran.
    Skipped,
    /// The body returned `None`.
    Empty,
    /// The body returned `Some` and its value filled the slot.
    Won,
    /// The body returned `Some`, but a sibling filled the slot first.
    Lost,
}

/// Run one task of a wave, unless the wave was cancelled before it started.
fn attempt<F, T>(cancelled: &Signal, slot: &OneShot<T>, task: F) -> Attempt
where
    F: FnOnce() -> Option<T>,
{
    if cancelled.is_raised() {
        return Attempt::Skipped;
    }
    match task() {
        None => Attempt::Empty,
        Some(value) => match slot.try_fill(value) {
            Ok(()) => {
                cancelled.raise();
                Attempt::Won
            }
            Err(_) => Attempt::Lost,
        },
    }
}
