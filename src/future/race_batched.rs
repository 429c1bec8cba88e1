use super::race_some::RaceSome;
use crate::BatchSize;

use core::fmt;
use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_lite::ready;
use pin_project::pin_project;

/// A future which races tasks in sequential waves of bounded size.
///
/// Each wave takes up to `batch_size` tasks from the underlying iterator and
/// races them with [`RaceSome`]. The next wave is only pulled from the
/// iterator after the current one drained without a result, so tasks in
/// unreached waves are never even constructed.
///
/// This `struct` is created by the [`race_batched`] method on the
/// [`RaceSome`][crate::future::RaceSome] trait, and by
/// [`Racer::race`][crate::Racer::race] and
/// [`Racer::race_template`][crate::Racer::race_template].
///
/// [`race_batched`]: crate::future::RaceSome::race_batched
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct RaceBatched<I, T>
where
    I: Iterator,
    I::Item: IntoFuture<Output = Option<T>>,
{
    tasks: I,
    batch_size: BatchSize,
    wave_index: usize,
    done: bool,
    #[pin]
    wave: Option<RaceSome<<I::Item as IntoFuture>::IntoFuture, T>>,
}

impl<I, T> RaceBatched<I, T>
where
    I: Iterator,
    I::Item: IntoFuture<Output = Option<T>>,
{
    pub(crate) fn new(tasks: I, batch_size: BatchSize) -> Self {
        Self {
            tasks,
            batch_size,
            wave_index: 0,
            done: false,
            wave: None,
        }
    }
}

impl<I, T> fmt::Debug for RaceBatched<I, T>
where
    I: Iterator,
    I::Item: IntoFuture<Output = Option<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaceBatched")
            .field("batch_size", &self.batch_size)
            .field("wave_index", &self.wave_index)
            .field("wave", &self.wave)
            .finish()
    }
}

impl<I, T> Future for RaceBatched<I, T>
where
    I: Iterator,
    I::Item: IntoFuture<Output = Option<T>>,
{
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        assert!(!*this.done, "Futures must not be polled after completing");

        loop {
            if let Some(wave) = this.wave.as_mut().as_pin_mut() {
                let winner = ready!(wave.poll(cx));
                this.wave.set(None);
                if winner.is_some() {
                    tracing::debug!(wave = *this.wave_index, "wave produced a result");
                    *this.done = true;
                    return Poll::Ready(winner);
                }
                *this.wave_index += 1;
            }

            let tasks: Vec<_> = this
                .tasks
                .by_ref()
                .take(this.batch_size.get())
                .map(IntoFuture::into_future)
                .collect();
            if tasks.is_empty() {
                tracing::debug!(waves = *this.wave_index, "all waves drained without a result");
                *this.done = true;
                return Poll::Ready(None);
            }

            tracing::trace!(wave = *this.wave_index, len = tasks.len(), "launching wave");
            this.wave.set(Some(RaceSome::new(tasks)));
        }
    }
}
