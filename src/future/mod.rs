//! Racing futures for the first `Some`.
//!
//! Every task is a future which resolves to an `Option<T>`. `None` means the
//! task found nothing, `Some` means it succeeded. Tasks are raced in waves of
//! at most [`BatchSize`] futures: each wave is polled concurrently, the first
//! `Some` observed wins, and later waves are never started once a wave has a
//! winner.
//!
//! Cancellation is cooperative. A task which has not been polled yet when a
//! sibling wins is dropped without running, but a task which already started
//! is polled until it completes. A wave only resolves once all of its tasks
//! are done, so nothing launched by a wave outlives it.
//!
//! # Examples
//!
//! ```
//! use workgroup::prelude::*;
//! use workgroup::BatchSize;
//! use futures_lite::future::block_on;
//!
//! block_on(async {
//!     let phrase = "Neko-chan the cat goes meow.";
//!     let keywords = ["dog", "camel", "horse", "cat", "wolf", "fox", "tiger"];
//!
//!     let tasks: Vec<_> = keywords
//!         .iter()
//!         .map(|&kw| async move { phrase.contains(kw).then_some(kw) })
//!         .collect();
//!
//!     let size = BatchSize::new(3).unwrap();
//!     assert_eq!(tasks.race_batched(size).await, Some("cat"));
//! })
//! ```
//!
//! | Name           | Return signature | When does it return?                          |
//! | ---            | ---              | ---                                           |
//! | `race_some`    | `Option<T>`      | First `Some` once the wave drained, or `None` |
//! | `race_batched` | `Option<T>`      | First wave with a `Some`, or `None`           |
use crate::BatchSize;

use core::future::Future;

pub use race_batched::RaceBatched;

pub(crate) mod race_batched;
pub(crate) mod race_some;

/// Wait for the first future to resolve to `Some`.
///
/// Awaits multiple futures concurrently, returning the first `Some` value
/// observed. Futures which were not polled yet when the first `Some` arrives
/// are dropped without running; futures which already started run to
/// completion before the result is returned.
pub trait RaceSome {
    /// The value carried by a successful future.
    type Output;

    /// The [`Future`] implementation returned by [`race_some`][RaceSome::race_some].
    type Future: Future<Output = Option<Self::Output>>;

    /// The [`Future`] implementation returned by [`race_batched`][RaceSome::race_batched].
    type Batched: Future<Output = Option<Self::Output>>;

    /// Race all futures in a single wave.
    ///
    /// All futures must resolve to the same type. Which `Some` wins when
    /// several futures succeed depends on the order they complete in and is
    /// not determined by their position.
    ///
    /// # Examples
    ///
    /// ```
    /// # futures::executor::block_on(async {
    /// use workgroup::prelude::*;
    ///
    /// async fn miss(_id: u8) -> Option<u8> {
    ///     futures_lite::future::yield_now().await;
    ///     None
    /// }
    /// async fn hit(id: u8) -> Option<u8> {
    ///     futures_lite::future::yield_now().await;
    ///     Some(id)
    /// }
    ///
    /// let futures: Vec<std::pin::Pin<Box<dyn std::future::Future<Output = Option<u8>>>>> =
    ///     vec![Box::pin(miss(0)), Box::pin(hit(1)), Box::pin(miss(2))];
    /// assert_eq!(futures.race_some().await, Some(1));
    /// # });
    /// ```
    fn race_some(self) -> Self::Future;

    /// Race the futures in consecutive waves of at most `batch_size`.
    ///
    /// Waves run strictly in order. A wave's futures are only created and
    /// polled once every earlier wave has drained without a result.
    fn race_batched(self, batch_size: BatchSize) -> Self::Batched;
}
