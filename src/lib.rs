//! Race a set of computations for the first non-empty result, with a bounded
//! number running at once.
//!
//! Every task reports its finding as an `Option<T>`: `None` means "nothing
//! here", `Some` means success. Tasks are processed in consecutive waves of at
//! most [`BatchSize`] tasks. All tasks of a wave run concurrently; as soon as
//! one of them succeeds, the tasks of that wave which have not started yet
//! are skipped, the wave is allowed to drain, and its result is returned
//! without starting any further wave. If no task succeeds the result is
//! `None`.
//!
//! Two executions share these semantics:
//!
//! - [`run`], [`run_template`] and [`Racer`] race plain closures on scoped
//!   threads and block the caller until the relevant wave has quiesced.
//! - [`future::RaceSome`] and [`Racer::race`] race futures without spawning,
//!   and work on any executor.
//!
//! # Examples
//!
//! Search a phrase for keywords, three at a time:
//!
//! ```rust
//! let phrase = "Neko-chan the cat goes meow.";
//! let keywords = ["dog", "camel", "horse", "cat", "wolf", "fox", "tiger"];
//!
//! let found = workgroup::run_template(
//!     keywords.len(),
//!     |i| phrase.contains(keywords[i]).then_some(keywords[i]),
//!     3,
//! )?;
//! assert_eq!(found, Some("cat"));
//! # Ok::<(), workgroup::InvalidBatchSize>(())
//! ```
//!
//! The same search with futures:
//!
//! ```rust
//! use workgroup::Racer;
//! use futures_lite::future::block_on;
//!
//! let phrase = "Neko-chan the cat goes meow.";
//! let keywords = ["dog", "camel", "horse", "katto", "wolf", "fox", "tiger"];
//!
//! let racer = Racer::new(3)?;
//! let found = block_on(racer.race_template(keywords.len(), |i| async move {
//!     phrase.contains(keywords[i]).then_some(keywords[i])
//! }));
//! assert_eq!(found, None);
//! # Ok::<(), workgroup::InvalidBatchSize>(())
//! ```
//!
//! # Races
//!
//! Which of several succeeding tasks in the same wave wins is decided by
//! whichever completes first, not by position. Waves themselves are strictly
//! ordered: a success in an earlier wave always beats one in a later wave.
//!
//! # Cancellation
//!
//! Cancellation is cooperative and only checked when a task starts. A task
//! that is already running when a sibling wins runs to completion, and the
//! call does not return before it does. There are no timeouts.
//!
//! # Panics
//!
//! A panicking task is not treated as an empty result, and it does not cancel
//! its siblings. Both executions let the rest of the wave finish and then
//! resume the first panic: the blocking functions on the calling thread, the
//! futures out of the `poll` that completes the wave.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod batch;
mod blocking;
mod error;
mod racer;
mod utils;

/// The workgroup prelude.
pub mod prelude {
    pub use super::future::RaceSome as _;
}

pub mod future;

pub use batch::{BatchSize, Batches};
pub use error::InvalidBatchSize;
pub use racer::{run, run_template, Racer};

/// The futures returned when racing a `Vec` of tasks: a single wave, and a
/// sequence of bounded waves.
pub mod vec {
    pub use crate::future::race_batched::RaceBatched;
    pub use crate::future::race_some::RaceSome;
}
