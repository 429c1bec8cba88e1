//! Utilities to implement the different races of this crate.

mod pin;
mod signal;
mod slot;
mod task_state;
mod wakers;

pub(crate) use pin::get_pin_mut;
pub(crate) use signal::Signal;
pub(crate) use slot::OneShot;
pub(crate) use task_state::TaskStates;
pub(crate) use wakers::{AwakeList, WakerVec};

#[cfg(test)]
pub(crate) use wakers::DummyWaker;
