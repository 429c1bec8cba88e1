mod readiness_vec;
mod waker;
mod waker_vec;

#[cfg(test)]
mod dummy;

#[cfg(test)]
pub(crate) use dummy::DummyWaker;

pub(crate) use readiness_vec::{AwakeList, ReadinessVec};
pub(crate) use waker::InlineWakerVec;
pub(crate) use waker_vec::WakerVec;
