use super::RaceSome as RaceSomeTrait;
use crate::utils::{self, AwakeList, Signal, TaskStates, WakerVec};
use crate::BatchSize;

use core::fmt;
use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{Context, Poll};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pin_project::pin_project;

/// A future which races a single wave of tasks for the first `Some`.
///
/// Every task is launched when the wave is created, but a task's body only
/// starts executing on its first poll. Tasks which have not been polled yet
/// when a sibling produces a result are dropped without ever running. Tasks
/// which already started are polled to completion, and the wave only resolves
/// once every task is done. If a task panics, the rest of the wave is still
/// driven to completion and the first panic is resumed afterwards.
///
/// This `struct` is created by the [`race_some`] method on the [`RaceSome`] trait. See
/// its documentation for more.
///
/// [`race_some`]: crate::future::RaceSome::race_some
/// [`RaceSome`]: crate::future::RaceSome
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct RaceSome<Fut, T>
where
    Fut: Future<Output = Option<T>>,
{
    consumed: bool,
    tasks: Pin<Box<[Option<Fut>]>>,
    states: TaskStates,
    wakers: WakerVec,
    awake_list: AwakeList,
    cancelled: Signal,
    winner: Option<T>,
    panicked: Option<Box<dyn Any + Send + 'static>>,
}

impl<Fut, T> RaceSome<Fut, T>
where
    Fut: Future<Output = Option<T>>,
{
    pub(crate) fn new(tasks: Vec<Fut>) -> Self {
        let len = tasks.len();
        let tasks: Box<[_]> = tasks.into_iter().map(Some).collect();
        RaceSome {
            consumed: false,
            tasks: tasks.into(),
            states: TaskStates::new(len),
            wakers: WakerVec::new(len),
            awake_list: AwakeList::new(),
            cancelled: Signal::new(),
            winner: None,
            panicked: None,
        }
    }
}

impl<Fut, T> fmt::Debug for RaceSome<Fut, T>
where
    Fut: Future<Output = Option<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.states.iter()).finish()
    }
}

impl<Fut, T> Future for RaceSome<Fut, T>
where
    Fut: Future<Output = Option<T>>,
{
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        assert!(!*this.consumed, "Futures must not be polled after completing");

        {
            let mut readiness = this.wakers.readiness();
            readiness.set_waker(cx.waker());
            readiness.drain_into(this.awake_list);
        }

        for &index in this.awake_list.iter() {
            if this.states[index].is_done() {
                // Woken task is already complete, don't poll it again.
                continue;
            }
            let Some(mut task) = utils::get_pin_mut(this.tasks.as_mut(), index) else {
                continue;
            };

            if this.states[index].is_launched() {
                if this.cancelled.is_raised() {
                    // Never polled, so its body never ran.
                    task.set(None);
                    this.states.set_done(index);
                    tracing::trace!(index, "task skipped, wave already has a result");
                    continue;
                }
                this.states.set_running(index);
            }

            let output = match task.as_mut().as_pin_mut() {
                Some(fut) => {
                    let Some(waker) = this.wakers.get(index) else {
                        continue;
                    };
                    let mut cx = Context::from_waker(waker);
                    match panic::catch_unwind(AssertUnwindSafe(|| fut.poll(&mut cx))) {
                        Ok(Poll::Ready(output)) => output,
                        Ok(Poll::Pending) => continue,
                        Err(payload) => {
                            // A fault is not a result: siblings keep running.
                            tracing::trace!(index, "task panicked");
                            this.panicked.get_or_insert(payload);
                            None
                        }
                    }
                }
                None => continue,
            };

            task.set(None);
            this.states.set_done(index);

            if let Some(value) = output {
                // The first result fills the slot and cancels the siblings,
                // any later result is dropped.
                if this.cancelled.raise() {
                    tracing::trace!(index, "task produced a result");
                    *this.winner = Some(value);
                }
            }
        }

        if this.states.pending() == 0 {
            *this.consumed = true;
            if let Some(payload) = this.panicked.take() {
                panic::resume_unwind(payload);
            }
            Poll::Ready(this.winner.take())
        } else {
            Poll::Pending
        }
    }
}

impl<Fut, T> RaceSomeTrait for Vec<Fut>
where
    Fut: IntoFuture<Output = Option<T>>,
{
    type Output = T;
    type Future = RaceSome<Fut::IntoFuture, T>;
    type Batched = super::RaceBatched<std::vec::IntoIter<Fut>, T>;

    fn race_some(self) -> Self::Future {
        RaceSome::new(self.into_iter().map(IntoFuture::into_future).collect())
    }

    fn race_batched(self, batch_size: BatchSize) -> Self::Batched {
        super::RaceBatched::new(self.into_iter(), batch_size)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::DummyWaker;

    use std::cell::Cell;
    use std::future;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use futures_lite::future::{block_on, yield_now};

    #[test]
    fn smoke() {
        block_on(async {
            let res = vec![future::ready(None), future::ready(Some("hello"))]
                .race_some()
                .await;
            assert_eq!(res, Some("hello"));
        });
    }

    #[test]
    fn all_empty() {
        block_on(async {
            let res: Option<u8> = vec![future::ready(None), future::ready(None)]
                .race_some()
                .await;
            assert_eq!(res, None);
        });
    }

    #[test]
    fn empty_wave() {
        block_on(async {
            let tasks: Vec<future::Ready<Option<u8>>> = vec![];
            assert_eq!(tasks.race_some().await, None);
        });
    }

    #[test]
    fn no_fairness() {
        block_on(async {
            let res = vec![future::ready(Some("hello")), future::ready(Some("world"))]
                .race_some()
                .await;
            assert!(matches!(res, Some("hello" | "world")));
        });
    }

    #[test]
    fn unstarted_tasks_are_skipped() {
        block_on(async {
            let started = Rc::new(Cell::new(0));
            let tasks: Vec<_> = (0..4)
                .map(|i| {
                    let started = started.clone();
                    async move {
                        started.set(started.get() + 1);
                        (i == 0).then_some(i)
                    }
                })
                .collect();
            assert_eq!(tasks.race_some().await, Some(0));
            assert_eq!(started.get(), 1);
        });
    }

    #[test]
    fn running_tasks_are_drained() {
        block_on(async {
            let finished = Rc::new(Cell::new(0));
            let tasks: Vec<_> = (0..3)
                .map(|i| {
                    let finished = finished.clone();
                    async move {
                        if i != 2 {
                            for _ in 0..3 {
                                yield_now().await;
                            }
                        }
                        finished.set(finished.get() + 1);
                        (i == 2).then_some(i)
                    }
                })
                .collect();
            assert_eq!(tasks.race_some().await, Some(2));
            assert_eq!(finished.get(), 3);
        });
    }

    #[test]
    fn debug() {
        let mut fut = vec![future::ready(None::<u8>), future::ready(Some(1))].race_some();
        assert_eq!(format!("{:?}", fut), "[Launched, Launched]");
        let mut fut = Pin::new(&mut fut);

        let waker = Arc::new(DummyWaker()).into();
        let mut cx = Context::from_waker(&waker);
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Some(1)));
        assert_eq!(format!("{:?}", fut), "[Done, Done]");
    }

    #[test]
    fn pending_until_drained() {
        let tasks: Vec<Pin<Box<dyn Future<Output = Option<u8>>>>> = vec![
            Box::pin(async {
                yield_now().await;
                None
            }),
            Box::pin(async { Some(1) }),
        ];
        let mut fut = tasks.race_some();
        let mut fut = Pin::new(&mut fut);

        let waker = Arc::new(DummyWaker()).into();
        let mut cx = Context::from_waker(&waker);
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
        assert_eq!(format!("{:?}", fut), "[Running, Done]");
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Some(1)));
    }

    async fn panic_now() -> Option<u8> {
        panic!("oh no")
    }

    async fn yield_then_panic() -> Option<u8> {
        yield_now().await;
        panic!("oh no")
    }

    async fn yield_then_finish(finished: &AtomicUsize) -> Option<u8> {
        for _ in 0..3 {
            yield_now().await;
        }
        finished.fetch_add(1, Ordering::SeqCst);
        None
    }

    #[test]
    fn panic_is_resumed_after_wave_drains() {
        let finished = AtomicUsize::new(0);
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            block_on(async {
                let tasks: Vec<Pin<Box<dyn Future<Output = Option<u8>> + '_>>> = vec![
                    Box::pin(yield_then_panic()),
                    Box::pin(yield_then_finish(&finished)),
                ];
                tasks.race_some().await
            })
        }));
        let payload = res.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"oh no"));
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panic_does_not_cancel_siblings() {
        let finished = AtomicUsize::new(0);
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            block_on(async {
                let tasks: Vec<Pin<Box<dyn Future<Output = Option<u8>> + '_>>> = vec![
                    Box::pin(panic_now()),
                    Box::pin(yield_then_finish(&finished)),
                ];
                tasks.race_some().await
            })
        }));
        assert!(res.is_err());
        // The second task had not started when the first one panicked.
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}
