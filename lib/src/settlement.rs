//! Completion handles for dispatched actions
//!
//! A [`Settlement`] owns the work started by one dispatch. Dropping it before
//! completion hands that work to the store it came from, where every other
//! settlement of that store keeps driving it, as does
//! [`LoopStore::idle`](crate::install::LoopStore::idle).

use futures::{
    FutureExt,
    future::LocalBoxFuture,
    stream::{FuturesUnordered, StreamExt},
};
use log::*;
use std::{
    cell::RefCell,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, Waker},
};

use crate::error::Result;

/// Work tracked by a settlement
pub(crate) type Work = LocalBoxFuture<'static, Result<()>>;

/// Work whose settlement was dropped before it completed. Failures were
/// already reported where they happened, so only completion matters here.
#[derive(Default)]
pub(crate) struct Detached {
    running: RefCell<FuturesUnordered<LocalBoxFuture<'static, ()>>>,
    queued: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
    waker: RefCell<Option<Waker>>,
}

impl Detached {
    fn adopt(&self, work: Work) {
        self.queued.borrow_mut().push(work.map(|_| ()).boxed_local());

        if let Some(waker) = self.waker.borrow_mut().take() {
            waker.wake();
        }
    }

    /// Drives adopted work. Ready once none is left.
    pub(crate) fn poll_drain(&self, cx: &mut Context<'_>) -> Poll<()> {
        // already draining further up this poll
        let Ok(mut running) = self.running.try_borrow_mut() else {
            return Poll::Pending;
        };

        loop {
            running.extend(self.queued.borrow_mut().drain(..));

            let polled = running.poll_next_unpin(cx);

            if !self.queued.borrow().is_empty() {
                continue;
            }

            match polled {
                Poll::Ready(Some(())) => continue,
                Poll::Ready(None) => return Poll::Ready(()),
                Poll::Pending => {
                    *self.waker.borrow_mut() = Some(cx.waker().clone());
                    return Poll::Pending;
                }
            }
        }
    }
}

/// Computation completing once a dispatched action, and everything its
/// effects yielded, has settled. Fails with the first effect failure observed
/// in the subtree.
///
/// Polling a settlement also drives work detached from dropped settlements
/// of the same store.
#[must_use = "dropped settlements only advance while other settlements of the store are polled"]
pub struct Settlement {
    work: Option<Work>,
    detached: Rc<Detached>,
}

impl Settlement {
    pub(crate) fn new(work: Work, detached: Rc<Detached>) -> Self {
        Self {
            work: Some(work),
            detached,
        }
    }
}

impl Future for Settlement {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let _ = self.detached.poll_drain(cx);

        let Some(work) = self.work.as_mut() else {
            return Poll::Ready(Ok(()));
        };

        match work.poll_unpin(cx) {
            Poll::Ready(result) => {
                self.work = None;
                Poll::Ready(result)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for Settlement {
    fn drop(&mut self) {
        if let Some(work) = self.work.take() {
            debug!("settlement dropped before completion, detaching its work");
            self.detached.adopt(work);
        }
    }
}

#[cfg(test)]
#[path = "./settlement_tests.rs"]
mod tests;
