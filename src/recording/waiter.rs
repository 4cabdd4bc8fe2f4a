use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{Result, SnoopError};
use crate::recording::matching::{find_match, ActionTypes};
use crate::recording::record::Record;
use crate::store::Action;

/// A pending request for the `skip`-th record matching `types`.
pub(crate) struct Waiter<S, A> {
    types: ActionTypes,
    skip: usize,
    tx: oneshot::Sender<Record<S, A>>,
}

impl<S: Clone, A: Action> Waiter<S, A> {
    /// Resolve immediately against `history` if possible, otherwise return
    /// the waiter so it can be parked.
    pub(crate) fn resolve_or_park(
        history: &[Record<S, A>],
        types: ActionTypes,
        skip: usize,
    ) -> (WaitForAction<S, A>, Option<Self>) {
        let (tx, rx) = oneshot::channel();
        let waiter = Self { types, skip, tx };
        let parked = waiter.check(history);
        (WaitForAction { rx }, parked)
    }

    /// `None` once the waiter is done: resolved, or its future was dropped.
    pub(crate) fn check(self, history: &[Record<S, A>]) -> Option<Self> {
        if self.tx.is_closed() {
            tracing::trace!(types = %self.types, "dropping abandoned waiter");
            return None;
        }
        match find_match(history, &self.types, self.skip) {
            Some(record) => {
                tracing::debug!(types = %self.types, skip = self.skip, "waiter resolved");
                let _ = self.tx.send(record.clone());
                None
            }
            None => Some(self),
        }
    }
}

/// Future returned by [`Recorder::wait_for_action`](crate::Recorder::wait_for_action).
///
/// Ready on the first poll when the match was already in history. Resolves
/// at most once and has no timeout of its own.
#[must_use = "futures do nothing unless polled"]
pub struct WaitForAction<S, A> {
    rx: oneshot::Receiver<Record<S, A>>,
}

impl<S, A> Future for WaitForAction<S, A> {
    type Output = Result<Record<S, A>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| SnoopError::RecorderDropped))
    }
}
