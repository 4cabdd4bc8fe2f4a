use std::collections::VecDeque;

use parking_lot::Mutex;

/// Middleware sees every action before the reducer does.
///
/// Returning `false` swallows the action. Actions dispatched through the
/// [`MiddlewareApi`] go to the store's inner dispatch and are processed after
/// the current action, without passing through the store's public dispatch
/// slot (the way effect middleware re-dispatches through a reference it
/// captured at setup).
pub trait Middleware<S, A>: Send + Sync {
    fn handle(&self, action: &A, state: &S, api: &MiddlewareApi<'_, A>) -> bool;
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(&A, &S, &MiddlewareApi<'_, A>) -> bool + Send + Sync,
{
    fn handle(&self, action: &A, state: &S, api: &MiddlewareApi<'_, A>) -> bool {
        self(action, state, api)
    }
}

/// Handle given to middleware for dispatching follow-up actions
pub struct MiddlewareApi<'a, A> {
    queue: &'a Mutex<VecDeque<A>>,
}

impl<'a, A> MiddlewareApi<'a, A> {
    pub(crate) fn new(queue: &'a Mutex<VecDeque<A>>) -> Self {
        Self { queue }
    }

    /// Queue an action for the store's inner dispatch.
    pub fn dispatch(&self, action: A) {
        self.queue.lock().push_back(action);
    }
}
