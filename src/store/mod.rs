//! Minimal Redux-style store the recorder attaches to.
//!
//! Only the capability surface the recorder needs is provided: dispatch
//! through a replaceable slot, state access, reducer replacement, middleware
//! that re-dispatches through the inner dispatch, and named extensions.

pub mod action;
mod handle;
pub mod middleware;

pub use action::{
    Action, AnyAction, FrameworkAction, INIT_ACTION_PREFIX, REPLACE_ACTION_PREFIX,
};
pub use handle::{
    DispatchFn, Dispatcher, Reconfigurable, Reducer, SharedMiddleware, StateSource, Store,
    StoreState, WeakStore,
};
pub use middleware::{Middleware, MiddlewareApi};
