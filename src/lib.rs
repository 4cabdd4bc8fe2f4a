//! Test instrumentation for Redux-style stores.
//!
//! A [`Recorder`] wraps a store's dispatch and keeps every action together
//! with the state right after it. Tests read the history or await an action
//! with [`Recorder::wait_for_action`]. [`inject()`] builds stores that carry a
//! recorder from the start.

pub mod config;
pub mod error;
pub mod inject;
pub mod logging;
pub mod recording;
pub mod register;
pub mod store;

pub use config::SnoopConfig;
pub use error::{Result, SnoopError};
pub use inject::{inject, inject_with_config, CreateStore, Framework, Injected};
pub use recording::{
    ActionFilter, ActionTypes, Record, Recorder, WaitForAction, SNOOP_EXTENSION,
};
pub use store::{Action, AnyAction, FrameworkAction, Middleware, MiddlewareApi, Reducer, Store};
