//! Action/state recording and action waiting.

pub mod matching;
mod record;
mod recorder;
mod waiter;

pub use matching::{find_match, ActionFilter, ActionTypes};
pub use record::Record;
pub use recorder::{Recorder, SNOOP_EXTENSION};
pub use waiter::WaitForAction;
