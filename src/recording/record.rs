use serde::{Deserialize, Serialize};

use crate::store::Action;

/// One dispatched action and the state right after it was reduced.
///
/// `state` is an owned copy, so later changes to the live store state never
/// reach history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<S, A> {
    pub action: A,
    pub state: S,
}

impl<S, A: Action> Record<S, A> {
    pub fn action_type(&self) -> Option<&str> {
        self.action.action_type()
    }
}
