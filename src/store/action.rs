//! Actions that can be dispatched to a store
//!
//! An action is any value carrying an optional `type` discriminator. The
//! store framework also dispatches a couple of internal actions on its own
//! (`@@redux/INIT…` when a store is created, `@@redux/REPLACE…` when its
//! reducer is swapped), so action types that can be built from a bare type
//! string implement [`FrameworkAction`].

use std::fmt::Debug;

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type prefix of the action dispatched when a store is created.
pub const INIT_ACTION_PREFIX: &str = "@@redux/INIT";
/// Type prefix of the action dispatched when a store's reducer is replaced.
pub const REPLACE_ACTION_PREFIX: &str = "@@redux/REPLACE";

/// An action that can be dispatched to a [`Store`](crate::store::Store)
pub trait Action: Clone + Debug + Send + Sync + 'static {
    /// The `type` discriminator, or `None` for a malformed action.
    fn action_type(&self) -> Option<&str>;
}

/// Actions the framework can construct for its own bookkeeping.
pub trait FrameworkAction: Action {
    fn framework(action_type: String) -> Self;
}

pub(crate) fn init_action<A: FrameworkAction>() -> A {
    A::framework(format!("{INIT_ACTION_PREFIX}{}", random_suffix()))
}

pub(crate) fn replace_action<A: FrameworkAction>() -> A {
    A::framework(format!("{REPLACE_ACTION_PREFIX}{}", random_suffix()))
}

/// Dotted random suffix, e.g. `k.3.x.0.q.a`, so internal types never collide
/// with application types.
fn random_suffix() -> String {
    let chars: Vec<String> = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_lowercase().to_string())
        .collect();
    chars.join(".")
}

/// A loosely typed action: a `type` plus arbitrary JSON payload fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnyAction {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl AnyAction {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            payload: Map::new(),
        }
    }

    /// An action without a `type` field.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Add a payload field
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl Action for AnyAction {
    fn action_type(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl FrameworkAction for AnyAction {
    fn framework(action_type: String) -> Self {
        Self::new(action_type)
    }
}

impl Action for Value {
    fn action_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }
}

impl FrameworkAction for Value {
    fn framework(action_type: String) -> Self {
        serde_json::json!({ "type": action_type })
    }
}
