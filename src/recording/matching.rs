//! Action-type queries and the internal-action filter.

use crate::recording::record::Record;
use crate::store::Action;

pub use crate::store::REPLACE_ACTION_PREFIX;

/// One action type, or a set of acceptable ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypes(Vec<String>);

impl ActionTypes {
    pub fn one(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn any_of<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// A missing type never matches.
    pub fn matches(&self, action_type: Option<&str>) -> bool {
        action_type.is_some_and(|ty| self.0.iter().any(|name| name == ty))
    }
}

impl From<&str> for ActionTypes {
    fn from(name: &str) -> Self {
        Self::one(name)
    }
}

impl From<String> for ActionTypes {
    fn from(name: String) -> Self {
        Self::one(name)
    }
}

impl<const N: usize> From<[&str; N]> for ActionTypes {
    fn from(names: [&str; N]) -> Self {
        Self::any_of(names)
    }
}

impl From<&[&str]> for ActionTypes {
    fn from(names: &[&str]) -> Self {
        Self::any_of(names.iter().copied())
    }
}

impl From<Vec<String>> for ActionTypes {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl std::fmt::Display for ActionTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("|"))
    }
}

/// The `skip`-th (0-based) record whose action type matches, in dispatch order.
pub fn find_match<'a, S, A: Action>(
    history: &'a [Record<S, A>],
    types: &ActionTypes,
    skip: usize,
) -> Option<&'a Record<S, A>> {
    history
        .iter()
        .filter(|record| types.matches(record.action_type()))
        .nth(skip)
}

/// Type prefixes of framework bookkeeping actions that never reach history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFilter {
    prefixes: Vec<String>,
}

impl Default for ActionFilter {
    fn default() -> Self {
        Self {
            prefixes: vec![REPLACE_ACTION_PREFIX.to_string()],
        }
    }
}

impl ActionFilter {
    /// Add a prefix on top of the existing ones.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() && !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_ignored(&self, action_type: Option<&str>) -> bool {
        action_type.is_some_and(|ty| self.prefixes.iter().any(|p| ty.starts_with(p.as_str())))
    }
}
