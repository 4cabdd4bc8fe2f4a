//! Shared test utilities
//!
//! - Reducers and actions used across suites
//! - Effect-style middleware that re-dispatches through the inner dispatch
