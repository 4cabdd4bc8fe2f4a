//! Integration tests for store-snoop
//!
//! These tests drive real stores through the public API only.

#[path = "../common/mod.rs"]
pub mod common;

pub mod recorder_flow;
