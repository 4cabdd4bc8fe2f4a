//! Entry points for a test suite's shared setup helper.
//!
//! A suite creates its stores through the returned factory instead of the
//! plain [`Framework`]; nothing is installed globally.

use std::path::Path;

use crate::config::SnoopConfig;
use crate::error::Result;
use crate::inject::{inject, inject_with_config, Framework, Injected};

/// The plain framework with recording injected.
pub fn framework() -> Injected<Framework> {
    inject(Framework)
}

/// Like [`framework`], configured from `SNOOP_CONFIG` when it is set.
pub fn framework_from_env() -> Result<Injected<Framework>> {
    let config = SnoopConfig::load()?;
    Ok(inject_with_config(Framework, config))
}

/// Like [`framework`], configured from the TOML file at `path`.
pub fn framework_from_path(path: &Path) -> Result<Injected<Framework>> {
    let config = SnoopConfig::load_from_path(path)?;
    Ok(inject_with_config(Framework, config))
}
