mod settings;

pub use settings::{SnoopConfig, CONFIG_ENV};
