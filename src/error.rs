use std::path::PathBuf;

/// Errors returned by recorder lifecycle operations and config loading
#[derive(Debug, thiserror::Error)]
pub enum SnoopError {
    #[error("recorder is already attached to a store")]
    AlreadyAttached,

    #[error("recorder is not attached to a store")]
    NotAttached,

    /// The recorder was detached; detached recorders are not reusable.
    #[error("recorder was detached and cannot be reused")]
    Detached,

    /// Every recorder handle was dropped while a wait was pending.
    #[error("recorder was dropped before a matching action was recorded")]
    RecorderDropped,

    #[error("failed to read config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SnoopError>;
