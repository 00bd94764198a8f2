use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] taskdeck_core::error::CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored collection '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("category already exists: {0}")]
    DuplicateCategory(String),

    #[error("ambiguous reference '{reference}': matches {count} entries")]
    AmbiguousReference { reference: String, count: usize },

    #[error("workspace not found (searched upward from {0})")]
    WorkspaceNotFound(String),

    #[error("workspace already exists at {0}")]
    WorkspaceExists(String),

    #[error("lock file conflict: {0}")]
    LockConflict(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// True for the not-found family, which callers usually treat as a no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_) | Self::ProjectNotFound(_))
    }
}
