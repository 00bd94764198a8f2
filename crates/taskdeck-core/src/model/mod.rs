pub mod category;
pub mod project;
pub mod task;

use crate::error::CoreError;

pub use category::CategorySet;
pub use project::{Project, ProjectDraft, ProjectPatch, ProjectStats};
pub use task::{Priority, Task, TaskDraft, TaskPatch};

/// Trim a required text field, rejecting blank input.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text collapses to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
