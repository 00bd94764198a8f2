use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("{field} {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),
}

impl CoreError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
