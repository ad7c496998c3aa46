use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown query parameters: {}", .0.join(", "))]
    UnknownParameters(Vec<String>),

    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter { field: String, message: String },

    /// Never carries the offending payload, only that one was found.
    #[error("Invalid filter parameters")]
    InjectionDetected,

    #[error("Invalid customer ID: {0}")]
    InvalidCustomerId(String),
}

impl DomainError {
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }
}
