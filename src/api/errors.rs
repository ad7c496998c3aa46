use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::errors::CustomerUseCaseError;
use crate::domain::errors::DomainError;

/// Message returned for any store failure; details stay in the logs
const STORE_FAILURE_MESSAGE: &str = "Internal server error";

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<CustomerUseCaseError> for ApiError {
    fn from(err: CustomerUseCaseError) -> Self {
        match err {
            CustomerUseCaseError::Domain(e) => e.into(),
            CustomerUseCaseError::InvalidRequest(msg) => ApiError::bad_request(msg),
            CustomerUseCaseError::NotFound(id) => {
                ApiError::not_found(format!("Customer not found: {}", id))
            }
            CustomerUseCaseError::Repository(e) => {
                tracing::error!(error = %e, "Customer store failure");
                ApiError::internal_error(STORE_FAILURE_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RepositoryError;

    #[test]
    fn test_injection_maps_to_generic_bad_request() {
        let err: ApiError = CustomerUseCaseError::Domain(DomainError::InjectionDetected).into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid filter parameters");
    }

    #[test]
    fn test_unknown_parameters_named_in_message() {
        let err: ApiError =
            CustomerUseCaseError::Domain(DomainError::UnknownParameters(vec!["foo".into()])).into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("foo"));
    }

    #[test]
    fn test_store_failure_hides_details() {
        let err: ApiError = CustomerUseCaseError::Repository(RepositoryError::Internal(
            "connection to 10.0.0.5 refused".to_string(),
        ))
        .into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("10.0.0.5"));
    }

    #[test]
    fn test_not_found() {
        let err: ApiError = CustomerUseCaseError::NotFound("abc".to_string()).into();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
