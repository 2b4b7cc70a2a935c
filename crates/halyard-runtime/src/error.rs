//! Request-time error types.

use halyard_capabilities::CapabilityError;
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that end request handling early.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No resource at the requested location.
    #[error("not found: {0}")]
    NotFound(String),

    /// The resource does not support the verb.
    #[error("{method} not supported. Supported methods: {}", join_methods(.allowed))]
    MethodNotAllowed {
        /// The rejected verb.
        method: Method,
        /// Verbs the resource does support, in canonical order.
        allowed: Vec<Method>,
    },

    /// A capability failed.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// The request body is missing or malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The resource's Validate capability rejected the payload.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Capability(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire representation.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
        }
    }
}

/// The JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description.
    pub message: String,
}

fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for request handling.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_method_not_allowed_message() {
        let err = ApiError::MethodNotAllowed {
            method: Method::POST,
            allowed: vec![Method::GET, Method::HEAD, Method::DELETE],
        };
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            err.to_body().message,
            "POST not supported. Supported methods: GET, HEAD, DELETE"
        );
    }

    #[test]
    fn test_not_found_body() {
        let body = ApiError::NotFound("nope".into()).to_body();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "message": "not found: nope" })
        );
    }
}
