//! Transport-neutral request and response types.
//!
//! The boundary layer (an HTTP server, a test harness) translates its own
//! types into a [`Request`] and writes a [`Response`] back out.

use http::{Method, StatusCode};
use serde_json::Value;

use crate::error::ApiError;

/// An incoming request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Verb.
    pub method: Method,
    /// Path, including any configured base path.
    pub path: String,
    /// Decoded JSON body, if one was sent.
    pub payload: Option<Value>,
}

impl Request {
    /// Request without a body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: None,
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `HEAD path`.
    #[must_use]
    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD, path)
    }

    /// `PUT path` with a JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, payload: Value) -> Self {
        Self::new(Method::PUT, path).with_payload(payload)
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// A JSON document.
    Json(Value),
}

/// An outgoing response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code.
    pub status: StatusCode,
    /// Body.
    pub body: Body,
    /// Supported verbs, set on `405` responses.
    pub allow: Vec<Method>,
}

impl Response {
    /// Response with a JSON body.
    #[must_use]
    pub fn json(status: StatusCode, value: Value) -> Self {
        Self {
            status,
            body: Body::Json(value),
            allow: Vec::new(),
        }
    }

    /// Response without a body.
    #[must_use]
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: Body::Empty,
            allow: Vec::new(),
        }
    }

    /// Error response with a `{ "message": ... }` body.
    #[must_use]
    pub fn from_error(error: &ApiError) -> Self {
        let message = Value::String(error.to_body().message);
        let mut response = Self::json(error.status(), serde_json::json!({ "message": message }));
        if let ApiError::MethodNotAllowed { allowed, .. } = error {
            response.allow.clone_from(allowed);
        }
        response
    }

    /// The JSON body, if there is one.
    #[must_use]
    pub fn body_json(&self) -> Option<&Value> {
        match &self.body {
            Body::Empty => None,
            Body::Json(value) => Some(value),
        }
    }

    /// Serialize the body for the wire. An empty body yields no bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn to_bytes(&self, pretty: bool) -> serde_json::Result<Vec<u8>> {
        match &self.body {
            Body::Empty => Ok(Vec::new()),
            Body::Json(value) if pretty => serde_json::to_vec_pretty(value),
            Body::Json(value) => serde_json::to_vec(value),
        }
    }
}
