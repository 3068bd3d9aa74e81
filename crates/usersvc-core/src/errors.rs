//! Application error type with HTTP response conversion.
//!
//! Every fallible operation that can surface to a client returns [`AppError`].
//! The constructors map one-to-one onto the service's error taxonomy:
//!
//! | Constructor        | Status | Meaning                                   |
//! |--------------------|--------|-------------------------------------------|
//! | [`bad_request`]    | 400    | malformed input, bad identifier format    |
//! | [`unauthorized`]   | 401    | missing, malformed, invalid, expired token|
//! | [`forbidden`]      | 403    | valid identity, missing permission code   |
//! | [`not_found`]      | 404    | entity absent                             |
//! | [`unprocessable`]  | 422    | body failed field validation              |
//! | [`configuration`]  | 500    | missing signing secret and similar        |
//! | [`internal`]       | 500    | store failure, programming error          |
//! | [`bad_gateway`]    | 502    | identity provider failure                 |
//!
//! Server-side failures are logged when rendered and their message is
//! replaced with a generic one so internals never reach the client.
//!
//! [`bad_request`]: AppError::bad_request
//! [`unauthorized`]: AppError::unauthorized
//! [`forbidden`]: AppError::forbidden
//! [`not_found`]: AppError::not_found
//! [`unprocessable`]: AppError::unprocessable
//! [`configuration`]: AppError::configuration
//! [`internal`]: AppError::internal
//! [`bad_gateway`]: AppError::bad_gateway

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn bad_gateway<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_GATEWAY, err)
    }

    pub fn configuration<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    /// Message that will be sent to the client.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            match self.status {
                StatusCode::BAD_GATEWAY => "Upstream service unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.error.to_string()
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::unprocessable(anyhow!("{}", errors))
    }
}
