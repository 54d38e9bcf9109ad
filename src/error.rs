use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Outcomes of the auth operations. Everything except `Server` is a known
/// condition reported to the caller with its message; `Server` hides the
/// cause behind a fixed body and logs it instead.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("User already exists")]
    Conflict,
    #[error("User not found")]
    NotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Server error")]
    Server(#[source] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::Conflict,
            StoreError::Other(e) => AuthError::Server(e),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::Server(cause) => {
                error!(error = %cause, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "msg": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_errors_are_bad_request() {
        for err in [
            AuthError::Validation("\"email\" must be a valid email".into()),
            AuthError::Conflict,
            AuthError::NotFound,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn server_error_hides_cause() {
        let err = AuthError::Server(anyhow::anyhow!("pool timed out"));
        assert_eq!(err.to_string(), "Server error");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_email_maps_to_conflict() {
        let err = AuthError::from(StoreError::DuplicateEmail);
        assert!(matches!(err, AuthError::Conflict));
        assert_eq!(err.to_string(), "User already exists");
    }
}
