//! Custom error types for the cart service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{models::CartError, repositories::UserError};

/// Custom error type for the cart service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range input
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or unknown session
    #[error("Unauthorized")]
    Unauthorized,

    /// Login with an unknown user or a wrong password
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// Conflicting state, such as a taken username
    #[error("{0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Document store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password.".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Store(e) => {
                error!("Document store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "ok": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            UserError::DuplicateUser => ApiError::Conflict(UserError::DuplicateUser.to_string()),
            UserError::Credential(e) => {
                error!("Credential failure: {}", e);
                ApiError::InternalServerError
            }
            UserError::Store(e) => ApiError::Store(e),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_codes_and_envelope() {
        let (status, body) = render(ApiError::InvalidInput("bad".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "ok": false, "error": "bad" }));

        let (status, _) = render(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = render(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid username or password.");

        let (status, _) = render(ApiError::Conflict("taken".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_store_errors_are_opaque() {
        let err = ApiError::from(StoreError::InvalidKey("carts/".to_string()));
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_duplicate_user_is_conflict() {
        assert!(matches!(
            ApiError::from(UserError::DuplicateUser),
            ApiError::Conflict(msg) if msg == "Username already exists."
        ));
    }

    #[test]
    fn test_cart_errors_are_invalid_input() {
        assert!(matches!(
            ApiError::from(CartError::NotAList),
            ApiError::InvalidInput(msg) if msg == "Cart must be an array."
        ));
    }
}
