//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::{ApiResponse, ErrorCode};

/// An error returned by an API handler.
///
/// The core signals "not found" with empty results and never raises it;
/// the translation into an error happens here, at the boundary. Store
/// faults arrive untranslated and map to `internal_server_error`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation error: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a storage fault; used by handlers as `.map_err(ApiError::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code, message) = match &self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, ErrorCode::NotFound, m.clone())
      }
      ApiError::Validation(m) => {
        (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, m.clone())
      }
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalServerError,
        e.to_string(),
      ),
    };
    (status, Json(ApiResponse::failure(code, message))).into_response()
  }
}
