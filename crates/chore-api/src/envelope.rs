//! The uniform response envelope and pagination metadata.
//!
//! Every endpoint, success or failure, returns the same wrapper:
//! `{success, data, error, pagination}`. Handlers build successes with
//! the constructors here; failures go through
//! [`ApiError`](crate::error::ApiError), which produces the same shape.

use serde::Serialize;

use chore_core::page::PageParams;

// ─── Error body ──────────────────────────────────────────────────────────────

/// Machine-readable error category surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
  NotFound,
  ValidationError,
  InternalServerError,
}

/// Error payload inside a failure envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub code:    ErrorCode,
  pub message: String,
  pub details: Option<serde_json::Value>,
}

// ─── Pagination ──────────────────────────────────────────────────────────────

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
  pub total_items:  u64,
  pub total_pages:  u64,
  pub current_page: i64,
  pub page_size:    i64,
  pub has_next:     bool,
  pub has_previous: bool,
}

impl PaginationMeta {
  /// Derive the metadata block for `total_items` items under `page`.
  pub fn new(total_items: u64, page: PageParams) -> Self {
    let page_size = page.limit();
    Self {
      total_items,
      total_pages:  total_items.div_ceil(page_size as u64),
      current_page: page.page(),
      page_size,
      has_next:     (page.page() as u64).saturating_mul(page_size as u64)
        < total_items,
      has_previous: page.page() > 1,
    }
  }
}

// ─── Envelope ────────────────────────────────────────────────────────────────

/// The wrapper around every response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
  pub success:    bool,
  pub data:       Option<T>,
  pub error:      Option<ErrorBody>,
  pub pagination: Option<PaginationMeta>,
}

impl<T: Serialize> ApiResponse<T> {
  /// A success envelope with no pagination block.
  pub fn ok(data: T) -> Self {
    Self {
      success:    true,
      data:       Some(data),
      error:      None,
      pagination: None,
    }
  }

  /// A success envelope for one page of a listing.
  pub fn page(data: T, pagination: PaginationMeta) -> Self {
    Self {
      success:    true,
      data:       Some(data),
      error:      None,
      pagination: Some(pagination),
    }
  }
}

impl ApiResponse<()> {
  /// A success envelope carrying no payload (e.g. after a delete).
  pub fn no_data() -> Self {
    Self {
      success:    true,
      data:       None,
      error:      None,
      pagination: None,
    }
  }

  /// A failure envelope; `data` and `pagination` are always null.
  pub fn failure(code: ErrorCode, message: String) -> Self {
    Self {
      success:    false,
      data:       None,
      error:      Some(ErrorBody { code, message, details: None }),
      pagination: None,
    }
  }
}
