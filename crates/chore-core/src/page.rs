//! Clamped pagination parameters.
//!
//! Raw `page`/`limit` values are normalised here, once, so no caller can
//! produce a negative offset or an unbounded page size.

/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;

/// Page size used when the caller supplies none.
pub const DEFAULT_LIMIT: i64 = 10;

/// A normalised page request. Construct via [`PageParams::new`]; the
/// fields are read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
  page:  i64,
  limit: i64,
}

impl PageParams {
  /// Clamp raw values: `page` to at least 1, `limit` into `1..=MAX_LIMIT`.
  pub fn new(page: i64, limit: i64) -> Self {
    Self {
      page:  page.max(1),
      limit: limit.clamp(1, MAX_LIMIT),
    }
  }

  /// 1-based page number.
  pub fn page(&self) -> i64 { self.page }

  /// Rows per page.
  pub fn limit(&self) -> i64 { self.limit }

  /// Rows to skip: `(page - 1) * limit`.
  pub fn offset(&self) -> i64 { (self.page - 1).saturating_mul(self.limit) }
}

impl Default for PageParams {
  fn default() -> Self { Self::new(1, DEFAULT_LIMIT) }
}
