//! Error types for `chore-core`.

use thiserror::Error;

use crate::task::TITLE_MAX;

#[derive(Debug, Error)]
pub enum Error {
  #[error("title must be 1-{TITLE_MAX} characters, got {len}")]
  TitleLength { len: usize },

  #[error("task id list must not be empty")]
  EmptyIdList,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
