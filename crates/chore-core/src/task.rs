//! Task types and boundary validation.
//!
//! Tasks are mutated in place: updates patch individual fields and
//! deletion flips a flag, never removes a row. A deleted task is
//! excluded from all normal reads and refuses further mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum accepted title length, in characters.
pub const TITLE_MAX: usize = 255;

/// Identifier assigned by the storage backend at insert, immutable after.
pub type TaskId = i64;

/// Completion state of a task.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
  #[default]
  Pending,
  Completed,
}

/// A persisted task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub id:          TaskId,
  pub title:       String,
  pub description: Option<String>,
  pub status:      TaskStatus,
  pub created_at:  DateTime<Utc>,
  /// `None` until the task is first mutated.
  pub updated_at:  Option<DateTime<Utc>>,
  pub is_deleted:  bool,
}

/// Input for [`TaskStore::create`](crate::store::TaskStore::create).
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
  pub title:       String,
  pub description: Option<String>,
}

impl NewTask {
  pub fn validate(&self) -> Result<()> { validate_title(&self.title) }
}

/// Sparse update for [`TaskStore::update`](crate::store::TaskStore::update).
///
/// Every field is optional; a field absent from the patch leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub status:      Option<TaskStatus>,
  /// Setting this to `true` deletes the task through the update path.
  /// It is recorded as a `modified` action; only the dedicated delete
  /// operations record `deleted`.
  pub is_deleted:  Option<bool>,
}

impl TaskPatch {
  pub fn validate(&self) -> Result<()> {
    match &self.title {
      Some(t) => validate_title(t),
      None => Ok(()),
    }
  }
}

/// The title must be 1 to [`TITLE_MAX`] characters.
pub fn validate_title(title: &str) -> Result<()> {
  let len = title.chars().count();
  if len == 0 || len > TITLE_MAX {
    return Err(Error::TitleLength { len });
  }
  Ok(())
}

/// Bulk calls must name at least one task.
pub fn validate_ids(ids: &[TaskId]) -> Result<()> {
  if ids.is_empty() {
    return Err(Error::EmptyIdList);
  }
  Ok(())
}
