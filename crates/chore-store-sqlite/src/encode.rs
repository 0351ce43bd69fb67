//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 UTC strings, which also makes
//! their lexicographic order chronological. Status and action enums are
//! stored as lowercase text.

use chore_core::{
  stats::{TaskAction, TaskStatistic},
  task::{Task, TaskStatus},
};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(e.to_string()))
}

// ─── TaskStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(s: TaskStatus) -> &'static str {
  match s {
    TaskStatus::Pending => "pending",
    TaskStatus::Completed => "completed",
  }
}

pub fn decode_status(s: &str) -> Result<TaskStatus> {
  match s {
    "pending" => Ok(TaskStatus::Pending),
    "completed" => Ok(TaskStatus::Completed),
    other => Err(Error::Decode(format!("unknown task status: {other:?}"))),
  }
}

// ─── TaskAction ──────────────────────────────────────────────────────────────

pub fn encode_action(a: TaskAction) -> &'static str {
  match a {
    TaskAction::Created => "created",
    TaskAction::Modified => "modified",
    TaskAction::Deleted => "deleted",
  }
}

pub fn decode_action(s: &str) -> Result<TaskAction> {
  match s {
    "created" => Ok(TaskAction::Created),
    "modified" => Ok(TaskAction::Modified),
    "deleted" => Ok(TaskAction::Deleted),
    other => Err(Error::Decode(format!("unknown task action: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `tasks` row.
pub struct RawTask {
  pub id:          i64,
  pub title:       String,
  pub description: Option<String>,
  pub status:      String,
  pub created_at:  String,
  pub updated_at:  Option<String>,
  pub is_deleted:  bool,
}

impl RawTask {
  /// Column list matching the field order expected by [`RawTask::from_row`].
  pub const COLUMNS: &'static str =
    "id, title, description, status, created_at, updated_at, is_deleted";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      status:      row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
      is_deleted:  row.get(6)?,
    })
  }

  pub fn into_task(self) -> Result<Task> {
    Ok(Task {
      id:          self.id,
      title:       self.title,
      description: self.description,
      status:      decode_status(&self.status)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  self.updated_at.as_deref().map(decode_dt).transpose()?,
      is_deleted:  self.is_deleted,
    })
  }
}

/// Raw values read directly from a `task_statistics` row.
pub struct RawStatistic {
  pub id:        i64,
  pub task_id:   i64,
  pub action:    String,
  pub action_at: String,
}

impl RawStatistic {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      task_id:   row.get(1)?,
      action:    row.get(2)?,
      action_at: row.get(3)?,
    })
  }

  pub fn into_statistic(self) -> Result<TaskStatistic> {
    Ok(TaskStatistic {
      id:        self.id,
      task_id:   self.task_id,
      action:    decode_action(&self.action)?,
      action_at: decode_dt(&self.action_at)?,
    })
  }
}
