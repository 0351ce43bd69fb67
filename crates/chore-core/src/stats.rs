//! Statistics — the append-only action ledger.
//!
//! One row per task mutation. Rows are written by the store inside the
//! same transaction as the mutation they record, and are never updated
//! or deleted afterwards. A row survives the soft-deletion of its task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// The kind of mutation a ledger row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
  Created,
  Modified,
  Deleted,
}

/// One immutable audit-log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatistic {
  pub id:        i64,
  pub task_id:   TaskId,
  pub action:    TaskAction,
  pub action_at: DateTime<Utc>,
}

/// Aggregate counts returned by
/// [`overview`](crate::store::ActionLedger::overview).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsOverview {
  /// Tasks with `is_deleted = false`.
  pub active_tasks:     u64,
  /// Ledger rows with action `modified`.
  pub modified_actions: u64,
  /// Ledger rows with action `deleted`.
  pub deleted_actions:  u64,
  /// Active tasks with status `completed`.
  pub completed_tasks:  u64,
}

/// One page of ledger rows, most recent first, plus the total row count
/// of the whole ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPage {
  pub total:   u64,
  pub actions: Vec<TaskStatistic>,
}
