//! The `TaskStore` and `ActionLedger` traits and supporting types.
//!
//! The traits are implemented by storage backends (e.g.
//! `chore-store-sqlite`). The HTTP layer depends on these abstractions,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  page::PageParams,
  stats::{ActionPage, StatsOverview},
  task::{NewTask, Task, TaskId, TaskPatch},
};

// ─── Task store ──────────────────────────────────────────────────────────────

/// Abstraction over task persistence.
///
/// "Not found" is a normal outcome here, signalled by `None`, `false`,
/// or exclusion from an affected-id list — never by an error. Storage
/// faults propagate as `Self::Error`, untranslated.
///
/// Every mutation writes its matching ledger row in the same
/// transaction, so a task change and its statistic become visible
/// together or not at all.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TaskStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Count tasks with `is_deleted = false`.
  fn count_active(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// List active tasks in primary-key (insertion) order, skipping
  /// `page.offset()` rows, returning at most `page.limit()`.
  fn list(
    &self,
    page: PageParams,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  /// Insert a new pending task and its `created` ledger row. Returns
  /// the persisted task including the generated id and timestamps.
  fn create(
    &self,
    input: NewTask,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  /// Apply the supplied patch fields to a task and record a `modified`
  /// action. Returns `None` when the id is unknown or the task is
  /// already soft-deleted; nothing is mutated or logged in that case.
  fn update(
    &self,
    id: TaskId,
    patch: TaskPatch,
  ) -> impl Future<Output = Result<Option<Task>, Self::Error>> + Send + '_;

  /// Mark a task deleted and record a `deleted` action. Returns `false`
  /// when the id is unknown or the task is already deleted; a repeated
  /// delete is a no-op.
  fn soft_delete(
    &self,
    id: TaskId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Soft-delete every task in `ids` that is still active, recording a
  /// `deleted` action for each. One commit for the whole batch. Returns
  /// the ids actually affected, ascending; ids not found or already
  /// deleted are silently excluded.
  fn bulk_soft_delete(
    &self,
    ids: Vec<TaskId>,
  ) -> impl Future<Output = Result<Vec<TaskId>, Self::Error>> + Send + '_;

  /// Complete every task in `ids` that is active and not yet completed,
  /// recording a `modified` action for each. One commit. Returns the
  /// ids actually affected, ascending.
  fn bulk_complete(
    &self,
    ids: Vec<TaskId>,
  ) -> impl Future<Output = Result<Vec<TaskId>, Self::Error>> + Send + '_;
}

// ─── Action ledger ───────────────────────────────────────────────────────────

/// Read side of the statistics ledger.
///
/// The write side (one row per mutation) is deliberately not exposed:
/// ledger rows are inserted by [`TaskStore`] mutations inside their own
/// transactions, never by callers of this trait.
pub trait ActionLedger: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The four aggregate counts, computed in one logical read. Repeated
  /// calls with no intervening mutation return identical results.
  fn overview(
    &self,
  ) -> impl Future<Output = Result<StatsOverview, Self::Error>> + Send + '_;

  /// The ledger's total row count plus one page of rows ordered by
  /// `action_at` descending, ties broken by id descending.
  fn recent_actions(
    &self,
    page: PageParams,
  ) -> impl Future<Output = Result<ActionPage, Self::Error>> + Send + '_;
}
