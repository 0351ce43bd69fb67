//! [`SqliteStore`] — the SQLite implementation of [`TaskStore`] and
//! [`ActionLedger`].
//!
//! Each mutation runs in a single `rusqlite` transaction that covers
//! both the task change and its ledger row, so the two commit together
//! or not at all. Bulk calls use one transaction for the whole batch.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use chore_core::{
  page::PageParams,
  stats::{ActionPage, StatsOverview, TaskAction},
  store::{ActionLedger, TaskStore},
  task::{NewTask, Task, TaskId, TaskPatch, TaskStatus},
};

use crate::{
  encode::{RawStatistic, RawTask, encode_action, encode_dt, encode_status},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Chore task store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Transaction helpers ─────────────────────────────────────────────────────

/// Insert one ledger row inside the caller's transaction.
///
/// Every task mutation goes through this, which is what upholds the
/// one-row-per-mutation invariant: the statistic commits with the
/// mutation it records.
fn log_action(
  tx:      &rusqlite::Transaction<'_>,
  task_id: TaskId,
  action:  TaskAction,
  at:      &str,
) -> rusqlite::Result<()> {
  tx.execute(
    "INSERT INTO task_statistics (task_id, action, action_at) VALUES (?1, ?2, ?3)",
    rusqlite::params![task_id, encode_action(action), at],
  )?;
  Ok(())
}

/// `?, ?, ...` placeholders for an `IN` list of `n` values.
fn placeholders(n: usize) -> String {
  (0..n).map(|_| "?").collect::<Vec<_>>().join(", ")
}

// ─── TaskStore impl ──────────────────────────────────────────────────────────

impl TaskStore for SqliteStore {
  type Error = Error;

  async fn count_active(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM tasks WHERE is_deleted = 0",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn list(&self, page: PageParams) -> Result<Vec<Task>> {
    let limit  = page.limit();
    let offset = page.offset();

    let raws: Vec<RawTask> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM tasks WHERE is_deleted = 0 ORDER BY id LIMIT ?1 OFFSET ?2",
          RawTask::COLUMNS,
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], |row| {
            RawTask::from_row(row)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTask::into_task).collect()
  }

  async fn create(&self, input: NewTask) -> Result<Task> {
    let now     = Utc::now();
    let now_str = encode_dt(now);
    let NewTask { title, description } = input;

    let (id, title, description) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO tasks (title, description, status, created_at, is_deleted)
           VALUES (?1, ?2, 'pending', ?3, 0)",
          rusqlite::params![title, description, now_str],
        )?;
        let id = tx.last_insert_rowid();
        log_action(&tx, id, TaskAction::Created, &now_str)?;
        tx.commit()?;
        Ok((id, title, description))
      })
      .await?;

    Ok(Task {
      id,
      title,
      description,
      status: TaskStatus::Pending,
      created_at: now,
      updated_at: None,
      is_deleted: false,
    })
  }

  async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Option<Task>> {
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawTask> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existing = tx
          .query_row(
            &format!("SELECT {} FROM tasks WHERE id = ?1", RawTask::COLUMNS),
            rusqlite::params![id],
            |row| RawTask::from_row(row),
          )
          .optional()?;

        // Absent or already deleted: nothing is mutated, nothing logged.
        let Some(mut raw) = existing else { return Ok(None) };
        if raw.is_deleted {
          return Ok(None);
        }

        if let Some(title) = patch.title {
          raw.title = title;
        }
        if let Some(description) = patch.description {
          raw.description = Some(description);
        }
        if let Some(status) = patch.status {
          raw.status = encode_status(status).to_owned();
        }
        if let Some(is_deleted) = patch.is_deleted {
          raw.is_deleted = is_deleted;
        }
        raw.updated_at = Some(now_str.clone());

        tx.execute(
          "UPDATE tasks
           SET title = ?1, description = ?2, status = ?3, updated_at = ?4,
               is_deleted = ?5
           WHERE id = ?6",
          rusqlite::params![
            raw.title,
            raw.description,
            raw.status,
            raw.updated_at,
            raw.is_deleted,
            id,
          ],
        )?;
        log_action(&tx, id, TaskAction::Modified, &now_str)?;
        tx.commit()?;

        Ok(Some(raw))
      })
      .await?;

    raw.map(RawTask::into_task).transpose()
  }

  async fn soft_delete(&self, id: TaskId) -> Result<bool> {
    let now_str = encode_dt(Utc::now());

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE tasks SET is_deleted = 1, updated_at = ?1
           WHERE id = ?2 AND is_deleted = 0",
          rusqlite::params![now_str, id],
        )?;
        if changed == 0 {
          return Ok(false);
        }
        log_action(&tx, id, TaskAction::Deleted, &now_str)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    Ok(deleted)
  }

  async fn bulk_soft_delete(&self, ids: Vec<TaskId>) -> Result<Vec<TaskId>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let now_str = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let affected: Vec<TaskId> = {
          let sql = format!(
            "SELECT id FROM tasks WHERE is_deleted = 0 AND id IN ({}) ORDER BY id",
            placeholders(ids.len()),
          );
          let mut stmt = tx.prepare(&sql)?;
          stmt
            .query_map(rusqlite::params_from_iter(ids.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        for &id in &affected {
          tx.execute(
            "UPDATE tasks SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
            rusqlite::params![now_str, id],
          )?;
          log_action(&tx, id, TaskAction::Deleted, &now_str)?;
        }

        tx.commit()?;
        Ok(affected)
      })
      .await?;

    Ok(affected)
  }

  async fn bulk_complete(&self, ids: Vec<TaskId>) -> Result<Vec<TaskId>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let now_str = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let affected: Vec<TaskId> = {
          let sql = format!(
            "SELECT id FROM tasks
             WHERE is_deleted = 0 AND status != 'completed' AND id IN ({})
             ORDER BY id",
            placeholders(ids.len()),
          );
          let mut stmt = tx.prepare(&sql)?;
          stmt
            .query_map(rusqlite::params_from_iter(ids.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        for &id in &affected {
          tx.execute(
            "UPDATE tasks SET status = 'completed', updated_at = ?1 WHERE id = ?2",
            rusqlite::params![now_str, id],
          )?;
          log_action(&tx, id, TaskAction::Modified, &now_str)?;
        }

        tx.commit()?;
        Ok(affected)
      })
      .await?;

    Ok(affected)
  }
}

// ─── ActionLedger impl ───────────────────────────────────────────────────────

impl ActionLedger for SqliteStore {
  type Error = Error;

  async fn overview(&self) -> Result<StatsOverview> {
    let (active, modified, deleted, completed): (i64, i64, i64, i64) = self
      .conn
      .call(|conn| {
        let active = conn.query_row(
          "SELECT COUNT(*) FROM tasks WHERE is_deleted = 0",
          [],
          |row| row.get(0),
        )?;
        let modified = conn.query_row(
          "SELECT COUNT(*) FROM task_statistics WHERE action = 'modified'",
          [],
          |row| row.get(0),
        )?;
        let deleted = conn.query_row(
          "SELECT COUNT(*) FROM task_statistics WHERE action = 'deleted'",
          [],
          |row| row.get(0),
        )?;
        let completed = conn.query_row(
          "SELECT COUNT(*) FROM tasks
           WHERE is_deleted = 0 AND status = 'completed'",
          [],
          |row| row.get(0),
        )?;
        Ok((active, modified, deleted, completed))
      })
      .await?;

    Ok(StatsOverview {
      active_tasks:     active as u64,
      modified_actions: modified as u64,
      deleted_actions:  deleted as u64,
      completed_tasks:  completed as u64,
    })
  }

  async fn recent_actions(&self, page: PageParams) -> Result<ActionPage> {
    let limit  = page.limit();
    let offset = page.offset();

    let (total, raws): (i64, Vec<RawStatistic>) = self
      .conn
      .call(move |conn| {
        let total = conn.query_row(
          "SELECT COUNT(*) FROM task_statistics",
          [],
          |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
          "SELECT id, task_id, action, action_at
           FROM task_statistics
           ORDER BY action_at DESC, id DESC
           LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], |row| {
            RawStatistic::from_row(row)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let actions = raws
      .into_iter()
      .map(RawStatistic::into_statistic)
      .collect::<Result<Vec<_>>>()?;

    Ok(ActionPage { total: total as u64, actions })
  }
}
