//! SQL schema for the Chore SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS tasks (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT    NOT NULL,
    description TEXT,
    status      TEXT    NOT NULL DEFAULT 'pending',  -- 'pending' | 'completed'
    created_at  TEXT    NOT NULL,                    -- ISO 8601 UTC; server-assigned
    updated_at  TEXT,                                -- NULL until first mutation
    is_deleted  INTEGER NOT NULL DEFAULT 0
);

-- Statistics are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- The foreign key has no ON DELETE action: tasks are only ever
-- soft-deleted, and ledger rows outlive the flag flip.
CREATE TABLE IF NOT EXISTS task_statistics (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id   INTEGER NOT NULL REFERENCES tasks(id),
    action    TEXT    NOT NULL,  -- 'created' | 'modified' | 'deleted'
    action_at TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS tasks_deleted_idx        ON tasks(is_deleted);
CREATE INDEX IF NOT EXISTS task_statistics_task_idx ON task_statistics(task_id);
CREATE INDEX IF NOT EXISTS task_statistics_at_idx   ON task_statistics(action_at);

PRAGMA user_version = 1;
";
