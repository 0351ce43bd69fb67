//! Integration tests for `SqliteStore` against an in-memory database.

use chore_core::{
  page::PageParams,
  stats::TaskAction,
  store::{ActionLedger, TaskStore},
  task::{NewTask, Task, TaskPatch, TaskStatus},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn create(s: &SqliteStore, title: &str) -> Task {
  s.create(NewTask {
    title:       title.into(),
    description: None,
  })
  .await
  .unwrap()
}

fn page(page: i64, limit: i64) -> PageParams { PageParams::new(page, limit) }

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_sets_defaults_and_logs_created() {
  let s = store().await;

  let task = create(&s, "Buy milk").await;
  assert_eq!(task.title, "Buy milk");
  assert_eq!(task.status, TaskStatus::Pending);
  assert!(!task.is_deleted);
  assert!(task.updated_at.is_none());

  let ledger = s.recent_actions(page(1, 10)).await.unwrap();
  assert_eq!(ledger.total, 1);
  assert_eq!(ledger.actions[0].action, TaskAction::Created);
  assert_eq!(ledger.actions[0].task_id, task.id);
}

#[tokio::test]
async fn create_assigns_distinct_increasing_ids() {
  let s = store().await;
  let a = create(&s, "first").await;
  let b = create(&s, "second").await;
  assert!(b.id > a.id);
}

#[tokio::test]
async fn create_keeps_description() {
  let s = store().await;
  let task = s
    .create(NewTask {
      title:       "with description".into(),
      description: Some("the small print".into()),
    })
    .await
    .unwrap();

  let listed = s.list(page(1, 10)).await.unwrap();
  assert_eq!(listed[0].description.as_deref(), Some("the small print"));
  assert_eq!(listed[0].id, task.id);
}

// ─── List & count ────────────────────────────────────────────────────────────

#[tokio::test]
async fn count_matches_creates() {
  let s = store().await;
  for i in 0..5 {
    create(&s, &format!("task {i}")).await;
  }

  assert_eq!(s.count_active().await.unwrap(), 5);
  assert_eq!(s.list(page(1, 10)).await.unwrap().len(), 5);
}

#[tokio::test]
async fn list_pages_in_insertion_order() {
  let s = store().await;
  let mut ids = Vec::new();
  for i in 0..15 {
    ids.push(create(&s, &format!("task {i}")).await.id);
  }

  let first = s.list(page(1, 10)).await.unwrap();
  assert_eq!(
    first.iter().map(|t| t.id).collect::<Vec<_>>(),
    ids[..10].to_vec(),
  );

  let second = s.list(page(2, 10)).await.unwrap();
  assert_eq!(
    second.iter().map(|t| t.id).collect::<Vec<_>>(),
    ids[10..].to_vec(),
  );
}

#[tokio::test]
async fn list_beyond_last_page_is_empty() {
  let s = store().await;
  create(&s, "only one").await;
  assert!(s.list(page(5, 10)).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_and_count_exclude_deleted() {
  let s = store().await;
  let keep = create(&s, "keep").await;
  let gone = create(&s, "gone").await;

  assert!(s.soft_delete(gone.id).await.unwrap());

  let listed = s.list(page(1, 10)).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, keep.id);
  assert_eq!(s.count_active().await.unwrap(), 1);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_patches_only_supplied_fields() {
  let s = store().await;
  let task = s
    .create(NewTask {
      title:       "original".into(),
      description: Some("keep me".into()),
    })
    .await
    .unwrap();

  let updated = s
    .update(task.id, TaskPatch {
      title: Some("renamed".into()),
      ..TaskPatch::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.title, "renamed");
  assert_eq!(updated.description.as_deref(), Some("keep me"));
  assert_eq!(updated.status, TaskStatus::Pending);
  assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn update_can_complete_a_task() {
  let s = store().await;
  let task = create(&s, "to finish").await;

  let updated = s
    .update(task.id, TaskPatch {
      status: Some(TaskStatus::Completed),
      ..TaskPatch::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.status, TaskStatus::Completed);
}

#[tokio::test]
async fn update_logs_modified() {
  let s = store().await;
  let task = create(&s, "edit me").await;

  s.update(task.id, TaskPatch {
    title: Some("edited".into()),
    ..TaskPatch::default()
  })
  .await
  .unwrap()
  .unwrap();

  let ledger = s.recent_actions(page(1, 10)).await.unwrap();
  assert_eq!(ledger.total, 2);
  assert_eq!(ledger.actions[0].action, TaskAction::Modified);
  assert_eq!(ledger.actions[0].task_id, task.id);
}

#[tokio::test]
async fn update_missing_returns_none_and_logs_nothing() {
  let s = store().await;

  let result = s
    .update(99_999, TaskPatch {
      title: Some("ghost".into()),
      ..TaskPatch::default()
    })
    .await
    .unwrap();

  assert!(result.is_none());
  assert_eq!(s.recent_actions(page(1, 10)).await.unwrap().total, 0);
}

#[tokio::test]
async fn update_deleted_returns_none_and_logs_nothing() {
  let s = store().await;
  let task = create(&s, "doomed").await;
  assert!(s.soft_delete(task.id).await.unwrap());
  let before = s.recent_actions(page(1, 10)).await.unwrap().total;

  let result = s
    .update(task.id, TaskPatch {
      title: Some("too late".into()),
      ..TaskPatch::default()
    })
    .await
    .unwrap();

  assert!(result.is_none());
  assert_eq!(s.recent_actions(page(1, 10)).await.unwrap().total, before);
}

#[tokio::test]
async fn update_can_delete_via_flag() {
  let s = store().await;
  let task = create(&s, "flagged").await;

  let updated = s
    .update(task.id, TaskPatch {
      is_deleted: Some(true),
      ..TaskPatch::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert!(updated.is_deleted);

  // The update path records `modified`, not `deleted`.
  let ledger = s.recent_actions(page(1, 10)).await.unwrap();
  assert_eq!(ledger.actions[0].action, TaskAction::Modified);
  assert_eq!(s.count_active().await.unwrap(), 0);
}

// ─── Soft delete ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn soft_delete_flags_and_logs_once() {
  let s = store().await;
  let task = create(&s, "task 5").await;

  assert!(s.soft_delete(task.id).await.unwrap());
  assert!(s.list(page(1, 10)).await.unwrap().is_empty());

  let ledger = s.recent_actions(page(1, 10)).await.unwrap();
  assert_eq!(ledger.total, 2);
  assert_eq!(ledger.actions[0].action, TaskAction::Deleted);
  assert_eq!(ledger.actions[0].task_id, task.id);

  // Second delete is a no-op and writes no additional ledger row.
  assert!(!s.soft_delete(task.id).await.unwrap());
  assert_eq!(s.recent_actions(page(1, 10)).await.unwrap().total, 2);
}

#[tokio::test]
async fn soft_delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.soft_delete(99_999).await.unwrap());
  assert_eq!(s.recent_actions(page(1, 10)).await.unwrap().total, 0);
}

// ─── Bulk operations ─────────────────────────────────────────────────────────

#[tokio::test]
async fn bulk_complete_skips_completed_and_deleted() {
  let s = store().await;
  let t1 = create(&s, "one").await;
  let t2 = create(&s, "two").await;
  let t3 = create(&s, "three").await;

  s.update(t2.id, TaskPatch {
    status: Some(TaskStatus::Completed),
    ..TaskPatch::default()
  })
  .await
  .unwrap()
  .unwrap();
  assert!(s.soft_delete(t3.id).await.unwrap());

  let affected = s
    .bulk_complete(vec![t1.id, t2.id, t3.id])
    .await
    .unwrap();
  assert_eq!(affected, vec![t1.id]);

  let listed = s.list(page(1, 10)).await.unwrap();
  let one = listed.iter().find(|t| t.id == t1.id).unwrap();
  assert_eq!(one.status, TaskStatus::Completed);

  // One `modified` row from the explicit update, one from the bulk call.
  let overview = s.overview().await.unwrap();
  assert_eq!(overview.modified_actions, 2);
}

#[tokio::test]
async fn bulk_complete_unknown_ids_are_skipped() {
  let s = store().await;
  let t1 = create(&s, "known").await;

  let affected = s.bulk_complete(vec![t1.id, 404, 405]).await.unwrap();
  assert_eq!(affected, vec![t1.id]);
}

#[tokio::test]
async fn bulk_complete_empty_input_affects_nothing() {
  let s = store().await;
  create(&s, "untouched").await;

  assert!(s.bulk_complete(Vec::new()).await.unwrap().is_empty());
  assert_eq!(s.overview().await.unwrap().modified_actions, 0);
}

#[tokio::test]
async fn bulk_soft_delete_affects_only_active() {
  let s = store().await;
  let t1 = create(&s, "one").await;
  let t2 = create(&s, "two").await;
  let t3 = create(&s, "three").await;
  assert!(s.soft_delete(t2.id).await.unwrap());

  let affected = s
    .bulk_soft_delete(vec![t1.id, t2.id, t3.id, 404])
    .await
    .unwrap();
  assert_eq!(affected, vec![t1.id, t3.id]);

  assert_eq!(s.count_active().await.unwrap(), 0);

  // One `deleted` row per task, across both delete paths.
  let overview = s.overview().await.unwrap();
  assert_eq!(overview.deleted_actions, 3);
}

// ─── Overview ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn overview_counts_follow_the_script() {
  let s = store().await;
  let t1 = create(&s, "one").await;
  let t2 = create(&s, "two").await;
  let t3 = create(&s, "three").await;

  s.update(t1.id, TaskPatch {
    title: Some("one, renamed".into()),
    ..TaskPatch::default()
  })
  .await
  .unwrap()
  .unwrap();
  s.bulk_complete(vec![t2.id]).await.unwrap();
  assert!(s.soft_delete(t3.id).await.unwrap());

  let overview = s.overview().await.unwrap();
  assert_eq!(overview.active_tasks, 2);
  assert_eq!(overview.modified_actions, 2);
  assert_eq!(overview.deleted_actions, 1);
  assert_eq!(overview.completed_tasks, 1);
}

#[tokio::test]
async fn overview_is_idempotent() {
  let s = store().await;
  create(&s, "stable").await;

  let first  = s.overview().await.unwrap();
  let second = s.overview().await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn completed_count_ignores_deleted_tasks() {
  let s = store().await;
  let task = create(&s, "done then gone").await;
  s.bulk_complete(vec![task.id]).await.unwrap();
  assert!(s.soft_delete(task.id).await.unwrap());

  let overview = s.overview().await.unwrap();
  assert_eq!(overview.completed_tasks, 0);
  assert_eq!(overview.active_tasks, 0);
}

// ─── Recent actions ──────────────────────────────────────────────────────────

#[tokio::test]
async fn recent_actions_most_recent_first() {
  let s = store().await;
  let t1 = create(&s, "one").await;
  let t2 = create(&s, "two").await;
  assert!(s.soft_delete(t1.id).await.unwrap());

  let ledger = s.recent_actions(page(1, 10)).await.unwrap();
  assert_eq!(ledger.total, 3);
  assert_eq!(ledger.actions[0].action, TaskAction::Deleted);
  assert_eq!(ledger.actions[0].task_id, t1.id);
  assert_eq!(ledger.actions[1].action, TaskAction::Created);
  assert_eq!(ledger.actions[1].task_id, t2.id);
  assert_eq!(ledger.actions[2].task_id, t1.id);
}

#[tokio::test]
async fn recent_actions_paginate() {
  let s = store().await;
  for i in 0..5 {
    create(&s, &format!("task {i}")).await;
  }

  let first = s.recent_actions(page(1, 2)).await.unwrap();
  assert_eq!(first.total, 5);
  assert_eq!(first.actions.len(), 2);

  let last = s.recent_actions(page(3, 2)).await.unwrap();
  assert_eq!(last.total, 5);
  assert_eq!(last.actions.len(), 1);
}

#[tokio::test]
async fn ledger_rows_survive_task_deletion() {
  let s = store().await;
  let task = create(&s, "short-lived").await;
  assert!(s.soft_delete(task.id).await.unwrap());

  let ledger = s.recent_actions(page(1, 10)).await.unwrap();
  assert!(ledger.actions.iter().all(|a| a.task_id == task.id));
  assert_eq!(ledger.total, 2);
}
