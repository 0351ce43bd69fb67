//! Handlers for `/tasks` endpoints.
//!
//! | Method   | Path                   | Notes |
//! |----------|------------------------|-------|
//! | `GET`    | `/tasks`               | Optional `?page=&limit=` |
//! | `POST`   | `/tasks`               | Body: `{"title":"...","description":null}` |
//! | `PATCH`  | `/tasks/{id}`          | Sparse update; 404 if missing or deleted |
//! | `DELETE` | `/tasks/{id}`          | Soft delete; 404 if missing or deleted |
//! | `POST`   | `/tasks/bulk-delete`   | Body: `{"task_ids":[..]}` |
//! | `POST`   | `/tasks/bulk-complete` | Body: `{"task_ids":[..]}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use chore_core::{
  page::{DEFAULT_LIMIT, PageParams},
  store::TaskStore,
  task::{NewTask, Task, TaskId, TaskPatch, validate_ids},
};

use crate::{
  envelope::{ApiResponse, PaginationMeta},
  error::ApiError,
};

// ─── Pagination query ────────────────────────────────────────────────────────

/// Raw `?page=&limit=` values, clamped into a [`PageParams`].
#[derive(Debug, Deserialize)]
pub struct PageQuery {
  pub page:  Option<i64>,
  pub limit: Option<i64>,
}

impl PageQuery {
  pub fn params(&self) -> PageParams {
    PageParams::new(self.page.unwrap_or(1), self.limit.unwrap_or(DEFAULT_LIMIT))
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /tasks[?page=<n>][&limit=<n>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError>
where
  S: TaskStore,
{
  let page  = query.params();
  let total = store.count_active().await.map_err(ApiError::store)?;
  let tasks = store.list(page).await.map_err(ApiError::store)?;
  Ok(Json(ApiResponse::page(tasks, PaginationMeta::new(total, page))))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /tasks` — returns 201 + the persisted task.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewTask>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TaskStore,
{
  body
    .validate()
    .map_err(|e| ApiError::Validation(e.to_string()))?;
  let task = store.create(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(ApiResponse::ok(task))))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PATCH /tasks/{id}` — fields absent from the body are left untouched.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<TaskId>,
  Json(patch): Json<TaskPatch>,
) -> Result<Json<ApiResponse<Task>>, ApiError>
where
  S: TaskStore,
{
  patch
    .validate()
    .map_err(|e| ApiError::Validation(e.to_string()))?;
  let task = store
    .update(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
  Ok(Json(ApiResponse::ok(task)))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /tasks/{id}` — soft delete; deleting twice is a 404.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<TaskId>,
) -> Result<Json<ApiResponse<()>>, ApiError>
where
  S: TaskStore,
{
  let deleted = store.soft_delete(id).await.map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound(format!("task {id} not found")));
  }
  Ok(Json(ApiResponse::no_data()))
}

// ─── Bulk operations ─────────────────────────────────────────────────────────

/// JSON body accepted by the bulk endpoints.
#[derive(Debug, Deserialize)]
pub struct BulkBody {
  pub task_ids: Vec<TaskId>,
}

/// `POST /tasks/bulk-delete` — ids not found or already deleted are
/// silently excluded from the returned affected list.
pub async fn bulk_delete<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<BulkBody>,
) -> Result<Json<ApiResponse<Vec<TaskId>>>, ApiError>
where
  S: TaskStore,
{
  validate_ids(&body.task_ids)
    .map_err(|e| ApiError::Validation(e.to_string()))?;
  let affected = store
    .bulk_soft_delete(body.task_ids)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ApiResponse::ok(affected)))
}

/// `POST /tasks/bulk-complete` — completed or deleted ids are silently
/// excluded from the returned affected list.
pub async fn bulk_complete<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<BulkBody>,
) -> Result<Json<ApiResponse<Vec<TaskId>>>, ApiError>
where
  S: TaskStore,
{
  validate_ids(&body.task_ids)
    .map_err(|e| ApiError::Validation(e.to_string()))?;
  let affected = store
    .bulk_complete(body.task_ids)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ApiResponse::ok(affected)))
}
