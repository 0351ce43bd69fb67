//! Handlers for `/statistics` endpoints.
//!
//! | Method | Path                  | Notes |
//! |--------|-----------------------|-------|
//! | `GET`  | `/statistics`         | The four aggregate counts |
//! | `GET`  | `/statistics/actions` | Ledger page, most recent first; `?page=&limit=` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};

use chore_core::{
  stats::{StatsOverview, TaskStatistic},
  store::ActionLedger,
};

use crate::{
  envelope::{ApiResponse, PaginationMeta},
  error::ApiError,
  tasks::PageQuery,
};

/// `GET /statistics`
pub async fn overview<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<ApiResponse<StatsOverview>>, ApiError>
where
  S: ActionLedger,
{
  let counts = store.overview().await.map_err(ApiError::store)?;
  Ok(Json(ApiResponse::ok(counts)))
}

/// `GET /statistics/actions[?page=<n>][&limit=<n>]`
pub async fn actions<S>(
  State(store): State<Arc<S>>,
  Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<TaskStatistic>>>, ApiError>
where
  S: ActionLedger,
{
  let page   = query.params();
  let ledger = store.recent_actions(page).await.map_err(ApiError::store)?;
  Ok(Json(ApiResponse::page(
    ledger.actions,
    PaginationMeta::new(ledger.total, page),
  )))
}
