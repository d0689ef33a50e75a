use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::filter::{FilterRequest, JOB_FILTERS};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /jobs - list, filtered by title / minSalary / hasEquity
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Value> {
    let request = FilterRequest::from_query(&JOB_FILTERS, &query);
    let jobs = state.jobs.list(&request).await?;
    Ok(ApiResponse::success(json!({ "jobs": jobs })))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    tracing::info!("{} creating job", user.username);
    let job = state.jobs.create(payload).await?;
    Ok(ApiResponse::created(json!({ "job": job })))
}

pub async fn get(State(state): State<AppState>, Path(title): Path<String>) -> ApiResult<Value> {
    let job = state.jobs.get(&title).await?;
    Ok(ApiResponse::success(json!({ "job": job })))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(title): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    tracing::info!("{} updating job {}", user.username, title);
    let job = state.jobs.update(&title, payload).await?;
    Ok(ApiResponse::success(json!({ "job": job })))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(title): Path<String>,
) -> ApiResult<Value> {
    tracing::info!("{} removing job {}", user.username, title);
    state.jobs.remove(&title).await?;
    Ok(ApiResponse::success(json!({ "deleted": title })))
}
