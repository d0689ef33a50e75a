use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::filter::{FilterRequest, COMPANY_FILTERS};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /companies - list, filtered by name / minEmployees / maxEmployees
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Value> {
    let request = FilterRequest::from_query(&COMPANY_FILTERS, &query);
    let companies = state.companies.list(&request).await?;
    Ok(ApiResponse::success(json!({ "companies": companies })))
}

/// POST /companies (admin)
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    tracing::info!("{} creating company", user.username);
    let company = state.companies.create(payload).await?;
    Ok(ApiResponse::created(json!({ "company": company })))
}

/// GET /companies/:handle - company with its jobs
pub async fn get(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<Value> {
    let company = state.companies.get(&handle).await?;
    Ok(ApiResponse::success(json!({ "company": company })))
}

/// PATCH /companies/:handle (admin)
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(handle): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    tracing::info!("{} updating company {}", user.username, handle);
    let company = state.companies.update(&handle, payload).await?;
    Ok(ApiResponse::success(json!({ "company": company })))
}

/// DELETE /companies/:handle (admin)
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(handle): Path<String>,
) -> ApiResult<Value> {
    tracing::info!("{} removing company {}", user.username, handle);
    state.companies.remove(&handle).await?;
    Ok(ApiResponse::success(json!({ "deleted": handle })))
}
