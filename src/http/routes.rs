//! Route tables and handlers
//!
//! Every handler that touches the store goes through [`run_blocking`], so a
//! long write or reload never parks the async runtime's worker threads.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::response::{ApiError, ApiResponse, ApiResult, ok};
use super::server::AppState;
use crate::app::models::{
    Contact, ContactPayload, ContactStats, FieldError, IndexStats, LoadStatus, PaginatedResult,
    RawRowSnapshot, RowError, SearchCriteria, ValidationReport,
};
use crate::app::services::contact_service::{ContactService, PageRequest, invalid_key_error};
use crate::constants::SERVICE_NAME;
use crate::telemetry::MemorySample;
use crate::{Error, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthView {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: u64,
    pub memory: MemorySample,
}

#[derive(Debug, Serialize)]
pub struct CountView {
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    #[serde(flatten)]
    pub contacts: ContactStats,
    pub index: IndexStats,
}

pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

pub fn contact_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/search", get(search_contacts))
        .route("/contacts/paginated", get(paginated_contacts))
        .route("/contacts/count", get(count_contacts))
        .route("/contacts/stats", get(contact_stats))
        .route("/contacts/validation", get(validation_report))
        .route("/contacts/errors", get(load_errors))
        .route("/contacts/invalid-data", get(invalid_data))
        .route("/contacts/status", get(load_status))
        .route("/contacts/reload", post(reload_contacts))
        .route(
            "/contacts/:key",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> ApiResult<HealthView> {
    ok(HealthView {
        status: "ok",
        service: SERVICE_NAME,
        timestamp: Utc::now(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        memory: state.monitor.sample().await,
    })
}

async fn list_contacts(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Contact>> {
    ok(run_blocking(&state.service, |service| Ok(service.get_all())).await?)
}

async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(raw_key): Path<String>,
) -> ApiResult<Contact> {
    let key = parse_key(&raw_key)?;
    ok(run_blocking(&state.service, move |service| service.get(key)).await?)
}

async fn create_contact(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ContactPayload>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<ApiResponse<Contact>>), ApiError> {
    let Json(payload) = body.map_err(body_error)?;
    let contact = run_blocking(&state.service, move |service| service.create(payload)).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(contact))))
}

async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(raw_key): Path<String>,
    body: std::result::Result<Json<ContactPayload>, JsonRejection>,
) -> ApiResult<Contact> {
    let key = parse_key(&raw_key)?;
    let Json(payload) = body.map_err(body_error)?;
    ok(run_blocking(&state.service, move |service| service.update(key, payload)).await?)
}

async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(raw_key): Path<String>,
) -> ApiResult<Contact> {
    let key = parse_key(&raw_key)?;
    ok(run_blocking(&state.service, move |service| service.delete(key)).await?)
}

async fn search_contacts(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<SearchCriteria>, QueryRejection>,
) -> ApiResult<Vec<Contact>> {
    let Query(criteria) = query.map_err(query_error)?;
    ok(run_blocking(&state.service, move |service| service.search(&criteria)).await?)
}

async fn paginated_contacts(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<PaginatedResult> {
    let Query(request) = query.map_err(query_error)?;
    ok(run_blocking(&state.service, move |service| Ok(service.paginated(&request))).await?)
}

async fn count_contacts(State(state): State<Arc<AppState>>) -> ApiResult<CountView> {
    let count = run_blocking(&state.service, |service| Ok(service.count())).await?;
    ok(CountView { count })
}

async fn contact_stats(State(state): State<Arc<AppState>>) -> ApiResult<StatsView> {
    let (contacts, index) =
        run_blocking(&state.service, |service| Ok((service.stats(), service.index_stats())))
            .await?;
    ok(StatsView { contacts, index })
}

async fn validation_report(State(state): State<Arc<AppState>>) -> ApiResult<ValidationReport> {
    ok(run_blocking(&state.service, |service| Ok(service.validation_report())).await?)
}

async fn load_errors(State(state): State<Arc<AppState>>) -> ApiResult<Vec<RowError>> {
    ok(run_blocking(&state.service, |service| Ok(service.load_errors())).await?)
}

async fn invalid_data(State(state): State<Arc<AppState>>) -> ApiResult<Vec<RawRowSnapshot>> {
    ok(run_blocking(&state.service, |service| Ok(service.invalid_rows_for_correction())).await?)
}

async fn load_status(State(state): State<Arc<AppState>>) -> ApiResult<LoadStatus> {
    ok(run_blocking(&state.service, |service| Ok(service.status())).await?)
}

async fn reload_contacts(State(state): State<Arc<AppState>>) -> ApiResult<ValidationReport> {
    ok(run_blocking(&state.service, |service| service.reload()).await?)
}

fn parse_key(raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| invalid_key_error(raw))
}

fn body_error(rejection: JsonRejection) -> Error {
    Error::validation(vec![FieldError::new("body", rejection.body_text())])
}

fn query_error(rejection: QueryRejection) -> Error {
    Error::validation(vec![FieldError::new("query", rejection.body_text())])
}

/// Run a store operation off the async workers
///
/// Every store call may wait on the store lock, which writers hold for a
/// full file rewrite and reload holds for a full parse.
async fn run_blocking<T, F>(service: &ContactService, operation: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(ContactService) -> Result<T> + Send + 'static,
{
    let service = service.clone();
    tokio::task::spawn_blocking(move || operation(service))
        .await
        .map_err(|e| Error::server(format!("Worker task failed: {}", e)))?
}
