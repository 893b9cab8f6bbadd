//! Route handlers and router assembly.

use super::Result;
use crate::core::FlatSqlError;
use crate::service::{QueryService, SchemaDescription};
use anyhow::anyhow;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::task;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    service: Arc<QueryService>,
}

impl AppState {
    pub fn new(service: Arc<QueryService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryRequest {
    pub data: Vec<Value>,
    pub sql: String,
    #[serde(default)]
    pub flatten_columns: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaRequest {
    pub data: Vec<Value>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(run_query))
        .route("/schema", post(describe_schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn run_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Vec<Value>>> {
    let service = Arc::clone(&state.service);
    let rows = task::spawn_blocking(move || {
        service.run_query(&request.data, &request.sql, request.flatten_columns)
    })
    .await
    .map_err(|e| FlatSqlError::Internal(anyhow!("query task failed: {e}")))??;

    info!(rows = rows.len(), "query executed");
    Ok(Json(rows))
}

async fn describe_schema(
    State(state): State<AppState>,
    Json(request): Json<SchemaRequest>,
) -> Result<Json<SchemaDescription>> {
    let service = Arc::clone(&state.service);
    let schema = task::spawn_blocking(move || service.describe_schema(&request.data))
        .await
        .map_err(|e| FlatSqlError::Internal(anyhow!("schema task failed: {e}")))??;

    info!(columns = schema.columns.len(), "schema described");
    Ok(Json(schema))
}
