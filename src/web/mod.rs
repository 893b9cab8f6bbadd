//! HTTP Interface
//!
//! Exposes the query service over axum: a health probe, `/query` to run SQL
//! over a posted batch, and `/schema` to preview the columns a batch would
//! expose.
//!
//! Every failure funnels through [`WebError`], so the wire format is one
//! shape everywhere: `{"error": "...", "code": "..."}`. Structural and query
//! problems are the caller's fault (400); everything else is ours (500).

use crate::core::FlatSqlError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

mod routes;

pub use routes::{AppState, QueryRequest, SchemaRequest, build_router};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub struct WebError(FlatSqlError);

impl From<FlatSqlError> for WebError {
    fn from(err: FlatSqlError) -> Self {
        WebError(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            FlatSqlError::EmptyData
            | FlatSqlError::NotAnObject(_)
            | FlatSqlError::ListValue(_)
            | FlatSqlError::NoColumns
            | FlatSqlError::ColumnCollision { .. } => (StatusCode::BAD_REQUEST, "structural_error"),
            FlatSqlError::EmptySql | FlatSqlError::Query(_) => {
                (StatusCode::BAD_REQUEST, "query_error")
            }
            FlatSqlError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = self.0.to_string();
        if self.0.is_client_error() {
            warn!(code, "request rejected: {message}");
        } else {
            error!(code, "request failed: {message}");
        }

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
