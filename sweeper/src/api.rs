use crate::config::AirtableEnv;
use crate::errors::DeleteError;
use crate::metrics_defs::{DELETE_OUTCOMES, DELETE_REQUESTS, RECORDS_LISTED};
use crate::selection::IndexPicker;
use airtable::client::{AirtableError, Client};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Shared, read-only request-handler state. Built once at startup from
/// the configuration; requests never read the environment themselves.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    target: Option<Target>,
    missing: Vec<&'static str>,
    picker: Box<dyn IndexPicker>,
}

struct Target {
    client: Client,
    table_name: String,
}

impl AppState {
    pub fn new(env: &AirtableEnv, picker: Box<dyn IndexPicker>) -> Result<Self, AirtableError> {
        Self::with_api_root(airtable::client::API_ROOT, env, picker)
    }

    /// Same as [`AppState::new`] against an explicit API root; tests point
    /// this at a local stand-in upstream.
    pub fn with_api_root(
        root: &str,
        env: &AirtableEnv,
        picker: Box<dyn IndexPicker>,
    ) -> Result<Self, AirtableError> {
        let (target, missing) = match env.resolve() {
            Ok(resolved) => (
                Some(Target {
                    client: Client::with_api_root(
                        root,
                        resolved.pat,
                        resolved.base_id,
                        resolved.table_name,
                    )?,
                    table_name: resolved.table_name.to_string(),
                }),
                Vec::new(),
            ),
            Err(missing) => (None, missing),
        };

        Ok(AppState {
            inner: Arc::new(Inner {
                target,
                missing,
                picker,
            }),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/version", get(version))
        .route("/delete-random", post(delete_random))
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Airtable Random Row Deleter",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "This information",
            "GET /healthz": "Health check",
            "GET /version": "Version info",
            "POST /delete-random": "Delete a random row from Airtable"
        },
        "usage": "POST to /delete-random to delete a random record from your Airtable table"
    }))
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
}

async fn healthz() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    description: &'static str,
}

async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
    })
}

#[derive(Serialize)]
struct DeletedRecord {
    id: String,
    fields: Map<String, Value>,
    created_time: String,
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    message: &'static str,
    deleted_record: DeletedRecord,
    total_records_before_deletion: usize,
}

/// The delete-random workflow: resolve config, list, pick, delete.
///
/// The two upstream calls have no transactional linkage; concurrent
/// requests may list the same records and race on the same one. That
/// matches the upstream API's semantics and is accepted here.
async fn delete_random(State(state): State<AppState>) -> Result<Json<DeleteResponse>, DeleteError> {
    metrics::counter!(DELETE_REQUESTS.name).increment(1);
    let inner = &*state.inner;

    let target = inner
        .target
        .as_ref()
        .ok_or_else(|| DeleteError::MissingConfig(inner.missing.clone()))?;

    tracing::info!(table = %target.table_name, "fetching records");
    let mut records = target.client.list_records().await?;

    if records.is_empty() {
        return Err(DeleteError::EmptyTable {
            table: target.table_name.clone(),
        });
    }

    let total = records.len();
    tracing::info!(count = total, "found records");
    metrics::histogram!(RECORDS_LISTED.name).record(total as f64);

    let record = records.swap_remove(inner.picker.pick(total));

    tracing::info!(id = %record.id, "deleting record");
    target.client.delete_record(&record.id).await?;
    tracing::info!(id = %record.id, "record deleted");
    metrics::counter!(DELETE_OUTCOMES.name, "outcome" => "deleted").increment(1);

    Ok(Json(DeleteResponse {
        success: true,
        message: "Random record deleted successfully",
        deleted_record: DeletedRecord {
            id: record.id,
            fields: record.fields,
            created_time: record.created_time,
        },
        total_records_before_deletion: total,
    }))
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "delete-random failed");
        metrics::counter!(DELETE_OUTCOMES.name, "outcome" => self.outcome()).increment(1);

        let (status, body) = match self {
            DeleteError::MissingConfig(required) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Missing required environment variables",
                    "required": required,
                }),
            ),
            DeleteError::EmptyTable { table } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "No records found in the table",
                    "table": table,
                }),
            ),
            DeleteError::Airtable(AirtableError::Upstream { status, body }) => match status {
                StatusCode::FORBIDDEN => (
                    StatusCode::FORBIDDEN,
                    json!({
                        "error": "Forbidden - check your Airtable Personal Access Token permissions",
                        "details": "Ensure your PAT has \"data.records:write\" scope for this base",
                    }),
                ),
                StatusCode::NOT_FOUND => (
                    StatusCode::NOT_FOUND,
                    json!({
                        "error": "Table not found",
                        "details": "Check your base ID and table name",
                    }),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "message": upstream_message(&body),
                    }),
                ),
            },
            DeleteError::Airtable(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal server error",
                    "message": err.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Prefer the upstream payload's `error` field; fall back to the raw body.
fn upstream_message(body: &str) -> Value {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|payload| payload.get("error").cloned())
        .unwrap_or_else(|| Value::String(body.to_string()))
}
