//! In-process stand-ins for the Airtable upstream and the service itself.

use crate::config::AirtableEnv;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A mock Airtable API serving one table, with scripted failures and
/// call recording.
pub struct MockAirtable {
    pub base_url: String,
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    records: Mutex<Vec<Value>>,
    fail_list: Mutex<Option<(StatusCode, String)>>,
    fail_delete: Mutex<Option<(StatusCode, String)>>,
    deleted_ids: Mutex<Vec<String>>,
    list_calls: Mutex<usize>,
}

impl MockAirtable {
    pub async fn with_records(records: Vec<Value>) -> Self {
        let state = Arc::new(MockState {
            records: Mutex::new(records),
            ..Default::default()
        });

        let app = Router::new()
            .route("/{base}/{table}", get(list_handler))
            .route("/{base}/{table}/{id}", delete(delete_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockAirtable { base_url, state }
    }

    /// Make the next list calls answer with the given status and body.
    pub fn fail_list(&self, status: StatusCode, body: &str) {
        *self.state.fail_list.lock().unwrap() = Some((status, body.to_string()));
    }

    /// Make the next delete calls answer with the given status and body.
    pub fn fail_delete(&self, status: StatusCode, body: &str) {
        *self.state.fail_delete.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.state.deleted_ids.lock().unwrap().clone()
    }

    pub fn record_ids(&self) -> Vec<String> {
        self.state
            .records
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r["id"].as_str().map(String::from))
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        *self.state.list_calls.lock().unwrap()
    }
}

async fn list_handler(State(state): State<Arc<MockState>>) -> Response {
    *state.list_calls.lock().unwrap() += 1;

    if let Some((status, body)) = state.fail_list.lock().unwrap().clone() {
        return (status, body).into_response();
    }

    let records = state.records.lock().unwrap().clone();
    Json(json!({ "records": records })).into_response()
}

async fn delete_handler(
    State(state): State<Arc<MockState>>,
    Path((_base, _table, id)): Path<(String, String, String)>,
) -> Response {
    if let Some((status, body)) = state.fail_delete.lock().unwrap().clone() {
        return (status, body).into_response();
    }

    state
        .records
        .lock()
        .unwrap()
        .retain(|r| r["id"].as_str() != Some(id.as_str()));
    state.deleted_ids.lock().unwrap().push(id.clone());

    Json(json!({ "deleted": true, "id": id })).into_response()
}

/// An Airtable record in wire shape.
pub fn record(id: &str, fields: Value) -> Value {
    json!({
        "id": id,
        "fields": fields,
        "createdTime": "2024-06-01T12:00:00.000Z"
    })
}

/// A fully populated configuration pointing at the mock's table.
pub fn test_env() -> AirtableEnv {
    AirtableEnv {
        pat: Some("pat-test".into()),
        base_id: Some("appTest".into()),
        table_name: Some("Tasks".into()),
    }
}

/// Serve the given router on an ephemeral local port and return its URL.
pub async fn spawn_app(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
