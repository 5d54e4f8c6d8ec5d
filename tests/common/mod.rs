//! In-process stand-in for the habit backend.
//!
//! Behaves like the real service for the six endpoints the dashboard uses
//! and records every request it sees as `"METHOD /path"`.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use habit_board::{AppState, Config};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct MockData {
    pub habits: Vec<Value>,
    pub records: Vec<Value>,
    pub next_id: i64,
    pub hits: Vec<String>,
    pub failing: bool,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    pub data: Arc<Mutex<MockData>>,
}

impl MockBackend {
    /// Seeds habits (oldest first, as the backend lists them).
    pub fn with_habits(names: &[&str]) -> Self {
        let backend = Self::default();
        {
            let mut data = backend.data.lock().unwrap();
            for name in names {
                data.next_id += 1;
                let id = data.next_id;
                data.habits.push(json!({
                    "id": id,
                    "nombre": name,
                    "descripcion": format!("{name} every day"),
                    "meta_frecuencia": "Diaria",
                }));
            }
        }
        backend
    }

    /// Replaces the stored habits with raw JSON rows, as the backend would list them.
    pub fn set_habits(&self, habits: Value) {
        let mut data = self.data.lock().unwrap();
        data.habits = habits.as_array().cloned().unwrap_or_default();
    }

    pub fn set_records(&self, records: Value) {
        let mut data = self.data.lock().unwrap();
        data.records = records.as_array().cloned().unwrap_or_default();
    }

    pub fn set_failing(&self, failing: bool) {
        self.data.lock().unwrap().failing = failing;
    }

    pub fn hits(&self) -> Vec<String> {
        self.data.lock().unwrap().hits.clone()
    }

    pub fn clear_hits(&self) {
        self.data.lock().unwrap().hits.clear();
    }

    pub fn count(&self, hit: &str) -> usize {
        self.hits().iter().filter(|h| h.as_str() == hit).count()
    }

    pub async fn serve(&self) -> String {
        let router = Router::new()
            .route("/api/habitos", get(list_habits).post(create_habit))
            .route("/api/habitos/:id", put(update_habit).delete(delete_habit))
            .route("/api/registros", get(list_records).post(create_record))
            .with_state(self.clone());
        serve(router).await
    }

    fn enter(&self, hit: String) -> Result<std::sync::MutexGuard<'_, MockData>, StatusCode> {
        let mut data = self.data.lock().unwrap();
        data.hits.push(hit);
        if data.failing {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(data)
    }
}

pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn config_for(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        port: 0,
        theme: Default::default(),
        request_timeout: None,
    }
}

/// Dashboard state wired to `api_url`, with both lists already loaded.
pub async fn loaded_state(api_url: &str) -> AppState {
    let state = AppState::new(config_for(api_url)).unwrap();
    state.load_all().await;
    state
}

/// A URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn list_habits(State(backend): State<MockBackend>) -> impl IntoResponse {
    let data = match backend.enter("GET /api/habitos".to_string()) {
        Ok(data) => data,
        Err(status) => return status.into_response(),
    };
    Json(Value::Array(data.habits.clone())).into_response()
}

async fn create_habit(
    State(backend): State<MockBackend>,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    let mut data = match backend.enter("POST /api/habitos".to_string()) {
        Ok(data) => data,
        Err(status) => return status.into_response(),
    };
    data.next_id += 1;
    body["id"] = json!(data.next_id);
    data.habits.push(body.clone());
    Json(body).into_response()
}

async fn update_habit(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut data = match backend.enter(format!("PUT /api/habitos/{id}")) {
        Ok(data) => data,
        Err(status) => return status.into_response(),
    };
    if let Some(slot) = data.habits.iter_mut().find(|h| h["id"] == json!(id)) {
        *slot = body;
    }
    StatusCode::OK.into_response()
}

async fn delete_habit(State(backend): State<MockBackend>, Path(id): Path<i64>) -> impl IntoResponse {
    let mut data = match backend.enter(format!("DELETE /api/habitos/{id}")) {
        Ok(data) => data,
        Err(status) => return status.into_response(),
    };
    let before = data.habits.len();
    data.habits.retain(|h| h["id"] != json!(id));
    if data.habits.len() == before {
        return (StatusCode::NOT_FOUND, "habit not found").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_records(State(backend): State<MockBackend>) -> impl IntoResponse {
    let data = match backend.enter("GET /api/registros".to_string()) {
        Ok(data) => data,
        Err(status) => return status.into_response(),
    };
    Json(Value::Array(data.records.clone())).into_response()
}

async fn create_record(
    State(backend): State<MockBackend>,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    let mut data = match backend.enter("POST /api/registros".to_string()) {
        Ok(data) => data,
        Err(status) => return status.into_response(),
    };
    let id = data.records.len() as i64 + 100;
    body["id"] = json!(id);
    data.records.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}
