//! In-process doubles for the ports, shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tokio::sync::RwLock;

use crate::domain::{DocumentCategory, User};
use crate::ports::{
    ApiRequest, ApiResponse, HttpTransport, Method, Navigator, Route, SessionStore,
    TransportError,
};

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

/// Transport answering from a script.
///
/// Routes registered with [`ScriptedTransport::route`] answer every matching
/// request; anything else pops the next queued outcome. An exhausted queue
/// yields a connection error.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), ApiResponse>>,
    queue: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: ApiResponse) {
        self.queue.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, error: TransportError) {
        self.queue.lock().unwrap().push_back(Err(error));
    }

    pub fn route(&self, method: Method, path: &str, response: ApiResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count_path(&self, path: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.path.clone());
        self.sent.lock().unwrap().push(request);

        if let Some(response) = self.routes.lock().unwrap().get(&key) {
            return Ok(response.clone());
        }
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("script exhausted".into())))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub fn sample_user() -> User {
    User {
        id: 1,
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        date_joined: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
    }
}

pub fn user_json(user: &User) -> Value {
    serde_json::to_value(user).unwrap()
}

pub fn auth_json(access: &str, refresh: &str) -> Value {
    json!({
        "message": "Connexion réussie",
        "user": user_json(&sample_user()),
        "tokens": {"access": access, "refresh": refresh},
    })
}

pub fn list_item_json(id: u64, category: DocumentCategory) -> Value {
    json!({
        "id": id,
        "title": format!("Document {id}"),
        "file_name": format!("doc{id}.pdf"),
        "category": category.as_str(),
        "file_type": "pdf",
        "file_size": 2048,
        "created_at": "2024-03-01T08:00:00Z",
    })
}

pub fn document_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "file": format!("http://localhost:8000/media/documents/doc{id}.pdf"),
        "file_name": format!("doc{id}.pdf"),
        "category": "math",
        "content_preview": "Théorème de Pythagore",
        "keywords": ["triangle", "hypoténuse"],
        "file_type": "pdf",
        "file_size": 2048,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z",
    })
}

pub fn stats_json(total: u64) -> Value {
    json!({
        "total_documents": total,
        "categories": {"math": total, "algo": 0, "histoire": 0, "autres": 0},
    })
}
