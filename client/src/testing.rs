//! Scripted [`Transport`] for tests.
//!
//! Replies are queued per `"METHOD /path"` route and consumed in order. A
//! request with nothing scripted gets a 500 envelope, so a missing script
//! shows up as a failed call rather than a hang. Every request is captured
//! after the bearer header has been attached.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use shared::PaginatedResponse;

use crate::core::{ApiError, Result, Transport};
use crate::services::api::transport::{HttpRequest, HttpResponse};
use crate::services::api::ApiClient;
use crate::storage::{MemoryStore, TokenStore};

enum Reply {
    Response(HttpResponse),
    Network(String),
}

struct Scripted {
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

fn route(method: &Method, path: &str) -> String {
    format!("{} {}", method, path)
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: Method, path: &str, reply: Reply, delay: Option<Duration>) {
        self.routes
            .lock()
            .entry(route(&method, path))
            .or_default()
            .push_back(Scripted { reply, delay });
    }

    /// Queue a raw JSON reply.
    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.reply_after(method, path, status, body, Duration::ZERO)
    }

    /// Queue a raw JSON reply delivered after `delay`.
    pub fn reply_after(&self, method: Method, path: &str, status: u16, body: Value, delay: Duration) -> &Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_vec(&body).unwrap_or_default();
        let delay = (!delay.is_zero()).then_some(delay);
        self.push(method, path, Reply::Response(HttpResponse::new(status, body)), delay);
        self
    }

    /// Queue a non-JSON body.
    pub fn reply_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.push(
            method,
            path,
            Reply::Response(HttpResponse::new(status, body.as_bytes().to_vec())),
            None,
        );
        self
    }

    /// Queue `200 {"success": true, "data": data}`.
    pub fn ok(&self, method: Method, path: &str, data: Value) -> &Self {
        self.reply(method, path, 200, json!({"success": true, "data": data}))
    }

    /// Queue one page of a paginated collection.
    pub fn page<T: serde::Serialize>(&self, method: Method, path: &str, page: &PaginatedResponse<T>) -> &Self {
        let data = serde_json::to_value(page).unwrap_or(Value::Null);
        self.ok(method, path, data)
    }

    /// Queue `401 {"success": false, "error": "Token expired"}`.
    pub fn unauthorized(&self, method: Method, path: &str) -> &Self {
        self.reply(method, path, 401, json!({"success": false, "error": "Token expired"}))
    }

    /// Queue a connection failure.
    pub fn network_error(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Reply::Network("connection refused".to_string()), None);
        self
    }

    /// Every request received, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Requests received on one route.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    /// Scripted replies not yet consumed, across all routes.
    pub fn pending(&self) -> usize {
        self.routes.lock().values().map(VecDeque::len).sum()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = route(&request.method, &request.path);
        self.requests.lock().push(request);

        let next = self.routes.lock().get_mut(&key).and_then(VecDeque::pop_front);
        let Some(scripted) = next else {
            let body = serde_json::to_vec(&json!({"success": false, "error": format!("unexpected request {}", key)}))
                .unwrap_or_default();
            return Ok(HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR, body));
        };

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        match scripted.reply {
            Reply::Response(response) => Ok(response),
            Reply::Network(message) => Err(ApiError::Network(message)),
        }
    }
}

/// Client over `transport` with an in-memory session store.
pub fn client_with(transport: Arc<FakeTransport>) -> (Arc<ApiClient>, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let tokens = Arc::new(TokenStore::new(storage.clone()));
    (Arc::new(ApiClient::new(transport, tokens)), storage)
}

/// JSON for a minimal user profile.
pub fn user_json(id: &str, username: &str) -> Value {
    json!({"id": id, "username": username, "email": format!("{}@example.com", username)})
}
