#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request as seen by the stub server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

pub fn canned(status: u16, body: impl Into<String>) -> Canned {
    Canned {
        status,
        body: body.into(),
    }
}

#[derive(Default)]
struct StubState {
    events: Option<Canned>,
    messages: Option<Canned>,
    requests: Mutex<Vec<Recorded>>,
}

impl StubState {
    fn answer(
        &self,
        reply: Option<&Canned>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, [(HeaderName, &'static str); 1], String) {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        self.requests.lock().unwrap().push(Recorded {
            method: method.to_string(),
            path: uri.path().to_string(),
            headers,
            body,
        });

        let reply = reply.cloned().unwrap_or_else(|| canned(404, "not found"));
        (
            StatusCode::from_u16(reply.status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            reply.body,
        )
    }
}

async fn events_handler(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.answer(state.events.as_ref(), method, uri, headers, body)
}

async fn messages_handler(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.answer(state.messages.as_ref(), method, uri, headers, body)
}

/// Event feed and Messages API on one ephemeral port.
///
/// A route left as `None` answers 404. Every request that reaches a route is
/// recorded in arrival order.
pub struct Stub {
    base_url: String,
    state: Arc<StubState>,
    handle: tokio::task::JoinHandle<()>,
}

impl Stub {
    pub async fn start(events: Option<Canned>, messages: Option<Canned>) -> Stub {
        let state = Arc::new(StubState {
            events,
            messages,
            ..Default::default()
        });
        let app = Router::new()
            .route("/events", get(events_handler))
            .route("/v1/messages", post(messages_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Stub {
            base_url,
            state,
            handle,
        }
    }

    pub fn base(&self) -> String {
        self.base_url.clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

impl Drop for Stub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub const WAREHOUSE_RAVE: &str = r#"[{"name":"Warehouse Rave","genre":"techno","size":"small"}]"#;

pub const AUTH_ERROR: &str =
    r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;

/// A successful Messages API response carrying `text` as its only segment
pub fn message_body(text: &str) -> String {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-sonnet",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 120, "output_tokens": 12}
    })
    .to_string()
}

/// An address nothing listens on
pub async fn closed_port_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
