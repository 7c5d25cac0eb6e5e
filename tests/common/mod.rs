//! A throwaway local stand-in for the Everactive API used by the integration tests.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use evercli::auth::Clock;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";

/// A canned response: status plus raw body.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    pub fn ok(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// What the server will answer and what it has seen.
#[derive(Default)]
pub struct MockState {
    pub token_requests: AtomicUsize,
    pub token_failure: Mutex<Option<StatusCode>>,
    pub token_lifetime: Mutex<Option<u64>>,
    pub token_delay_ms: Mutex<u64>,
    pub token_body: Mutex<Option<String>>,
    pub token_forms: Mutex<Vec<HashMap<String, String>>>,

    pub health: Mutex<Option<StatusCode>>,

    pub list_response: Mutex<Option<Canned>>,
    pub list_requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

impl MockState {
    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub fn fail_token_requests(&self, status: Option<StatusCode>) {
        *self.token_failure.lock().unwrap() = status;
    }

    pub fn set_token_delay_ms(&self, delay: u64) {
        *self.token_delay_ms.lock().unwrap() = delay;
    }

    /// Answer token requests with `200` and this raw body instead of a token.
    pub fn set_token_body(&self, body: Option<&str>) {
        *self.token_body.lock().unwrap() = body.map(str::to_string);
    }

    pub fn set_health(&self, status: StatusCode) {
        *self.health.lock().unwrap() = Some(status);
    }

    pub fn set_list_response(&self, canned: Canned) {
        *self.list_response.lock().unwrap() = Some(canned);
    }

    pub fn last_list_request(&self) -> Option<RecordedRequest> {
        self.list_requests.lock().unwrap().last().cloned()
    }
}

pub struct MockServer {
    pub state: Arc<MockState>,
    pub addr: SocketAddr,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/auth/token", post(token))
            .route("/health", get(health))
            .route("/ds/v1/steamtraps", get(list))
            .route("/ds/v1/eversensors", get(list))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { state, addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn token(
    State(state): State<Arc<MockState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let n = state.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
    state.token_forms.lock().unwrap().push(form.clone());

    let delay = *state.token_delay_ms.lock().unwrap();
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }

    if let Some(status) = *state.token_failure.lock().unwrap() {
        return (status, r#"{"error":"invalid_client"}"#).into_response();
    }

    if let Some(body) = state.token_body.lock().unwrap().clone() {
        return ([(header::CONTENT_TYPE, "application/json")], body).into_response();
    }

    let valid = form.get("client_id").map(String::as_str) == Some(CLIENT_ID)
        && form.get("client_secret").map(String::as_str) == Some(CLIENT_SECRET)
        && form.get("grant_type").map(String::as_str) == Some("client_credentials");
    if !valid {
        return (StatusCode::UNAUTHORIZED, r#"{"error":"invalid_client"}"#).into_response();
    }

    let lifetime = state.token_lifetime.lock().unwrap().unwrap_or(3600);
    let body = format!(
        r#"{{"access_token":"token-{n}","token_type":"Bearer","expires_in":{lifetime}}}"#
    );
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn health(State(state): State<Arc<MockState>>) -> Response {
    let status = state.health.lock().unwrap().unwrap_or(StatusCode::OK);
    (status, r#"{"status":"ignored"}"#).into_response()
}

async fn list(
    State(state): State<Arc<MockState>>,
    uri: axum::http::Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let authorization = header_value(header::AUTHORIZATION);

    state.list_requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query,
        authorization: authorization.clone(),
        accept: header_value(header::ACCEPT),
    });

    if !authorization
        .as_deref()
        .is_some_and(|value| value.starts_with("Bearer token-"))
    {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let canned = state
        .list_response
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| Canned::ok(r#"{"data":[]}"#));
    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}

/// A clock the tests move by hand.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        })
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
