//! Fake document-store API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /families`, applying every query parameter as an
//! equality filter on the stored documents and answering
//! `{"documents": [...]}`. Failure modes (error status, raw body, slow
//! responses) can be switched on per test.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeStoreApi::start().await.unwrap();
//! api.add_documents(directory_documents()).await;
//! let store = HttpStore::new(&api.base_url(), "families", Duration::from_secs(1)).unwrap();
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    documents: Vec<serde_json::Value>,
    /// Answer every request with this status and a short error body.
    fail_with: Option<StatusCode>,
    /// Answer every request with this body verbatim (status 200).
    raw_body: Option<String>,
    delay: Option<Duration>,
    /// Query parameters of every request received, in order.
    requests: Vec<HashMap<String, String>>,
}

/// Handle to the running fake document-store API server.
pub struct FakeStoreApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeStoreApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/families", get(list_families))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn add_documents(&self, documents: Vec<serde_json::Value>) {
        self.state.lock().await.documents.extend(documents);
    }

    pub async fn fail_with(&self, status: StatusCode) {
        self.state.lock().await.fail_with = Some(status);
    }

    pub async fn respond_raw(&self, body: &str) {
        self.state.lock().await.raw_body = Some(body.to_string());
    }

    pub async fn delay(&self, delay: Duration) {
        self.state.lock().await.delay = Some(delay);
    }

    /// Query parameters of every request received so far.
    pub async fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn list_families(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> Response {
    let (delay, fail_with, raw_body, documents) = {
        let mut state = state.lock().await;
        state.requests.push(params.clone());
        (
            state.delay,
            state.fail_with,
            state.raw_body.clone(),
            state.documents.clone(),
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(status) = fail_with {
        return (status, "permission denied").into_response();
    }
    if let Some(body) = raw_body {
        return (StatusCode::OK, body).into_response();
    }

    let matching: Vec<serde_json::Value> = documents
        .into_iter()
        .filter(|doc| {
            params
                .iter()
                .all(|(key, value)| doc.get(key).and_then(|v| v.as_str()) == Some(value.as_str()))
        })
        .collect();

    axum::Json(serde_json::json!({ "documents": matching })).into_response()
}
