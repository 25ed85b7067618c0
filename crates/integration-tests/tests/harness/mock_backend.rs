//! Mock OpenAI-compatible backend for integration tests
//!
//! Serves canned responses on `/v1/chat/completions` and
//! `/v1/completions`, recording every request body and authorization
//! header so tests can assert on the exact wire payload.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Canned reply the mock returns for every completion request
#[derive(Debug, Clone)]
pub enum Reply {
    /// JSON body with the given status
    Json(StatusCode, serde_json::Value),
    /// Raw text body with the given status and content type
    Raw(StatusCode, &'static str, String),
    /// SSE stream of the given chunk payloads, terminated by `[DONE]`
    Sse(Vec<serde_json::Value>),
}

/// One recorded completion request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path (e.g. `/v1/chat/completions`)
    pub path: String,
    /// Parsed JSON body
    pub body: serde_json::Value,
    /// `Authorization` header value, when sent
    pub authorization: Option<String>,
}

struct BackendState {
    reply: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock backend that returns one configured reply
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<BackendState>,
}

impl MockBackend {
    /// Start the mock with the given reply, returning immediately
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(BackendState {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_completion))
            .route("/v1/completions", routing::post(handle_completion))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Start a mock that answers with HTTP 200 and the given JSON body
    pub async fn with_json(body: serde_json::Value) -> anyhow::Result<Self> {
        Self::start(Reply::Json(StatusCode::OK, body)).await
    }

    /// Base URL for configuring the mock as an endpoint
    ///
    /// Includes `/v1` since the adapter appends `chat/completions` or
    /// `completions`.
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The most recent request, panicking if none arrived
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_completion(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    request: axum::extract::Request,
) -> Response {
    let path = request.uri().path().to_owned();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    state.requests.lock().unwrap().push(RecordedRequest {
        path,
        body,
        authorization,
    });

    match &state.reply {
        Reply::Json(status, body) => (*status, axum::Json(body.clone())).into_response(),
        Reply::Raw(status, content_type, body) => {
            (*status, [(header::CONTENT_TYPE, *content_type)], body.clone()).into_response()
        }
        Reply::Sse(chunks) => {
            let mut body = String::new();
            for chunk in chunks {
                body.push_str(&format!("data: {chunk}\n\n"));
            }
            body.push_str("data: [DONE]\n\n");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/event-stream")],
                body,
            )
                .into_response()
        }
    }
}
