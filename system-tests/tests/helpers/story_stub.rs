// system-tests/tests/helpers/story_stub.rs
// ============================================================================
// Module: Story Stub
// Description: Minimal story service stub for system-tests.
// Purpose: Exercise the full story wire contract over loopback HTTP.
// Dependencies: axum, serde_json, tokio
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::thread;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

/// Behavior toggles for the story stub.
#[derive(Clone, Debug)]
pub struct StoryStubOptions {
    /// Username the login route accepts.
    pub username: String,
    /// Password the login route accepts.
    pub password: String,
    /// Answer every login with 401 and no token.
    pub deny_logins: bool,
    /// Answer logins with a non-JSON body.
    pub malformed_login_body: bool,
    /// Answer every create with 400.
    pub reject_creates: bool,
}

impl Default for StoryStubOptions {
    fn default() -> Self {
        Self {
            username: "reex".to_string(),
            password: "qwerty123".to_string(),
            deny_logins: false,
            malformed_login_body: false,
            reject_creates: false,
        }
    }
}

/// Recorded request metadata for story stub calls.
#[derive(Clone, Debug, Serialize)]
pub struct StubRequest {
    pub method: String,
    pub path: String,
    pub authorized: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Clone, Debug, Deserialize)]
struct DraftPayload {
    title: String,
    description: String,
    url: String,
}

#[derive(Clone)]
struct StubState {
    options: StoryStubOptions,
    sequence: Arc<AtomicU64>,
    tokens: Arc<Mutex<HashSet<String>>>,
    stories: Arc<Mutex<BTreeMap<String, DraftPayload>>>,
    requests: Arc<Mutex<Vec<StubRequest>>>,
}

impl StubState {
    fn record(&self, method: &str, path: &str, authorized: bool) {
        let Ok(mut guard) = self.requests.lock() else {
            return;
        };
        guard.push(StubRequest {
            method: method.to_string(),
            path: path.to_string(),
            authorized,
        });
    }

    fn bearer_ok(&self, headers: &HeaderMap) -> bool {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return false;
        };
        let Ok(text) = value.to_str() else {
            return false;
        };
        let Some(token) = text.strip_prefix("Bearer ") else {
            return false;
        };
        self.tokens.lock().is_ok_and(|tokens| tokens.contains(token))
    }

    fn issue_token(&self) -> String {
        let token = format!("stub-token-{}", self.next_sequence());
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(token.clone());
        }
        token
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed).saturating_add(1)
    }
}

/// Handle for the stub story service.
pub struct StoryStubHandle {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<StubRequest>>>,
    stories: Arc<Mutex<BTreeMap<String, DraftPayload>>>,
}

impl StoryStubHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns every recorded request in arrival order.
    pub fn requests(&self) -> Vec<StubRequest> {
        self.requests.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Returns the recorded requests that hit a story route.
    pub fn story_requests(&self) -> Vec<StubRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path.starts_with("/api/Story"))
            .collect()
    }

    /// Returns the number of stories currently stored.
    pub fn story_count(&self) -> usize {
        self.stories.lock().map_or(0, |stories| stories.len())
    }
}

impl Drop for StoryStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawn a stub story service with default options.
pub async fn spawn_story_stub() -> Result<StoryStubHandle, String> {
    spawn_story_stub_with_options(StoryStubOptions::default()).await
}

/// Spawn a stub story service with explicit behavior toggles.
#[allow(clippy::unused_async, reason = "Async signature keeps helper API consistent in tests.")]
pub async fn spawn_story_stub_with_options(
    options: StoryStubOptions,
) -> Result<StoryStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("story stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("story stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("story stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}");

    let requests = Arc::new(Mutex::new(Vec::new()));
    let stories = Arc::new(Mutex::new(BTreeMap::new()));
    let state = StubState {
        options,
        sequence: Arc::new(AtomicU64::new(0)),
        tokens: Arc::new(Mutex::new(HashSet::new())),
        stories: Arc::clone(&stories),
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/User/Authentication", post(handle_login))
        .route("/api/Story/Create", post(handle_create))
        .route("/api/Story/Edit/{id}", put(handle_edit))
        .route("/api/Story/All", get(handle_list))
        .route("/api/Story/Delete/{id}", delete(handle_delete))
        .with_state(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(error) => {
                let _ = error;
                return;
            }
        };
        runtime.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(error) => {
                    let _ = error;
                    return;
                }
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(StoryStubHandle {
        base_url,
        shutdown: Some(shutdown_tx),
        join: Some(join),
        requests,
        stories,
    })
}

// Readiness probes land here so the recorded requests stay limited to
// traffic the harness itself produced.
async fn handle_health() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn handle_login(
    State(state): State<StubState>,
    Json(login): Json<LoginPayload>,
) -> Response {
    state.record("POST", "/api/User/Authentication", false);
    if state.options.deny_logins {
        return unauthorized("Login denied");
    }
    if state.options.malformed_login_body {
        return (StatusCode::OK, "welcome".to_string()).into_response();
    }
    if login.username != state.options.username || login.password != state.options.password {
        return unauthorized("Invalid username or password!");
    }
    let token = state.issue_token();
    (StatusCode::OK, Json(json!({"username": login.username, "accessToken": token})))
        .into_response()
}

async fn handle_create(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(draft): Json<DraftPayload>,
) -> Response {
    let authorized = state.bearer_ok(&headers);
    state.record("POST", "/api/Story/Create", authorized);
    if !authorized {
        return unauthorized("Unauthorized");
    }
    if state.options.reject_creates
        || draft.title.trim().is_empty()
        || draft.description.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"msg": "Unable to create new story spoiler!"})),
        )
            .into_response();
    }
    let id = format!("{:024x}", state.next_sequence());
    let Ok(mut stories) = state.stories.lock() else {
        return stub_poisoned();
    };
    stories.insert(id.clone(), draft);
    (StatusCode::CREATED, Json(json!({"id": id, "msg": "Successfully created!"}))).into_response()
}

async fn handle_edit(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(draft): Json<DraftPayload>,
) -> Response {
    let authorized = state.bearer_ok(&headers);
    state.record("PUT", &format!("/api/Story/Edit/{id}"), authorized);
    if !authorized {
        return unauthorized("Unauthorized");
    }
    if draft.title.trim().is_empty() || draft.description.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"msg": "Unable to edit this story spoiler!"})),
        )
            .into_response();
    }
    let Ok(mut stories) = state.stories.lock() else {
        return stub_poisoned();
    };
    if let Some(entry) = stories.get_mut(&id) {
        *entry = draft;
        (StatusCode::OK, Json(json!({"msg": "Successfully edited!"}))).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"msg": "No spoilers..."}))).into_response()
    }
}

async fn handle_list(State(state): State<StubState>, headers: HeaderMap) -> Response {
    let authorized = state.bearer_ok(&headers);
    state.record("GET", "/api/Story/All", authorized);
    if !authorized {
        return unauthorized("Unauthorized");
    }
    let Ok(stories) = state.stories.lock() else {
        return stub_poisoned();
    };
    let items: Vec<Value> = stories
        .iter()
        .map(|(id, story)| {
            json!({
                "id": id,
                "title": story.title,
                "description": story.description,
                "url": story.url,
            })
        })
        .collect();
    (StatusCode::OK, Json(Value::Array(items))).into_response()
}

async fn handle_delete(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let authorized = state.bearer_ok(&headers);
    state.record("DELETE", &format!("/api/Story/Delete/{id}"), authorized);
    if !authorized {
        return unauthorized("Unauthorized");
    }
    let Ok(mut stories) = state.stories.lock() else {
        return stub_poisoned();
    };
    if stories.remove(&id).is_some() {
        (StatusCode::OK, Json(json!({"msg": "Deleted successfully!"}))).into_response()
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({"msg": "Unable to delete this story spoiler!"})))
            .into_response()
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": message}))).into_response()
}

fn stub_poisoned() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "story stub state poisoned"})))
        .into_response()
}
