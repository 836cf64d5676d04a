//! In-process stand-in for the ideation backend.
//!
//! The stub owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Every request is recorded so tests
//! can assert on what actually crossed the wire. Dropping the stub stops the
//! server even if a test panics.

use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub const VALID_EMAIL: &str = "ada@example.com";
pub const VALID_PASSWORD: &str = "correct-horse";
pub const ISSUED_TOKEN: &str = "abc123";
pub const SIGNUP_TOKEN: &str = "fresh-token";
/// How long `/api/slow` stalls before answering.
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_millis(1500);

/// One request as the stub received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("recorded body is JSON")
    }
}

#[derive(Default)]
struct StubState {
    requests: Mutex<Vec<RecordedRequest>>,
    maintenance: AtomicBool,
}

pub struct StubBackend {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    state: web::Data<StubState>,
}

impl StubBackend {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let state = web::Data::new(StubState::default());

        let (base_url, server) = local
            .block_on(&runtime, spawn_stub_server(state.clone()))
            .expect("stub backend starts");

        Self {
            runtime,
            local,
            base_url,
            server,
            state,
        }
    }

    /// API base URL, including the `/api` prefix.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// Drive a future on the runtime that also serves the stub.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.local.block_on(&self.runtime, future)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one request")
    }

    /// Make `/health` answer `503` from now on.
    pub fn enter_maintenance(&self) {
        self.state.maintenance.store(true, Ordering::SeqCst);
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        let server = self.server.clone();
        self.local.block_on(&self.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// A base URL nothing listens on.
pub fn unreachable_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind spare port");
    let addr = listener.local_addr().expect("spare address");
    drop(listener);
    format!("http://{addr}/api")
}

async fn spawn_stub_server(
    state: web::Data<StubState>,
) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .default_service(web::to(route))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn header_text(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn route(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let recorded = RecordedRequest {
        method: req.method().as_str().to_owned(),
        path: req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned()),
        authorization: header_text(&req, header::AUTHORIZATION),
        content_type: header_text(&req, header::CONTENT_TYPE),
        body: body.to_vec(),
    };
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(recorded.clone());

    let bearer = recorded
        .authorization
        .as_deref()
        .and_then(|value| value.strip_prefix("Bearer "));

    match (recorded.method.as_str(), req.path()) {
        ("GET", "/health") if state.maintenance.load(Ordering::SeqCst) => {
            HttpResponse::ServiceUnavailable().body("down for maintenance")
        }
        ("GET", "/health") => HttpResponse::Ok().json(json!({ "status": "ok" })),
        ("POST", "/api/auth/login") => login(&recorded),
        ("POST", "/api/auth/register") => {
            let account = recorded.json();
            HttpResponse::Created().json(json!({
                "token": SIGNUP_TOKEN,
                "user": { "id": "u2", "name": account["name"], "email": account["email"] },
            }))
        }
        ("GET", "/api/users/me") => match bearer {
            Some(ISSUED_TOKEN | SIGNUP_TOKEN) => HttpResponse::Ok().json(json!({
                "id": "u1",
                "name": "Ada Lovelace",
                "email": VALID_EMAIL,
            })),
            _ => HttpResponse::Unauthorized().json(json!({ "message": "Token expired" })),
        },
        ("GET", "/api/feed") => {
            let page = req
                .query_string()
                .strip_prefix("page=")
                .and_then(|raw| raw.parse::<u32>().ok())
                .unwrap_or(1);
            HttpResponse::Ok().json(json!({
                "items": [{ "id": "i1", "title": "Solar kiosks", "stage": "concept", "votes": 3 }],
                "page": page,
                "hasMore": false,
            }))
        }
        ("DELETE", path) if path.starts_with("/api/forum/messages/") => {
            HttpResponse::NoContent().finish()
        }
        ("GET", "/api/empty") => HttpResponse::Ok().finish(),
        ("GET", "/api/slow") => {
            actix_web::rt::time::sleep(SLOW_RESPONSE_DELAY).await;
            HttpResponse::Ok().json(json!({ "late": true }))
        }
        ("GET", "/api/admin/reports") => {
            HttpResponse::Forbidden().json(json!({ "error": "Forbidden" }))
        }
        ("GET", "/api/explode") => HttpResponse::InternalServerError()
            .content_type("text/plain")
            .body(format!("upstream exploded: {}", "x".repeat(200))),
        ("POST", "/api/uploads") => HttpResponse::Ok().json(json!({
            "contentType": recorded.content_type,
            "bytes": recorded.body.len(),
        })),
        _ => HttpResponse::NotFound().json(json!({ "message": "Not found" })),
    }
}

fn login(recorded: &RecordedRequest) -> HttpResponse {
    let credentials = recorded.json();
    if credentials["email"] == VALID_EMAIL && credentials["password"] == VALID_PASSWORD {
        HttpResponse::Ok().json(json!({
            "token": ISSUED_TOKEN,
            "user": { "id": "u1", "name": "Ada Lovelace", "email": VALID_EMAIL },
        }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }))
    }
}
