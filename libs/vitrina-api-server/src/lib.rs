use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use serde_json::Value;
use tower_http::services::ServeDir;

use tokio_util::sync::CancellationToken;

use vitrina_api::error::StoreError;
use vitrina_api::record::Record;
use vitrina_api::resource::{ResourceContext, ResourceInfo, ResourceKind, ResourceRead};

const MSG_SAVED: &str = "Datos guardados correctamente.";
const MSG_MISSING: &str = "Faltan datos obligatorios.";

#[derive(Clone)]
pub struct AppState {
    ctx: Arc<dyn ResourceContext>,
}

impl AppState {
    pub fn new(ctx: Arc<dyn ResourceContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiServerError {
    #[error("bind api :{port}: {source}")]
    Bind { port: u16, source: std::io::Error },

    #[error("serve: {0}")]
    Serve(std::io::Error),
}

/// Resource HTTP API server.
pub async fn run(
    port: u16,
    ctx: Arc<dyn ResourceContext>,
    static_dir: Option<&std::path::Path>,
    shutdown: CancellationToken,
) -> Result<(), ApiServerError> {
    let app = build_router(AppState::new(ctx), static_dir);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| ApiServerError::Bind { port, source })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(ApiServerError::Serve)?;

    Ok(())
}

/// Assemble the router. Public so tests can drive the API without binding
/// a fixed port.
pub fn build_router(state: AppState, static_dir: Option<&std::path::Path>) -> Router {
    let router = Router::new()
        .route("/healthz", get(handle_healthz))
        .route("/resources", get(handle_list_resources))
        .route(
            "/{resource}",
            get(handle_read_resource).post(handle_append_record),
        );

    // `/` is the collaborating static page when a directory is configured,
    // a JSON service index otherwise. Routes win over files, so top-level
    // asset paths resolve to the resource handler, not the directory.
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.route("/", get(handle_index)),
    };

    router.with_state(state)
}

// --- GET /healthz ---

async fn handle_healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// --- GET / (no static directory configured) ---

#[derive(Serialize)]
struct ServiceIndex {
    service: &'static str,
    version: &'static str,
    resources: Vec<ResourceInfo>,
}

async fn handle_index(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(ServiceIndex {
        service: "vitrina",
        version: env!("CARGO_PKG_VERSION"),
        resources: state.ctx.resources(),
    })
}

// --- GET /resources ---

async fn handle_list_resources(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.ctx.resources())
}

// --- GET /{resource} ---

async fn handle_read_resource(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.ctx.read(&name) {
        Ok(ResourceRead::Snapshot(body)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Ok(ResourceRead::Records(records)) => axum::Json(records).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, format!("error: {e}")).into_response(),
    }
}

// --- POST /{resource} ---

/// Fixed reply shape of the write endpoint; clients match on `ok` and the
/// exact `mensaje` strings.
#[derive(Serialize)]
struct WriteReply {
    ok: bool,
    mensaje: &'static str,
}

async fn handle_append_record(
    State(state): State<AppState>,
    Path(name): Path<String>,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    match Record::from_value(body) {
        Ok(record) => match state.ctx.append(&name, record) {
            Ok(()) => write_reply(true).into_response(),
            Err(StoreError::MissingFields { .. }) => write_reply(false).into_response(),
            Err(e @ StoreError::NotAppendable(_)) => {
                (StatusCode::METHOD_NOT_ALLOWED, format!("error: {e}")).into_response()
            }
            Err(e) => (StatusCode::NOT_FOUND, format!("error: {e}")).into_response(),
        },
        // JSON that is not an object cannot carry the required fields, but
        // routing misses still win over the validation verdict.
        Err(_) => {
            let kind = state
                .ctx
                .resources()
                .into_iter()
                .find(|info| info.name == name)
                .map(|info| info.kind);
            match kind {
                Some(ResourceKind::Collection) => write_reply(false).into_response(),
                Some(ResourceKind::Snapshot) => {
                    let e = StoreError::NotAppendable(name);
                    (StatusCode::METHOD_NOT_ALLOWED, format!("error: {e}")).into_response()
                }
                None => {
                    let e = StoreError::NotFound(name);
                    (StatusCode::NOT_FOUND, format!("error: {e}")).into_response()
                }
            }
        }
    }
}

fn write_reply(ok: bool) -> axum::Json<WriteReply> {
    axum::Json(WriteReply {
        ok,
        mensaje: if ok { MSG_SAVED } else { MSG_MISSING },
    })
}
