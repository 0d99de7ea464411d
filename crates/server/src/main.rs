//! # photoshoot-server
//!
//! Upload form that turns a schedule spreadsheet into a PHOTOSHOOT.zip of
//! empty folders.

mod page;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use photoshoot_core::{
    organize_upload, ArchiveStrategy, ErrorKind, OrganizeOptions, ResolutionMode, ShootError,
    UploadRejection, ARCHIVE_FILE_NAME, MAX_UPLOAD_BYTES,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Multipart field carrying the schedule.
const FILE_FIELD: &str = "file";

/// Server configuration, from flags or environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "photoshoot-server")]
#[command(author, version, about = "Serve the PHOTOSHOOT folder generator", long_about = None)]
struct Config {
    /// Address to listen on
    #[arg(long, env = "PHOTOSHOOT_BIND", default_value = "0.0.0.0:5001")]
    bind: String,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "PHOTOSHOOT_MAX_UPLOAD_BYTES", default_value_t = MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Reject tables where one column matches more than one role
    #[arg(long, env = "PHOTOSHOOT_STRICT_COLUMNS")]
    strict_columns: bool,

    /// Create the folders on disk before zipping instead of zipping in memory
    #[arg(long, env = "PHOTOSHOOT_STAGED")]
    staged: bool,

    /// Parent directory for per-request staging directories
    #[arg(long, env = "PHOTOSHOOT_STAGING_DIR", value_name = "DIR")]
    staging_dir: Option<PathBuf>,

    /// Show a generic message instead of internal error details
    #[arg(long, env = "PHOTOSHOOT_HIDE_ERROR_DETAILS")]
    hide_error_details: bool,
}

impl Config {
    fn app_state(&self) -> AppState {
        AppState {
            options: OrganizeOptions {
                resolution: if self.strict_columns {
                    ResolutionMode::Strict
                } else {
                    ResolutionMode::Compatible
                },
                strategy: if self.staged {
                    ArchiveStrategy::Staged
                } else {
                    ArchiveStrategy::InMemory
                },
                staging_dir: self.staging_dir.clone(),
                max_upload_bytes: self.max_upload_bytes,
                ..OrganizeOptions::default()
            },
            hide_error_details: self.hide_error_details,
        }
    }
}

/// Shared per-server settings.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    options: OrganizeOptions,
    hide_error_details: bool,
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Query string of the index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    error: Option<String>,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Upload form, showing the message of a failed upload if any.
pub async fn index(Query(params): Query<IndexParams>) -> Html<String> {
    Html(page::render_index(params.error.as_deref()))
}

/// Accept a schedule and answer with the archive, or redirect back with a message.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let request_size = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    let (filename, bytes) = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => break (Some(filename), bytes),
                    Err(err) => return upload_failed(&err, request_size, &state),
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break (None, Default::default()),
            Err(err) => return upload_failed(&err, request_size, &state),
        }
    };

    let options = state.options.clone();
    let built = tokio::task::spawn_blocking(move || {
        organize_upload(filename.as_deref(), &bytes, &options)
    })
    .await;

    match built {
        Ok(Ok(photoshoot)) => archive_response(photoshoot.archive),
        Ok(Err(err)) => {
            warn!(error = %err, kind = ?err.kind(), "upload rejected");
            redirect_with_error(&error_message(&err, state.hide_error_details))
        }
        Err(err) => {
            warn!(error = %err, "build task failed");
            redirect_with_error(&format!("An error occurred: {err}"))
        }
    }
}

fn upload_failed(err: &MultipartError, request_size: Option<usize>, state: &AppState) -> Response {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let limit = state.options.max_upload_bytes;
        // Without a Content-Length, the body limit is all that was read
        let size = request_size.unwrap_or_else(|| limit.saturating_add(MULTIPART_OVERHEAD));
        let rejection = UploadRejection::TooLarge { size, limit };
        warn!(size, limit, "upload exceeds body limit");
        return redirect_with_error(&rejection.to_string());
    }

    let detail = err.body_text();
    warn!(detail, "could not read multipart upload");
    redirect_with_error(&format!("An error occurred: {detail}"))
}

/// Text shown to the user for a failed build.
fn error_message(err: &ShootError, hide_details: bool) -> String {
    match err.kind() {
        ErrorKind::InvalidUpload => err.to_string(),
        ErrorKind::MissingColumns => format!("Error reading spreadsheet: {err}"),
        ErrorKind::Unclassified if hide_details => {
            "An error occurred while building the archive.".to_string()
        }
        ErrorKind::Unclassified => format!("An error occurred: {err}"),
    }
}

fn redirect_with_error(message: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("error", message)
        .finish();
    Redirect::to(&format!("/?{query}")).into_response()
}

fn archive_response(archive: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ARCHIVE_FILE_NAME}\""),
            ),
        ],
        archive,
    )
        .into_response()
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.options.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = create_router(config.app_state());

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(addr = %config.bind, staged = config.staged, "photoshoot-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
