//! Request handlers
//!
//! Each handler is a direct translation: one request, one store call, one
//! status + body. Store calls block on filesystem I/O, so they run on
//! tokio's blocking pool.

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::{self, HeaderMap};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Deserialize;

use crate::error::{FlatError, Result};
use crate::key;
use crate::store::Store;

use super::audit::{log_audit_event, AuditEvent};
use super::response::{cause, text, write_report};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,

    /// Emit audit events for rejected keys and partial writes
    pub audit: bool,
}

impl AppState {
    pub fn new(store: Arc<Store>, audit: bool) -> Self {
        Self { store, audit }
    }

    /// Run a store call on the blocking pool
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Store) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| FlatError::Io(io::Error::new(io::ErrorKind::Other, e)))?
    }

    fn reject(&self, method: &Method, err: &FlatError) {
        if !self.audit {
            return;
        }
        if let FlatError::InvalidKey { key, reason } = err {
            log_audit_event(AuditEvent::InvalidKeyRejected {
                method: method.to_string(),
                key: key.clone(),
                reason: *reason,
            });
        }
    }
}

/// Query parameters of `GET /`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub prefix: Option<String>,
    pub encode: Option<String>,
}

impl ListQuery {
    /// An empty prefix filters nothing
    fn prefix(&self) -> Option<String> {
        self.prefix.clone().filter(|p| !p.is_empty())
    }

    fn encode(&self) -> bool {
        self.encode.as_deref() == Some("true")
    }
}

/// GET / - List keys, newline-joined. An empty store is an empty 200.
pub async fn list_keys(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let prefix = query.prefix();

    match state.run(move |store| store.list(prefix.as_deref())).await {
        Ok(keys) => {
            let body = if query.encode() {
                keys.iter().map(|k| key::encode(k)).collect::<Vec<_>>().join("\n")
            } else {
                keys.join("\n")
            };
            (StatusCode::OK, body).into_response()
        }
        Err(err) => text(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error 500: Couldn't read directory ({}).", cause(&err)),
        ),
    }
}

/// POST / - Set every pair of a urlencoded form body
pub async fn set_pairs(State(state): State<AppState>, body: Bytes) -> Response {
    // Repeated keys resolve last-wins
    let pairs: BTreeMap<String, Vec<u8>> = key::parse_form(&body).into_iter().collect();
    if pairs.is_empty() {
        return FlatError::EmptyInput.into_response();
    }

    let pairs: Vec<(String, Vec<u8>)> = pairs.into_iter().collect();
    let total = pairs.len();
    tracing::debug!(count = total, "Bulk set");

    let report = match state.run(move |store| Ok(store.set(&pairs))).await {
        Ok(report) => report,
        Err(err) => return err.into_response(),
    };

    for failure in report.failures() {
        state.reject(&Method::POST, &failure.error);
    }
    if state.audit && !report.is_success() {
        log_audit_event(AuditEvent::PartialWrite {
            failed: report.failed_count(),
            total,
        });
    }
    write_report(&report)
}

/// POST /<key>=<value> - Set the single pair carried in the path
pub async fn set_path_pair(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let pair = match key::parse_path_pair(uri.path()) {
        Ok(pair) => pair,
        Err(FlatError::MalformedPair { .. }) => {
            let host = headers
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");
            return text(
                StatusCode::BAD_REQUEST,
                format!("Must post in format `curl -XPOST http://{}/key=value`.", host),
            );
        }
        Err(err) => {
            state.reject(&Method::POST, &err);
            return err.into_response();
        }
    };

    tracing::debug!(key = %pair.key, "Path set");
    let pairs = [(pair.key, pair.value)];
    match state.run(move |store| Ok(store.set(&pairs))).await {
        Ok(report) => write_report(&report),
        Err(err) => err.into_response(),
    }
}

/// GET /<key> - Serve the stored value
pub async fn get_value(State(state): State<AppState>, uri: Uri) -> Response {
    let key = path_key(&uri);

    match state.run(move |store| store.get(&key)).await {
        Ok(value) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            value,
        )
            .into_response(),
        Err(err) => {
            state.reject(&Method::GET, &err);
            err.into_response()
        }
    }
}

/// DELETE /<key> - Remove a key
pub async fn delete_key(State(state): State<AppState>, uri: Uri) -> Response {
    let key = path_key(&uri);
    if key.is_empty() {
        return missing_filename();
    }

    let target = key.clone();
    match state.run(move |store| store.delete(&target)).await {
        Ok(()) => text(StatusCode::OK, format!("File \"{}\" deleted successfully.", key)),
        Err(FlatError::NotFound { .. }) => text(
            StatusCode::NOT_FOUND,
            format!("Could not delete {}: file not found.", key),
        ),
        Err(err @ FlatError::InvalidKey { .. }) => {
            state.reject(&Method::DELETE, &err);
            err.into_response()
        }
        Err(err) => text(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error 500: Couldn't delete file \"{}\" ({}).", key, cause(&err)),
        ),
    }
}

/// DELETE / - No key given
pub async fn delete_without_key() -> Response {
    missing_filename()
}

fn missing_filename() -> Response {
    text(StatusCode::BAD_REQUEST, "Filename is required to delete.")
}

/// Decoded key of a single-key route
fn path_key(uri: &Uri) -> String {
    let raw = uri.path().strip_prefix('/').unwrap_or(uri.path());
    key::decode(raw).into_owned()
}
