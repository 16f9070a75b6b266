//! Request audit logging
//!
//! When enabled, every request is logged under the `audit` target and
//! rejected unsafe keys are reported as structured events.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Span};

/// Audit events worth a dedicated log line
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// A key that would escape the store root (or is otherwise unusable)
    InvalidKeyRejected {
        method: String,
        key: String,
        reason: &'static str,
    },
    /// A write that failed for some of its keys
    PartialWrite { failed: usize, total: usize },
}

/// Log an audit event with structured fields
pub fn log_audit_event(event: AuditEvent) {
    match event {
        AuditEvent::InvalidKeyRejected {
            method,
            key,
            reason,
        } => {
            warn!(
                target: "audit",
                event_type = "invalid_key_rejected",
                %method,
                %key,
                reason,
                "Unsafe key rejected"
            );
        }
        AuditEvent::PartialWrite { failed, total } => {
            warn!(
                target: "audit",
                event_type = "partial_write",
                failed,
                total,
                "Write partially failed"
            );
        }
    }
}

/// Wrap `router` in a trace layer logging each request and its outcome
pub(crate) fn with_request_log(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                info_span!(
                    target: "audit",
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    query = request.uri().query().unwrap_or(""),
                )
            })
            .on_request(|_request: &Request<Body>, _span: &Span| {
                info!(target: "audit", "Request received");
            })
            .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                info!(
                    target: "audit",
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis() as u64,
                    "Request served"
                );
            }),
    )
}
