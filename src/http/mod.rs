//! HTTP Module
//!
//! Request handlers and the axum server that exposes the store.
//!
//! ## Routes
//! | Method | Path            | Operation                          |
//! |--------|-----------------|------------------------------------|
//! | GET    | `/`             | list keys (`prefix`, `encode`)     |
//! | POST   | `/`             | bulk set from a urlencoded form    |
//! | POST   | `/<key>=<val>`  | single set from the path           |
//! | GET    | `/<key>`        | get a value                        |
//! | DELETE | `/<key>`        | delete a key                       |
//!
//! Every handler is one store call on the blocking pool, answered with a
//! plain-text status + body.

mod audit;
mod handlers;
mod response;
mod router;
mod server;

pub use audit::{log_audit_event, AuditEvent};
pub use handlers::{AppState, ListQuery};
pub use response::TAG;
pub use router::build_router;
pub use server::Server;
