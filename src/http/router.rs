use axum::routing::get;
use axum::Router;

use super::audit::with_request_log;
use super::handlers::{self, AppState};

/// Build the axum router with all store endpoints.
///
/// Single-key routes share one catch-all so the raw (still encoded) path
/// reaches the handlers untouched.
pub fn build_router(state: AppState) -> Router {
    let audit = state.audit;

    let router = Router::new()
        .route(
            "/",
            get(handlers::list_keys)
                .post(handlers::set_pairs)
                .delete(handlers::delete_without_key),
        )
        .route(
            "/*path",
            get(handlers::get_value)
                .post(handlers::set_path_pair)
                .delete(handlers::delete_key),
        )
        .with_state(state);

    if audit {
        with_request_log(router)
    } else {
        router
    }
}
