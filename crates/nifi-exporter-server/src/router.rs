//! Axum router wiring.
//!
//! Routes come from an explicit table (path -> handler); anything not in the
//! table falls through to a 404.

use axum::{
    routing::{get, MethodRouter},
    Router,
};

use crate::{app_state::AppState, ops};

pub fn route_table() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        ("/", get(ops::index)),
        ("/metrics", get(ops::metrics)),
        ("/healthz", get(ops::healthz)),
        ("/readyz", get(ops::readyz)),
    ]
}

pub fn build_router(state: AppState) -> Router {
    route_table()
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| router.route(path, handler))
        .fallback(ops::not_found)
        .with_state(state)
}
