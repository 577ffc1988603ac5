//! HTTP application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent error responses

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::context::AppState;
use crate::middleware;

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: AppState) -> Router {
    let admin_page = get(routes::admin::section).route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::admin_route_guard,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/admin/:section", admin_page)
        .nest("/api/session", routes::session::router())
        .nest("/api/rbac", routes::rbac::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    middleware::identity_middleware,
                ))
                .layer(Extension(state)),
        )
}
