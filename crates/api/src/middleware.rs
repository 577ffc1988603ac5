use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use trattoria_auth::{AdminSection, IdentityState, RouteDecision, RouteGuard, resolve_with_timeout};

use crate::app::errors;
use crate::context::AppState;

/// Resolve the caller's identity and attach it as [`IdentityState`].
///
/// A missing, malformed or rejected token is not an error: the request goes on
/// as anonymous and the guards deny whatever needs an identity.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = extract_bearer(req.headers()).map(str::to_owned);

    let identity = match token {
        Some(token) => {
            resolve_with_timeout(state.identity.as_ref(), &token, state.identity_timeout).await
        }
        None => None,
    };

    req.extensions_mut().insert(IdentityState::Resolved(identity));
    next.run(req).await
}

/// Route guard for `/admin/{section}` pages.
///
/// Unknown sections pass through so the handler can answer 404.
pub async fn admin_route_guard(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(section) = AdminSection::from_slug(&slug) else {
        return next.run(req).await;
    };

    let guard = match RouteGuard::new(section.requirement(), state.login_path.as_ref()) {
        Ok(guard) => guard,
        Err(e) => {
            return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "misconfigured", e.to_string());
        }
    };

    let identity = request_identity(&req);
    let requested = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned());
    let table = state.policy.current();

    match guard.decide(&identity, &table, requested.as_deref()) {
        RouteDecision::Authorized => next.run(req).await,
        RouteDecision::Unauthorized { redirect_to } => Redirect::to(&redirect_to).into_response(),
        RouteDecision::Loading => errors::json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "identity_pending",
            "identity is still being resolved",
        ),
    }
}

/// Identity attached by [`identity_middleware`]; anonymous if it never ran.
pub fn request_identity(req: &Request<Body>) -> IdentityState {
    req.extensions()
        .get::<IdentityState>()
        .cloned()
        .unwrap_or_else(IdentityState::anonymous)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
