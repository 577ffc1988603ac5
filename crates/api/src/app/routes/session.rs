//! What the current caller may do.
//!
//! Front-end guards call these to decide what to render; none of them ever
//! fails for lack of identity, they just answer "no".

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use trattoria_auth::{
    IdentityState, Match, Permission, PermissionEvaluator, Role, visible_sections,
};

use crate::app::errors;
use crate::context::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    /// Comma-separated permission tags.
    pub permissions: Option<String>,
    /// Comma-separated role tags.
    pub roles: Option<String>,
    /// `all` (default) or `any`, applied to `permissions`.
    pub mode: Option<String>,
}

pub fn router() -> axum::Router {
    Router::new()
        .route("/", get(current))
        .route("/check", get(check))
}

/// GET /api/session
pub async fn current(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<IdentityState>,
) -> axum::response::Response {
    let table = state.policy.current();
    let eval = PermissionEvaluator::new(identity.identity(), &table);

    let sections: Vec<_> = visible_sections(&eval)
        .into_iter()
        .map(|s| json!({ "section": s, "title": s.title(), "path": s.path() }))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "authenticated": eval.is_authenticated(),
            "user_id": identity.identity().map(|i| i.user_id),
            "role": eval.role(),
            "permissions": eval.permissions(),
            "is_admin": eval.is_admin(),
            "is_manager": eval.is_manager(),
            "is_staff": eval.is_staff(),
            "sections": sections,
            "table_version": table.version(),
        })),
    )
        .into_response()
}

/// GET /api/session/check?permissions=a,b&mode=all|any&roles=x,y
///
/// Tags that do not name a known permission or role are never held.
pub async fn check(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<IdentityState>,
    Query(query): Query<CheckQuery>,
) -> axum::response::Response {
    let mode = match query.mode.as_deref() {
        None | Some("all") => Match::All,
        Some("any") => Match::Any,
        Some(other) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("mode must be 'all' or 'any', got '{other}'"),
            );
        }
    };

    if query.permissions.is_none() && query.roles.is_none() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "permissions or roles must be given",
        );
    }

    let table = state.policy.current();
    let eval = PermissionEvaluator::new(identity.identity(), &table);

    let permissions_ok = match query.permissions.as_deref() {
        None => true,
        Some(raw) => {
            let tags = split_tags(raw);
            let known: Vec<Permission> = tags.iter().filter_map(|t| Permission::parse(t)).collect();
            match mode {
                // An unknown tag can never be held, so "all" fails outright.
                Match::All => known.len() == tags.len() && eval.has_all_permissions(&known),
                Match::Any => eval.has_any_permission(&known),
            }
        }
    };

    let roles_ok = match query.roles.as_deref() {
        None => true,
        Some(raw) => {
            let known: Vec<Role> = split_tags(raw).into_iter().filter_map(Role::parse).collect();
            eval.has_any_role(&known)
        }
    };

    (
        StatusCode::OK,
        Json(json!({ "allowed": permissions_ok && roles_ok })),
    )
        .into_response()
}

fn split_tags(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
}
