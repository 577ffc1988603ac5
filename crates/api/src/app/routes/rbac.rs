//! RBAC audit endpoints.
//!
//! Read-only views of the live role→permission table, plus "why was I
//! allowed/denied?" for the caller.

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
    ContentDecision, ContentGuard, Fallback, IdentityState, Permission, PermissionEvaluator,
    RbacRegistry, Requirement, RolePermissionTable, explain,
};

use crate::app::errors;
use crate::context::AppState;

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub permission: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/roles", get(list_roles))
        .route("/permissions", get(list_permissions))
        .route("/explain", get(explain_decision))
}

fn registry_guard() -> ContentGuard {
    ContentGuard::new(Requirement::permission(Permission::ManagePermissions)).with_notice()
}

/// Run the registry guard; `Err` is the ready-made 403 response.
fn guarded_registry(
    identity: &IdentityState,
    table: &RolePermissionTable,
) -> Result<RbacRegistry, axum::response::Response> {
    match registry_guard().decide(identity, table) {
        ContentDecision::Render => Ok(RbacRegistry::from_table(table)),
        ContentDecision::Fallback(Fallback::Notice(message)) => Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            message,
        )),
        ContentDecision::Fallback(Fallback::Hide) => {
            Err(errors::json_error(StatusCode::FORBIDDEN, "forbidden", ""))
        }
    }
}

/// GET /api/rbac/roles
pub async fn list_roles(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<IdentityState>,
) -> axum::response::Response {
    let table = state.policy.current();
    match guarded_registry(&identity, &table) {
        Ok(registry) => (
            StatusCode::OK,
            Json(json!({ "version": registry.version, "roles": registry.roles })),
        )
            .into_response(),
        Err(denied) => denied,
    }
}

/// GET /api/rbac/permissions
pub async fn list_permissions(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<IdentityState>,
) -> axum::response::Response {
    let table = state.policy.current();
    match guarded_registry(&identity, &table) {
        Ok(registry) => (
            StatusCode::OK,
            Json(json!({ "version": registry.version, "permissions": registry.permissions })),
        )
            .into_response(),
        Err(denied) => denied,
    }
}

/// GET /api/rbac/explain?permission=X
pub async fn explain_decision(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<IdentityState>,
    Query(query): Query<ExplainQuery>,
) -> axum::response::Response {
    let Some(permission) = Permission::parse(&query.permission) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "unknown permission");
    };

    let table = state.policy.current();
    let eval = PermissionEvaluator::new(identity.identity(), &table);
    let explanation = explain(&eval, &Requirement::permission(permission));

    (StatusCode::OK, Json(json!({ "explanation": explanation }))).into_response()
}
