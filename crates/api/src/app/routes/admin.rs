//! Admin back-office pages.
//!
//! Page content lives in the front-end; this endpoint only hands out the
//! section descriptor once the route guard has let the request through.

use axum::{Json, extract::Path, http::StatusCode, response::IntoResponse};
use serde_json::json;

use trattoria_auth::AdminSection;

use crate::app::errors;

/// GET /admin/:section
pub async fn section(Path(slug): Path<String>) -> axum::response::Response {
    let Some(section) = AdminSection::from_slug(&slug) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "unknown admin section");
    };

    (
        StatusCode::OK,
        Json(json!({
            "section": section,
            "title": section.title(),
            "path": section.path(),
            "requirement": section.requirement().to_string(),
        })),
    )
        .into_response()
}
