//! HTTP surface for profile pages and the view-counter endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Datelike, Local};
use serde_json::{json, Value};
use tracing::error;

use super::render;
use super::service::{ProfilePage, ProfileService};
use super::store::CandidateStore;
use super::views::ViewCountError;

pub fn profile_router<S>(service: Arc<ProfileService<S>>) -> Router
where
    S: CandidateStore + 'static,
{
    Router::new()
        .route("/", get(landing_handler::<S>))
        .route("/api/view", post(view_handler::<S>))
        .route("/:id", get(profile_handler::<S>))
        .with_state(service)
}

pub(crate) async fn landing_handler<S>(State(service): State<Arc<ProfileService<S>>>) -> Response
where
    S: CandidateStore + 'static,
{
    Html(render::render_landing(service.agency())).into_response()
}

pub(crate) async fn profile_handler<S>(
    State(service): State<Arc<ProfileService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: CandidateStore + 'static,
{
    match service.page(&id).await {
        ProfilePage::Ready {
            profile,
            content,
            employments,
        } => {
            let year = Local::now().year();
            let html = render::render_profile(
                &profile,
                &content,
                &employments,
                service.agency(),
                year,
            );
            Html(html).into_response()
        }
        ProfilePage::Expired => {
            Html(render::render_expired(service.agency())).into_response()
        }
        ProfilePage::NotFound => (
            StatusCode::NOT_FOUND,
            Html(render::render_not_found(service.agency())),
        )
            .into_response(),
    }
}

pub(crate) async fn view_handler<S>(
    State(service): State<Arc<ProfileService<S>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    S: CandidateStore + 'static,
{
    let Some(page_id) = payload.get("pageId").and_then(Value::as_str) else {
        let body = json!({ "error": "Missing pageId" });
        return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
    };

    match service.record_view(page_id).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(ViewCountError::NotFound) => {
            let body = json!({ "error": "Page not found" });
            (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
        }
        Err(ViewCountError::Store(err)) => {
            error!(error = %err, "view counter failed");
            let body = json!({ "error": "Internal error" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}
