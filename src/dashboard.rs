use axum::{Json, Router};
use axum::response::Html;
use axum::routing::get;
use utoipa::ToSchema;
use crate::backend::Backend;

const DASHBOARD_HTML: &str = include_str!("../static/dashboard.html");

#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

#[utoipa::path(
    get,
    path = "/api/health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn add_dashboard_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/", get(dashboard))
        .route("/api/health", get(health))
}
