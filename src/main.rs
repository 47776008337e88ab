
pub mod schema;
pub mod open_api;
pub mod aggregate;
pub mod auth;
pub mod backend;
pub mod committee;
pub mod config;
pub mod cors;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod expenses;
pub mod interests;
pub mod util;

use std::net::SocketAddr;
use axum::Router;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::backend::Backend;
use crate::committee::add_committee_routes;
use crate::config::Config;
use crate::cors::add_cors_layer;
use crate::dashboard::add_dashboard_routes;
use crate::events::add_event_routes;
use crate::events::attendance::add_attendance_routes;
use crate::events::comments::add_comment_routes;
use crate::events::ratings::add_rating_routes;
use crate::expenses::add_expense_routes;
use crate::interests::add_interest_routes;
use crate::open_api::add_swagger_route;


#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_dashboard_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();

    // The anonymous interest identity lives in this cookie session.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(365)));

    let backend = Backend::new(&config).await.unwrap();

    let mut router = Router::<Backend>::new();
    router = add_dashboard_routes(router);
    router = add_swagger_route(router);
    router = add_event_routes(router);
    router = add_comment_routes(router);
    router = add_attendance_routes(router);
    router = add_rating_routes(router);
    router = add_interest_routes(router);
    router = add_committee_routes(router);
    router = add_expense_routes(router);
    router = router.layer(session_layer);
    router = add_cors_layer(router, &config.front_end_urls);

    let app = router.with_state(backend);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::debug!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    if let Err(error) = open::that(format!("http://localhost:{}", config.port)) {
        tracing::warn!("could not open the dashboard in a browser: {error}");
    }
    axum::serve(listener, app).await.unwrap();
}
