use axum::Router;
use http::{HeaderValue, Method};
use http::header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE};
use tower_http::cors::CorsLayer;
use crate::backend::Backend;

pub fn add_cors_layer(router: Router<Backend>, front_end_urls: &[String]) -> Router<Backend> {
    let origins: Vec<HeaderValue> = front_end_urls
        .iter()
        .filter_map(|url| url.parse::<HeaderValue>().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_headers([ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, AUTHORIZATION, ACCEPT]);

    router.layer(cors)
}
