//! CORS Middleware Configuration

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::DELETE];

/// Create CORS layer from settings.
///
/// `*` (or no parseable origin) allows every origin.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins = parse_origins(&settings.allowed_origins);

    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    if origins.iter().any(|o| o.trim() == "*") {
        return Vec::new();
    }
    origins
        .iter()
        .filter_map(|o| match o.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
