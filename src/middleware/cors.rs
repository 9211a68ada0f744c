//! CORS policy for browser clients (the company dashboard front-end).
//!
//! Policy:
//! - Development: any origin, no credentials.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`, no credentials.
//!   An empty allowlist emits no CORS headers at all.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

fn allow_origin(config: &Config) -> AllowOrigin {
    if !config.app_env.is_production() {
        return AllowOrigin::from(Any);
    }

    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    AllowOrigin::predicate(move |origin: &HeaderValue, _req| allowed.iter().any(|v| v == origin))
}

pub fn apply(router: Router, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(config))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([header::LOCATION, HeaderName::from_static("entity")])
        .max_age(Duration::from_secs(600));

    router.layer(cors)
}
