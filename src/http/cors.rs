//! CORS policy.

use axum::http::{
    HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE, LOCATION},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Environment;

/// Builds the CORS layer for `environment`.
///
/// Development mirrors any request origin. Production allows only
/// `allowed_origins`; entries that are not valid header values are skipped
/// with a warning.
#[must_use]
pub fn cors_layer(environment: Environment, allowed_origins: &[String]) -> CorsLayer {
    let origin = match environment {
        Environment::Development => AllowOrigin::mirror_request(),
        Environment::Production => AllowOrigin::list(parse_origins(allowed_origins)),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([LOCATION])
}

fn parse_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(origin = %origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
