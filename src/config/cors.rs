use axum::http::{header, HeaderName, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(get_allowed_origins())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        // Session cookies only travel cross-origin with credentials on.
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn get_allowed_origins() -> AllowOrigin {
    let origins_str =
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

    let mut origins = parse_origins(&origins_str);
    if origins.is_empty() {
        // A wildcard origin is rejected by browsers once credentials are
        // allowed, so fall back to the development defaults instead.
        tracing::warn!("CORS: no valid origins configured, using development defaults");
        origins = parse_origins(DEFAULT_ALLOWED_ORIGINS);
    }

    tracing::info!("CORS: configured with {} allowed origin(s)", origins.len());
    AllowOrigin::list(origins)
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|origin| {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("CORS: invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer() {
        // Should not panic when creating the CORS layer
        let _layer = create_cors_layer();
    }

    #[test]
    fn test_default_origins_are_valid() {
        let origins = parse_origins(DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(origins.len(), 2);
    }

    #[test]
    fn test_invalid_and_empty_entries_are_skipped() {
        let origins = parse_origins("http://localhost:3000, , http://bad\norigin");
        assert_eq!(origins.len(), 1);
    }
}
