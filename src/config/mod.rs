use std::env;

use chrono::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

pub struct Config {
    pub port: u16,
    pub session_ttl: Duration,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let session_ttl = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::seconds)
            .unwrap_or_else(|| Duration::seconds(DEFAULT_SESSION_TTL_SECS));
        // Demo catalog loads unless explicitly switched off.
        let seed_demo_data = !matches!(
            env::var("SEED_DEMO_DATA").as_deref(),
            Ok("false") | Ok("0")
        );

        Self {
            port,
            session_ttl,
            seed_demo_data,
        }
    }
}
