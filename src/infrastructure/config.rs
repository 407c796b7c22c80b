use std::env;

use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
}

impl AppConfig {
    /// Reads configuration from the environment, loading `.env` first.
    /// Missing values fall back to development defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, falling back to the development secret");
            DEV_JWT_SECRET.to_string()
        });

        Self {
            bind_addr,
            jwt_secret,
        }
    }
}
