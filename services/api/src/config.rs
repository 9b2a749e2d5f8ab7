/// Foodbook API configuration loaded from environment variables.
///
/// The store connection and token-signing secret are injected at startup so
/// tests can substitute an isolated store and secret per run.
#[derive(Debug)]
pub struct FoodbookConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing bearer tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 5000). Env var: `API_PORT`.
    pub api_port: u16,
}

impl FoodbookConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        }
    }
}
