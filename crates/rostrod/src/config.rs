/// Daemon configuration, loaded from environment variables.
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Base URL of the facial-analysis engine service.
    pub engine_url: String,
}

impl Config {
    /// Load configuration from `ROSTRO_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("ROSTRO_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            engine_url: std::env::var("ROSTRO_ENGINE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5005".to_string()),
        }
    }
}
