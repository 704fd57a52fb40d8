//! Environment-driven server configuration.

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// The single accepted login email.
    pub admin_email: String,
    /// The single accepted login password.
    pub admin_password: String,
    /// Socket address the server binds to.
    pub bind_addr: String,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to insecure
    /// development defaults (with a warning) where unset.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("STOCKBOOK_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("STOCKBOOK_JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let admin_email = std::env::var("STOCKBOOK_ADMIN_EMAIL").unwrap_or_else(|_| {
            tracing::warn!("STOCKBOOK_ADMIN_EMAIL not set; using dev default");
            "admin@stockbook.local".to_string()
        });

        let admin_password = std::env::var("STOCKBOOK_ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("STOCKBOOK_ADMIN_PASSWORD not set; using insecure dev default");
            "changeme".to_string()
        });

        let bind_addr =
            std::env::var("STOCKBOOK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Self {
            jwt_secret,
            admin_email,
            admin_password,
            bind_addr,
        }
    }
}
