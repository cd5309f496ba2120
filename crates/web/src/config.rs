use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Without a database URL the API runs on the in-process store.
    pub database_url: Option<String>,
    /// Comma-separated allowed origins; any origin when unset.
    pub cors_origins: Option<String>,
    pub session_secure: bool,
    pub admin: Option<AdminAccount>,
}

/// Account seeded with the admin role at startup.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let admin = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminAccount { email, password }),
            (None, None) => None,
            _ => anyhow::bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: optional("DATABASE_URL"),
            cors_origins: optional("CORS_ORIGIN"),
            session_secure: optional("SESSION_SECURE")
                .map(|v| v.parse::<bool>())
                .transpose()
                .context("SESSION_SECURE must be true or false")?
                .unwrap_or(false),
            admin,
        })
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
