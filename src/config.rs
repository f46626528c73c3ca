#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: std::net::IpAddr,
    pub port: u16,
    pub env: String,
    pub cors_origins: Vec<String>,
    pub max_body_size: usize,
    pub rate_limit: u32,
    pub rate_window_secs: u64,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite://formsink.db?mode=rwc");

        let db_max_connections: u32 = env_or("FORMSINK_DB_MAX_CONNECTIONS", "25")
            .parse()
            .map_err(|e| format!("Invalid FORMSINK_DB_MAX_CONNECTIONS: {e}"))?;

        let host: std::net::IpAddr = env_or("FORMSINK_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMSINK_HOST: {e}"))?;

        let port: u16 = env_or("FORMSINK_PORT", "4000")
            .parse()
            .map_err(|e| format!("Invalid FORMSINK_PORT: {e}"))?;

        let env = env_or("FORMSINK_ENV", "development");

        // Space separated, same shape as a reverse proxy allowlist.
        let cors_origins: Vec<String> = env_or("FORMSINK_CORS_ORIGINS", "")
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();

        let max_body_size: usize = env_or("FORMSINK_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORMSINK_MAX_BODY_SIZE: {e}"))?;

        let rate_limit: u32 = env_or("FORMSINK_RATE_LIMIT", "20")
            .parse()
            .map_err(|e| format!("Invalid FORMSINK_RATE_LIMIT: {e}"))?;

        let rate_window_secs: u64 = env_or("FORMSINK_RATE_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid FORMSINK_RATE_WINDOW_SECS: {e}"))?;

        let log_level = env_or("FORMSINK_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("FORMSINK_SMTP_HOST").ok(),
            std::env::var("FORMSINK_SMTP_PORT").ok(),
            std::env::var("FORMSINK_SMTP_USER").ok(),
            std::env::var("FORMSINK_SMTP_PASS").ok(),
            std::env::var("FORMSINK_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid FORMSINK_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            db_max_connections,
            host,
            port,
            env,
            cors_origins,
            max_body_size,
            rate_limit,
            rate_window_secs,
            log_level,
            smtp,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
