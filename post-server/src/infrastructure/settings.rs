use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub post_owner_check: bool,
}

impl Settings {
    const DEFAULT_CORS_ORIGINS: &'static str =
        "http://localhost:8000,http://localhost:3000,http://localhost:5173";

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            get_required(&lookup, "DATABASE_URL").context("DATABASE_URL is required")?;
        let jwt_secret = get_required(&lookup, "JWT_SECRET").context("JWT_SECRET is required")?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let database_max_connections = parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());

        let mut cors_origins = parse_cors_origins(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| Self::DEFAULT_CORS_ORIGINS.to_string()),
        );
        if let Some(client_origin) = lookup("CLIENT_ORIGIN") {
            let client_origin = client_origin.trim();
            if !client_origin.is_empty() && !cors_origins.iter().any(|o| o == client_origin) {
                cors_origins.push(client_origin.to_string());
            }
        }

        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10)?;
        let post_owner_check = parse_bool(&lookup, "POST_OWNER_CHECK", false)?;

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            post_owner_check,
        })
    }
}

fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value <= T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{key} must be a boolean, got '{other}'")),
    }
}
