use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub session_secret: String,
    pub session_cookie_secure: bool,
    pub session_ttl_secs: u64,
    pub upstream_api_url: String,
    pub upstream_timeout_secs: u64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub static_dir: String,
    pub image_domains: Vec<String>,
}

impl Settings {
    const DEFAULT_IMAGE_DOMAINS: &'static str =
        "pill-city.s3.us-west-2.amazonaws.com,pill.city,s3.us-west-2.amazonaws.com";

    pub fn from_env() -> Result<Self> {
        let session_secret =
            get_required("SESSION_SECRET").context("SESSION_SECRET is required")?;
        if session_secret.chars().count() < 32 {
            return Err(anyhow!("SESSION_SECRET must be at least 32 characters"));
        }

        let session_cookie_secure = parse_bool_env("SESSION_COOKIE_SECURE", false)?;
        let session_ttl_secs = parse_u64_env("SESSION_TTL_SECS", 7 * 24 * 60 * 60)?;

        let upstream_api_url = std::env::var("UPSTREAM_API_URL")
            .unwrap_or_else(|_| "https://api.pill.city".to_string());
        if !upstream_api_url.starts_with("http://") && !upstream_api_url.starts_with("https://") {
            return Err(anyhow!("UPSTREAM_API_URL must start with http:// or https://"));
        }
        let upstream_timeout_secs = parse_u64_env("UPSTREAM_TIMEOUT_SECS", 15)?;

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_list(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8080,http://127.0.0.1:8080".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 64 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 20)?;

        let static_dir =
            std::env::var("STATIC_DIR").unwrap_or_else(|_| "feed-wasm/dist".to_string());
        let image_domains = parse_list(
            std::env::var("IMAGE_DOMAINS")
                .unwrap_or_else(|_| Self::DEFAULT_IMAGE_DOMAINS.to_string()),
        );

        Ok(Self {
            session_secret,
            session_cookie_secure,
            session_ttl_secs,
            upstream_api_url,
            upstream_timeout_secs,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            static_dir,
            image_domains,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_list(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("Failed to parse {key}, expecting boolean, got '{other}'")),
    }
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_bool(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
