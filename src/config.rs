use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub allow_seed_endpoint: bool,
    pub llm: LlmConfig,
}

/// Settings for the completion provider used by the generation endpoints.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("APP_PORT", 3000);
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10);
        let jwt_ttl_hours = parse_var("JWT_TTL_HOURS", 24);
        let allow_seed_endpoint = env::var("ALLOW_SEED_ENDPOINT")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            jwt_secret,
            jwt_ttl_hours,
            allow_seed_endpoint,
            llm: LlmConfig::from_env(),
        })
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            timeout_secs: parse_var("LLM_TIMEOUT_SECS", 60),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
