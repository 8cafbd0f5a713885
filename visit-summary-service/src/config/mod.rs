use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: &str = "0.7";
const DEFAULT_MAX_TOKENS: &str = "1000";
const DEFAULT_TIMEOUT_SECS: &str = "60";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_MAX_VISITS_PER_REQUEST: &str = "200";
/// 1 MiB of JSON comfortably fits a full day of visits with history.
const DEFAULT_MAX_BODY_BYTES: &str = "1048576";

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub openai: OpenAiConfig,
    pub http: HttpConfig,
    pub hello: HelloConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    fn from_env() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("prod") | Ok("production") => Environment::Prod,
            _ => Environment::Dev,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Completion token cap sent as `max_tokens`.
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub max_visits_per_request: usize,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct HelloConfig {
    /// Append the API key prefix to the hello message. Kept only for
    /// compatibility with existing smoke checks; scheduled for removal.
    pub expose_key_prefix: bool,
}

impl SummaryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let environment = Environment::from_env();
        let is_prod = environment == Environment::Prod;

        let expose_key_prefix: bool = parse_env("HELLO_EXPOSE_KEY_PREFIX", "false", false)?;
        if is_prod && expose_key_prefix {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "HELLO_EXPOSE_KEY_PREFIX must not be enabled in production"
            )));
        }

        Ok(SummaryConfig {
            common: common_config,
            environment,
            openai: OpenAiConfig {
                // Outside production a missing key only fails the first model call.
                api_key: Secret::new(get_env("OPENAI_API_KEY", Some(""), is_prod)?),
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL), false)?,
                model: get_env("OPENAI_MODEL", Some(DEFAULT_OPENAI_MODEL), false)?,
                temperature: parse_env("OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE, false)?,
                max_tokens: parse_env("OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS, false)?,
                timeout_secs: parse_env("OPENAI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS, false)?,
            },
            http: HttpConfig {
                allowed_origins: split_list(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some(DEFAULT_CORS_ORIGINS),
                    is_prod,
                )?),
                max_visits_per_request: parse_env(
                    "MAX_VISITS_PER_REQUEST",
                    DEFAULT_MAX_VISITS_PER_REQUEST,
                    false,
                )?,
                max_body_bytes: parse_env("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES, false)?,
            },
            hello: HelloConfig { expose_key_prefix },
        })
    }

    /// Whether an API key is present. Says nothing about whether it is valid.
    pub fn has_api_key(&self) -> bool {
        !self.openai.api_key.expose_secret().is_empty()
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: &str, is_prod: bool) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(key, Some(default), is_prod)?;
    parse_value(key, &raw)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
