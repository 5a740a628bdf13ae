//! Gateway configuration loaded from file and environment.
//!
//! | Source | Example | Notes |
//! |--------|---------|-------|
//! | `MOODGATE_CONFIG` | `config/gateway` | Optional TOML file (extension may be omitted). |
//! | `MOODGATE__PORT` | `8010` | Any field, prefixed `MOODGATE__`. |
//! | `MOODGATE_LLM_API_KEY` / `OPENROUTER_API_KEY` | `sk-or-...` | Read per request, never stored here. |

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CONFIG_PATH: &str = "MOODGATE_CONFIG";
pub const ENV_LLM_API_KEY: &str = "MOODGATE_LLM_API_KEY";
pub const ENV_OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";

pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";

/// How text is generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmMode {
    /// Deterministic local stream; no API key required.
    #[default]
    Mock,
    /// OpenAI-compatible streaming endpoint.
    Live,
}

impl LlmMode {
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("live") {
            LlmMode::Live
        } else {
            LlmMode::Mock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmMode::Mock => "mock",
            LlmMode::Live => "live",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub app_name: String,
    pub host: String,
    pub port: u16,
    /// "mock" or "live".
    pub llm_mode: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bound of the fragment channel between producer and framer.
    pub channel_capacity: usize,
    /// Delay between mock fragments.
    pub mock_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            app_name: "Moodgate".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8010,
            llm_mode: "mock".to_string(),
            llm_api_url: DEFAULT_API_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            temperature: 0.5,
            max_tokens: 240,
            channel_capacity: 100,
            mock_delay_ms: 40,
        }
    }
}

impl GatewayConfig {
    /// Precedence: env `MOODGATE__*` > file at `MOODGATE_CONFIG` (default `config/gateway`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| "config/gateway".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let d = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", d.app_name)?
            .set_default("host", d.host)?
            .set_default("port", i64::from(d.port))?
            .set_default("llm_mode", d.llm_mode)?
            .set_default("llm_api_url", d.llm_api_url)?
            .set_default("llm_model", d.llm_model)?
            .set_default("temperature", f64::from(d.temperature))?
            .set_default("max_tokens", i64::from(d.max_tokens))?
            .set_default("channel_capacity", d.channel_capacity as i64)?
            .set_default("mock_delay_ms", d.mock_delay_ms as i64)?;

        let path = Path::new(config_path);
        let builder = if path.exists() || path.with_extension("toml").exists() {
            builder.add_source(config::File::with_name(config_path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("MOODGATE").separator("__"))
            .build()?;

        built.try_deserialize()
    }

    pub fn mode(&self) -> LlmMode {
        LlmMode::parse(&self.llm_mode)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolves the LLM API key: `MOODGATE_LLM_API_KEY`, then `OPENROUTER_API_KEY`. Blank counts as missing.
pub fn api_key_from_env() -> Result<String, GenerationError> {
    env_opt_string(ENV_LLM_API_KEY)
        .or_else(|| env_opt_string(ENV_OPENROUTER_API_KEY))
        .ok_or(GenerationError::MissingApiKey(ENV_LLM_API_KEY))
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
