//! Shared configuration used across the Electra crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display name of the club, used in every role answer.
pub const CLUB_NAME: &str = "G-electra Club";

/// Global application configuration (gateway + fallback provider). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown in status and startup logs.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Path to the club knowledge base JSON document.
    pub knowledge_path: String,
    /// Fallback mode: "mock" or "live".
    pub llm_mode: String,
    /// Base URL of the local language-model service.
    pub llm_api_url: String,
    /// Model name sent with each fallback request.
    pub llm_model: String,
    /// Timeout for a single fallback request, in seconds.
    pub llm_timeout_secs: u64,

    /// If true, the gateway serves the static UI from `frontend_dir`. (Config alias: `ui_enabled`)
    #[serde(default, alias = "ui_enabled")]
    pub frontend_enabled: bool,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

fn default_frontend_dir() -> String {
    "public".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "Electra Bot".to_string(),
            port: 5000,
            knowledge_path: "data/club.json".to_string(),
            llm_mode: "mock".to_string(),
            llm_api_url: "http://localhost:11434".to_string(),
            llm_model: "mistral".to_string(),
            llm_timeout_secs: 60,
            frontend_enabled: false,
            frontend_dir: default_frontend_dir(),
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `ELECTRA__*` > file
    /// (`ELECTRA_CONFIG` path, else `config/gateway.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("ELECTRA_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let defaults = Self::default();
        // Frontend keys rely on serde defaults so the `ui_enabled` alias never collides.
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("knowledge_path", defaults.knowledge_path)?
            .set_default("llm_mode", defaults.llm_mode)?
            .set_default("llm_api_url", defaults.llm_api_url)?
            .set_default("llm_model", defaults.llm_model)?
            .set_default("llm_timeout_secs", defaults.llm_timeout_secs as i64)?;

        // `config::File::with_name` resolves the extension itself; an explicit path is used as-is.
        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder.add_source(config::File::with_name(&config_path).required(false))
        };

        let built = builder
            .add_source(config::Environment::with_prefix("ELECTRA").separator("__"))
            .build()?;

        built.try_deserialize()
    }

    /// True when the fallback provider should call the live model service.
    pub fn is_live(&self) -> bool {
        self.llm_mode.eq_ignore_ascii_case("live")
    }
}
