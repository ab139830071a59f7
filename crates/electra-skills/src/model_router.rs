//! Model Router: answers unmatched questions with a local LLM (Ollama `/api/generate`) or a mock.

use electra_core::{CoreConfig, FallbackError, FallbackProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER_NAME: &str = "ModelRouter";
const PROMPT_PREFIX: &str = "You are Electra Bot. Answer clearly:\n";

/// Mode for LLM invocation: mock (deterministic text) or live (calls the configured service).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmMode {
    #[default]
    Mock,
    Live,
}

impl LlmMode {
    pub fn from_config(config: &CoreConfig) -> Self {
        if config.is_live() {
            LlmMode::Live
        } else {
            LlmMode::Mock
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Routes a question to a mock generator or to Ollama.
pub struct ModelRouter {
    mode: LlmMode,
    api_url: String,
    model: String,
    client: reqwest::Client,
}

impl ModelRouter {
    pub fn from_config(config: &CoreConfig) -> Result<Self, FallbackError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs.max(1)))
            .build()
            .map_err(|e| FallbackError::Transport(e.to_string()))?;
        Ok(Self {
            mode: LlmMode::from_config(config),
            api_url: config.llm_api_url.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            client,
        })
    }

    pub fn with_mode(mut self, mode: LlmMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> LlmMode {
        self.mode
    }

    /// Prompt sent to the model for `question`.
    pub fn build_prompt(question: &str) -> String {
        format!("{}{}", PROMPT_PREFIX, question)
    }

    /// Mock LLM: deterministic response echoing a preview of the question.
    fn mock_generate(&self, question: &str) -> String {
        let preview = question
            .chars()
            .take(80)
            .chain(if question.chars().count() > 80 { "…" } else { "" }.chars())
            .collect::<String>();
        format!(
            "[Generated – Mock LLM] I don't have club records for \"{}\". Try asking about roles, teams, or events.",
            preview
        )
    }

    /// Single non-streaming request to `<api_url>/api/generate`; never retried.
    async fn live_generate(&self, question: &str) -> Result<String, FallbackError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: Self::build_prompt(question),
            stream: false,
        };
        let response = self
            .client
            .post(format!("{}/api/generate", self.api_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| FallbackError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FallbackError::Status(response.status().as_u16()));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FallbackError::InvalidResponse(e.to_string()))?;
        Ok(parsed.response)
    }
}

#[async_trait::async_trait]
impl FallbackProvider for ModelRouter {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn ask(&self, question: &str) -> Result<String, FallbackError> {
        tracing::info!(
            target: "electra::fallback",
            mode = ?self.mode,
            model = %self.model,
            "Fallback invoked for {} chars",
            question.len()
        );
        match self.mode {
            LlmMode::Mock => Ok(self.mock_generate(question)),
            LlmMode::Live => self.live_generate(question).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: &str, url: &str) -> CoreConfig {
        CoreConfig {
            llm_mode: mode.to_string(),
            llm_api_url: url.to_string(),
            llm_timeout_secs: 2,
            ..CoreConfig::default()
        }
    }

    #[test]
    fn prompt_carries_persona_prefix() {
        assert_eq!(
            ModelRouter::build_prompt("what is ohm's law"),
            "You are Electra Bot. Answer clearly:\nwhat is ohm's law"
        );
    }

    #[test]
    fn mode_follows_config() {
        let router = ModelRouter::from_config(&config("live", "http://localhost:11434/")).unwrap();
        assert_eq!(router.mode(), LlmMode::Live);
        assert_eq!(router.api_url, "http://localhost:11434");
        let router = ModelRouter::from_config(&config("mock", "http://x")).unwrap();
        assert_eq!(router.mode(), LlmMode::Mock);
    }

    #[tokio::test]
    async fn mock_mode_is_deterministic() {
        let router = ModelRouter::from_config(&config("mock", "http://unused")).unwrap();
        let a = router.ask("what is a transistor").await.unwrap();
        let b = router.ask("what is a transistor").await.unwrap();
        assert_eq!(a, b);
        assert!(a.contains("what is a transistor"));
        assert_eq!(router.name(), "ModelRouter");
    }

    #[tokio::test]
    async fn mock_preview_truncates_long_questions() {
        let router = ModelRouter::from_config(&config("mock", "http://unused")).unwrap();
        let long = "x".repeat(200);
        let out = router.ask(&long).await.unwrap();
        assert!(out.contains(&format!("{}…", "x".repeat(80))));
        assert!(!out.contains(&"x".repeat(81)));
    }

    #[tokio::test]
    async fn live_mode_reports_transport_failure() {
        // Port 9 (discard) on localhost is not an HTTP server.
        let router = ModelRouter::from_config(&config("live", "http://127.0.0.1:9")).unwrap();
        let err = router.ask("anything").await.unwrap_err();
        assert!(matches!(err, FallbackError::Transport(_)), "got {:?}", err);
    }
}
