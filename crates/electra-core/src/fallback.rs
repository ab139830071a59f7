//! Seam for the external answer provider consulted when the knowledge base has no match.

use crate::error::FallbackError;

/// Implemented by anything that can answer a free-form question (e.g. a local LLM).
///
/// Called at most once per request, only on the text-search path, and never retried.
#[async_trait::async_trait]
pub trait FallbackProvider: Send + Sync {
    /// Provider name for logs and status.
    fn name(&self) -> &str;

    /// Answers `question`. Failures are returned to the caller as-is.
    async fn ask(&self, question: &str) -> Result<String, FallbackError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Echo;

    #[async_trait::async_trait]
    impl FallbackProvider for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn ask(&self, question: &str) -> Result<String, FallbackError> {
            Ok(format!("echo: {}", question))
        }
    }

    #[tokio::test]
    async fn provider_is_usable_as_trait_object() {
        let provider: Arc<dyn FallbackProvider> = Arc::new(Echo);
        assert_eq!(provider.name(), "echo");
        assert_eq!(provider.ask("hi").await.unwrap(), "echo: hi");
    }
}
