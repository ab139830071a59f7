//! Concrete fallback providers for Electra Bot.

pub use electra_core::FallbackProvider;

mod model_router;

pub use model_router::{LlmMode, ModelRouter};
