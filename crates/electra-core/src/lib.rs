//! electra-core: Electra Bot core library (club knowledge base, question normalizer,
//! intent matcher, fallback seam, voice session).
//!
//! The gateway and skills crates depend only on the re-exports below.

mod engine;
mod error;
mod fallback;
mod knowledge;
mod shared;
mod voice;

// Shared configuration
pub use shared::{CoreConfig, CLUB_NAME};

// Errors
pub use error::{EngineError, FallbackError, KnowledgeError};

// Knowledge base (read-only after load)
pub use knowledge::{Events, KnowledgeBase, Members, PastEvent, Role, Secretaries, UpcomingEvent};

// Question engine: normalize -> clarify -> match -> format
pub use engine::{
    format_co_lead, format_lead, match_intent, normalize, resolve_clarification, Engine, Intent,
    IntentRule, Keywords, MatchOutcome, CLARIFY_CO_LEAD_MESSAGE, CORRECTIONS, RULES,
};

// Fallback answer provider seam
pub use fallback::FallbackProvider;

// Voice UI state machine
pub use voice::{
    VoiceEffect, VoiceEvent, VoiceSession, VoiceState, SILENCE_TIMEOUT_MS, STARTUP_GREETING,
};
