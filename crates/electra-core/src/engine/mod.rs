//! Question engine: normalize, match against the rule table, render from the knowledge base.
//!
//! ```text
//! question -> resolve_clarification (text path only)
//!          -> normalize -> match_intent -> render -> MatchOutcome
//! ```
//!
//! Everything here is pure and synchronous; an `Engine` can be shared across requests.

mod clarify;
mod formatters;
mod matcher;
mod normalizer;

pub use clarify::{resolve_clarification, CLARIFY_CO_LEAD_MESSAGE};
pub use formatters::{format_co_lead, format_lead};
pub use matcher::{match_intent, Intent, IntentRule, Keywords, RULES};
pub use normalizer::{normalize, CORRECTIONS};

use crate::error::EngineError;
use crate::knowledge::{KnowledgeBase, Role};
use crate::shared::CLUB_NAME;
use std::sync::Arc;

/// Result of running a question through the matcher.
///
/// `NoMatch` is distinct from an answer whose text happens to be empty (e.g. an empty
/// past-event list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Answered { intent: Intent, text: String },
    NoMatch,
}

#[cfg(test)]
impl MatchOutcome {
    fn text(&self) -> Option<&str> {
        match self {
            Self::Answered { text, .. } => Some(text),
            Self::NoMatch => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Self::Answered { text, .. } => Some(text),
            Self::NoMatch => None,
        }
    }
}

/// Name of the past event the "havana" rule looks up.
const HAVANA: &str = "havana";

/// Answers club questions from an immutable knowledge base.
#[derive(Debug, Clone)]
pub struct Engine {
    knowledge: Arc<KnowledgeBase>,
}

impl Engine {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// See [`resolve_clarification`].
    pub fn resolve_clarification(&self, question: &str) -> Option<&'static str> {
        resolve_clarification(question)
    }

    /// Normalize + match + render. `Ok(NoMatch)` when no rule applies; `Err` only when a rule
    /// refers to a record the knowledge base does not contain.
    pub fn answer(&self, question: &str) -> Result<MatchOutcome, EngineError> {
        let normalized = normalize(question);
        let Some(intent) = match_intent(&normalized) else {
            tracing::debug!(target: "electra::engine", normalized = %normalized, "No rule matched");
            return Ok(MatchOutcome::NoMatch);
        };
        tracing::debug!(target: "electra::engine", ?intent, normalized = %normalized, "Rule matched");
        let text = self.render(intent)?;
        Ok(MatchOutcome::Answered { intent, text })
    }

    /// Renders the answer for `intent` from the knowledge base.
    pub fn render(&self, intent: Intent) -> Result<String, EngineError> {
        let kb = &*self.knowledge;
        let text = match intent {
            Intent::About => kb.about.clone(),
            Intent::Secretary => format!(
                "The Secretaries are {}.",
                kb.members.get(Role::Secretary).unwrap_or_default()
            ),
            Intent::Categories => format!(
                "The categories in {} are: {}.",
                CLUB_NAME,
                kb.categories.join(", ")
            ),
            Intent::Havana => {
                let event = kb.past_event(HAVANA).ok_or_else(|| EngineError::MissingRecord {
                    kind: "past event",
                    name: HAVANA.to_string(),
                })?;
                format!("{} ({}): {}", event.name, event.date, event.description)
            }
            Intent::NextEvent => {
                let next = kb.next_event().ok_or_else(|| EngineError::MissingRecord {
                    kind: "upcoming event",
                    name: "next".to_string(),
                })?;
                format!("The next event is {} on {}.", next.name, next.date)
            }
            Intent::PastEvents => kb
                .events
                .past
                .iter()
                .map(|e| format!("{} ({})", e.name, e.date))
                .collect::<Vec<_>>()
                .join(", "),
            Intent::SoftwareCoLead => self.co_lead(Role::SoftwareCoLead, "Software Wing"),
            Intent::HardwareCoLead => self.co_lead(Role::HardwareCoLead, "Hardware Wing"),
            Intent::MarketingCoLead => self.co_lead(Role::MarketingCoLead, "Marketing Team"),
            Intent::ContentCoLead => self.co_lead(Role::ContentCoLead, "Content Team"),
            Intent::CreativeCoLead => self.co_lead(Role::CreativeCoLead, "Creative Design Team"),
            Intent::President => self.lead(Role::President, &format!("The President of {}", CLUB_NAME)),
            Intent::VicePresident => {
                self.lead(Role::VicePresident, &format!("The Vice President of {}", CLUB_NAME))
            }
            Intent::Treasurer => self.lead(Role::Treasurer, &format!("The Treasurer of {}", CLUB_NAME)),
            Intent::SoftwareLead => self.lead(Role::SoftwareLead, "The Lead of the Software Wing"),
            Intent::HardwareLead => self.lead(Role::HardwareLead, "The Lead of the Hardware Wing"),
            Intent::MarketingLead => self.lead(Role::MarketingLead, "The Lead of the Marketing Team"),
            Intent::ContentLead => self.lead(Role::ContentLead, "The Lead of the Content Team"),
            Intent::CreativeLead => {
                self.lead(Role::CreativeLead, "The Lead of the Creative Design Team")
            }
            Intent::WebLead => self.lead(Role::WebLead, "The Lead of the Web Development Team"),
        };
        Ok(text)
    }

    fn lead(&self, role: Role, label: &str) -> String {
        format_lead(self.knowledge.members.get(role).as_deref(), label)
    }

    fn co_lead(&self, role: Role, wing_label: &str) -> String {
        format_co_lead(self.knowledge.members.get(role).as_deref(), wing_label)
    }
}
