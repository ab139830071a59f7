//! Re-prompt for co-lead questions that do not name a wing.

use super::normalizer::normalize;

/// Returned verbatim when a co-lead question names no wing.
pub const CLARIFY_CO_LEAD_MESSAGE: &str =
    "Which wing’s co-lead are you asking about? Software, Hardware, Content, Creative, or Marketing.";

const WINGS: [&str; 5] = ["software", "hardware", "content", "creative", "marketing"];

/// Clarifying message for an under-specified co-lead question, `None` otherwise.
///
/// Only the text-search path consults this; the voice path goes straight to the matcher.
pub fn resolve_clarification(question: &str) -> Option<&'static str> {
    let q = normalize(question);
    if q.contains("colead") && !WINGS.iter().any(|w| q.contains(w)) {
        Some(CLARIFY_CO_LEAD_MESSAGE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn co_lead_without_wing_asks_back() {
        assert_eq!(resolve_clarification("Who is the co-lead?"), Some(CLARIFY_CO_LEAD_MESSAGE));
        assert_eq!(resolve_clarification("who is the college"), Some(CLARIFY_CO_LEAD_MESSAGE));
        assert_eq!(resolve_clarification("colead"), Some(CLARIFY_CO_LEAD_MESSAGE));
    }

    #[test]
    fn co_lead_with_one_wing_passes() {
        for wing in ["Software", "hardware", "CONTENT", "creativ", "markting"] {
            let q = format!("who is the {} co lead", wing);
            assert_eq!(resolve_clarification(&q), None, "question {:?}", q);
        }
    }

    #[test]
    fn non_co_lead_questions_pass() {
        assert_eq!(resolve_clarification("who is the president"), None);
        assert_eq!(resolve_clarification("who is the software lead"), None);
        assert_eq!(resolve_clarification(""), None);
    }
}
