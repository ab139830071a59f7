//! First-match intent rules over normalized question text.
//!
//! Order is part of the contract: two-keyword co-lead rules precede the lead rules they
//! are a subset of, and "vice president" is guarded out of the bare president rule.

use serde::Serialize;

/// What a question is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    About,
    President,
    VicePresident,
    Secretary,
    Treasurer,
    SoftwareCoLead,
    SoftwareLead,
    HardwareCoLead,
    HardwareLead,
    MarketingCoLead,
    MarketingLead,
    ContentCoLead,
    ContentLead,
    CreativeCoLead,
    CreativeLead,
    WebLead,
    Categories,
    Havana,
    NextEvent,
    PastEvents,
}

/// Substring predicate: every `all` keyword present, at least one `any` keyword present
/// (when `any` is non-empty), and no `none` keyword present.
#[derive(Debug, Clone, Copy)]
pub struct Keywords {
    pub all: &'static [&'static str],
    pub any: &'static [&'static str],
    pub none: &'static [&'static str],
}

impl Keywords {
    const fn all(all: &'static [&'static str]) -> Self {
        Self { all, any: &[], none: &[] }
    }

    const fn any(any: &'static [&'static str]) -> Self {
        Self { all: &[], any, none: &[] }
    }

    const fn but_not(self, none: &'static [&'static str]) -> Self {
        Self { none, ..self }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.all.iter().all(|k| text.contains(k))
            && (self.any.is_empty() || self.any.iter().any(|k| text.contains(k)))
            && !self.none.iter().any(|k| text.contains(k))
    }
}

/// One entry of the priority table.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Keywords,
}

const fn rule(intent: Intent, keywords: Keywords) -> IntentRule {
    IntentRule { intent, keywords }
}

/// Rules in evaluation order; the first match wins.
pub const RULES: [IntentRule; 20] = [
    rule(
        Intent::About,
        Keywords::any(&["what is g electra", "about g electra", "about club", "what is this club"]),
    ),
    rule(Intent::President, Keywords::all(&["president"]).but_not(&["vice"])),
    rule(Intent::VicePresident, Keywords::all(&["vice", "president"])),
    rule(Intent::Secretary, Keywords::all(&["secretary"])),
    rule(Intent::Treasurer, Keywords::all(&["treasurer"])),
    rule(Intent::SoftwareCoLead, Keywords::all(&["software", "colead"])),
    rule(Intent::SoftwareLead, Keywords::all(&["software", "lead"])),
    rule(Intent::HardwareCoLead, Keywords::all(&["hardware", "colead"])),
    rule(Intent::HardwareLead, Keywords::all(&["hardware", "lead"])),
    rule(Intent::MarketingCoLead, Keywords::all(&["marketing", "colead"])),
    rule(Intent::MarketingLead, Keywords::all(&["marketing", "lead"])),
    rule(Intent::ContentCoLead, Keywords::all(&["content", "colead"])),
    rule(Intent::ContentLead, Keywords::all(&["content", "lead"])),
    rule(Intent::CreativeCoLead, Keywords::all(&["creative", "colead"])),
    rule(Intent::CreativeLead, Keywords::all(&["creative", "lead"])),
    rule(Intent::WebLead, Keywords::any(&["web", "developer"])),
    rule(Intent::Categories, Keywords::any(&["categories", "teams", "wings"])),
    rule(Intent::Havana, Keywords::all(&["havana"])),
    rule(Intent::NextEvent, Keywords::any(&["upcoming", "next event"])),
    rule(Intent::PastEvents, Keywords::all(&["past events"])),
];

/// Returns the intent of the first rule satisfied by `normalized`, or `None` for no-match.
pub fn match_intent(normalized: &str) -> Option<Intent> {
    RULES
        .iter()
        .find(|r| r.keywords.matches(normalized))
        .map(|r| r.intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn co_lead_rule_wins_over_lead_rule() {
        assert_eq!(match_intent("who is the software colead"), Some(Intent::SoftwareCoLead));
        assert_eq!(match_intent("who is the software lead"), Some(Intent::SoftwareLead));
        assert_eq!(match_intent("creative colead"), Some(Intent::CreativeCoLead));
    }

    #[test]
    fn vice_president_is_not_the_president() {
        assert_eq!(match_intent("who is the president"), Some(Intent::President));
        assert_eq!(match_intent("who is the vice president"), Some(Intent::VicePresident));
    }

    #[test]
    fn earlier_rule_shadows_later_ones() {
        // "about club" is checked before any role keyword.
        assert_eq!(match_intent("tell me about club president"), Some(Intent::About));
        // Software rules run before hardware rules.
        assert_eq!(match_intent("software and hardware lead"), Some(Intent::SoftwareLead));
        // "web" sits below every wing rule.
        assert_eq!(match_intent("content lead for the web"), Some(Intent::ContentLead));
    }

    #[test]
    fn event_and_listing_rules() {
        assert_eq!(match_intent("what are the wings"), Some(Intent::Categories));
        assert_eq!(match_intent("tell me about havana"), Some(Intent::Havana));
        assert_eq!(match_intent("when is the next event"), Some(Intent::NextEvent));
        assert_eq!(match_intent("any upcoming plans"), Some(Intent::NextEvent));
        assert_eq!(match_intent("list past events"), Some(Intent::PastEvents));
    }

    #[test]
    fn unmatched_text_is_none() {
        assert_eq!(match_intent("asdfghjkl"), None);
        assert_eq!(match_intent(""), None);
        // A wing name alone is not a lead question.
        assert_eq!(match_intent("software"), None);
    }

    #[test]
    fn table_lists_every_intent_once() {
        let mut seen = std::collections::HashSet::new();
        for r in RULES.iter() {
            assert!(seen.insert(r.intent), "duplicate rule for {:?}", r.intent);
        }
        assert_eq!(seen.len(), 20);
    }
}
