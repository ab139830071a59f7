//! JSON-backed knowledge base record and its lookups.

use crate::error::KnowledgeError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed role keys of the club. The JSON document uses the PascalCase key of each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    President,
    VicePresident,
    Secretary,
    Treasurer,
    SoftwareLead,
    SoftwareCoLead,
    HardwareLead,
    HardwareCoLead,
    MarketingLead,
    MarketingCoLead,
    ContentLead,
    ContentCoLead,
    CreativeLead,
    CreativeCoLead,
    WebLead,
}

impl Role {
    /// Key used for this role in the `members` object.
    pub fn key(&self) -> &'static str {
        match self {
            Self::President => "President",
            Self::VicePresident => "VicePresident",
            Self::Secretary => "Secretary",
            Self::Treasurer => "Treasurer",
            Self::SoftwareLead => "SoftwareLead",
            Self::SoftwareCoLead => "SoftwareCoLead",
            Self::HardwareLead => "HardwareLead",
            Self::HardwareCoLead => "HardwareCoLead",
            Self::MarketingLead => "MarketingLead",
            Self::MarketingCoLead => "MarketingCoLead",
            Self::ContentLead => "ContentLead",
            Self::ContentCoLead => "ContentCoLead",
            Self::CreativeLead => "CreativeLead",
            Self::CreativeCoLead => "CreativeCoLead",
            Self::WebLead => "WebLead",
        }
    }

    /// Returns all roles in declaration order.
    pub fn all() -> [Self; 15] {
        [
            Self::President,
            Self::VicePresident,
            Self::Secretary,
            Self::Treasurer,
            Self::SoftwareLead,
            Self::SoftwareCoLead,
            Self::HardwareLead,
            Self::HardwareCoLead,
            Self::MarketingLead,
            Self::MarketingCoLead,
            Self::ContentLead,
            Self::ContentCoLead,
            Self::CreativeLead,
            Self::CreativeCoLead,
            Self::WebLead,
        ]
    }
}

/// Secretary field: one string, or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Secretaries {
    One(String),
    Many(Vec<String>),
}

impl Secretaries {
    /// Raw rendering: the string as-is, or list entries joined with ", ".
    pub fn render(&self) -> String {
        match self {
            Self::One(s) => s.clone(),
            Self::Many(names) => names.join(", "),
        }
    }
}

/// Role assignments. An absent or blank name means "unassigned", never a fault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Members {
    #[serde(default)]
    pub president: Option<String>,
    #[serde(default)]
    pub vice_president: Option<String>,
    #[serde(default)]
    pub secretary: Option<Secretaries>,
    #[serde(default)]
    pub treasurer: Option<String>,
    #[serde(default)]
    pub software_lead: Option<String>,
    #[serde(default)]
    pub software_co_lead: Option<String>,
    #[serde(default)]
    pub hardware_lead: Option<String>,
    #[serde(default)]
    pub hardware_co_lead: Option<String>,
    #[serde(default)]
    pub marketing_lead: Option<String>,
    #[serde(default)]
    pub marketing_co_lead: Option<String>,
    #[serde(default)]
    pub content_lead: Option<String>,
    #[serde(default)]
    pub content_co_lead: Option<String>,
    #[serde(default)]
    pub creative_lead: Option<String>,
    #[serde(default)]
    pub creative_co_lead: Option<String>,
    #[serde(default)]
    pub web_lead: Option<String>,
}

impl Members {
    /// Name assigned to `role`, if any. Secretary is rendered raw (list entries comma-joined).
    pub fn get(&self, role: Role) -> Option<String> {
        let field = match role {
            Role::Secretary => return self.secretary.as_ref().map(Secretaries::render),
            Role::President => &self.president,
            Role::VicePresident => &self.vice_president,
            Role::Treasurer => &self.treasurer,
            Role::SoftwareLead => &self.software_lead,
            Role::SoftwareCoLead => &self.software_co_lead,
            Role::HardwareLead => &self.hardware_lead,
            Role::HardwareCoLead => &self.hardware_co_lead,
            Role::MarketingLead => &self.marketing_lead,
            Role::MarketingCoLead => &self.marketing_co_lead,
            Role::ContentLead => &self.content_lead,
            Role::ContentCoLead => &self.content_co_lead,
            Role::CreativeLead => &self.creative_lead,
            Role::CreativeCoLead => &self.creative_co_lead,
            Role::WebLead => &self.web_lead,
        };
        field.clone()
    }

    /// Number of roles with a non-blank name.
    pub fn assigned_count(&self) -> usize {
        Role::all()
            .iter()
            .filter(|r| self.get(**r).is_some_and(|n| !n.trim().is_empty()))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastEvent {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Events {
    #[serde(default)]
    pub past: Vec<PastEvent>,
    #[serde(default)]
    pub upcoming: Vec<UpcomingEvent>,
}

/// The static club record queried by the intent matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub members: Members,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub events: Events,
}

impl KnowledgeBase {
    /// Reads and parses the knowledge base document at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kb: Self = serde_json::from_str(&raw).map_err(|source| KnowledgeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            target: "electra::knowledge",
            path = %path.display(),
            categories = kb.categories.len(),
            past_events = kb.events.past.len(),
            upcoming_events = kb.events.upcoming.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// Parses a knowledge base from an in-memory JSON string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Case-insensitive exact-name lookup in `events.past`.
    pub fn past_event(&self, name: &str) -> Option<&PastEvent> {
        let wanted = name.to_lowercase();
        self.events
            .past
            .iter()
            .find(|e| e.name.to_lowercase() == wanted)
    }

    /// The first upcoming event, treated as "next".
    pub fn next_event(&self) -> Option<&UpcomingEvent> {
        self.events.upcoming.first()
    }
}
