//! Static catalog of coaching personas
//!
//! Personas are addressed two ways: the client uses kebab-case ids
//! (`goal-clarifier`), the gateway uses backend names (`GoalClarifier`)
//! both in the request `agents` array and as keys of its `responses` map.

use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::fmt;

/// Display color token of a persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Blue,
    Green,
    Purple,
    Amber,
    Pink,
    Gray,
}

impl ColorToken {
    /// Paint `text` in this color for terminal output
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Self::Blue => text.blue(),
            Self::Green => text.green(),
            Self::Purple => text.purple(),
            Self::Amber => text.yellow(),
            Self::Pink => text.bright_magenta(),
            Self::Gray => text.bright_black(),
        }
    }
}

/// One assistant role the gateway can answer as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentPersona {
    /// Client-side id, e.g. `skill-map`
    pub id: String,
    /// Name the gateway knows the agent by, e.g. `SkillMap`
    pub backend_name: String,
    /// Human readable name
    pub display_name: String,
    /// Single glyph shown next to the agent's messages
    pub icon: String,
    /// Color token used when rendering
    pub color: ColorToken,
    pub specialty: String,
    pub role: String,
    pub description: String,
}

impl fmt::Display for AgentPersona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.display_name)
    }
}

struct Entry {
    id: &'static str,
    backend_name: &'static str,
    display_name: &'static str,
    icon: &'static str,
    color: ColorToken,
    specialty: &'static str,
    role: &'static str,
    description: &'static str,
}

const CATALOG: &[Entry] = &[
    Entry {
        id: "goal-clarifier",
        backend_name: "GoalClarifier",
        display_name: "Goal Clarifier",
        icon: "🎯",
        color: ColorToken::Blue,
        specialty: "Strategic Planning",
        role: "Strategic Mentor",
        description: "Helps clarify and refine your goals with precision and strategic thinking",
    },
    Entry {
        id: "skill-map",
        backend_name: "SkillMap",
        display_name: "Skill Map",
        icon: "📚",
        color: ColorToken::Green,
        specialty: "Skill Development",
        role: "Learning Guide",
        description: "Maps skills needed to achieve your objectives with learning pathways",
    },
    Entry {
        id: "timeline-wizard",
        backend_name: "TimelineWizard",
        display_name: "Timeline Wizard",
        icon: "⏳",
        color: ColorToken::Purple,
        specialty: "Project Management",
        role: "Time Strategist",
        description: "Creates realistic timelines and milestones for sustainable progress",
    },
    Entry {
        id: "progress-coach",
        backend_name: "ProgressCoach",
        display_name: "Progress Coach",
        icon: "📈",
        color: ColorToken::Amber,
        specialty: "Performance Tracking",
        role: "Accountability Partner",
        description: "Tracks progress and provides accountability with motivational support",
    },
    Entry {
        id: "mindset-mentor",
        backend_name: "MindsetMentor",
        display_name: "Mindset Mentor",
        icon: "🧠",
        color: ColorToken::Pink,
        specialty: "Mental Wellness",
        role: "Mindset Coach",
        description: "Develops growth mindset and mental resilience for lasting success",
    },
];

impl Entry {
    fn persona(&self) -> AgentPersona {
        AgentPersona {
            id: self.id.to_string(),
            backend_name: self.backend_name.to_string(),
            display_name: self.display_name.to_string(),
            icon: self.icon.to_string(),
            color: self.color,
            specialty: self.specialty.to_string(),
            role: self.role.to_string(),
            description: self.description.to_string(),
        }
    }
}

/// All known personas in catalog order
pub fn all() -> Vec<AgentPersona> {
    CATALOG.iter().map(Entry::persona).collect()
}

/// Look up a persona by client-side id
pub fn find(id: &str) -> Option<AgentPersona> {
    CATALOG.iter().find(|e| e.id == id).map(Entry::persona)
}

/// Look up a persona by the name the gateway uses
pub fn find_by_backend_name(name: &str) -> Option<AgentPersona> {
    CATALOG
        .iter()
        .find(|e| e.backend_name == name)
        .map(Entry::persona)
}

/// Translate a client id into the gateway's agent name
///
/// Ids missing from the catalog are passed through unchanged.
pub fn backend_name(id: &str) -> String {
    CATALOG
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.backend_name.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Resolve a `responses` key into a persona, falling back to a generic one
///
/// # Examples
///
/// ```
/// use dhraviq::agents::catalog;
///
/// assert_eq!(catalog::resolve_response_key("SkillMap").display_name, "Skill Map");
/// let unknown = catalog::resolve_response_key("System");
/// assert_eq!(unknown.display_name, "System");
/// assert_eq!(unknown.icon, "💡");
/// ```
pub fn resolve_response_key(key: &str) -> AgentPersona {
    find_by_backend_name(key).unwrap_or_else(|| unknown_persona(key))
}

/// Generic persona for agents the catalog does not know
pub fn unknown_persona(key: &str) -> AgentPersona {
    AgentPersona {
        id: key.to_string(),
        backend_name: key.to_string(),
        display_name: key.to_string(),
        icon: "💡".to_string(),
        color: ColorToken::Gray,
        specialty: String::new(),
        role: String::new(),
        description: String::new(),
    }
}

/// Suggest the closest catalog id for a mistyped one
pub fn suggest(input: &str) -> Option<&'static str> {
    let input = input.to_lowercase();
    CATALOG
        .iter()
        .map(|e| (e.id, strsim::jaro_winkler(&input, e.id)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
