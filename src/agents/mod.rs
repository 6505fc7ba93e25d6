//! Coaching personas and the per-conversation agent selection

pub mod catalog;
pub mod selection;

pub use catalog::{AgentPersona, ColorToken};
pub use selection::{AgentSelection, ToggleOutcome, MAX_SELECTED_AGENTS};
