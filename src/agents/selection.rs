//! Agent selection for a conversation
//!
//! Holds the ordered set of persona ids that label the next outbound
//! request. The set never holds duplicates and never grows past its
//! capacity; toggling a new id when full is silently ignored.

use crate::agents::catalog;

/// Upper bound on agents per conversation accepted by the gateway
pub const MAX_SELECTED_AGENTS: usize = 2;

/// What a call to [`AgentSelection::toggle`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The set was full; nothing changed
    IgnoredAtCapacity,
}

/// Ordered, bounded set of selected persona ids
///
/// # Examples
///
/// ```
/// use dhraviq::agents::selection::{AgentSelection, ToggleOutcome};
///
/// let mut selection = AgentSelection::new();
/// assert_eq!(selection.toggle("goal-clarifier"), ToggleOutcome::Added);
/// assert_eq!(selection.toggle("skill-map"), ToggleOutcome::Added);
/// assert_eq!(selection.toggle("mindset-mentor"), ToggleOutcome::IgnoredAtCapacity);
/// assert_eq!(selection.toggle("goal-clarifier"), ToggleOutcome::Removed);
/// assert_eq!(selection.selected(), ["skill-map"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSelection {
    ids: Vec<String>,
    capacity: usize,
}

impl Default for AgentSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentSelection {
    /// Create an empty selection with the default capacity of two
    pub fn new() -> Self {
        Self::with_capacity(MAX_SELECTED_AGENTS)
    }

    /// Create an empty selection holding at most `capacity` agents
    ///
    /// The capacity is clamped to `1..=MAX_SELECTED_AGENTS`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(MAX_SELECTED_AGENTS),
            capacity: capacity.clamp(1, MAX_SELECTED_AGENTS),
        }
    }

    /// Remove `id` if selected, otherwise add it when there is room
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            tracing::debug!(agent = id, "Agent deselected");
            ToggleOutcome::Removed
        } else if self.ids.len() < self.capacity {
            self.ids.push(id.to_string());
            tracing::debug!(agent = id, "Agent selected");
            ToggleOutcome::Added
        } else {
            tracing::debug!(agent = id, capacity = self.capacity, "Selection full, toggle ignored");
            ToggleOutcome::IgnoredAtCapacity
        }
    }

    /// Empty the selection
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn selected(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }

    /// Selected ids translated to the names the gateway expects
    pub fn backend_names(&self) -> Vec<String> {
        self.ids.iter().map(|id| catalog::backend_name(id)).collect()
    }
}
