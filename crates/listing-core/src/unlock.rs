//! Unlock State
//!
//! Session-scoped, per-project latch flipped by a lead-capture message from the popup.
//! Lives only as long as the page; a reload starts from an empty set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Messages exchanged between the inventory page and the lead popup.
///
/// Anything that does not deserialize into this shape is ignored by the listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WindowMessage {
    LeadSaved {
        project: String,
        #[serde(default)]
        unit: String,
        blocked: bool,
    },
}

/// Origins whose messages are trusted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    pub fn new(own_origin: &str, extra: &[String]) -> Self {
        let allowed = std::iter::once(own_origin.to_string())
            .chain(extra.iter().cloned())
            .map(|o| o.trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty() && o != "null")
            .collect();
        Self { allowed }
    }

    pub fn permits(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.allowed.iter().any(|o| o == origin)
    }
}

/// Result of feeding one message to the [`UnlockSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockTransition {
    /// Project went from locked to unlocked
    Unlocked(String),
    /// Already unlocked this session; nothing changes
    AlreadyUnlocked(String),
    /// Lead was refused; the project stays locked
    Blocked(String),
    /// Message carried no project
    Ignored,
}

/// Projects revealed in this page session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockSet {
    projects: HashSet<String>,
}

impl UnlockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, project: &str) -> bool {
        self.projects.contains(project)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Apply a lead-capture message. Only `blocked: false` for a named project unlocks.
    pub fn apply(&mut self, message: &WindowMessage) -> UnlockTransition {
        let WindowMessage::LeadSaved { project, blocked, .. } = message;
        if project.is_empty() {
            return UnlockTransition::Ignored;
        }
        if *blocked {
            log::warn!("[UNLOCK] lead blocked for {}", project);
            return UnlockTransition::Blocked(project.clone());
        }
        if self.projects.insert(project.clone()) {
            log::info!("[UNLOCK] {} unlocked", project);
            UnlockTransition::Unlocked(project.clone())
        } else {
            UnlockTransition::AlreadyUnlocked(project.clone())
        }
    }
}
