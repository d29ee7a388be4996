//! Pillar registry
//!
//! The engine stores pillar ids as bare lookup keys; the registry is the
//! external table they resolve against. The engine only consults it at
//! handoff time, to pick up the destination tint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tint used when a committed id is missing from the registry
pub const DEFAULT_TINT: &str = "#ffffff";

/// A selectable pillar as the registry knows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Accent color carried into the arrival page, e.g. "#e8491d"
    pub tint: String,
}

/// Id → pillar table, owned outside the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PillarRegistry {
    pillars: HashMap<String, Pillar>,
}

impl PillarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pillar id with its tint
    pub fn insert(&mut self, id: impl Into<String>, tint: impl Into<String>) {
        self.pillars.insert(id.into(), Pillar { tint: tint.into() });
    }

    /// Look up a pillar by id
    pub fn get(&self, id: &str) -> Option<&Pillar> {
        self.pillars.get(id)
    }

    /// Tint for an id, falling back to the default for unknown pillars
    pub fn tint_for(&self, id: &str) -> &str {
        self.pillars
            .get(id)
            .map(|p| p.tint.as_str())
            .unwrap_or(DEFAULT_TINT)
    }

    pub fn len(&self) -> usize {
        self.pillars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pillars.is_empty()
    }
}
