//! Cross-page handoff payload
//!
//! Captured once per commit sequence when dive progress crosses the
//! capture threshold, and consumed by the next page's arrival animation.
//! Opaque best-effort JSON with no schema versioning; readers must
//! tolerate its absence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NormPoint;

/// The only persisted artifact of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffPayload {
    /// Committed pillar id
    pub pillar_id: String,
    /// Destination accent color, resolved from the registry
    pub tint: String,
    /// Wall-clock capture time
    pub timestamp: DateTime<Utc>,
    /// Where the rupture opened
    pub origin: NormPoint,
}

impl HandoffPayload {
    pub fn new(
        pillar_id: impl Into<String>,
        tint: impl Into<String>,
        origin: NormPoint,
    ) -> Self {
        Self {
            pillar_id: pillar_id.into(),
            tint: tint.into(),
            timestamp: Utc::now(),
            origin,
        }
    }
}
