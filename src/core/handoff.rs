//! Handoff persistence
//!
//! Best-effort JSON storage for the cross-page payload. Callers ignore
//! failures: the arrival page falls back to a non-portal presentation
//! when nothing loads.

use std::io;

use crate::types::HandoffPayload;

/// File name used inside the handoff directory; one payload at a time,
/// later captures overwrite earlier ones
pub const HANDOFF_FILE: &str = "handoff.json";

/// Save the payload as JSON under `dir`, returning the path written
pub fn save_handoff(payload: &HandoffPayload, dir: &str) -> io::Result<String> {
    let filename = format!("{}/{}", dir, HANDOFF_FILE);

    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    std::fs::create_dir_all(dir)?;
    std::fs::write(&filename, json)?;

    Ok(filename)
}

/// Load a payload from a JSON file
pub fn load_handoff(path: &str) -> io::Result<HandoffPayload> {
    let json = std::fs::read_to_string(path)?;

    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
