//! Tagged input events
//!
//! Input handlers (pointer, keyboard, touch) all funnel into this closed
//! set, so the transition table can be matched exhaustively.

use serde::{Deserialize, Serialize};

/// A 2D point in normalized device coordinates, components in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

impl NormPoint {
    /// Create a point, clamping both components into [-1, 1]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }
}

impl Default for NormPoint {
    /// Center of the screen
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Events consumed by the choreography engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer entered a pillar (Some) or left it (None)
    Hover {
        #[serde(default)]
        id: Option<String>,
    },
    /// User committed to a pillar at a screen-space origin
    Commit { id: String, origin: NormPoint },
    /// Abort everything and return to Idle
    Reset,
}

impl InputEvent {
    /// Convenience constructor for a hover event
    pub fn hover(id: impl Into<String>) -> Self {
        InputEvent::Hover { id: Some(id.into()) }
    }

    /// Convenience constructor for a hover-clear event
    pub fn unhover() -> Self {
        InputEvent::Hover { id: None }
    }

    /// Convenience constructor for a commit event
    pub fn commit(id: impl Into<String>, origin: NormPoint) -> Self {
        InputEvent::Commit {
            id: id.into(),
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_point_clamps() {
        let p = NormPoint::new(3.0, -7.5);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, -1.0);
    }

    #[test]
    fn test_norm_point_default_is_center() {
        let p = NormPoint::default();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_event_json_tag() {
        let json = serde_json::to_string(&InputEvent::hover("execution")).unwrap();
        assert!(json.contains(r#""type":"hover""#));

        let parsed: InputEvent =
            serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert_eq!(parsed, InputEvent::Reset);
    }
}
