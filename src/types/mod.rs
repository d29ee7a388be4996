//! Core types for Choreo

mod event;
mod handoff;
mod output;
mod phase;
mod quality;
mod reason;
mod registry;
mod state;

pub use event::{InputEvent, NormPoint};
pub use handoff::HandoffPayload;
pub use output::{PhaseOutput, QualityOutput};
pub use phase::Phase;
pub use quality::{DeviceSignals, Tier};
pub use reason::ReasonCode;
pub use registry::{Pillar, PillarRegistry, DEFAULT_TINT};
pub use state::InteractionState;
