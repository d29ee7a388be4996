//! Core modules for Choreo

pub mod api;
pub mod choreography;
pub mod classifier;
pub mod clock;
pub mod drc;
pub mod handoff;
pub mod scheduler;
pub mod telemetry;

pub use api::{create_router, run_server};
pub use choreography::ChoreographyEngine;
pub use classifier::QualityClassifier;
pub use clock::{Clock, ManualClock, SystemClock};
pub use drc::ResolutionController;
pub use handoff::{load_handoff, save_handoff};
pub use scheduler::{ScheduledTransition, TimerQueue};
pub use telemetry::FrameTelemetry;
