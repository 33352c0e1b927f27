//! Integration module for connecting plate recognition engines with the tracker.
//!
//! This module provides the engine result format, the normalization of plate
//! reads into observations, and a pipeline bundling an engine with a tracker.

mod builder;
mod detector;
mod engine;
mod pipeline;

pub use builder::ObservationBuilder;
pub use detector::{IntoObservations, PlateSource};
pub use engine::{CarRecord, EngineFrame, PlateRecord};
pub use pipeline::{FrameReport, TrackSummary, TrackerPipeline};
