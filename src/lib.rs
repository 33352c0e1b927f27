//! # plate-tracker
//!
//! Turns per-frame license plate detections from an external recognition
//! engine into persistent vehicle tracks.
//!
//! For every frame the tracker associates each detection with a known
//! vehicle (by plate text first, then by car box overlap with the previous
//! frame), estimates a per-frame vertical speed and counts each vehicle once
//! when it passes through its direction's counting strip.
//!
//! ## Example
//!
//! ```rust,ignore
//! use plate_tracker::{ObservationBuilder, PlateTracker, TrackerConfig};
//!
//! let mut tracker = PlateTracker::new(TrackerConfig::default())?;
//!
//! let obs = ObservationBuilder::new()
//!     .text("ABC123")
//!     .plate_tlbr(860.0, 300.0, 940.0, 320.0)
//!     .car_tlbr(800.0, 220.0, 1000.0, 330.0)
//!     .frame(1)
//!     .build()?;
//!
//! let tracks = tracker.update(vec![obs]);
//! println!("{} tracks, {:?}", tracks.len(), tracker.counts());
//! ```

mod error;

pub mod integration;
pub mod tracker;

pub use error::{Error, Result};
pub use integration::{
    CarRecord, EngineFrame, FrameReport, IntoObservations, ObservationBuilder, PlateRecord,
    PlateSource, TrackSummary, TrackerPipeline,
};
pub use tracker::{
    CountState, Direction, Observation, PlateTracker, Quad, Strip, Track, TrackerConfig,
    TrackerState, ZoneCounter, ZoneCounts,
};
