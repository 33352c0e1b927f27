//! TrackerPipeline for combining plate recognition with tracking.

use serde::Serialize;

use crate::tracker::{PlateTracker, Track, TrackerConfig, ZoneCounts};
use crate::Result;

use super::{IntoObservations, PlateSource};

/// Tracker output for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frame the report describes
    pub frame_index: u64,
    /// Tracks seen in this frame, in the order they were touched
    pub tracks: Vec<TrackSummary>,
    /// Running totals after this frame
    pub counts: ZoneCounts,
}

/// What renderers and reporters need from a live track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub car_id: u64,
    pub text: String,
    pub plate_box: [f64; 8],
    pub car_box: [f64; 8],
    pub speed: f64,
}

impl From<&Track> for TrackSummary {
    fn from(track: &Track) -> Self {
        Self {
            car_id: track.car_id,
            text: track.identity_key.clone(),
            plate_box: *track.plate_box.values(),
            car_box: *track.car_box.values(),
            speed: track.speed,
        }
    }
}

/// A combined tracker that bundles a recognition engine with the plate tracker.
///
/// This struct provides a convenient way to run end-to-end tracking
/// by combining any `PlateSource` with the `PlateTracker`.
pub struct TrackerPipeline<S: PlateSource> {
    source: S,
    tracker: PlateTracker,
}

impl<S: PlateSource> TrackerPipeline<S> {
    /// Create a new tracking pipeline with the given source and tracker config.
    pub fn new(source: S, config: TrackerConfig) -> Result<Self> {
        Ok(Self {
            source,
            tracker: PlateTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self {
            source,
            tracker: PlateTracker::default(),
        }
    }

    /// Process a single frame and return its report.
    ///
    /// This method runs recognition on the input image, normalizes the
    /// plate reads and feeds them to the tracker.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> std::result::Result<FrameReport, S::Error> {
        let frame = self.source.recognize(input, width, height)?;
        Ok(self.track(frame))
    }

    /// Feed already recognized output to the tracker.
    pub fn track<O: IntoObservations>(&mut self, output: O) -> FrameReport {
        let frame_index = output.frame_index();
        let live = self.tracker.update(output.into_observations());
        FrameReport {
            frame_index,
            tracks: live.iter().map(TrackSummary::from).collect(),
            counts: self.tracker.counts(),
        }
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &PlateTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut PlateTracker {
        &mut self.tracker
    }
}
