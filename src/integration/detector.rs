//! Trait for plate recognition engines.

use crate::tracker::Observation;

use super::EngineFrame;

/// Trait for plate recognition engines feeding the tracker.
///
/// Implement this trait to connect any recognition engine to the tracker.
///
/// # Example
///
/// ```ignore
/// use plate_tracker::{EngineFrame, PlateSource};
///
/// struct MyEngine {
///     // Your engine handle here
/// }
///
/// impl PlateSource for MyEngine {
///     type Error = std::io::Error;
///
///     fn recognize(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<EngineFrame, Self::Error> {
///         // Run recognition and return the frame's plate reads
///         Ok(EngineFrame::default())
///     }
/// }
/// ```
pub trait PlateSource {
    /// Error type for recognition failures.
    type Error;

    /// Run recognition on raw image data and return the frame's plate reads.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn recognize(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<EngineFrame, Self::Error>;
}

/// Helper trait for converting engine-specific outputs to observations.
pub trait IntoObservations {
    /// Frame the observations belong to.
    fn frame_index(&self) -> u64;

    /// Convert the output into observations, dropping unusable records.
    fn into_observations(self) -> Vec<Observation>;
}

/// A frame index paired with that frame's observations. The index is
/// stamped onto every observation so the tracker and the report agree.
impl IntoObservations for (u64, Vec<Observation>) {
    fn frame_index(&self) -> u64 {
        self.0
    }

    fn into_observations(self) -> Vec<Observation> {
        let (frame_index, mut observations) = self;
        for observation in &mut observations {
            observation.frame_index = frame_index;
        }
        observations
    }
}
