//! Recognition engine results and their normalization into observations.
//!
//! The engine reports one JSON document per processed frame:
//!
//! ```json
//! {
//!   "frame_id": 12,
//!   "plates": [
//!     { "text": "ABC123", "warpedBox": [8 numbers], "car": { "warpedBox": [8 numbers] } }
//!   ]
//! }
//! ```
//!
//! Fields the tracker does not use (confidences, country, ...) are ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::{Observation, Quad};
use crate::{Error, Result};

use super::IntoObservations;

/// Vehicle region attached to a plate read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(rename = "warpedBox", default)]
    pub warped_box: Vec<f64>,
}

/// One plate read as reported by the engine. Geometry is left unchecked
/// until normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlateRecord {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "warpedBox", default)]
    pub warped_box: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<CarRecord>,
}

impl PlateRecord {
    /// Normalize into an [`Observation`], or report why the record is skipped.
    pub fn to_observation(&self, frame_index: u64) -> Result<Observation> {
        let car = self.car.as_ref().ok_or_else(|| Error::MissingCarBox {
            text: self.text.clone(),
        })?;
        let plate_box = Quad::from_slice(&self.warped_box)?;
        let car_box = Quad::from_slice(&car.warped_box)?;
        Ok(Observation::new(
            self.text.clone(),
            plate_box,
            car_box,
            frame_index,
        ))
    }
}

/// All plate reads of one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineFrame {
    #[serde(default)]
    pub frame_id: u64,
    #[serde(default)]
    pub plates: Vec<PlateRecord>,
}

impl EngineFrame {
    pub fn new(frame_id: u64, plates: Vec<PlateRecord>) -> Self {
        Self { frame_id, plates }
    }

    /// Parse an engine result document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalized observations in arrival order. Records without a car box
    /// or with malformed geometry are skipped.
    pub fn observations(&self) -> Vec<Observation> {
        self.plates
            .iter()
            .filter_map(|record| match record.to_observation(self.frame_id) {
                Ok(observation) => Some(observation),
                Err(err) => {
                    debug!(frame_id = self.frame_id, %err, "skipping plate record");
                    None
                }
            })
            .collect()
    }
}

impl IntoObservations for EngineFrame {
    fn frame_index(&self) -> u64 {
        self.frame_id
    }

    fn into_observations(self) -> Vec<Observation> {
        self.observations()
    }
}
