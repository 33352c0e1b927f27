//! Single vehicle track.

use tracing::{info, trace};

use crate::tracker::observation::Observation;
use crate::tracker::quad::Quad;
use crate::tracker::track_state::{CountState, Direction};
use crate::tracker::zone::ZoneCounter;

/// One vehicle followed across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Stable identifier, assigned once in creation order starting at 1
    pub car_id: u64,
    /// Current identity key (plate text); may change when tracks merge
    pub identity_key: String,
    /// Latest plate quadrilateral
    pub plate_box: Quad,
    /// Latest car quadrilateral
    pub car_box: Quad,
    /// Vertical displacement in pixels per frame; 0 until first valid sample
    pub speed: f64,
    /// Whether and how this vehicle has been counted
    pub count_state: CountState,
    /// Frame of the latest observation
    pub last_frame_index: u64,
}

impl Track {
    /// Create a track from its first observation. Not yet counted.
    pub fn new(car_id: u64, observation: &Observation) -> Self {
        Self {
            car_id,
            identity_key: observation.text.clone(),
            plate_box: observation.plate_box,
            car_box: observation.car_box,
            speed: 0.0,
            count_state: CountState::Uncounted,
            last_frame_index: observation.frame_index,
        }
    }

    #[inline]
    pub fn crossed(&self) -> bool {
        self.count_state.is_counted()
    }

    /// Update the speed estimate from a new car box.
    ///
    /// The sample is `|(v_old - v_new) / dt|` with `v` the vertical midpoint
    /// and `dt = last_frame_index - frame_index`. A zero gap, a zero
    /// displacement or a sample at or above `max_speed` keeps the previous
    /// speed.
    pub fn update_speed(&mut self, car_box: &Quad, frame_index: u64, max_speed: f64) {
        let dt = i128::from(self.last_frame_index) - i128::from(frame_index);
        if dt == 0 {
            return;
        }

        let v_old = self.car_box.vertical_midpoint();
        let v_new = car_box.vertical_midpoint();
        let candidate = ((v_old - v_new) / dt as f64).abs();

        if candidate > 0.0 && candidate < max_speed {
            self.speed = candidate;
        } else {
            trace!(car_id = self.car_id, candidate, "speed sample rejected");
        }
    }

    /// Count this vehicle if its car box is inside its direction's strip.
    pub fn evaluate_crossing(
        &mut self,
        car_box: &Quad,
        zones: &mut ZoneCounter,
    ) -> Option<Direction> {
        let direction = zones.evaluate(&mut self.count_state, car_box)?;
        info!(
            car_id = self.car_id,
            plate = %self.identity_key,
            ?direction,
            "vehicle counted"
        );
        Some(direction)
    }

    /// Apply a matched observation: speed first, then crossing on the new
    /// car box, then overwrite geometry and frame index.
    pub fn observe(&mut self, observation: &Observation, zones: &mut ZoneCounter, max_speed: f64) {
        self.update_speed(&observation.car_box, observation.frame_index, max_speed);
        if !self.crossed() {
            self.evaluate_crossing(&observation.car_box, zones);
        }
        self.plate_box = observation.plate_box;
        self.car_box = observation.car_box;
        self.last_frame_index = observation.frame_index;
    }
}
