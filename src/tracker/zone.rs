//! Directional vehicle counting through two fixed strips.
//!
//! The frame is split vertically at `width / 2`. A vehicle whose car box
//! centroid is in the left half is outgoing and is counted when the centroid
//! is strictly inside the outgoing strip; the right half uses the incoming
//! strip. The half picks the direction, the strip only gates the count.

use serde::{Deserialize, Serialize};

use crate::tracker::config::{Strip, TrackerConfig};
use crate::tracker::quad::Quad;
use crate::tracker::track_state::{CountState, Direction};

/// Running in/out totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneCounts {
    pub incoming: u64,
    pub outgoing: u64,
}

impl ZoneCounts {
    pub fn total(&self) -> u64 {
        self.incoming + self.outgoing
    }
}

/// Evaluates car box centroids against the counting strips and keeps totals.
#[derive(Debug, Clone)]
pub struct ZoneCounter {
    frame_width: f64,
    frame_height: f64,
    outgoing_strip: Strip,
    incoming_strip: Strip,
    counts: ZoneCounts,
}

impl ZoneCounter {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            outgoing_strip: config.outgoing_strip,
            incoming_strip: config.incoming_strip,
            counts: ZoneCounts::default(),
        }
    }

    pub fn counts(&self) -> ZoneCounts {
        self.counts
    }

    /// Direction implied by the half of the frame the centroid falls in.
    pub fn direction_of(&self, car_box: &Quad) -> Direction {
        if car_box.centroid().x > self.frame_width / 2.0 {
            Direction::Incoming
        } else {
            Direction::Outgoing
        }
    }

    fn strip(&self, direction: Direction) -> &Strip {
        match direction {
            Direction::Incoming => &self.incoming_strip,
            Direction::Outgoing => &self.outgoing_strip,
        }
    }

    /// Pixel rectangle `[x1, y1, x2, y2]` covered by a direction's strip.
    pub fn strip_bounds(&self, direction: Direction) -> [f64; 4] {
        let half = self.frame_width / 2.0;
        let (top, bottom) = self.strip(direction).scaled(self.frame_height);
        match direction {
            Direction::Outgoing => [0.0, top, half, bottom],
            Direction::Incoming => [half, top, self.frame_width, bottom],
        }
    }

    /// Count a vehicle if its centroid is inside its direction's strip.
    ///
    /// No-op for an already counted state. On a count the state becomes
    /// `Counted` and the matching total is incremented.
    pub fn evaluate(&mut self, state: &mut CountState, car_box: &Quad) -> Option<Direction> {
        if state.is_counted() {
            return None;
        }

        let direction = self.direction_of(car_box);
        let cy = car_box.centroid().y;
        if !self.strip(direction).contains(cy, self.frame_height) {
            return None;
        }

        match direction {
            Direction::Incoming => self.counts.incoming += 1,
            Direction::Outgoing => self.counts.outgoing += 1,
        }
        *state = CountState::Counted(direction);
        Some(direction)
    }
}
