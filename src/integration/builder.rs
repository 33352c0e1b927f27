//! Builder for creating Observation objects from various input formats.

use crate::tracker::{Observation, Quad};
use crate::Result;

/// Builder for creating `Observation` objects from various input formats.
#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    text: String,
    plate_box: Vec<f64>,
    car_box: Vec<f64>,
    frame_index: u64,
}

impl ObservationBuilder {
    /// Create a new observation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recognized plate text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the plate box in TLBR format (x1, y1, x2, y2).
    pub fn plate_tlbr(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.plate_box = Quad::from_tlbr(x1, y1, x2, y2).values().to_vec();
        self
    }

    /// Set the car box in TLBR format (x1, y1, x2, y2).
    pub fn car_tlbr(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.car_box = Quad::from_tlbr(x1, y1, x2, y2).values().to_vec();
        self
    }

    /// Set the car box in XYWH format (center_x, center_y, width, height).
    pub fn car_xywh(self, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        self.car_tlbr(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0)
    }

    /// Set the raw engine quadrilateral of the plate.
    pub fn plate_quad(mut self, values: &[f64]) -> Self {
        self.plate_box = values.to_vec();
        self
    }

    /// Set the raw engine quadrilateral of the car.
    pub fn car_quad(mut self, values: &[f64]) -> Self {
        self.car_box = values.to_vec();
        self
    }

    /// Set the frame index.
    pub fn frame(mut self, frame_index: u64) -> Self {
        self.frame_index = frame_index;
        self
    }

    /// Build the final `Observation`, validating both quadrilaterals.
    pub fn build(self) -> Result<Observation> {
        let plate_box = Quad::from_slice(&self.plate_box)?;
        let car_box = Quad::from_slice(&self.car_box)?;
        Ok(Observation::new(self.text, plate_box, car_box, self.frame_index))
    }
}
