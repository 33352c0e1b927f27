use crate::tracker::quad::Quad;

/// Detection input for the tracker: one plate read with its car box.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Recognized plate text, possibly empty or misread
    pub text: String,
    /// Plate quadrilateral
    pub plate_box: Quad,
    /// Enclosing vehicle quadrilateral
    pub car_box: Quad,
    /// Frame the detection belongs to
    pub frame_index: u64,
}

impl Observation {
    pub fn new(text: impl Into<String>, plate_box: Quad, car_box: Quad, frame_index: u64) -> Self {
        Self {
            text: text.into(),
            plate_box,
            car_box,
            frame_index,
        }
    }
}
