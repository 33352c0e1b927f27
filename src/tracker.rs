mod config;
mod matching;
mod observation;
mod plate_tracker;
mod quad;
mod track;
mod track_state;
mod zone;

pub use config::{Strip, TrackerConfig};
pub use matching::{first_match, iou_row};
pub use observation::Observation;
pub use plate_tracker::{PlateTracker, TrackerState};
pub use quad::{Quad, iou_batch};
pub use track::Track;
pub use track_state::{CountState, Direction};
pub use zone::{ZoneCounter, ZoneCounts};
