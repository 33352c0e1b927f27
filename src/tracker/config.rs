use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Horizontal counting band, as fractions of the frame height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strip {
    pub top: f64,
    pub bottom: f64,
}

impl Strip {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Pixel bounds for a frame of the given height.
    #[inline]
    pub fn scaled(&self, frame_height: f64) -> (f64, f64) {
        (self.top * frame_height, self.bottom * frame_height)
    }

    /// True when `y` lies strictly inside the scaled band.
    #[inline]
    pub fn contains(&self, y: f64, frame_height: f64) -> bool {
        let (top, bottom) = self.scaled(frame_height);
        y > top && y < bottom
    }
}

/// Configuration for the [`PlateTracker`](crate::PlateTracker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Frame width in pixels; splits the frame into outgoing/incoming halves
    pub frame_width: f64,
    /// Frame height in pixels; scales both strips
    pub frame_height: f64,
    /// Strip used for vehicles in the left half
    pub outgoing_strip: Strip,
    /// Strip used for vehicles in the right half
    pub incoming_strip: Strip,
    /// Minimum car box IoU for the geometric fallback match
    pub iou_threshold: f64,
    /// Speed samples at or above this are discarded
    pub max_speed: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            frame_width: 1280.0,
            frame_height: 720.0,
            outgoing_strip: Strip::new(0.554, 0.60),
            incoming_strip: Strip::new(0.36, 0.41),
            iou_threshold: 0.58,
            max_speed: 1e6,
        }
    }
}

impl TrackerConfig {
    /// Default thresholds with the given frame size.
    pub fn with_frame_size(width: f64, height: f64) -> Self {
        Self {
            frame_width: width,
            frame_height: height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.frame_width > 0.0 && self.frame_height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "frame size must be positive, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        for (name, strip) in [
            ("outgoing_strip", &self.outgoing_strip),
            ("incoming_strip", &self.incoming_strip),
        ] {
            if !(0.0..=1.0).contains(&strip.top)
                || !(0.0..=1.0).contains(&strip.bottom)
                || strip.top >= strip.bottom
            {
                return Err(Error::InvalidConfig(format!(
                    "{name} must satisfy 0 <= top < bottom <= 1, got [{}, {}]",
                    strip.top, strip.bottom
                )));
            }
        }
        if !(self.iou_threshold > 0.0 && self.iou_threshold <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "iou_threshold must be in (0, 1], got {}",
                self.iou_threshold
            )));
        }
        if !(self.max_speed > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        Ok(())
    }
}
