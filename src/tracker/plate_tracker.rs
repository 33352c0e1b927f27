//! Frame-to-frame association of plate observations with vehicle tracks.

use std::collections::HashMap;
use std::io::Write;

use tracing::{debug, trace};

use crate::tracker::config::TrackerConfig;
use crate::tracker::matching;
use crate::tracker::observation::Observation;
use crate::tracker::quad::Quad;
use crate::tracker::track::Track;
use crate::tracker::zone::{ZoneCounter, ZoneCounts};
use crate::Result;

/// Everything the tracker remembers between detections.
///
/// Tracks live in an arena indexed by `car_id - 1` and are never removed.
/// `identities` maps each track's current identity key to its `car_id`; the
/// per-frame sets hold `car_id`s in the order tracks were touched, so a
/// rename never leaves a stale key behind.
#[derive(Debug, Clone)]
pub struct TrackerState {
    tracks: Vec<Track>,
    identities: HashMap<String, u64>,
    previous_frame: Vec<u64>,
    current_frame: Vec<u64>,
    zones: ZoneCounter,
}

impl TrackerState {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            identities: HashMap::new(),
            previous_frame: Vec::new(),
            current_frame: Vec::new(),
            zones: ZoneCounter::new(config),
        }
    }

    #[inline]
    fn slot(car_id: u64) -> usize {
        (car_id - 1) as usize
    }

    /// Look up a track by `car_id`.
    pub fn track(&self, car_id: u64) -> Option<&Track> {
        car_id
            .checked_sub(1)
            .and_then(|i| self.tracks.get(i as usize))
    }

    /// Look up a track by its current identity key.
    pub fn track_by_key(&self, key: &str) -> Option<&Track> {
        self.identities.get(key).and_then(|&id| self.track(id))
    }

    /// Every track ever created, in `car_id` order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn counts(&self) -> ZoneCounts {
        self.zones.counts()
    }

    pub fn zones(&self) -> &ZoneCounter {
        &self.zones
    }

    /// Tracks touched in the frame being processed, in touch order.
    pub fn current_tracks(&self) -> impl Iterator<Item = &Track> {
        self.current_frame
            .iter()
            .map(|&id| &self.tracks[Self::slot(id)])
    }

    fn mark_current(&mut self, car_id: u64) {
        if !self.current_frame.contains(&car_id) {
            self.current_frame.push(car_id);
        }
    }

    fn create(&mut self, observation: &Observation) -> u64 {
        let car_id = self.tracks.len() as u64 + 1;
        let mut track = Track::new(car_id, observation);
        track.evaluate_crossing(&observation.car_box, &mut self.zones);
        self.identities.insert(track.identity_key.clone(), car_id);
        self.tracks.push(track);
        self.mark_current(car_id);
        car_id
    }

    /// Rename a track to `max(old_key, text)` and return the canonical key.
    ///
    /// Lexicographic order is an inherited heuristic, not a read-quality
    /// measure. `text` must not already be a key of another track.
    fn merge_identity(&mut self, car_id: u64, text: &str) -> String {
        let track = &mut self.tracks[Self::slot(car_id)];
        if text > track.identity_key.as_str() {
            self.identities.remove(&track.identity_key);
            track.identity_key = text.to_owned();
            self.identities.insert(track.identity_key.clone(), car_id);
        }
        track.identity_key.clone()
    }

    /// First previous-frame track, in touch order, whose car box overlaps
    /// `car_box` by at least `thresh`.
    fn geometric_match(&self, car_box: &Quad, thresh: f64) -> Option<u64> {
        let candidates: Vec<Quad> = self
            .previous_frame
            .iter()
            .map(|&id| self.tracks[Self::slot(id)].car_box)
            .collect();
        let ious = matching::iou_row(&candidates, car_box);
        matching::first_match(&ious, thresh).map(|i| self.previous_frame[i])
    }

    fn end_frame(&mut self) {
        self.previous_frame = std::mem::take(&mut self.current_frame);
    }
}

/// Associates plate observations with persistent vehicle tracks.
///
/// Observations must be fed in arrival order; the first-match geometric
/// fallback and identity merges depend on it.
#[derive(Debug, Clone)]
pub struct PlateTracker {
    config: TrackerConfig,
    state: TrackerState,
}

impl Default for PlateTracker {
    fn default() -> Self {
        let config = TrackerConfig::default();
        let state = TrackerState::new(&config);
        Self { config, state }
    }
}

impl PlateTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        let state = TrackerState::new(&config);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn counts(&self) -> ZoneCounts {
        self.state.counts()
    }

    /// Drop all tracks and counts, e.g. when a new stream starts.
    pub fn reset(&mut self) {
        self.state = TrackerState::new(&self.config);
    }

    /// Associate one observation and return the track it landed on.
    ///
    /// 1. Same text as a known track: update that track.
    /// 2. Otherwise, the first previous-frame track whose car box IoU
    ///    reaches `iou_threshold` takes the observation, is renamed to
    ///    `max(old_key, text)` and leaves the candidate pool for this frame.
    /// 3. Otherwise a new track is created.
    pub fn process(&mut self, observation: &Observation) -> &Track {
        let max_speed = self.config.max_speed;

        if let Some(&car_id) = self.state.identities.get(&observation.text) {
            let slot = TrackerState::slot(car_id);
            self.state.tracks[slot].observe(observation, &mut self.state.zones, max_speed);
            self.state.mark_current(car_id);
            trace!(car_id, plate = %observation.text, "matched by text");
            return &self.state.tracks[slot];
        }

        if let Some(car_id) = self
            .state
            .geometric_match(&observation.car_box, self.config.iou_threshold)
        {
            self.state.previous_frame.retain(|&id| id != car_id);
            let slot = TrackerState::slot(car_id);
            let old_key = self.state.tracks[slot].identity_key.clone();
            let key = self.state.merge_identity(car_id, &observation.text);
            self.state.tracks[slot].observe(observation, &mut self.state.zones, max_speed);
            self.state.mark_current(car_id);
            debug!(
                car_id,
                read = %observation.text,
                from = %old_key,
                to = %key,
                "matched by overlap"
            );
            return &self.state.tracks[slot];
        }

        let car_id = self.state.create(observation);
        debug!(car_id, plate = %observation.text, "new track");
        &self.state.tracks[TrackerState::slot(car_id)]
    }

    /// Close the current frame: its tracks become the candidate pool for
    /// the next frame's geometric matching.
    pub fn end_frame(&mut self) {
        trace!(live = self.state.current_frame.len(), "frame ended");
        self.state.end_frame();
    }

    /// Process all observations of one frame, close it and return the
    /// frame's live tracks in the order they were touched.
    pub fn update<I>(&mut self, observations: I) -> Vec<Track>
    where
        I: IntoIterator<Item = Observation>,
    {
        for observation in observations {
            self.process(&observation);
        }
        let live = self.state.current_tracks().cloned().collect();
        self.end_frame();
        live
    }

    /// Every identity key currently known, in `car_id` order.
    pub fn plate_texts(&self) -> Vec<String> {
        self.state
            .tracks
            .iter()
            .map(|t| t.identity_key.clone())
            .collect()
    }

    /// Write every known identity key, one per line.
    pub fn write_plate_list<W: Write>(&self, mut writer: W) -> Result<()> {
        for track in &self.state.tracks {
            writeln!(writer, "{}", track.identity_key)?;
        }
        writer.flush()?;
        Ok(())
    }
}
