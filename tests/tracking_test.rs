use approx::assert_relative_eq;
use plate_tracker::{
    Direction, EngineFrame, Observation, ObservationBuilder, PlateTracker, Quad, TrackerConfig,
    ZoneCounts,
};

fn observe(text: &str, car: [f64; 4], frame: u64) -> Observation {
    ObservationBuilder::new()
        .text(text)
        .plate_tlbr(car[0] + 20.0, car[3] - 20.0, car[0] + 60.0, car[3] - 5.0)
        .car_tlbr(car[0], car[1], car[2], car[3])
        .frame(frame)
        .build()
        .unwrap()
}

#[test]
fn test_end_to_end_incoming_vehicle() {
    let mut tracker = PlateTracker::new(TrackerConfig::default()).unwrap();

    // Frame 1: right half, centroid y = 275 inside the incoming band (259.2, 295.2)
    let tracks1 = tracker.update(vec![observe("X1", [800.0, 220.0, 1000.0, 330.0], 1)]);
    assert_eq!(tracks1.len(), 1);
    assert_eq!(tracks1[0].car_id, 1);
    assert!(tracks1[0].crossed());
    assert_eq!(tracks1[0].count_state.direction(), Some(Direction::Incoming));
    assert_eq!(tracker.counts(), ZoneCounts { incoming: 1, outgoing: 0 });

    // Frame 2: same text, moved 50px down
    let tracks2 = tracker.update(vec![observe("X1", [800.0, 270.0, 1000.0, 380.0], 2)]);
    assert_eq!(tracks2.len(), 1);
    assert_eq!(tracks2[0].car_id, 1);
    assert_relative_eq!(tracks2[0].speed, 50.0);
    assert_eq!(tracker.counts().incoming, 1);
}

#[test]
fn test_identity_continuity_over_many_frames() {
    let mut tracker = PlateTracker::new(TrackerConfig::default()).unwrap();

    for frame in 1..=30u64 {
        let y = 100.0 + 8.0 * frame as f64;
        let obs = observe("KA05MX1234", [300.0, y, 500.0, y + 120.0], frame);
        let tracks = tracker.update(vec![obs]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].car_id, 1);
    }

    assert_eq!(tracker.state().len(), 1);
    assert_eq!(tracker.plate_texts(), vec!["KA05MX1234".to_string()]);
}

#[test]
fn test_outgoing_vehicle_counted_once_across_strip() {
    let mut tracker = PlateTracker::new(TrackerConfig::default()).unwrap();

    // Left half, moving down through the outgoing band (398.88, 432.0).
    for (frame, y) in [(1u64, 300.0), (2, 340.0), (3, 350.0), (4, 360.0), (5, 400.0)] {
        tracker.update(vec![observe("OUT1", [100.0, y, 300.0, y + 110.0], frame)]);
    }

    let track = tracker.state().track_by_key("OUT1").unwrap();
    assert!(track.crossed());
    assert_eq!(tracker.counts(), ZoneCounts { incoming: 0, outgoing: 1 });
}

#[test]
fn test_ocr_misread_merges_into_one_track() {
    let mut tracker = PlateTracker::new(TrackerConfig::default()).unwrap();

    tracker.update(vec![observe("ABC123", [0.0, 0.0, 170.0, 100.0], 1)]);
    // Misread in the next frame, box overlaps by IoU 0.7.
    let tracks = tracker.update(vec![observe("ABD456", [30.0, 0.0, 200.0, 100.0], 2)]);

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].car_id, 1);
    assert_eq!(tracks[0].identity_key, "ABD456");
    assert!(tracker.state().track_by_key("ABC123").is_none());

    // The merged key is now the exact-identity key.
    let tracks = tracker.update(vec![observe("ABD456", [300.0, 300.0, 470.0, 400.0], 3)]);
    assert_eq!(tracks[0].car_id, 1);
    assert_eq!(tracker.state().len(), 1);
}

#[test]
fn test_distinct_vehicles_get_fresh_ids() {
    let mut tracker = PlateTracker::new(TrackerConfig::default()).unwrap();

    let tracks = tracker.update(vec![
        observe("AAA111", [0.0, 0.0, 100.0, 80.0], 1),
        observe("BBB222", [600.0, 0.0, 700.0, 80.0], 1),
    ]);
    assert_eq!(tracks[0].car_id, 1);
    assert_eq!(tracks[1].car_id, 2);

    // New text, no overlap with anything from frame 1.
    let tracks = tracker.update(vec![observe("CCC333", [300.0, 500.0, 400.0, 580.0], 2)]);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].car_id, 3);
}

#[test]
fn test_engine_json_stream() {
    let frames = [
        r#"{"frame_id": 1, "plates": [
            {"text": "MH12AB", "warpedBox": [860, 300, 940, 300, 940, 320, 860, 320],
             "car": {"warpedBox": [800, 200, 1000, 200, 1000, 300, 800, 300]}},
            {"text": "PLATEONLY", "warpedBox": [10, 10, 40, 10, 40, 20, 10, 20]}
        ]}"#,
        r#"{"frame_id": 2, "plates": [
            {"text": "MH12A8", "warpedBox": [860, 310, 940, 310, 940, 330, 860, 330],
             "car": {"warpedBox": [800, 210, 1000, 210, 1000, 310, 800, 310]}}
        ]}"#,
        r#"{"frame_id": 3}"#,
    ];

    let mut tracker = PlateTracker::default();
    for json in frames {
        let frame = EngineFrame::from_json(json).unwrap();
        tracker.update(frame.observations());
    }

    // "MH12AB" > "MH12A8", so the first read survives the merge.
    assert_eq!(tracker.plate_texts(), vec!["MH12AB".to_string()]);
    let track = tracker.state().track(1).unwrap();
    assert_relative_eq!(track.speed, 10.0);
    assert_eq!(track.car_box, Quad::from_tlbr(800.0, 210.0, 1000.0, 310.0));
    assert_eq!(tracker.counts(), ZoneCounts { incoming: 1, outgoing: 0 });

    let mut out = Vec::new();
    tracker.write_plate_list(&mut out).unwrap();
    assert_eq!(out, b"MH12AB\n");
}
