//! Unit tests for nav-compose.

#[cfg(test)]
mod helpers {
    use nav_core::GeoPoint;
    use nav_spatial::PathRecord;

    pub fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng)
    }

    /// An L-shaped walkway: 222 m north, then 111 m east.
    pub fn l_walkway() -> Vec<PathRecord> {
        vec![PathRecord::new(1, vec![
            pt(0.0, 0.0),
            pt(0.001, 0.0),
            pt(0.002, 0.0),
            pt(0.002, 0.001),
        ])]
    }
}

// ── Instructions ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod instructions {
    use super::helpers::pt;
    use crate::{Maneuver, Segment, group_segments, steps, turn_angle};

    fn seg(bearing_deg: f64) -> Segment {
        Segment { bearing_deg, length_m: 10.0 }
    }

    #[test]
    fn straight_run_then_right_turn() {
        let s = group_segments(&[seg(0.0), seg(0.0), seg(90.0)], 20.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].instruction, "continue straight");
        assert_eq!(s[0].distance_m, 20.0);
        assert_eq!(s[1].instruction, "turn right");
        assert_eq!(s[1].icon, "turn-right");
        assert_eq!(s[1].distance, "10 m");
    }

    #[test]
    fn gentle_drift_stays_one_step() {
        // Each change is under the threshold even though the total is 45°.
        let s = group_segments(&[seg(0.0), seg(15.0), seg(30.0), seg(45.0)], 20.0);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].distance_m, 40.0);
    }

    #[test]
    fn threshold_is_configurable() {
        // A 15° change starts a new step under a 10° threshold, and that
        // step is a slight turn rather than "continue straight".
        let s = group_segments(&[seg(0.0), seg(15.0)], 10.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s[1].maneuver, Maneuver::SlightRight);
        assert_eq!(s[1].instruction, "turn slightly right");

        let s = group_segments(&[seg(0.0), seg(-12.0)], 10.0);
        assert_eq!(s[1].maneuver, Maneuver::SlightLeft);
    }

    #[test]
    fn every_new_step_after_the_first_turns() {
        for threshold in [5.0, 10.0, 20.0, 30.0] {
            let bearings = [0.0, 8.0, 25.0, 70.0, 200.0, 210.0];
            let segs: Vec<_> = bearings.iter().map(|&b| seg(b)).collect();
            for step in &group_segments(&segs, threshold)[1..] {
                assert_ne!(step.maneuver, Maneuver::Straight, "threshold {threshold}");
            }
        }
    }

    #[test]
    fn left_turns_across_north() {
        let s = group_segments(&[seg(10.0), seg(280.0)], 20.0);
        assert_eq!(s[1].maneuver, Maneuver::Left);
        let s = group_segments(&[seg(90.0), seg(270.0)], 20.0);
        assert_eq!(s[1].maneuver, Maneuver::UTurn);
        assert_eq!(s[1].instruction, "make a U-turn");
    }

    #[test]
    fn classification_bands() {
        let cases = [
            (19.9, Maneuver::Straight),
            (20.0, Maneuver::SlightRight),
            (-44.9, Maneuver::SlightLeft),
            (45.0, Maneuver::Right),
            (-134.9, Maneuver::Left),
            (135.0, Maneuver::SharpRight),
            (-164.9, Maneuver::SharpLeft),
            (165.0, Maneuver::UTurn),
            (-180.0, Maneuver::UTurn),
        ];
        for (angle, expected) in cases {
            assert_eq!(Maneuver::classify(angle, 20.0), expected, "angle {angle}");
        }
        assert_eq!(Maneuver::classify(12.0, 10.0), Maneuver::SlightRight);
        assert_eq!(Maneuver::classify(12.0, 20.0), Maneuver::Straight);
    }

    #[test]
    fn turn_angle_wraps() {
        assert!((turn_angle(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((turn_angle(10.0, 350.0) + 20.0).abs() < 1e-9);
        assert!((turn_angle(0.0, 90.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn steps_from_polyline() {
        let points = [pt(0.0, 0.0), pt(0.001, 0.0), pt(0.001, 0.0), pt(0.002, 0.0), pt(0.002, 0.001)];
        let s = steps(&points, 20.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].maneuver, Maneuver::Straight);
        assert_eq!(s[0].distance, "222 m");
        assert_eq!(s[1].maneuver, Maneuver::Right);
        assert_eq!(s[1].summary(), "turn right, then go 111 m");
    }

    #[test]
    fn degenerate_polylines_have_no_steps() {
        assert!(steps(&[], 20.0).is_empty());
        assert!(steps(&[pt(1.0, 1.0)], 20.0).is_empty());
        assert!(steps(&[pt(1.0, 1.0), pt(1.0, 1.0)], 20.0).is_empty());
    }
}

// ── Distance labels ───────────────────────────────────────────────────────────

#[cfg(test)]
mod distance {
    use proptest::prelude::*;

    use crate::{format_distance, parse_distance};

    #[test]
    fn formats() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(412.4), "412 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(999.7), "1.0 km");
        assert_eq!(format_distance(1349.0), "1.3 km");
    }

    #[test]
    fn parses() {
        assert_eq!(parse_distance("412 m"), Some(412.0));
        assert_eq!(parse_distance(" 1.3 km "), Some(1300.0));
        assert_eq!(parse_distance("far"), None);
        assert_eq!(parse_distance("m"), None);
    }

    proptest! {
        #[test]
        fn prop_parse_inverts_format(m in 0.0f64..1.0e6) {
            let label = format_distance(m);
            let back = parse_distance(&label).unwrap();
            prop_assert!((back - m).abs() <= 50.0 + 1e-6);
            prop_assert_eq!(format_distance(back), label);
        }
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod compose {
    use nav_core::{GeoPoint, NavConfig, TravelMode};
    use nav_spatial::{Building, PathRecord, Route, RouteKind, Router, SpatialError, SpatialResult};

    use super::helpers::{l_walkway, pt};
    use crate::{ComposeError, Maneuver, PHASE_COLORS, Stop, compose, compose_with};

    #[test]
    fn one_phase_per_leg() {
        let stops = [
            Stop::new("kiosk", pt(0.0, 0.0)),
            Stop::new("library", pt(0.002, 0.0)),
            Stop::new("gym", pt(0.002, 0.001)),
        ];
        let r = compose(&l_walkway(), &stops, TravelMode::Walking, &NavConfig::default()).unwrap();

        assert_eq!(r.phases.len(), 2);
        assert_eq!(r.phases[0].start_id, "kiosk");
        assert_eq!(r.phases[0].end_id, "library");
        assert_eq!(r.phases[1].start_id, "library");
        assert_eq!(r.phases[1].end_id, "gym");
        assert_eq!(r.phases[0].color, PHASE_COLORS[0]);
        assert_eq!(r.phases[1].color, PHASE_COLORS[1]);
        assert_eq!(r.phases[1].index, 1);

        assert_eq!(r.phases[0].distance, "222 m");
        assert_eq!(r.phases[1].distance, "111 m");
        assert_eq!(r.total_distance_m, 333.0);
        assert_eq!(r.total_distance, "333 m");
        assert_eq!(r.waypoints, stops.to_vec());
        assert!(!r.has_fallback());
    }

    #[test]
    fn phase_polylines_and_steps() {
        let stops = [Stop::new("a", pt(0.0, 0.0)), Stop::new("b", pt(0.002, 0.001))];
        let r = compose(&l_walkway(), &stops, TravelMode::Walking, &NavConfig::default()).unwrap();
        let phase = &r.phases[0];

        assert_eq!(phase.polyline.len(), 4);
        // The midpoint of the straight run is dropped for display.
        assert_eq!(phase.display_polyline, vec![pt(0.0, 0.0), pt(0.002, 0.0), pt(0.002, 0.001)]);
        let maneuvers: Vec<_> = phase.steps.iter().map(|s| s.maneuver).collect();
        assert_eq!(maneuvers, vec![Maneuver::Straight, Maneuver::Right]);
    }

    #[test]
    fn unreachable_leg_fails_journey() {
        let paths = vec![
            PathRecord::new(1, vec![pt(0.0, 0.0), pt(0.0, 0.001)]).with_pwd_friendly(true),
            PathRecord::new(2, vec![pt(0.0, 0.003), pt(0.0, 0.004)]).with_pwd_friendly(true),
        ];
        let stops = [
            Stop::new("a", pt(0.0, 0.0)),
            Stop::new("b", pt(0.0, 0.001)),
            Stop::new("c", pt(0.0, 0.004)),
        ];
        let err = compose(&paths, &stops, TravelMode::Accessible, &NavConfig::default()).unwrap_err();
        assert!(matches!(err, ComposeError::Leg { index: 1, source: SpatialError::NoRoute { .. } }));

        // Walking takes a straight line over the gap instead.
        let r = compose(&paths, &stops, TravelMode::Walking, &NavConfig::default()).unwrap();
        assert!(r.has_fallback());
        assert_eq!(r.phases[1].kind, RouteKind::DirectFallback);
    }

    #[test]
    fn too_few_stops() {
        let stops = [Stop::new("a", pt(0.0, 0.0))];
        let err = compose(&l_walkway(), &stops, TravelMode::Walking, &NavConfig::default()).unwrap_err();
        assert!(matches!(err, ComposeError::TooFewStops(1)));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = NavConfig { turn_threshold_deg: -1.0, ..NavConfig::default() };
        let stops = [Stop::new("a", pt(0.0, 0.0)), Stop::new("b", pt(0.002, 0.0))];
        let err = compose(&l_walkway(), &stops, TravelMode::Walking, &cfg).unwrap_err();
        assert!(matches!(err, ComposeError::Config(_)));
    }

    struct StraightLine;

    impl Router for StraightLine {
        fn route(&self, _: &[PathRecord], from: GeoPoint, to: GeoPoint, _: TravelMode) -> SpatialResult<Route> {
            Ok(Route::direct(from, to))
        }
    }

    #[test]
    fn custom_router() {
        let stops = [Stop::new("a", pt(0.0, 0.0)), Stop::new("b", pt(0.0, 0.01))];
        let r = compose_with(&StraightLine, &[], &stops, TravelMode::Driving, &NavConfig::default()).unwrap();
        assert_eq!(r.phases[0].polyline, vec![pt(0.0, 0.0), pt(0.0, 0.01)]);
        assert_eq!(r.phases[0].steps.len(), 1);
        assert_eq!(r.total_distance, "1.1 km");
        assert_eq!(r.total_distance_m, 1100.0);
    }

    #[test]
    fn building_stop_uses_routing_anchor() {
        let hall = Building::new(12, "Hall", pt(0.0005, 0.0005)).with_routing_anchor(pt(0.0, 0.0));
        let stop = Stop::building(&hall);
        assert_eq!(stop.id, "12");
        assert_eq!(stop.name, "Hall");
        assert_eq!(stop.point, pt(0.0, 0.0));
    }
}
