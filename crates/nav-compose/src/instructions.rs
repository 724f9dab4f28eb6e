//! Turn-by-turn instructions from a route polyline.
//!
//! Each polyline segment has a bearing.  Runs of segments whose bearing
//! changes by less than the turn threshold merge into one step; the bearing
//! change where a new run begins decides that step's maneuver.  The first
//! step of a leg is always "continue straight".
//!
//! | abs(change)   | Maneuver   |
//! |---------------|------------|
//! | `< threshold` | straight   |
//! | `< 45°`       | slight     |
//! | `< 135°`      | turn       |
//! | `< 165°`      | sharp      |
//! | otherwise     | U-turn     |
//!
//! The threshold defaults to 20°.  A positive change (clockwise) is a
//! right turn.

use nav_core::GeoPoint;

use crate::distance::format_distance;

// ── Maneuver ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Maneuver {
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
    UTurn,
}

impl Maneuver {
    /// Classify a signed bearing change in degrees.  Changes below
    /// `threshold_deg` are straight, matching the step-grouping rule.
    pub fn classify(change_deg: f64, threshold_deg: f64) -> Self {
        let right = change_deg > 0.0;
        let pick = |l, r| if right { r } else { l };
        match change_deg.abs() {
            a if a < threshold_deg => Maneuver::Straight,
            a if a < 45.0  => pick(Maneuver::SlightLeft, Maneuver::SlightRight),
            a if a < 135.0 => pick(Maneuver::Left, Maneuver::Right),
            a if a < 165.0 => pick(Maneuver::SharpLeft, Maneuver::SharpRight),
            _              => Maneuver::UTurn,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Maneuver::Straight    => "continue straight",
            Maneuver::SlightLeft  => "turn slightly left",
            Maneuver::SlightRight => "turn slightly right",
            Maneuver::Left        => "turn left",
            Maneuver::Right       => "turn right",
            Maneuver::SharpLeft   => "turn sharp left",
            Maneuver::SharpRight  => "turn sharp right",
            Maneuver::UTurn       => "make a U-turn",
        }
    }

    /// Icon tag understood by the kiosk UI.
    pub fn icon(self) -> &'static str {
        match self {
            Maneuver::Straight    => "straight",
            Maneuver::SlightLeft  => "slight-left",
            Maneuver::SlightRight => "slight-right",
            Maneuver::Left        => "turn-left",
            Maneuver::Right       => "turn-right",
            Maneuver::SharpLeft   => "sharp-left",
            Maneuver::SharpRight  => "sharp-right",
            Maneuver::UTurn       => "u-turn",
        }
    }
}

/// Signed change from bearing `from` to bearing `to`, in `[-180, 180)`.
pub fn turn_angle(from_deg: f64, to_deg: f64) -> f64 {
    (to_deg - from_deg + 540.0).rem_euclid(360.0) - 180.0
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// One polyline segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub bearing_deg: f64,
    pub length_m:    f64,
}

/// One instruction of a leg.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Step {
    pub maneuver:    Maneuver,
    pub instruction: String,
    pub icon:        String,
    /// Bearing of the step's first segment.
    pub bearing_deg: f64,
    pub distance_m:  f64,
    pub distance:    String,
}

impl Step {
    fn start(maneuver: Maneuver, seg: Segment) -> Self {
        Self {
            maneuver,
            instruction: maneuver.instruction().to_string(),
            icon: maneuver.icon().to_string(),
            bearing_deg: seg.bearing_deg,
            distance_m: seg.length_m,
            distance: String::new(),
        }
    }

    /// `"turn right, then go 120 m"`.
    pub fn summary(&self) -> String {
        format!("{}, then go {}", self.instruction, self.distance)
    }
}

/// Bearing and length of each non-degenerate segment of `points`.
pub fn segments(points: &[GeoPoint]) -> Vec<Segment> {
    points
        .windows(2)
        .filter_map(|w| {
            let length_m = w[0].distance_m(w[1]);
            (length_m > 0.0).then(|| Segment { bearing_deg: w[0].bearing_deg(w[1]), length_m })
        })
        .collect()
}

/// Group segments into steps.  `threshold_deg` is the bearing change at
/// which a new step begins.
pub fn group_segments(segments: &[Segment], threshold_deg: f64) -> Vec<Step> {
    let Some((&first, rest)) = segments.split_first() else {
        return Vec::new();
    };

    let mut steps = vec![Step::start(Maneuver::Straight, first)];
    let mut prev = first.bearing_deg;
    for &seg in rest {
        let change = turn_angle(prev, seg.bearing_deg);
        prev = seg.bearing_deg;
        match steps.last_mut() {
            Some(step) if change.abs() < threshold_deg => step.distance_m += seg.length_m,
            _ => steps.push(Step::start(Maneuver::classify(change, threshold_deg), seg)),
        }
    }

    for step in &mut steps {
        step.distance = format_distance(step.distance_m);
    }
    steps
}

/// Turn-by-turn steps along a polyline.
pub fn steps(points: &[GeoPoint], threshold_deg: f64) -> Vec<Step> {
    group_segments(&segments(points), threshold_deg)
}
