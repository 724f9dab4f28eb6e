//! Coordinate types and geometric utilities.
//!
//! Outdoor geometry uses WGS-84 [`GeoPoint`]s with haversine distances.
//! Operations that need a planar frame (segment projection, perpendicular
//! distance for simplification) work in a local equirectangular frame
//! centred on the segment start, which is accurate to well under a
//! centimetre over campus-scale segments.
//!
//! Indoor geometry uses floor-plan [`PixelPoint`]s; distances convert to
//! metres through a metres-per-pixel scale (see
//! [`NavConfig::meters_per_pixel`](crate::NavConfig::meters_per_pixel)).

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial compass bearing from `self` towards `other`, in `[0, 360)`
    /// degrees (0 = north, 90 = east).
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let y = d_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat, self.lng)
    }
}

// ── PixelPoint ────────────────────────────────────────────────────────────────

/// A point on a floor plan, in image pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    #[inline]
    pub fn distance_px(self, other: PixelPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Euclidean distance converted to metres at `meters_per_pixel`.
    #[inline]
    pub fn distance_m(self, other: PixelPoint, meters_per_pixel: f64) -> f64 {
        self.distance_px(other) * meters_per_pixel
    }
}

// ── Local planar frame ────────────────────────────────────────────────────────

/// Equirectangular frame anchored at `origin`; x grows east, y north, in
/// metres.
struct LocalFrame {
    origin:  GeoPoint,
    cos_lat: f64,
}

impl LocalFrame {
    fn at(origin: GeoPoint) -> Self {
        Self { origin, cos_lat: origin.lat.to_radians().cos() }
    }

    fn to_xy(&self, p: GeoPoint) -> (f64, f64) {
        let x = (p.lng - self.origin.lng).to_radians() * EARTH_RADIUS_M * self.cos_lat;
        let y = (p.lat - self.origin.lat).to_radians() * EARTH_RADIUS_M;
        (x, y)
    }

    fn to_geo(&self, x: f64, y: f64) -> GeoPoint {
        let lat = self.origin.lat + (y / EARTH_RADIUS_M).to_degrees();
        let lng = self.origin.lng + (x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees();
        GeoPoint::new(lat, lng)
    }
}

// ── Segment projection ────────────────────────────────────────────────────────

/// Closest point on a segment to a query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// The closest point on the segment.
    pub point: GeoPoint,
    /// Parametric position along the segment, clamped to `[0, 1]`.
    pub t: f64,
    /// Haversine distance from the query point to `point`, in metres.
    pub distance_m: f64,
}

impl Projection {
    /// `true` when the projection landed on one of the segment endpoints.
    #[inline]
    pub fn is_endpoint(&self) -> bool {
        self.t <= 0.0 || self.t >= 1.0
    }
}

/// Project `p` onto segment `a`–`b`.
///
/// A degenerate segment (`a == b`) projects everything onto `a`.  The
/// returned distance never exceeds the distance from `p` to either endpoint.
pub fn project_onto_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> Projection {
    let frame = LocalFrame::at(a);
    let (px, py) = frame.to_xy(p);
    let (bx, by) = frame.to_xy(b);

    let len2 = bx * bx + by * by;
    let t = if len2 > 0.0 {
        ((px * bx + py * by) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let point = if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        frame.to_geo(t * bx, t * by)
    };
    let projected = Projection { point, t, distance_m: p.distance_m(point) };

    // The planar frame and the haversine metric disagree by a hair near the
    // endpoints; never report an interior point that is further than one.
    let to_a = Projection { point: a, t: 0.0, distance_m: p.distance_m(a) };
    let to_b = Projection { point: b, t: 1.0, distance_m: p.distance_m(b) };
    [projected, to_a, to_b]
        .into_iter()
        .min_by(|l, r| l.distance_m.total_cmp(&r.distance_m))
        .unwrap_or(projected)
}

// ── Polylines ─────────────────────────────────────────────────────────────────

/// Sum of haversine lengths of consecutive pairs, in metres.
pub fn polyline_length_m(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}

/// Ramer–Douglas–Peucker simplification.
///
/// Discards points whose perpendicular distance from the chord of their
/// enclosing span is below `tolerance_m`.  The first and last points are
/// always kept, so the output never has more points than the input.
pub fn simplify(points: &[GeoPoint], tolerance_m: f64) -> Vec<GeoPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    mark_kept(points, 0, points.len() - 1, tolerance_m, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn mark_kept(points: &[GeoPoint], first: usize, last: usize, tolerance_m: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }

    let (mut split, mut max_dist) = (first, 0.0_f64);
    for i in first + 1..last {
        let d = chord_distance_m(points[i], points[first], points[last]);
        if d > max_dist {
            split = i;
            max_dist = d;
        }
    }

    if max_dist >= tolerance_m && split != first {
        keep[split] = true;
        mark_kept(points, first, split, tolerance_m, keep);
        mark_kept(points, split, last, tolerance_m, keep);
    }
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
fn chord_distance_m(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let frame = LocalFrame::at(a);
    let (px, py) = frame.to_xy(p);
    let (bx, by) = frame.to_xy(b);

    let len = bx.hypot(by);
    if len == 0.0 {
        return px.hypot(py);
    }
    (px * by - py * bx).abs() / len
}
