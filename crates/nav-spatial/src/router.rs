//! Outdoor routing between two points of interest.
//!
//! # Pipeline
//!
//! ```text
//! ① build     : graph from the paths admitted by the travel mode
//! ② project   : each endpoint onto its nearest segment (interior or end)
//! ③ augment   : anchor vertex, projection vertex, spur + split edges
//! ④ search    : Dijkstra between the two anchor vertices
//! ⑤ fallback  : walking/driving: direct segment + warning;
//!                accessible: SpatialError::NoRoute
//! ⑥ assemble  : vertex path → ordered point list
//! ```
//!
//! # Pluggability
//!
//! The composer calls routing via the [`Router`] trait, so applications can
//! swap in another engine without touching the composition logic.  The
//! default [`DijkstraRouter`] rebuilds the graph on every call.

use log::warn;

use nav_core::{GeoPoint, NodeId, Projection, TravelMode, project_onto_segment, simplify};

use crate::outdoor::{CoordKey, NodeKey, OutdoorGraph, OutdoorGraphBuilder, outdoor_graph_builder};
use crate::records::{Building, PathRecord};
use crate::search::{Constraints, Path, distances_from, shortest_path};
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// How a route was obtained.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteKind {
    /// Follows drawn paths.
    Graph,
    /// Straight line between the endpoints; the path network did not
    /// connect them.
    DirectFallback,
}

/// The result of a routing query: an ordered point list and its length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub points:     Vec<GeoPoint>,
    pub distance_m: f64,
    pub kind:       RouteKind,
}

impl Route {
    /// Two-point straight-line route.
    pub fn direct(from: GeoPoint, to: GeoPoint) -> Self {
        Self {
            points: vec![from, to],
            distance_m: from.distance_m(to),
            kind: RouteKind::DirectFallback,
        }
    }

    /// Positions along `path`, with its unpenalized length.  An anchor that
    /// sits exactly on its projection contributes a single point.
    pub fn from_path(graph: &OutdoorGraph, path: &Path) -> Self {
        let mut points: Vec<GeoPoint> = Vec::with_capacity(path.nodes.len());
        for &n in &path.nodes {
            let p = graph.pos(n);
            if points.last().is_none_or(|&q| CoordKey::of(q) != CoordKey::of(p)) {
                points.push(p);
            }
        }
        Self {
            points,
            distance_m: graph.path_weight(&path.edges),
            kind: RouteKind::Graph,
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.kind == RouteKind::DirectFallback
    }

    /// Display polyline with near-collinear points removed.
    pub fn simplified(&self, tolerance_m: f64) -> Vec<GeoPoint> {
        simplify(&self.points, tolerance_m)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable outdoor routing engine.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to` over `paths` for `mode`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoProjection`] when no path is routable for the mode;
    /// [`SpatialError::NoRoute`] when the endpoints are disconnected and the
    /// mode forbids a straight-line fallback.
    fn route(
        &self,
        paths: &[PathRecord],
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> SpatialResult<Route>;

    /// Route between two buildings, honouring their routing anchors.
    fn route_buildings(
        &self,
        paths: &[PathRecord],
        from: &Building,
        to: &Building,
        mode: TravelMode,
    ) -> SpatialResult<Route> {
        self.route(paths, from.routing_point(), to.routing_point(), mode)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Rebuilds the mode's graph, snaps both endpoints, and runs Dijkstra.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        paths: &[PathRecord],
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> SpatialResult<Route> {
        let snapped = snap_endpoints(paths, from, to, mode)?;

        match shortest_path(&snapped.graph, snapped.from, snapped.to, &Constraints::none()) {
            Some(path) => Ok(Route::from_path(&snapped.graph, &path)),
            None => disconnected(from, to, mode),
        }
    }
}

/// Outcome for endpoints the graph does not connect.
pub(crate) fn disconnected(from: GeoPoint, to: GeoPoint, mode: TravelMode) -> SpatialResult<Route> {
    if mode.allows_direct_fallback() {
        warn!("no {mode} path from {from} to {to}; falling back to a straight line");
        Ok(Route::direct(from, to))
    } else {
        Err(SpatialError::NoRoute { from, to, mode })
    }
}

// ── Endpoint snapping ─────────────────────────────────────────────────────────

/// An augmented graph with both endpoints attached.
#[derive(Clone, Debug)]
pub struct SnappedGraph {
    pub graph: OutdoorGraph,
    /// Anchor vertex of the start point.
    pub from:  NodeId,
    /// Anchor vertex of the end point.
    pub to:    NodeId,
}

/// Build the graph for `mode` and attach `from` and `to` through their
/// nearest-segment projections.
pub fn snap_endpoints(
    paths: &[PathRecord],
    from: GeoPoint,
    to: GeoPoint,
    mode: TravelMode,
) -> SpatialResult<SnappedGraph> {
    let mut b = outdoor_graph_builder(paths, mode);

    let hits = [
        nearest_segment(paths, mode, from).ok_or(SpatialError::NoProjection(mode))?,
        nearest_segment(paths, mode, to).ok_or(SpatialError::NoProjection(mode))?,
    ];
    let anchors = attach(&mut b, &[from, to], &hits);

    Ok(SnappedGraph { graph: b.build(), from: anchors[0], to: anchors[1] })
}

/// Closest segment of an admitted path to a query point.
#[derive(Copy, Clone, Debug)]
struct SegmentHit {
    path:       usize,
    segment:    usize,
    a:          GeoPoint,
    b:          GeoPoint,
    projection: Projection,
}

/// Nearest segment over every path admitted by `mode`; the first minimum
/// found wins ties.
fn nearest_segment(paths: &[PathRecord], mode: TravelMode, p: GeoPoint) -> Option<SegmentHit> {
    let mut best: Option<SegmentHit> = None;

    for (path_idx, path) in paths.iter().enumerate() {
        if !path.is_routable_for(mode) || path.nodes.len() < 2 {
            continue;
        }
        for (seg_idx, w) in path.nodes.windows(2).enumerate() {
            let projection = project_onto_segment(p, w[0], w[1]);
            if best.is_none_or(|b| projection.distance_m < b.projection.distance_m) {
                best = Some(SegmentHit {
                    path: path_idx,
                    segment: seg_idx,
                    a: w[0],
                    b: w[1],
                    projection,
                });
            }
        }
    }
    best
}

/// Add an anchor vertex for each point, connect it to its projection, and
/// split projected segments.  Returns the anchor ids in input order.
///
/// Several projections on one segment are chained in order along it, so a
/// route between two points snapped to the same segment runs straight
/// along it instead of detouring through an endpoint.  The chain replaces
/// the split segment's own edge.
fn attach(b: &mut OutdoorGraphBuilder, points: &[GeoPoint], hits: &[SegmentHit]) -> Vec<NodeId> {
    let mut anchors = Vec::with_capacity(points.len());
    // (path, segment, t, projection node)
    let mut splits: Vec<(usize, usize, f64, NodeId)> = Vec::new();

    for (&p, hit) in points.iter().zip(hits) {
        let anchor = b.node(NodeKey::anchor(p), p);
        let proj = &hit.projection;

        let proj_node = if proj.t <= 0.0 {
            b.node(NodeKey::path(hit.a), hit.a)
        } else if proj.t >= 1.0 {
            b.node(NodeKey::path(hit.b), hit.b)
        } else {
            let id = b.node(NodeKey::path(proj.point), proj.point);
            splits.push((hit.path, hit.segment, proj.t, id));
            id
        };

        b.add_edge(anchor, proj_node, proj.distance_m);
        anchors.push(anchor);
    }

    splits.sort_by(|l, r| (l.0, l.1).cmp(&(r.0, r.1)).then(l.2.total_cmp(&r.2)));

    for group in splits.chunk_by(|l, r| (l.0, l.1) == (r.0, r.1)) {
        let Some(hit) = hits.iter().find(|h| (h.path, h.segment) == (group[0].0, group[0].1)) else {
            continue;
        };
        let start = b.node(NodeKey::path(hit.a), hit.a);
        let end   = b.node(NodeKey::path(hit.b), hit.b);
        b.remove_edge(start, end);

        let mut prev = start;
        for &(_, _, _, node) in group {
            let w = b.node_pos(prev).distance_m(b.node_pos(node));
            b.add_edge(prev, node, w);
            prev = node;
        }
        let w = b.node_pos(prev).distance_m(b.node_pos(end));
        b.add_edge(prev, end, w);
    }

    anchors
}

// ── Accessible-mode helpers ───────────────────────────────────────────────────

/// Accessible-graph vertex reachable from `start` that gets closest to
/// `dest`, scored by `1 − d(node, dest) / d(start, dest)`.
///
/// Used when no complete accessible route exists, to show how far a
/// wheelchair user can get.
///
/// Only vertices with a positive score qualify.  When every reachable
/// vertex is at least as far from `dest` as `start`, the result is `None`
/// instead of the least-bad vertex, so the kiosk never suggests moving
/// away from the destination.  Also `None` without accessible paths.
pub fn furthest_reachable_point(paths: &[PathRecord], start: GeoPoint, dest: GeoPoint) -> Option<GeoPoint> {
    let mode = TravelMode::Accessible;
    let hit = nearest_segment(paths, mode, start)?;

    let mut b = outdoor_graph_builder(paths, mode);
    let anchor = attach(&mut b, &[start], &[hit])[0];
    let graph = b.build();

    let total = start.distance_m(dest);
    if total == 0.0 {
        return Some(start);
    }

    let dist = distances_from(&graph, anchor);
    let mut best: Option<(f64, GeoPoint)> = None;
    for (i, d) in dist.iter().enumerate() {
        if !d.is_finite() || i == anchor.index() {
            continue;
        }
        let pos = graph.node_pos[i];
        let progress = 1.0 - pos.distance_m(dest) / total;
        if best.is_none_or(|(score, _)| progress > score) {
            best = Some((progress, pos));
        }
    }

    best.filter(|(score, _)| *score > 0.0).map(|(_, pos)| pos)
}

/// Vertex of any accessible path closest to `dest`.
pub fn nearest_accessible_waypoint(paths: &[PathRecord], dest: GeoPoint) -> Option<GeoPoint> {
    crate::records::paths_for_mode(paths, TravelMode::Accessible)
        .flat_map(|p| p.nodes.iter().copied())
        .min_by(|a, b| a.distance_m(dest).total_cmp(&b.distance_m(dest)))
}
