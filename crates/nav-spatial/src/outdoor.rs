//! Outdoor graph construction from path records.
//!
//! Every consecutive point pair of an admitted path becomes a bidirectional
//! edge weighted by its haversine length.  Vertices are keyed by the
//! coordinate quantized to 7 decimal places (≈ 1 cm), so paths that share an
//! endpoint share a vertex.  Paths that do not share an exact vertex stay
//! disconnected; there is no proximity merging.

use log::debug;

use nav_core::{GeoPoint, NodeId, TravelMode};

use crate::graph::{Graph, GraphBuilder};
use crate::records::{PathRecord, paths_for_mode};

// ── Keys ──────────────────────────────────────────────────────────────────────

/// A coordinate quantized to 1e-7 degrees.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CoordKey {
    pub lat_e7: i64,
    pub lng_e7: i64,
}

impl CoordKey {
    pub const SCALE: f64 = 1e7;

    #[inline]
    pub fn of(p: GeoPoint) -> Self {
        Self {
            lat_e7: (p.lat * Self::SCALE).round() as i64,
            lng_e7: (p.lng * Self::SCALE).round() as i64,
        }
    }
}

/// Key of an outdoor vertex.
///
/// Point-of-interest vertices live in their own key space: a building that
/// happens to sit exactly on a path vertex still reaches the network only
/// through its projection spur.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum NodeKey {
    /// A path vertex (or a projection inserted into a path segment).
    Path(CoordKey),
    /// A routed endpoint attached to the network.
    Anchor(CoordKey),
}

impl NodeKey {
    #[inline]
    pub fn path(p: GeoPoint) -> Self {
        NodeKey::Path(CoordKey::of(p))
    }

    #[inline]
    pub fn anchor(p: GeoPoint) -> Self {
        NodeKey::Anchor(CoordKey::of(p))
    }
}

pub type OutdoorGraph = Graph<NodeKey, GeoPoint>;
pub type OutdoorGraphBuilder = GraphBuilder<NodeKey, GeoPoint>;

// ── Construction ──────────────────────────────────────────────────────────────

/// Builder pre-loaded with every path admitted by `mode`.  The router keeps
/// adding projection vertices to it before calling `build()`.
pub fn outdoor_graph_builder(paths: &[PathRecord], mode: TravelMode) -> OutdoorGraphBuilder {
    let points: usize = paths_for_mode(paths, mode).map(|p| p.nodes.len()).sum();
    // Room for the two endpoint anchors and their projections.
    let mut b = OutdoorGraphBuilder::with_capacity(points + 4, 2 * points + 8);
    let mut admitted = 0usize;

    for path in paths_for_mode(paths, mode) {
        if path.nodes.len() < 2 {
            debug!("skipping path {} ({:?}): fewer than two nodes", path.id, path.name);
            continue;
        }
        admitted += 1;

        let mut prev: Option<(NodeId, GeoPoint)> = None;
        for &p in &path.nodes {
            let id = b.node(NodeKey::path(p), p);
            if let Some((prev_id, prev_pos)) = prev {
                b.add_edge(prev_id, id, prev_pos.distance_m(p));
            }
            prev = Some((id, p));
        }
    }

    debug!(
        "{mode} graph: {admitted} of {} paths, {} nodes, {} directed edges",
        paths.len(),
        b.node_count(),
        b.edge_count()
    );
    b
}

/// Build the outdoor graph for `mode` from scratch.
pub fn build_outdoor_graph(paths: &[PathRecord], mode: TravelMode) -> OutdoorGraph {
    outdoor_graph_builder(paths, mode).build()
}
