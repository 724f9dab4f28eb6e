//! Indoor graph construction.
//!
//! # Vertices
//!
//! | Source                        | Key                                      |
//! |-------------------------------|------------------------------------------|
//! | room                          | `(floor, Room(id))`                      |
//! | indoor node                   | `(floor, Node(id))`                      |
//! | waypoint tied to room/node    | that room's / node's key                 |
//! | untied waypoint               | `(floor, Waypoint(x, y))`, 0.1 px grid   |
//!
//! Rounding untied waypoints to a 0.1 px grid makes crossing paths that
//! share a drawn point join at one junction vertex.
//!
//! # Edges
//!
//! ① consecutive waypoints of a room path: pixel distance × scale
//! ② every room and node → nearest other waypoint vertex on its floor
//!   (one bridge edge, however far away)
//! ③ stairway/elevator → same-id node on each connected floor, at the fixed
//!   vertical cost
//!
//! All edges are bidirectional.

use std::fmt;

use log::{debug, warn};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};

use nav_core::{EdgeId, FloorId, IndoorNodeId, NavConfig, NavResult, NodeId, PixelPoint, RoomId};
use nav_spatial::{Graph, GraphBuilder};

use crate::records::{IndoorData, RoomPathWaypoint};

// ── Keys ──────────────────────────────────────────────────────────────────────

/// Grid cells per pixel for untied waypoints.
const WAYPOINT_GRID: f64 = 10.0;

/// The entity a vertex stands for, within its floor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum IndoorVertex {
    Room(RoomId),
    Node(IndoorNodeId),
    /// An untied waypoint, in tenths of a pixel.
    Waypoint { x: i64, y: i64 },
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct IndoorKey {
    pub floor:  FloorId,
    pub vertex: IndoorVertex,
}

impl IndoorKey {
    pub fn room(floor: FloorId, id: RoomId) -> Self {
        Self { floor, vertex: IndoorVertex::Room(id) }
    }

    pub fn node(floor: FloorId, id: IndoorNodeId) -> Self {
        Self { floor, vertex: IndoorVertex::Node(id) }
    }

    pub fn waypoint(floor: FloorId, p: PixelPoint) -> Self {
        Self {
            floor,
            vertex: IndoorVertex::Waypoint {
                x: (p.x * WAYPOINT_GRID).round() as i64,
                y: (p.y * WAYPOINT_GRID).round() as i64,
            },
        }
    }
}

impl fmt::Display for IndoorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vertex {
            IndoorVertex::Room(id) => write!(f, "{}/{id}", self.floor),
            IndoorVertex::Node(id) => write!(f, "{}/{id}", self.floor),
            IndoorVertex::Waypoint { x, y } => write!(
                f,
                "{}/({:.1}, {:.1})",
                self.floor,
                x as f64 / WAYPOINT_GRID,
                y as f64 / WAYPOINT_GRID
            ),
        }
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Indoor edge weighting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndoorConfig {
    /// Default: 0.02 m/px.
    pub meters_per_pixel:   f64,
    /// Default: 5.
    pub vertical_edge_cost: f64,
}

impl Default for IndoorConfig {
    fn default() -> Self {
        Self::from(&NavConfig::default())
    }
}

impl From<&NavConfig> for IndoorConfig {
    fn from(cfg: &NavConfig) -> Self {
        Self {
            meters_per_pixel:   cfg.meters_per_pixel,
            vertical_edge_cost: cfg.vertical_edge_cost,
        }
    }
}

impl IndoorConfig {
    /// Checked conversion; rejects a configuration that fails
    /// [`NavConfig::validate`].
    pub fn try_from_nav(cfg: &NavConfig) -> NavResult<Self> {
        cfg.validate()?;
        Ok(Self::from(cfg))
    }
}

// ── R-tree waypoint entry ─────────────────────────────────────────────────────

/// A waypoint vertex in a floor's spatial index.
#[derive(Clone)]
struct WaypointEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for WaypointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for WaypointEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── IndoorGraph ───────────────────────────────────────────────────────────────

/// Stitched multi-floor indoor graph.
#[derive(Clone, Debug)]
pub struct IndoorGraph {
    pub graph: Graph<IndoorKey, PixelPoint>,

    /// Floor of every room seen at build time.
    pub(crate) room_floor: FxHashMap<RoomId, FloorId>,

    /// Edges joining two different floors.
    pub(crate) vertical: FxHashSet<EdgeId>,
}

impl IndoorGraph {
    /// Build the graph for every floor in `data`.
    pub fn build(data: &IndoorData, cfg: &IndoorConfig) -> Self {
        let mut b: GraphBuilder<IndoorKey, PixelPoint> = GraphBuilder::new();
        let mut room_floor = FxHashMap::default();

        // Entity vertices, so tied waypoints can resolve to them.
        let mut entities = Vec::with_capacity(data.rooms.len() + data.nodes.len());
        for room in &data.rooms {
            entities.push(b.node(IndoorKey::room(room.floor_id, room.id), room.position()));
            room_floor.insert(room.id, room.floor_id);
        }
        for node in &data.nodes {
            entities.push(b.node(IndoorKey::node(node.floor_id, node.id), node.position()));
        }

        // ① Path chains.
        let mut waypoints: FxHashMap<FloorId, Vec<NodeId>> = FxHashMap::default();
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        for path in &data.paths {
            let mut prev: Option<NodeId> = None;
            for wp in &path.waypoints {
                let id = waypoint_vertex(&mut b, path.floor_id, wp);
                if seen.insert(id) {
                    waypoints.entry(path.floor_id).or_default().push(id);
                }
                if let Some(p) = prev {
                    let w = b.node_pos(p).distance_m(b.node_pos(id), cfg.meters_per_pixel);
                    b.add_edge(p, id, w);
                }
                prev = Some(id);
            }
        }

        // ② Bridges to the nearest waypoint on the same floor.
        let index: FxHashMap<FloorId, RTree<WaypointEntry>> = waypoints
            .into_iter()
            .map(|(floor, ids)| {
                let entries = ids
                    .into_iter()
                    .map(|id| {
                        let p = b.node_pos(id);
                        WaypointEntry { point: [p.x, p.y], id }
                    })
                    .collect();
                (floor, RTree::bulk_load(entries))
            })
            .collect();

        for &entity in &entities {
            let key = b.node_key(entity);
            let pos = b.node_pos(entity);
            let nearest = index.get(&key.floor).and_then(|tree| {
                tree.nearest_neighbor_iter(&[pos.x, pos.y]).find(|e| e.id != entity)
            });
            match nearest {
                Some(e) => {
                    let w = pos.distance_m(b.node_pos(e.id), cfg.meters_per_pixel);
                    b.add_edge(entity, e.id, w);
                }
                None => warn!("indoor vertex {key} has no waypoint to connect to"),
            }
        }

        // ③ Vertical links; a pair listed from both floors gets one edge.
        let mut linked: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
        for node in data.nodes.iter().filter(|n| n.kind.is_vertical()) {
            let Some(here) = b.node_id(&IndoorKey::node(node.floor_id, node.id)) else {
                continue;
            };
            for &floor in &node.connected_floor_ids {
                let Some(there) = b.node_id(&IndoorKey::node(floor, node.id)) else {
                    debug!("{} lists {floor}, which has no instance of it", node.id);
                    continue;
                };
                let pair = if here <= there { (here, there) } else { (there, here) };
                if here != there && linked.insert(pair) {
                    b.add_edge(here, there, cfg.vertical_edge_cost);
                }
            }
        }

        let graph = b.build();
        let vertical = (0..graph.edge_count())
            .filter(|&e| {
                graph.node_key[graph.edge_from[e].index()].floor
                    != graph.node_key[graph.edge_to[e].index()].floor
            })
            .map(|e| EdgeId(e as u32))
            .collect();

        debug!(
            "indoor graph: {} vertices, {} edges ({} vertical links)",
            graph.node_count(),
            graph.edge_count(),
            linked.len()
        );
        Self { graph, room_floor, vertical }
    }

    /// Vertex for `key`, if the graph has one.
    #[inline]
    pub fn vertex(&self, key: &IndoorKey) -> Option<NodeId> {
        self.graph.node(key)
    }

    /// Floor holding `room`.
    pub fn floor_of(&self, room: RoomId) -> Option<FloorId> {
        self.room_floor.get(&room).copied()
    }
}

/// Vertex a drawn waypoint resolves to: its tied room or node on the same
/// floor when that entity exists, else a grid-rounded junction vertex.
fn waypoint_vertex(
    b: &mut GraphBuilder<IndoorKey, PixelPoint>,
    floor: FloorId,
    wp: &RoomPathWaypoint,
) -> NodeId {
    let tied = wp
        .room_id
        .and_then(|r| b.node_id(&IndoorKey::room(floor, r)))
        .or_else(|| wp.node_id.and_then(|n| b.node_id(&IndoorKey::node(floor, n))));

    match tied {
        Some(id) => id,
        None => b.node(IndoorKey::waypoint(floor, wp.position()), wp.position()),
    }
}
