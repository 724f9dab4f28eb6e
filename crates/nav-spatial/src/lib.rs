//! `nav-spatial`: outdoor path graph, search, and routing.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | [`records`]      | `PathRecord`, `Building`, mode filtering                    |
//! | [`graph`]        | `Graph<K, P>` (CSR + key index), `GraphBuilder`             |
//! | [`outdoor`]      | `CoordKey`, `NodeKey`, outdoor graph construction           |
//! | [`search`]       | Dijkstra: `shortest_path`, `distances_from`, `Constraints` |
//! | [`router`]       | `Router` trait, `DijkstraRouter`, `Route`, accessible aids  |
//! | [`alternatives`] | Bucketed diverse alternative routes                         |
//! | [`error`]        | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on records and routes.     |

pub mod alternatives;
pub mod error;
pub mod graph;
pub mod outdoor;
pub mod records;
pub mod router;
pub mod search;


pub use alternatives::{alternative_routes, k_diverse_paths};
pub use error::{SpatialError, SpatialResult};
pub use graph::{Graph, GraphBuilder};
pub use outdoor::{CoordKey, NodeKey, OutdoorGraph, build_outdoor_graph};
pub use records::{Building, PathRecord, paths_for_mode};
pub use router::{
    DijkstraRouter, Route, RouteKind, Router, SnappedGraph, furthest_reachable_point,
    nearest_accessible_waypoint, snap_endpoints,
};
pub use search::{Constraints, Path, distances_from, shortest_path};
