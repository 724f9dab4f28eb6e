//! Indoor searches over an [`IndoorGraph`].

use log::debug;

use nav_core::{FloorId, PixelPoint, RoomId};
use nav_spatial::{Constraints, Path, shortest_path};

use crate::graph::{IndoorGraph, IndoorKey};
use crate::{IndoorError, IndoorResult};

/// A found indoor route.
#[derive(Clone, Debug, PartialEq)]
pub struct IndoorRoute {
    /// Vertices from start to end, inclusive.
    pub vertices: Vec<IndoorKey>,
    /// Floor-plan position of each vertex.
    pub points:   Vec<PixelPoint>,
    /// Sum of edge costs: metres along floors plus the fixed cost of each
    /// vertical hop.
    pub cost:     f64,
}

impl IndoorRoute {
    fn from_path(g: &IndoorGraph, path: &Path) -> Self {
        Self {
            vertices: path.nodes.iter().map(|&n| g.graph.key(n)).collect(),
            points:   path.nodes.iter().map(|&n| g.graph.pos(n)).collect(),
            cost:     path.cost,
        }
    }

    /// Floors visited in order, without repeats of consecutive floors.
    pub fn floors(&self) -> Vec<FloorId> {
        let mut out: Vec<FloorId> = self.vertices.iter().map(|k| k.floor).collect();
        out.dedup();
        out
    }

    /// Positions on `floor`, in route order, for drawing on that floor plan.
    pub fn points_on(&self, floor: FloorId) -> Vec<PixelPoint> {
        self.vertices
            .iter()
            .zip(&self.points)
            .filter(|(k, _)| k.floor == floor)
            .map(|(_, &p)| p)
            .collect()
    }
}

impl IndoorGraph {
    /// Shortest route between two rooms on the same floor.
    ///
    /// The search stays on that floor even when a detour through another
    /// floor would be shorter.
    ///
    /// # Errors
    ///
    /// [`IndoorError::UnknownRoom`] if either room was not in the build data,
    /// [`IndoorError::CrossFloor`] if they are on different floors, and
    /// [`IndoorError::NoRoute`] if the floor's paths do not connect them.
    pub fn route_rooms(&self, from: RoomId, to: RoomId) -> IndoorResult<IndoorRoute> {
        let from_floor = self.floor_of(from).ok_or(IndoorError::UnknownRoom(from))?;
        let to_floor = self.floor_of(to).ok_or(IndoorError::UnknownRoom(to))?;
        if from_floor != to_floor {
            return Err(IndoorError::CrossFloor { from: from_floor, to: to_floor });
        }

        let constraints = Constraints {
            excluded_edges: self.vertical.clone(),
            ..Constraints::default()
        };
        self.search(
            IndoorKey::room(from_floor, from),
            IndoorKey::room(to_floor, to),
            &constraints,
        )
    }

    /// Shortest route between any two vertices, across floors through
    /// stairways and elevators.
    pub fn route_between(&self, from: IndoorKey, to: IndoorKey) -> IndoorResult<IndoorRoute> {
        self.search(from, to, &Constraints::none())
    }

    fn search(&self, from: IndoorKey, to: IndoorKey, c: &Constraints) -> IndoorResult<IndoorRoute> {
        let a = self.vertex(&from).ok_or(IndoorError::UnknownVertex(from))?;
        let b = self.vertex(&to).ok_or(IndoorError::UnknownVertex(to))?;

        let path = shortest_path(&self.graph, a, b, c).ok_or(IndoorError::NoRoute { from, to })?;
        debug!("indoor route {from} → {to}: {} vertices, cost {:.1}", path.nodes.len(), path.cost);
        Ok(IndoorRoute::from_path(self, &path))
    }
}
