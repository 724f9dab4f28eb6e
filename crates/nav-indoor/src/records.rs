//! Indoor records: floors, rooms, indoor nodes, and drawn room paths.
//!
//! Every entity is scoped to a floor.  Positions are floor-plan pixels.

use nav_core::{BuildingId, FloorId, GeoPoint, IndoorNodeId, PathId, PixelPoint, RoomId};

// ── Floor ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Floor {
    pub id:          FloorId,
    pub building_id: BuildingId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name:        String,
    /// Storey number; 0 is street level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub level:       i32,
}

// ── Room ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Room {
    pub id:       RoomId,
    pub floor_id: FloorId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name:     String,
    pub x:        f64,
    pub y:        f64,
}

impl Room {
    #[inline]
    pub fn position(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }
}

// ── IndoorNode ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IndoorNodeKind {
    Entrance,
    Stairway,
    Elevator,
    Hallway,
    Room,
}

impl IndoorNodeKind {
    /// Stairways and elevators link floors.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, IndoorNodeKind::Stairway | IndoorNodeKind::Elevator)
    }
}

/// An entrance, stairway, elevator, hallway junction, or room marker.
///
/// A stairway or elevator drawn on several floors has one record per floor,
/// all sharing the same `id`; `connected_floor_ids` lists the floors it
/// reaches from this one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct IndoorNode {
    pub id:       IndoorNodeId,
    pub floor_id: FloorId,
    pub kind:     IndoorNodeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name:     String,
    pub x:        f64,
    pub y:        f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub connected_floor_ids: Vec<FloorId>,

    /// Outdoor location of an entrance, used to pick the entrance closest
    /// to an approaching outdoor route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lat: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lng: Option<f64>,
}

impl IndoorNode {
    pub fn new(id: u32, floor: FloorId, kind: IndoorNodeKind, at: PixelPoint) -> Self {
        Self {
            id: IndoorNodeId(id),
            floor_id: floor,
            kind,
            name: String::new(),
            x: at.x,
            y: at.y,
            connected_floor_ids: Vec::new(),
            lat: None,
            lng: None,
        }
    }

    pub fn connected_to(mut self, floors: &[FloorId]) -> Self {
        self.connected_floor_ids = floors.to_vec();
        self
    }

    pub fn with_geo_anchor(mut self, p: GeoPoint) -> Self {
        self.lat = Some(p.lat);
        self.lng = Some(p.lng);
        self
    }

    #[inline]
    pub fn position(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    pub fn geo_anchor(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lng?))
    }
}

// ── RoomPath ──────────────────────────────────────────────────────────────────

/// One drawn point of a room path, optionally tied to the room or node it
/// was snapped to in the editor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoomPathWaypoint {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub room_id: Option<RoomId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub node_id: Option<IndoorNodeId>,
}

impl RoomPathWaypoint {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, room_id: None, node_id: None }
    }

    pub fn room(x: f64, y: f64, room: u32) -> Self {
        Self { room_id: Some(RoomId(room)), ..Self::at(x, y) }
    }

    pub fn node(x: f64, y: f64, node: u32) -> Self {
        Self { node_id: Some(IndoorNodeId(node)), ..Self::at(x, y) }
    }

    #[inline]
    pub fn position(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoomPath {
    pub id:        PathId,
    pub floor_id:  FloorId,
    pub waypoints: Vec<RoomPathWaypoint>,
}

// ── IndoorData ────────────────────────────────────────────────────────────────

/// Every indoor record of a campus (or one building).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct IndoorData {
    pub floors: Vec<Floor>,
    pub rooms:  Vec<Room>,
    pub nodes:  Vec<IndoorNode>,
    pub paths:  Vec<RoomPath>,
}

impl IndoorData {
    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}
