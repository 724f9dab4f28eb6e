//! Strongly typed, zero-cost identifier wrappers.
//!
//! Graph ids (`NodeId`, `EdgeId`) are dense indices assigned by a graph
//! builder and are only meaningful for the graph that produced them.  Record
//! ids (`PathId`, `BuildingId`, `FloorId`, `RoomId`, `IndoorNodeId`) come from
//! the kiosk's stored records and are stable across requests.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

// ── Graph indices ─────────────────────────────────────────────────────────────

typed_id! {
    /// Index of a vertex in a built graph.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed edge in a built graph.
    pub struct EdgeId(u32);
}

// ── Record ids ────────────────────────────────────────────────────────────────

typed_id! {
    /// Id of a stored outdoor path record.
    pub struct PathId(u32);
}

typed_id! {
    /// Id of a building or other outdoor point of interest.
    pub struct BuildingId(u32);
}

typed_id! {
    pub struct FloorId(u32);
}

typed_id! {
    pub struct RoomId(u32);
}

typed_id! {
    /// Id of an indoor node (entrance, stairway, elevator, hallway, room
    /// marker).  A stairway or elevator drawn on several floors reuses one
    /// id, one record per floor.
    pub struct IndoorNodeId(u32);
}
