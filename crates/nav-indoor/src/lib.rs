//! `nav-indoor`: floor-plan graphs stitched across floors.
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`records`] | `Floor`, `Room`, `IndoorNode`, `RoomPath`, `IndoorData`    |
//! | [`graph`]   | `IndoorKey`, `IndoorConfig`, `IndoorGraph::build`          |
//! | [`route`]   | `IndoorRoute`, room-to-room and multi-floor search         |
//! | [`entry`]   | `building_entry`: entrance and first room for an arrival   |
//! | [`error`]   | `IndoorError`, `IndoorResult<T>`                           |
//!
//! Indoor edge weights are metres (pixel distance × `meters_per_pixel`),
//! except vertical stairway/elevator hops, which cost a fixed amount.

pub mod entry;
pub mod error;
pub mod graph;
pub mod records;
pub mod route;

#[cfg(test)]
mod tests;

pub use entry::{EntryPoint, building_entry};
pub use error::{IndoorError, IndoorResult};
pub use graph::{IndoorConfig, IndoorGraph, IndoorKey, IndoorVertex};
pub use records::{Floor, IndoorData, IndoorNode, IndoorNodeKind, Room, RoomPath, RoomPathWaypoint};
pub use route::IndoorRoute;
