//! `nav-core`: foundational types for the `campus_nav` routing engine.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no
//! `nav-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`, record ids (`PathId`, `FloorId`, …)   |
//! | [`geo`]      | `GeoPoint`, `PixelPoint`, projection, simplification      |
//! | [`mode`]     | `TravelMode` enum and path admission rules                |
//! | [`config`]   | `NavConfig`, `AlternativeConfig`                          |
//! | [`error`]    | `NavError`, `NavResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AlternativeConfig, NavConfig};
pub use error::{NavError, NavResult};
pub use geo::{GeoPoint, PixelPoint, Projection, polyline_length_m, project_onto_segment, simplify};
pub use ids::{BuildingId, EdgeId, FloorId, IndoorNodeId, NodeId, PathId, RoomId};
pub use mode::TravelMode;
