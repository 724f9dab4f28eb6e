use thiserror::Error;

use nav_core::{FloorId, NavError, RoomId};

use crate::graph::IndoorKey;

/// Errors produced by `nav-indoor`.
#[derive(Debug, Error)]
pub enum IndoorError {
    /// Room-to-room search only runs within one floor; use
    /// [`IndoorGraph::route_between`](crate::IndoorGraph::route_between) to
    /// cross floors.
    #[error("rooms are on different floors ({from} and {to})")]
    CrossFloor { from: FloorId, to: FloorId },

    #[error("unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("no indoor vertex {0}")]
    UnknownVertex(IndoorKey),

    #[error("no indoor route from {from} to {to}")]
    NoRoute { from: IndoorKey, to: IndoorKey },

    #[error(transparent)]
    Config(#[from] NavError),
}

pub type IndoorResult<T> = Result<T, IndoorError>;
