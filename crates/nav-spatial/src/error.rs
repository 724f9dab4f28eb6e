//! Spatial-subsystem error type.
//!
//! Routing failures are values, not panics: the kiosk UI turns any of these
//! into its "no route found" state.

use thiserror::Error;

use nav_core::{GeoPoint, NavError, TravelMode};

/// Errors produced by `nav-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The graph holds no path between the two points and the mode does not
    /// permit a straight-line fallback.
    #[error("no {mode} route from {from} to {to}")]
    NoRoute { from: GeoPoint, to: GeoPoint, mode: TravelMode },

    /// No path record is routable for the mode, so nothing can be projected.
    #[error("no {0} paths to project onto")]
    NoProjection(TravelMode),

    #[error(transparent)]
    Config(#[from] NavError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
