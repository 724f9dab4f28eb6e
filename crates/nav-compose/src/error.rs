use thiserror::Error;

use nav_core::NavError;
use nav_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum ComposeError {
    /// A journey needs a start and a destination.
    #[error("need at least 2 stops, got {0}")]
    TooFewStops(usize),

    /// Leg `index` (stop `index` → stop `index + 1`) could not be routed;
    /// the whole journey is rejected.
    #[error("leg {index} could not be routed")]
    Leg {
        index: usize,
        #[source]
        source: SpatialError,
    },

    #[error(transparent)]
    Config(#[from] NavError),
}

pub type ComposeResult<T> = Result<T, ComposeError>;
