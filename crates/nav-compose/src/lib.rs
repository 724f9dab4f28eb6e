//! `nav-compose`: multi-stop journeys and turn-by-turn instructions.
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`compose`]      | `Stop`, `RoutePhase`, `MultiStopRoute`, `compose`     |
//! | [`instructions`] | `Maneuver`, `Step`, bearing grouping                  |
//! | [`distance`]     | Distance labels and their inverse                     |
//! | [`error`]        | `ComposeError`, `ComposeResult<T>`                    |

pub mod compose;
pub mod distance;
pub mod error;
pub mod instructions;

#[cfg(test)]
mod tests;

pub use compose::{MultiStopRoute, PHASE_COLORS, RoutePhase, Stop, compose, compose_with};
pub use distance::{format_distance, parse_distance};
pub use error::{ComposeError, ComposeResult};
pub use instructions::{Maneuver, Segment, Step, group_segments, segments, steps, turn_angle};
