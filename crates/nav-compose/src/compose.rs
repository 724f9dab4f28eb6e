//! Multi-stop journeys.
//!
//! A journey `[start, …waypoints, destination]` becomes one [`RoutePhase`]
//! per consecutive pair of stops.  Each phase carries the full polyline, a
//! simplified polyline for drawing, its turn-by-turn steps, and a colour
//! picked by its position.

use log::debug;

use nav_core::{GeoPoint, NavConfig, TravelMode};
use nav_spatial::{Building, DijkstraRouter, PathRecord, Route, RouteKind, Router};

use crate::distance::{format_distance, parse_distance};
use crate::instructions::{Step, steps};
use crate::{ComposeError, ComposeResult};

/// Phase colours, cycled by phase index.
pub const PHASE_COLORS: [&str; 6] = ["#2563eb", "#16a34a", "#f59e0b", "#dc2626", "#9333ea", "#0891b2"];

// ── Stop ──────────────────────────────────────────────────────────────────────

/// A place on the journey.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stop {
    /// Caller-chosen id, copied into `start_id`/`end_id` of phases.
    pub id:    String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name:  String,
    pub point: GeoPoint,
}

impl Stop {
    pub fn new(id: impl Into<String>, point: GeoPoint) -> Self {
        Self { id: id.into(), name: String::new(), point }
    }

    /// Stop at a building's routing point.
    pub fn building(b: &Building) -> Self {
        Self {
            id: b.id.0.to_string(),
            name: b.name.clone(),
            point: b.routing_point(),
        }
    }
}

// ── RoutePhase ────────────────────────────────────────────────────────────────

/// One leg of a journey.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoutePhase {
    pub index:            usize,
    pub mode:             TravelMode,
    pub kind:             RouteKind,
    pub polyline:         Vec<GeoPoint>,
    pub display_polyline: Vec<GeoPoint>,
    pub steps:            Vec<Step>,
    /// Label, e.g. `"350 m"`.
    pub distance:         String,
    pub distance_m:       f64,
    pub start_id:         String,
    pub end_id:           String,
    pub color:            String,
}

impl RoutePhase {
    fn new(index: usize, mode: TravelMode, route: Route, from: &Stop, to: &Stop, cfg: &NavConfig) -> Self {
        let display_polyline = route.simplified(cfg.simplify_tolerance_m);
        let steps = steps(&route.points, cfg.turn_threshold_deg);
        Self {
            index,
            mode,
            kind: route.kind,
            display_polyline,
            steps,
            distance: format_distance(route.distance_m),
            distance_m: route.distance_m,
            start_id: from.id.clone(),
            end_id: to.id.clone(),
            color: PHASE_COLORS[index % PHASE_COLORS.len()].to_string(),
            polyline: route.points,
        }
    }
}

// ── MultiStopRoute ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MultiStopRoute {
    pub phases:           Vec<RoutePhase>,
    /// Label of the summed phase labels.
    pub total_distance:   String,
    pub total_distance_m: f64,
    /// Every stop, in visiting order.
    pub waypoints:        Vec<Stop>,
}

impl MultiStopRoute {
    /// `true` if any leg is a straight-line fallback.
    pub fn has_fallback(&self) -> bool {
        self.phases.iter().any(|p| p.kind == RouteKind::DirectFallback)
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Compose a journey with the default [`DijkstraRouter`].
pub fn compose(
    paths: &[PathRecord],
    stops: &[Stop],
    mode: TravelMode,
    cfg: &NavConfig,
) -> ComposeResult<MultiStopRoute> {
    compose_with(&DijkstraRouter, paths, stops, mode, cfg)
}

/// Compose a journey, routing each leg with `router`.
///
/// # Errors
///
/// [`ComposeError::Config`] for an invalid `cfg`,
/// [`ComposeError::TooFewStops`] for fewer than two stops, and
/// [`ComposeError::Leg`] for the first leg the router cannot serve.
pub fn compose_with<R: Router + ?Sized>(
    router: &R,
    paths: &[PathRecord],
    stops: &[Stop],
    mode: TravelMode,
    cfg: &NavConfig,
) -> ComposeResult<MultiStopRoute> {
    cfg.validate()?;
    if stops.len() < 2 {
        return Err(ComposeError::TooFewStops(stops.len()));
    }

    let mut phases = Vec::with_capacity(stops.len() - 1);
    for (index, pair) in stops.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let route = router
            .route(paths, from.point, to.point, mode)
            .map_err(|source| ComposeError::Leg { index, source })?;
        debug!(
            "leg {index}: {} → {} ({} points, {:.1} m)",
            from.id,
            to.id,
            route.points.len(),
            route.distance_m
        );
        phases.push(RoutePhase::new(index, mode, route, from, to, cfg));
    }

    let total_distance_m: f64 = phases
        .iter()
        .map(|p| parse_distance(&p.distance).unwrap_or(p.distance_m))
        .sum();

    Ok(MultiStopRoute {
        phases,
        total_distance: format_distance(total_distance_m),
        total_distance_m,
        waypoints: stops.to_vec(),
    })
}
