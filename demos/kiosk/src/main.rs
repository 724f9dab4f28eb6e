//! kiosk: walks a campus fixture through the routing engine.
//!
//! ```text
//! cargo run -p kiosk [-- <fixture.json> [walking|driving|accessible]]
//! ```
//!
//! Prints the composed multi-stop journey with its turn-by-turn steps, the
//! alternatives for the whole trip, and the indoor leg from the entrance
//! to the destination room.  `RUST_LOG=debug` shows the engine's own logs.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;

use nav_compose::{MultiStopRoute, Stop, compose};
use nav_core::{BuildingId, FloorId, GeoPoint, NavConfig, RoomId, TravelMode};
use nav_indoor::{IndoorConfig, IndoorData, IndoorGraph, IndoorKey, building_entry};
use nav_spatial::{Building, PathRecord, alternative_routes, furthest_reachable_point};

const DEFAULT_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/campus.json");

// ── Fixture ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Campus {
    /// Overrides of the default engine settings.
    #[serde(default)]
    config:    NavConfig,
    buildings: Vec<Building>,
    paths:     Vec<PathRecord>,
    #[serde(default)]
    indoor:    IndoorData,
    journey:   Journey,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Journey {
    #[serde(default)]
    mode:             TravelMode,
    stops:            Vec<BuildingId>,
    destination_room: Option<RoomId>,
}

impl Campus {
    fn building(&self, id: BuildingId) -> Result<&Building> {
        self.buildings
            .iter()
            .find(|b| b.id == id)
            .with_context(|| format!("journey names unknown {id}"))
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let fixture = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE));
    let mode_override: Option<TravelMode> = args.next().map(|m| m.parse()).transpose()?;

    let text = std::fs::read_to_string(&fixture)
        .with_context(|| format!("reading {}", fixture.display()))?;
    let campus: Campus = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", fixture.display()))?;
    campus.config.validate()?;

    let mode = mode_override.unwrap_or(campus.journey.mode);
    if campus.journey.stops.len() < 2 {
        bail!("journey needs at least two stops");
    }

    println!("=== kiosk: campus navigation ===");
    println!(
        "Fixture: {}  |  {} buildings, {} paths  |  mode: {mode}",
        fixture.display(),
        campus.buildings.len(),
        campus.paths.len()
    );
    println!();

    // 1. Outdoor journey.
    let stops = campus
        .journey
        .stops
        .iter()
        .map(|&id| campus.building(id).map(Stop::building))
        .collect::<Result<Vec<_>>>()?;

    let journey = match compose(&campus.paths, &stops, mode, &campus.config) {
        Ok(j) => j,
        Err(e) => {
            println!("No {mode} route: {e}");
            if mode == TravelMode::Accessible {
                report_accessible_reach(&campus.paths, &stops);
            }
            return Ok(());
        }
    };
    print_journey(&journey);

    // 2. Alternatives for the whole trip.
    let (first, last) = (&stops[0], &stops[stops.len() - 1]);
    let alternatives = alternative_routes(
        &campus.paths,
        first.point,
        last.point,
        mode,
        &campus.config.alternatives,
    )?;
    println!("Alternatives {} → {}:", first.name, last.name);
    for (i, r) in alternatives.iter().enumerate() {
        println!("  {}. {:>7.1} m  ({} points)", i + 1, r.distance_m, r.points.len());
    }
    println!();

    // 3. Indoor leg at the destination.
    if let Some(room) = campus.journey.destination_room {
        let destination = campus.building(campus.journey.stops[campus.journey.stops.len() - 1])?;
        let approach = journey
            .phases
            .last()
            .and_then(|p| p.polyline.last().copied())
            .unwrap_or_else(|| destination.routing_point());
        indoor_leg(&campus, destination, room, approach)?;
    }

    Ok(())
}

fn print_journey(journey: &MultiStopRoute) {
    for phase in &journey.phases {
        let tag = if phase.kind == nav_spatial::RouteKind::DirectFallback { "  [straight line]" } else { "" };
        println!(
            "Leg {}: {} → {}  {}  ({}){tag}",
            phase.index + 1,
            phase.start_id,
            phase.end_id,
            phase.distance,
            phase.color
        );
        for step in &phase.steps {
            println!("    [{:<12}] {}", step.icon, step.summary());
        }
    }
    println!("Total: {}", journey.total_distance);
    println!();
}

fn report_accessible_reach(paths: &[PathRecord], stops: &[Stop]) {
    for pair in stops.windows(2) {
        match furthest_reachable_point(paths, pair[0].point, pair[1].point) {
            Some(p) => println!("  From {} a wheelchair can reach {p}", pair[0].name),
            None => println!("  From {} no accessible progress is possible", pair[0].name),
        }
    }
}

fn indoor_leg(campus: &Campus, building: &Building, room: RoomId, approach: GeoPoint) -> Result<()> {
    let ground: FloorId = campus
        .indoor
        .floors
        .iter()
        .filter(|f| f.building_id == building.id)
        .min_by_key(|f| f.level)
        .map(|f| f.id)
        .with_context(|| format!("{} has no floors", building.name))?;

    let entry = building_entry(&campus.indoor, building.id, ground, approach)
        .with_context(|| format!("{} has no entrance on {ground}", building.name))?;
    let target_floor = campus
        .indoor
        .room(room)
        .map(|r| r.floor_id)
        .with_context(|| format!("unknown destination {room}"))?;

    info!(
        "indoor data: {} floors, {} rooms, {} nodes",
        campus.indoor.floors.len(),
        campus.indoor.rooms.len(),
        campus.indoor.nodes.len()
    );
    let graph = IndoorGraph::build(&campus.indoor, &IndoorConfig::try_from_nav(&campus.config)?);
    let route = graph.route_between(
        IndoorKey::node(ground, entry.entrance),
        IndoorKey::room(target_floor, room),
    )?;

    println!("Indoors at {}: enter by {}, nearest room {:?}", building.name, entry.entrance, entry.room);
    println!(
        "  {} vertices over floors {:?}, cost {:.1}",
        route.vertices.len(),
        route.floors(),
        route.cost
    );
    Ok(())
}
