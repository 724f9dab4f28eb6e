//! Outdoor → indoor hand-over.
//!
//! Outdoor and indoor graphs are not merged.  An outdoor route ends at the
//! building; this module picks the entrance the visitor arrives at and the
//! room nearest to it, which then starts the indoor route.

use nav_core::{BuildingId, FloorId, GeoPoint, IndoorNodeId, PixelPoint, RoomId};

use crate::records::{IndoorData, IndoorNode, IndoorNodeKind};

/// Where a visitor coming from outdoors enters a floor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EntryPoint {
    pub floor:    FloorId,
    pub entrance: IndoorNodeId,
    /// Floor-plan position of the entrance.
    pub position: PixelPoint,
    /// Room closest to the entrance; `None` if the floor has no rooms.
    pub room:     Option<RoomId>,
}

/// Entrance of `building` on `floor` for a visitor arriving from
/// `approach`, and the room nearest to it.
///
/// Among entrances with an outdoor location, the one closest to `approach`
/// wins; if none has a location, the lowest id wins.  Returns `None` if the
/// floor does not belong to the building or has no entrance.
pub fn building_entry(
    data: &IndoorData,
    building: BuildingId,
    floor: FloorId,
    approach: GeoPoint,
) -> Option<EntryPoint> {
    if data.floor(floor)?.building_id != building {
        return None;
    }

    let entrances: Vec<&IndoorNode> = data
        .nodes
        .iter()
        .filter(|n| n.floor_id == floor && n.kind == IndoorNodeKind::Entrance)
        .collect();

    let located = entrances
        .iter()
        .filter_map(|n| n.geo_anchor().map(|g| (*n, g.distance_m(approach))))
        .min_by(|(l, dl), (r, dr)| dl.total_cmp(dr).then(l.id.cmp(&r.id)))
        .map(|(n, _)| n);
    let entrance = located.or_else(|| entrances.iter().copied().min_by_key(|n| n.id))?;

    let at = entrance.position();
    let room = data
        .rooms
        .iter()
        .filter(|r| r.floor_id == floor)
        .min_by(|l, r| {
            at.distance_px(l.position())
                .total_cmp(&at.distance_px(r.position()))
                .then(l.id.cmp(&r.id))
        })
        .map(|r| r.id);

    Some(EntryPoint { floor, entrance: entrance.id, position: at, room })
}
