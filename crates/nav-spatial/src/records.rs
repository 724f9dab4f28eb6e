//! Outdoor records supplied by the kiosk's data layer.
//!
//! Field names follow the kiosk's JSON (`isPwdFriendly`,
//! `routingAnchorLat`, …) when deserialized with the `serde` feature.

use nav_core::{BuildingId, GeoPoint, PathId, TravelMode};

// ── PathRecord ────────────────────────────────────────────────────────────────

/// A drawn path: an ordered polyline plus accessibility flags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PathRecord {
    pub id:    PathId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name:  String,
    pub nodes: Vec<GeoPoint>,

    /// Passable by wheelchair.
    #[cfg_attr(feature = "serde", serde(default, rename = "isPwdFriendly"))]
    pub pwd_friendly: bool,

    /// Reserved for accessible routing (ramps, lifts); hidden from walkers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strictly_pwd_only: bool,
}

impl PathRecord {
    pub fn new(id: u32, nodes: Vec<GeoPoint>) -> Self {
        Self {
            id: PathId(id),
            name: String::new(),
            nodes,
            pwd_friendly: false,
            strictly_pwd_only: false,
        }
    }

    pub fn with_pwd_friendly(mut self, yes: bool) -> Self {
        self.pwd_friendly = yes;
        self
    }

    pub fn with_strictly_pwd_only(mut self, yes: bool) -> Self {
        self.strictly_pwd_only = yes;
        self
    }

    #[inline]
    pub fn is_routable_for(&self, mode: TravelMode) -> bool {
        mode.admits(self.pwd_friendly, self.strictly_pwd_only)
    }
}

/// Paths admitted by `mode`, in input order.
pub fn paths_for_mode(paths: &[PathRecord], mode: TravelMode) -> impl Iterator<Item = &PathRecord> {
    paths.iter().filter(move |p| p.is_routable_for(mode))
}

// ── Building ──────────────────────────────────────────────────────────────────

/// A building or other outdoor point of interest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Building {
    pub id:   BuildingId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub lat:  f64,
    pub lng:  f64,

    /// Optional override of where routes to this building start/end
    /// (typically the main door rather than the roof centroid).
    #[cfg_attr(feature = "serde", serde(default))]
    pub routing_anchor_lat: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub routing_anchor_lng: Option<f64>,
}

impl Building {
    pub fn new(id: u32, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: BuildingId(id),
            name: name.into(),
            lat: location.lat,
            lng: location.lng,
            routing_anchor_lat: None,
            routing_anchor_lng: None,
        }
    }

    pub fn with_routing_anchor(mut self, anchor: GeoPoint) -> Self {
        self.routing_anchor_lat = Some(anchor.lat);
        self.routing_anchor_lng = Some(anchor.lng);
        self
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Point used for routing: the anchor when both of its coordinates are
    /// set, otherwise the building location.
    pub fn routing_point(&self) -> GeoPoint {
        match (self.routing_anchor_lat, self.routing_anchor_lng) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
            _ => self.location(),
        }
    }
}
