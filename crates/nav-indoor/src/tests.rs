//! Unit tests for nav-indoor.

#[cfg(test)]
mod helpers {
    use nav_core::{BuildingId, FloorId, GeoPoint, PathId, PixelPoint, RoomId};

    use crate::{Floor, IndoorData, IndoorNode, IndoorNodeKind, Room, RoomPath, RoomPathWaypoint};

    pub const F1: FloorId = FloorId(1);
    pub const F2: FloorId = FloorId(2);
    pub const STAIR: u32 = 7;

    pub fn floor(id: FloorId, level: i32) -> Floor {
        Floor { id, building_id: BuildingId(1), name: format!("Level {level}"), level }
    }

    pub fn room(id: u32, floor: FloorId, x: f64, y: f64) -> Room {
        Room { id: RoomId(id), floor_id: floor, name: format!("R{id}"), x, y }
    }

    pub fn room_path(id: u32, floor: FloorId, waypoints: Vec<RoomPathWaypoint>) -> RoomPath {
        RoomPath { id: PathId(id), floor_id: floor, waypoints }
    }

    /// Two-storey building, 0.02 m/px.
    ///
    /// ```text
    /// Floor 1                               Floor 2
    ///   E1 (0,0)   S7 (100,0)   E2 (200,0)      S7 (100,0)
    ///     │           │           │               │
    ///   (0,50) ── (100,50) ── (200,50)        (100,50) ── (200,50)
    ///     │                       │                          │
    ///   R101 (0,100)         R102 (200,100)             R201 (200,100)
    /// ```
    ///
    /// Only the floor-1 hallway ties a waypoint to the stairway.
    pub fn building() -> IndoorData {
        IndoorData {
            floors: vec![floor(F1, 0), floor(F2, 1)],
            rooms: vec![
                room(101, F1, 0.0, 100.0),
                room(102, F1, 200.0, 100.0),
                room(201, F2, 200.0, 100.0),
            ],
            nodes: vec![
                IndoorNode::new(1, F1, IndoorNodeKind::Entrance, PixelPoint::new(0.0, 0.0))
                    .with_geo_anchor(GeoPoint::new(0.0, 0.0)),
                IndoorNode::new(2, F1, IndoorNodeKind::Entrance, PixelPoint::new(200.0, 0.0))
                    .with_geo_anchor(GeoPoint::new(0.0, 0.001)),
                IndoorNode::new(STAIR, F1, IndoorNodeKind::Stairway, PixelPoint::new(100.0, 0.0))
                    .connected_to(&[F2]),
                IndoorNode::new(STAIR, F2, IndoorNodeKind::Stairway, PixelPoint::new(100.0, 0.0))
                    .connected_to(&[F1]),
            ],
            paths: vec![
                room_path(1, F1, vec![
                    RoomPathWaypoint::at(0.0, 50.0),
                    RoomPathWaypoint::at(100.0, 50.0),
                    RoomPathWaypoint::at(200.0, 50.0),
                ]),
                room_path(2, F1, vec![
                    RoomPathWaypoint::node(100.0, 0.0, STAIR),
                    RoomPathWaypoint::at(100.0, 50.0),
                ]),
                room_path(3, F2, vec![
                    RoomPathWaypoint::at(100.0, 50.0),
                    RoomPathWaypoint::at(200.0, 50.0),
                ]),
            ],
        }
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use nav_core::{IndoorNodeId, NavConfig, PixelPoint, RoomId};

    use super::helpers::{F1, F2, STAIR, building, room, room_path};
    use crate::{IndoorConfig, IndoorGraph, IndoorKey, IndoorNode, IndoorNodeKind, RoomPathWaypoint};

    #[test]
    fn stairway_links_floors_at_fixed_cost() {
        let g = IndoorGraph::build(&building(), &IndoorConfig::default());
        let lower = g.vertex(&IndoorKey::node(F1, IndoorNodeId(STAIR))).unwrap();
        let upper = g.vertex(&IndoorKey::node(F2, IndoorNodeId(STAIR))).unwrap();

        let up = g.graph.find_edge(lower, upper).expect("vertical edge");
        let down = g.graph.find_edge(upper, lower).expect("reverse vertical edge");
        assert_eq!(g.graph.edge_weight[up.index()], 5.0);
        assert_eq!(g.graph.edge_weight[down.index()], 5.0);

        // Both floors list each other, yet the link is added once.
        let ups = g.graph.out_edges(lower).filter(|e| g.graph.edge_to[e.index()] == upper).count();
        assert_eq!(ups, 1);
    }

    #[test]
    fn vertical_cost_is_configurable() {
        let cfg = NavConfig { vertical_edge_cost: 12.0, ..NavConfig::default() };
        let g = IndoorGraph::build(&building(), &IndoorConfig::from(&cfg));
        let lower = g.vertex(&IndoorKey::node(F1, IndoorNodeId(STAIR))).unwrap();
        let upper = g.vertex(&IndoorKey::node(F2, IndoorNodeId(STAIR))).unwrap();
        let e = g.graph.find_edge(lower, upper).unwrap();
        assert_eq!(g.graph.edge_weight[e.index()], 12.0);
    }

    #[test]
    fn missing_connected_floor_is_skipped() {
        let mut data = building();
        data.nodes.push(
            IndoorNode::new(9, F1, IndoorNodeKind::Elevator, PixelPoint::new(0.0, 60.0))
                .connected_to(&[nav_core::FloorId(3)]),
        );
        let g = IndoorGraph::build(&data, &IndoorConfig::default());
        let lift = g.vertex(&IndoorKey::node(F1, IndoorNodeId(9))).unwrap();
        // Only its bridge to the hallway.
        assert_eq!(g.graph.out_degree(lift), 1);
    }

    #[test]
    fn edge_weights_scale_pixels() {
        let g = IndoorGraph::build(&building(), &IndoorConfig::default());
        let a = g.vertex(&IndoorKey::waypoint(F1, PixelPoint::new(0.0, 50.0))).unwrap();
        let b = g.vertex(&IndoorKey::waypoint(F1, PixelPoint::new(100.0, 50.0))).unwrap();
        let e = g.graph.find_edge(a, b).unwrap();
        assert!((g.graph.edge_weight[e.index()] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn tied_waypoint_reuses_entity_vertex() {
        let g = IndoorGraph::build(&building(), &IndoorConfig::default());
        // The waypoint drawn on the stairway did not create its own vertex.
        assert!(g.vertex(&IndoorKey::waypoint(F1, PixelPoint::new(100.0, 0.0))).is_none());
        let stair = g.vertex(&IndoorKey::node(F1, IndoorNodeId(STAIR))).unwrap();
        let hall = g.vertex(&IndoorKey::waypoint(F1, PixelPoint::new(100.0, 50.0))).unwrap();
        assert!(g.graph.find_edge(stair, hall).is_some());
    }

    #[test]
    fn crossing_paths_join_on_grid() {
        let mut data = building();
        data.paths.push(room_path(4, F1, vec![
            RoomPathWaypoint::at(100.04, 49.96),
            RoomPathWaypoint::at(100.0, 150.0),
        ]));
        let before = IndoorGraph::build(&building(), &IndoorConfig::default()).graph.node_count();
        let g = IndoorGraph::build(&data, &IndoorConfig::default());
        // (100.04, 49.96) rounds onto the hallway junction; only the far
        // end is new.
        assert_eq!(g.graph.node_count(), before + 1);
    }

    #[test]
    fn every_entity_bridges_to_its_nearest_waypoint() {
        let g = IndoorGraph::build(&building(), &IndoorConfig::default());
        let r101 = g.vertex(&IndoorKey::room(F1, RoomId(101))).unwrap();
        let corner = g.vertex(&IndoorKey::waypoint(F1, PixelPoint::new(0.0, 50.0))).unwrap();
        assert_eq!(g.graph.out_degree(r101), 1);
        assert_eq!(g.graph.edge_to[g.graph.out_edges(r101).next().unwrap().index()], corner);
    }

    #[test]
    fn distant_entity_still_bridged() {
        let mut data = building();
        data.rooms.push(room(150, F1, 5000.0, 5000.0));
        let g = IndoorGraph::build(&data, &IndoorConfig::default());
        let far = g.vertex(&IndoorKey::room(F1, RoomId(150))).unwrap();
        assert_eq!(g.graph.out_degree(far), 1);
    }

    #[test]
    fn deterministic_build() {
        let a = IndoorGraph::build(&building(), &IndoorConfig::default());
        let b = IndoorGraph::build(&building(), &IndoorConfig::default());
        assert_eq!(a.graph.node_key, b.graph.node_key);
        assert_eq!(a.graph.edge_to, b.graph.edge_to);
        assert_eq!(a.graph.edge_weight, b.graph.edge_weight);
    }

    #[test]
    fn config_from_validated_nav_config() {
        let bad = NavConfig { meters_per_pixel: 0.0, ..NavConfig::default() };
        assert!(IndoorConfig::try_from_nav(&bad).is_err());
        let ok = IndoorConfig::try_from_nav(&NavConfig::default()).unwrap();
        assert_eq!(ok, IndoorConfig::default());
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use nav_core::{IndoorNodeId, PixelPoint, RoomId};

    use super::helpers::{F1, F2, STAIR, building, room, room_path};
    use crate::{IndoorConfig, IndoorError, IndoorGraph, IndoorKey, IndoorNode, IndoorNodeKind, RoomPathWaypoint};

    fn graph() -> IndoorGraph {
        IndoorGraph::build(&building(), &IndoorConfig::default())
    }

    #[test]
    fn same_floor_rooms() {
        let r = graph().route_rooms(RoomId(101), RoomId(102)).unwrap();
        assert_eq!(r.vertices.first(), Some(&IndoorKey::room(F1, RoomId(101))));
        assert_eq!(r.vertices.last(), Some(&IndoorKey::room(F1, RoomId(102))));
        assert_eq!(r.vertices.len(), 5);
        // 50 + 100 + 100 + 50 px at 0.02 m/px.
        assert!((r.cost - 6.0).abs() < 1e-9);
        assert_eq!(r.floors(), vec![F1]);
    }

    #[test]
    fn cross_floor_rooms_rejected() {
        let err = graph().route_rooms(RoomId(101), RoomId(201)).unwrap_err();
        assert!(matches!(err, IndoorError::CrossFloor { from, to } if from == F1 && to == F2));
    }

    #[test]
    fn unknown_room() {
        let err = graph().route_rooms(RoomId(101), RoomId(999)).unwrap_err();
        assert!(matches!(err, IndoorError::UnknownRoom(RoomId(999))));
    }

    #[test]
    fn multi_floor_route_takes_stairs() {
        let r = graph()
            .route_between(IndoorKey::room(F1, RoomId(101)), IndoorKey::room(F2, RoomId(201)))
            .unwrap();
        assert_eq!(r.floors(), vec![F1, F2]);
        assert!(r.vertices.contains(&IndoorKey::node(F1, IndoorNodeId(STAIR))));
        assert!(r.vertices.contains(&IndoorKey::node(F2, IndoorNodeId(STAIR))));
        // 4 m on each floor plus one vertical hop.
        assert!((r.cost - 13.0).abs() < 1e-9);
        assert_eq!(r.points_on(F2).last(), Some(&PixelPoint::new(200.0, 100.0)));
    }

    #[test]
    fn room_search_stays_on_floor() {
        // Two disjoint floor-1 wings, each reaching its own stairway; the
        // wings only meet through floor 2.  The east wing sits far enough
        // away that no bridge joins the wings.
        let mut data = building();
        data.paths.clear();
        data.nodes.retain(|n| n.kind != IndoorNodeKind::Entrance);
        data.rooms = vec![room(101, F1, 0.0, 100.0), room(102, F1, 1000.0, 100.0)];
        data.nodes.push(
            IndoorNode::new(8, F1, IndoorNodeKind::Stairway, PixelPoint::new(1000.0, 0.0))
                .connected_to(&[F2]),
        );
        data.nodes.push(
            IndoorNode::new(8, F2, IndoorNodeKind::Stairway, PixelPoint::new(1000.0, 0.0)),
        );
        data.paths.push(room_path(1, F1, vec![
            RoomPathWaypoint::room(0.0, 100.0, 101),
            RoomPathWaypoint::node(100.0, 0.0, STAIR),
        ]));
        data.paths.push(room_path(2, F1, vec![
            RoomPathWaypoint::node(1000.0, 0.0, 8),
            RoomPathWaypoint::room(1000.0, 100.0, 102),
        ]));
        data.paths.push(room_path(3, F2, vec![
            RoomPathWaypoint::node(100.0, 0.0, STAIR),
            RoomPathWaypoint::node(1000.0, 0.0, 8),
        ]));
        let g = IndoorGraph::build(&data, &IndoorConfig::default());

        assert!(matches!(
            g.route_rooms(RoomId(101), RoomId(102)),
            Err(IndoorError::NoRoute { .. })
        ));
        let r = g
            .route_between(IndoorKey::room(F1, RoomId(101)), IndoorKey::room(F1, RoomId(102)))
            .unwrap();
        assert_eq!(r.floors(), vec![F1, F2, F1]);
    }

    #[test]
    fn isolated_floor_has_no_route() {
        let mut data = building();
        data.rooms.push(room(301, nav_core::FloorId(3), 0.0, 0.0));
        let g = IndoorGraph::build(&data, &IndoorConfig::default());
        let err = g
            .route_between(IndoorKey::room(nav_core::FloorId(3), RoomId(301)), IndoorKey::room(F1, RoomId(101)))
            .unwrap_err();
        assert!(matches!(err, IndoorError::NoRoute { .. }));
    }

    #[test]
    fn unknown_vertex() {
        let err = graph()
            .route_between(IndoorKey::room(F2, RoomId(101)), IndoorKey::room(F1, RoomId(101)))
            .unwrap_err();
        assert!(matches!(err, IndoorError::UnknownVertex(_)));
    }
}

// ── Building entry ────────────────────────────────────────────────────────────

#[cfg(test)]
mod entry {
    use nav_core::{BuildingId, GeoPoint, IndoorNodeId, RoomId};

    use super::helpers::{F1, F2, building};
    use crate::building_entry;

    #[test]
    fn nearest_located_entrance() {
        let data = building();
        let e = building_entry(&data, BuildingId(1), F1, GeoPoint::new(0.0, 0.0012)).unwrap();
        assert_eq!(e.entrance, IndoorNodeId(2));
        assert_eq!(e.room, Some(RoomId(102)));

        let e = building_entry(&data, BuildingId(1), F1, GeoPoint::new(0.0, -0.0005)).unwrap();
        assert_eq!(e.entrance, IndoorNodeId(1));
        assert_eq!(e.room, Some(RoomId(101)));
    }

    #[test]
    fn lowest_id_without_locations() {
        let mut data = building();
        for n in &mut data.nodes {
            n.lat = None;
            n.lng = None;
        }
        let e = building_entry(&data, BuildingId(1), F1, GeoPoint::new(0.0, 0.0012)).unwrap();
        assert_eq!(e.entrance, IndoorNodeId(1));
    }

    #[test]
    fn floor_without_entrance_or_wrong_building() {
        let data = building();
        assert!(building_entry(&data, BuildingId(1), F2, GeoPoint::new(0.0, 0.0)).is_none());
        assert!(building_entry(&data, BuildingId(2), F1, GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod records {
    use nav_core::{FloorId, IndoorNodeId, RoomId};

    use crate::{IndoorNode, IndoorNodeKind, RoomPath};

    #[test]
    fn stairway_from_json() {
        let json = r#"{"id": 7, "floorId": 1, "kind": "stairway", "x": 10.0, "y": 20.0,
                       "connectedFloorIds": [2, 3]}"#;
        let n: IndoorNode = serde_json::from_str(json).unwrap();
        assert_eq!(n.id, IndoorNodeId(7));
        assert_eq!(n.kind, IndoorNodeKind::Stairway);
        assert_eq!(n.connected_floor_ids, vec![FloorId(2), FloorId(3)]);
        assert!(n.geo_anchor().is_none());
    }

    #[test]
    fn room_path_with_tied_waypoint() {
        let json = r#"{"id": 1, "floorId": 1, "waypoints": [
                        {"x": 0.0, "y": 0.0, "roomId": 101},
                        {"x": 5.0, "y": 0.0}]}"#;
        let p: RoomPath = serde_json::from_str(json).unwrap();
        assert_eq!(p.waypoints[0].room_id, Some(RoomId(101)));
        assert_eq!(p.waypoints[1].node_id, None);
    }
}
