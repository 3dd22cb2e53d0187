use std::collections::HashSet;
use std::sync::Arc;

use glam::Vec2;
use navgraph_formats::Graph;
use navgraph_viewer::draw::FixedAdvanceFont;
use navgraph_viewer::{ElementType, GraphView, Pick};

const GRID: usize = 6;
const SPACING: f32 = 4.0;

/// Two stacked grids. Even rows run both ways, odd rows only eastward, and
/// every column runs north in one direction. Corner waypoints link floors.
fn stacked_grids() -> Graph {
    let mut graph = Graph::new();
    for floor in ["B1", "L1"] {
        for row in 0..GRID {
            for col in 0..GRID {
                let location = [col as f32 * SPACING, row as f32 * SPACING];
                graph.add_waypoint(floor, location).unwrap();
            }
        }
    }

    let id = |floor: usize, row: usize, col: usize| floor * GRID * GRID + row * GRID + col;
    for floor in 0..2 {
        for row in 0..GRID {
            for col in 0..GRID - 1 {
                graph.add_lane(id(floor, row, col), id(floor, row, col + 1)).unwrap();
                if row % 2 == 0 {
                    graph.add_lane(id(floor, row, col + 1), id(floor, row, col)).unwrap();
                }
            }
        }
        for col in 0..GRID {
            for row in 0..GRID - 1 {
                graph.add_lane(id(floor, row, col), id(floor, row + 1, col)).unwrap();
            }
        }
    }
    graph.add_lane(id(0, 0, 0), id(1, 0, 0)).unwrap();
    graph.add_lane(id(1, 0, 0), id(0, 0, 0)).unwrap();
    graph
}

fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let axis = end - start;
    let t = ((point - start).dot(axis) / axis.length_squared()).clamp(0.0, 1.0);
    (start + axis * t).distance(point)
}

fn view(graph: &Graph) -> GraphView {
    GraphView::new(graph, 1.0, Arc::new(FixedAdvanceFont::default()))
}

#[test]
fn every_same_floor_pair_is_drawn_exactly_once() {
    let graph = stacked_grids();
    let view = view(&graph);

    let mut drawn_pairs: HashSet<(usize, usize)> = HashSet::new();
    for name in view.get_map_names() {
        let bucket = view.floor(&name).unwrap();
        let lanes = bucket.bi_indices().iter().chain(bucket.mono_indices());
        for &lane in lanes {
            let lane = graph.get_lane(lane).expect("drawn lane exists in source graph");
            let key = (lane.entry().min(lane.exit()), lane.entry().max(lane.exit()));
            assert!(drawn_pairs.insert(key), "pair {key:?} drawn twice");
        }
        assert_eq!(bucket.mono_lanes().len(), bucket.mono_arrows().len());
    }

    let per_floor_rows = GRID * (GRID - 1);
    let per_floor_columns = GRID * (GRID - 1);
    assert_eq!(drawn_pairs.len(), 2 * (per_floor_rows + per_floor_columns));

    let b1 = view.floor("B1").unwrap();
    let bidirectional_rows = GRID.div_ceil(2) * (GRID - 1);
    assert_eq!(b1.bi_lanes().len(), bidirectional_rows);
    assert_eq!(b1.mono_lanes().len(), per_floor_rows - bidirectional_rows + per_floor_columns);
}

#[test]
fn lift_lanes_become_connectors_on_both_floors() {
    let graph = stacked_grids();
    let view = view(&graph);
    let lift_b1 = 0;
    let lift_l1 = GRID * GRID;

    let b1 = view.floor("B1").unwrap();
    let l1 = view.floor("L1").unwrap();
    assert_eq!(b1.connector_labels().len(), 1);
    assert_eq!(l1.connector_labels().len(), 1);
    assert_eq!(b1.connector_label(lift_b1).unwrap().text(), format!("[L1::{lift_l1}]"));
    assert_eq!(l1.connector_label(lift_l1).unwrap().text(), "[B1::0]");
}

#[test]
fn every_waypoint_with_a_lane_has_one_circle() {
    let graph = stacked_grids();
    let view = view(&graph);
    for name in view.get_map_names() {
        let bucket = view.floor(&name).unwrap();
        let unique: HashSet<usize> = bucket.waypoint_indices().iter().copied().collect();
        assert_eq!(unique.len(), GRID * GRID);
        assert_eq!(bucket.waypoints().len(), GRID * GRID);
        for (&index, position) in bucket.waypoint_indices().iter().zip(bucket.waypoint_positions()) {
            let waypoint = graph.get_waypoint(index).unwrap();
            assert_eq!(waypoint.map_name(), name);
            assert_eq!(*position, Vec2::from(waypoint.location()));
        }
    }
}

#[test]
fn sampled_picks_respect_geometry() {
    let graph = stacked_grids();
    let mut view = view(&graph);
    assert!(view.choose_map("L1"));
    let radius = view.waypoint_radius();
    let half_width = view.lane_width() / 2.0;

    let mut step = 0.0f32;
    while step <= (GRID - 1) as f32 * SPACING {
        for offset in [0.0f32, 0.2, 0.45, 1.3] {
            let point = Vec2::new(step, 2.0 * SPACING + offset);
            let Some(pick) = view.pick(point.x, point.y) else {
                continue;
            };
            match pick.element {
                ElementType::Waypoint => {
                    let waypoint = graph.get_waypoint(pick.index).unwrap();
                    assert_eq!(waypoint.map_name(), "L1");
                    assert!(Vec2::from(waypoint.location()).distance(point) <= radius);
                }
                ElementType::Lane => {
                    let lane = graph.get_lane(pick.index).expect("lane index is valid");
                    let entry = graph.get_waypoint(lane.entry()).unwrap();
                    assert_eq!(entry.map_name(), "L1");
                    for waypoint in graph.waypoints().iter().filter(|w| w.map_name() == "L1") {
                        assert!(Vec2::from(waypoint.location()).distance(point) > radius);
                    }
                    let start = Vec2::from(entry.location());
                    let end = Vec2::from(graph.get_waypoint(lane.exit()).unwrap().location());
                    assert!(distance_to_segment(point, start, end) <= half_width + 1e-4);
                }
            }
        }
        step += 0.5;
    }
}

#[test]
fn shared_waypoint_beats_all_incident_lanes() {
    let graph = stacked_grids();
    let view = view(&graph);
    // B1 starts active: first lane in the source graph is on B1.
    assert_eq!(view.current_map(), Some("B1"));
    let centre = GRID + 1;
    let location = graph.get_waypoint(centre).unwrap().location();
    assert_eq!(view.pick(location[0], location[1]), Some(Pick::waypoint(centre)));
}
