use glam::Vec2;

use super::{GraphView, Pick};

/// Resolve a world point on the active floor. Waypoints win over lanes, and
/// bidirectional lanes over one-way lanes; within a class the first inserted
/// element wins.
pub(super) fn pick(view: &GraphView, point: Vec2) -> Option<Pick> {
    let bucket = view.current_bucket()?;

    let radius = view.waypoint_radius();
    let mut reach = *view.bounds();
    reach.pad(radius);
    if !reach.contains(point) {
        return None;
    }

    assert_eq!(bucket.waypoints.len(), bucket.waypoint_indices.len());
    assert_eq!(bucket.waypoints.len(), bucket.waypoint_p.len());
    if let Some(slot) = bucket
        .waypoint_p
        .iter()
        .position(|center| center.distance(point) <= radius)
    {
        return Some(Pick::waypoint(bucket.waypoint_indices[slot]));
    }

    if let Some(slot) = bucket.bi_lanes.iter().position(|lane| lane.contains(point)) {
        return Some(Pick::lane(bucket.bi_indices[slot]));
    }

    bucket
        .mono_lanes
        .iter()
        .position(|lane| lane.contains(point))
        .map(|slot| Pick::lane(bucket.mono_indices[slot]))
}
