//! Directed navigation graph shared by the fleet tooling. Waypoints carry a
//! floor (map) label and a planar location; lanes connect an entry waypoint to
//! an exit waypoint. A lane in each direction between the same pair of
//! waypoints makes that pair bidirectional.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    index: usize,
    name: Option<String>,
    location: [f32; 2],
    map_name: String,
}

impl Waypoint {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn location(&self) -> [f32; 2] {
        self.location
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Label used by listings: the name followed by the index, or the bare
    /// index for anonymous waypoints.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.index),
            None => self.index.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    index: usize,
    entry: usize,
    exit: usize,
}

impl Lane {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Waypoint index the lane starts from.
    pub fn entry(&self) -> usize {
        self.entry
    }

    /// Waypoint index the lane leads to.
    pub fn exit(&self) -> usize {
        self.exit
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("lane {lane} references waypoint {waypoint} but the graph has {count} waypoints")]
    UnknownWaypoint {
        lane: usize,
        waypoint: usize,
        count: usize,
    },
    #[error("lane {lane} starts and ends at waypoint {waypoint}")]
    SelfLoop { lane: usize, waypoint: usize },
    #[error("waypoint {index} has a non-finite location ({x}, {y})")]
    NonFiniteLocation { index: usize, x: f32, y: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    waypoints: Vec<Waypoint>,
    lanes: Vec<Lane>,
    // First lane recorded for each directed (entry, exit) pair.
    lane_lookup: HashMap<(usize, usize), usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_waypoint(
        &mut self,
        map_name: impl Into<String>,
        location: [f32; 2],
    ) -> Result<&mut Waypoint, GraphError> {
        let index = self.waypoints.len();
        if !location[0].is_finite() || !location[1].is_finite() {
            return Err(GraphError::NonFiniteLocation {
                index,
                x: location[0],
                y: location[1],
            });
        }
        self.waypoints.push(Waypoint {
            index,
            name: None,
            location,
            map_name: map_name.into(),
        });
        Ok(&mut self.waypoints[index])
    }

    /// Append a directed lane. Lanes must join two distinct, existing
    /// waypoints; self-loops have no drawable or routable meaning and are
    /// refused here so downstream consumers never see one.
    pub fn add_lane(&mut self, entry: usize, exit: usize) -> Result<usize, GraphError> {
        let index = self.lanes.len();
        let count = self.waypoints.len();
        for waypoint in [entry, exit] {
            if waypoint >= count {
                return Err(GraphError::UnknownWaypoint {
                    lane: index,
                    waypoint,
                    count,
                });
            }
        }
        if entry == exit {
            return Err(GraphError::SelfLoop {
                lane: index,
                waypoint: entry,
            });
        }

        self.lanes.push(Lane { index, entry, exit });
        self.lane_lookup.entry((entry, exit)).or_insert(index);
        Ok(index)
    }

    pub fn num_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    pub fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    pub fn get_waypoint(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn get_lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// The lane leading from `entry` to `exit`, if the graph has one.
    pub fn lane_from(&self, entry: usize, exit: usize) -> Option<&Lane> {
        self.lane_lookup
            .get(&(entry, exit))
            .and_then(|&index| self.lanes.get(index))
    }

    pub fn find_waypoint(&self, name: &str) -> Option<&Waypoint> {
        self.waypoints
            .iter()
            .find(|waypoint| waypoint.name() == Some(name))
    }

    pub fn map_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .waypoints
            .iter()
            .map(|waypoint| waypoint.map_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Graph {
        let mut graph = Graph::new();
        graph.add_waypoint("L1", [0.0, 0.0]).unwrap().set_name("lobby");
        graph.add_waypoint("L1", [10.0, 0.0]).unwrap();
        graph.add_waypoint("L2", [10.0, 0.0]).unwrap().set_name("lift_L2");
        graph.add_lane(0, 1).unwrap();
        graph.add_lane(1, 0).unwrap();
        graph.add_lane(1, 2).unwrap();
        graph
    }

    #[test]
    fn reverse_lane_lookup_finds_both_directions() {
        let graph = corridor();
        assert_eq!(graph.lane_from(0, 1).map(Lane::index), Some(0));
        assert_eq!(graph.lane_from(1, 0).map(Lane::index), Some(1));
        assert!(graph.lane_from(2, 1).is_none());
    }

    #[test]
    fn duplicate_lanes_keep_first_lookup_entry() {
        let mut graph = corridor();
        let duplicate = graph.add_lane(0, 1).unwrap();
        assert_eq!(duplicate, 3);
        assert_eq!(graph.lane_from(0, 1).map(Lane::index), Some(0));
        assert_eq!(graph.num_lanes(), 4);
    }

    #[test]
    fn self_loops_are_rejected() {
        let mut graph = corridor();
        let err = graph.add_lane(1, 1).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop { lane: 3, waypoint: 1 });
        assert_eq!(graph.num_lanes(), 3);
    }

    #[test]
    fn dangling_lane_references_are_rejected() {
        let mut graph = corridor();
        let err = graph.add_lane(0, 9).unwrap_err();
        assert!(matches!(err, GraphError::UnknownWaypoint { waypoint: 9, .. }));
    }

    #[test]
    fn non_finite_locations_are_rejected() {
        let mut graph = Graph::new();
        assert!(graph.add_waypoint("L1", [f32::NAN, 0.0]).is_err());
        assert_eq!(graph.num_waypoints(), 0);
    }

    #[test]
    fn labels_and_lookup_by_name() {
        let graph = corridor();
        assert_eq!(graph.get_waypoint(0).unwrap().label(), "lobby (0)");
        assert_eq!(graph.get_waypoint(1).unwrap().label(), "1");
        assert_eq!(graph.find_waypoint("lift_L2").map(Waypoint::index), Some(2));
        assert_eq!(graph.map_names(), vec!["L1", "L2"]);
    }
}
