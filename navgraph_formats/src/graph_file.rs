//! JSON description of a navigation graph. Waypoints are indexed by their
//! position in the `waypoints` array; a lane marked `bidirectional` expands to
//! a directed lane in each direction.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, GraphError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub waypoints: Vec<WaypointEntry>,
    #[serde(default)]
    pub lanes: Vec<LaneEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub map: String,
    pub location: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneEntry {
    pub entry: usize,
    pub exit: usize,
    #[serde(default)]
    pub bidirectional: bool,
}

impl GraphFile {
    pub fn into_graph(self) -> Result<Graph, GraphError> {
        let mut graph = Graph::new();
        for entry in self.waypoints {
            let waypoint = graph.add_waypoint(entry.map, entry.location)?;
            if let Some(name) = entry.name {
                waypoint.set_name(name);
            }
        }
        for lane in self.lanes {
            graph.add_lane(lane.entry, lane.exit)?;
            if lane.bidirectional {
                graph.add_lane(lane.exit, lane.entry)?;
            }
        }
        Ok(graph)
    }
}

pub fn parse_graph(input: &str) -> Result<Graph> {
    let file: GraphFile = serde_json::from_str(input).context("parsing graph JSON")?;
    let graph = file.into_graph().context("validating graph")?;
    Ok(graph)
}

pub fn load_graph(path: &Path) -> Result<Graph> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading graph file {}", path.display()))?;
    parse_graph(&data).with_context(|| format!("loading graph file {}", path.display()))
}
