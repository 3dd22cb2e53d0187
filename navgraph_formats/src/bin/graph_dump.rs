use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use navgraph_formats::load_graph;

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: graph_dump <graph JSON>")?;
    let graph = load_graph(&path)?;
    println!(
        "{} waypoints, {} lanes in {}",
        graph.num_waypoints(),
        graph.num_lanes(),
        path.display()
    );

    for map in graph.map_names() {
        let waypoints = graph
            .waypoints()
            .iter()
            .filter(|waypoint| waypoint.map_name() == map)
            .count();
        println!("map {map}: {waypoints} waypoints");
    }

    for lane in graph.lanes() {
        let (Some(entry), Some(exit)) = (
            graph.get_waypoint(lane.entry()),
            graph.get_waypoint(lane.exit()),
        ) else {
            continue;
        };
        let kind = if entry.map_name() != exit.map_name() {
            "connector"
        } else if graph.lane_from(lane.exit(), lane.entry()).is_some() {
            "bidirectional"
        } else {
            "one-way"
        };
        println!(
            "{index:>6} {entry:<24} -> {exit:<24} {kind}",
            index = lane.index(),
            entry = format!("{}::{}", entry.map_name(), entry.label()),
            exit = format!("{}::{}", exit.map_name(), exit.label()),
        );
    }
    Ok(())
}
