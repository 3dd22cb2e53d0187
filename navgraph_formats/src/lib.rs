pub mod graph;
pub mod graph_file;

pub use graph::{Graph, GraphError, Lane, Waypoint};
pub use graph_file::{GraphFile, LaneEntry, WaypointEntry, load_graph, parse_graph};
