//! Projection of a directed navigation graph into per-floor buckets.
//!
//! Labels for every waypoint are made first so connector notes can quote the
//! destination's label. Lanes are then visited in source order: a lane that
//! changes floor becomes a connector note on its entry floor; any other lane
//! becomes one capsule, folded together with its reverse lane when the graph
//! has one. Waypoints get a circle the first time a same-floor lane touches
//! them.

use std::collections::{BTreeMap, HashMap, HashSet};

use glam::Vec2;
use log::{debug, info, warn};
use navgraph_formats::Graph;

use super::bucket::FloorBucket;
use super::labels;
use super::palette::{ARROW_COLOR, DEFAULT_PALETTE};
use crate::draw::{ArrowGlyph, Capsule, Circle, LabelFont};
use crate::fit::Bounds;

pub(super) struct Projection {
    pub floors: BTreeMap<String, FloorBucket>,
    pub bounds: Bounds,
    pub initial_map: Option<String>,
}

/// Directed pairs already turned into geometry, stored once per unordered
/// pair with a marker bit for each direction.
#[derive(Debug, Default)]
struct ProcessedPairs {
    pairs: HashMap<(usize, usize), u8>,
}

impl ProcessedPairs {
    const FORWARD: u8 = 0b01;
    const REVERSE: u8 = 0b10;

    fn key(entry: usize, exit: usize) -> ((usize, usize), u8) {
        if entry <= exit {
            ((entry, exit), Self::FORWARD)
        } else {
            ((exit, entry), Self::REVERSE)
        }
    }

    /// Marks `entry -> exit`; false when it was already marked.
    fn insert(&mut self, entry: usize, exit: usize) -> bool {
        let (key, bit) = Self::key(entry, exit);
        let flags = self.pairs.entry(key).or_default();
        if *flags & bit != 0 {
            return false;
        }
        *flags |= bit;
        true
    }
}

pub(super) fn build(
    graph: &Graph,
    lane_width: f32,
    character_size: u32,
    font: &dyn LabelFont,
) -> Projection {
    let mut floors: BTreeMap<String, FloorBucket> = BTreeMap::new();
    let mut bounds = Bounds::empty();
    let mut initial_map: Option<String> = None;
    let mut processed = ProcessedPairs::default();
    let mut placed_waypoints: HashSet<usize> = HashSet::new();
    let waypoint_radius = super::waypoint_radius(lane_width);

    for waypoint in graph.waypoints() {
        let label = labels::waypoint_label(waypoint, character_size, font);
        floors
            .entry(waypoint.map_name().to_string())
            .or_default()
            .waypoint_labels
            .insert(waypoint.index(), label);
    }

    for lane in graph.lanes() {
        let (j0, j1) = (lane.entry(), lane.exit());
        let (Some(w0), Some(w1)) = (graph.get_waypoint(j0), graph.get_waypoint(j1)) else {
            warn!(
                "lane {} references a missing waypoint ({j0} -> {j1}); skipping",
                lane.index()
            );
            continue;
        };

        if w0.map_name() != w1.map_name() {
            let destination = floors
                .get(w1.map_name())
                .and_then(|bucket| bucket.waypoint_labels.get(&j1))
                .map(|label| label.text().to_string())
                .unwrap_or_else(|| w1.label());
            let bucket = floors.entry(w0.map_name().to_string()).or_default();
            if bucket.connector_labels.contains_key(&j0) {
                debug!(
                    "waypoint {j0} already has a connector note; lane {} to {} not annotated",
                    lane.index(),
                    w1.map_name()
                );
                continue;
            }
            let Some(parent) = bucket.waypoint_labels.get(&j0) else {
                continue;
            };
            let note = labels::connector_label(parent, w1.map_name(), &destination, font);
            bucket.connector_labels.insert(j0, note);
            continue;
        }

        if !processed.insert(j0, j1) {
            continue;
        }

        let bidirectional = graph.lane_from(j1, j0).is_some();
        if bidirectional {
            processed.insert(j1, j0);
        }

        let p0 = Vec2::from(w0.location());
        let p1 = Vec2::from(w1.location());
        bounds.expand(p0);
        bounds.expand(p1);

        if initial_map.is_none() {
            initial_map = Some(w0.map_name().to_string());
        }
        let bucket = floors.entry(w0.map_name().to_string()).or_default();

        let exit_color = if bidirectional {
            DEFAULT_PALETTE.lane_entry
        } else {
            DEFAULT_PALETTE.lane_exit
        };
        let capsule = Capsule::new(
            p0,
            DEFAULT_PALETTE.lane_entry,
            p1,
            exit_color,
            lane_width / 2.0,
        );
        if bidirectional {
            bucket.push_bidirectional(capsule, lane.index());
        } else {
            let arrow = ArrowGlyph::along(p0, p1, ARROW_COLOR);
            bucket.push_one_way(capsule, arrow, lane.index());
        }

        for (index, position) in [(j0, p0), (j1, p1)] {
            if placed_waypoints.insert(index) {
                let circle = Circle::new(position, waypoint_radius, DEFAULT_PALETTE.waypoint);
                bucket.push_waypoint(circle, index);
            }
        }
    }

    bounds.pad(lane_width / 2.0);

    for (name, bucket) in &floors {
        bucket.assert_aligned();
        debug!(
            "floor {name}: {} bidirectional lanes, {} one-way lanes, {} waypoints, {} connectors",
            bucket.bi_lanes.len(),
            bucket.mono_lanes.len(),
            bucket.waypoints.len(),
            bucket.connector_labels.len()
        );
    }
    info!(
        "projected {} waypoints and {} lanes onto {} floor(s)",
        graph.num_waypoints(),
        graph.num_lanes(),
        floors.len()
    );

    Projection {
        floors,
        bounds,
        initial_map,
    }
}
