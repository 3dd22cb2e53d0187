//! Pickable projection of a navigation graph. `GraphView` owns one
//! `FloorBucket` per floor label, the aggregate bounds, the active floor and
//! the current selection. Submodules cover the lifecycle slices: `build`
//! projects the graph once at construction, `labels` lays out text, `pick`
//! resolves world points, `selection` recolors highlighted elements and
//! `render` walks the active floor for a draw target.

mod build;
mod bucket;
mod labels;
pub mod palette;
mod pick;
mod render;
mod selection;

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Vec2;
use log::warn;
use navgraph_formats::Graph;
use serde::Serialize;

use crate::draw::{DrawTarget, LabelFont};
use crate::fit::{Bounds, ViewTransform};

pub use bucket::FloorBucket;

pub const DEFAULT_TEXT_SIZE: u32 = 24;
const WAYPOINT_RADIUS_FACTOR: f32 = 0.30;

fn waypoint_radius(lane_width: f32) -> f32 {
    WAYPOINT_RADIUS_FACTOR * lane_width
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
    Waypoint,
    Lane,
}

/// Graph element identified by its index in the source graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pick {
    pub element: ElementType,
    pub index: usize,
}

impl Pick {
    pub fn waypoint(index: usize) -> Self {
        Self {
            element: ElementType::Waypoint,
            index,
        }
    }

    pub fn lane(index: usize) -> Self {
        Self {
            element: ElementType::Lane,
            index,
        }
    }
}

pub struct GraphView {
    lane_width: f32,
    text_size: u32,
    floors: BTreeMap<String, FloorBucket>,
    current_map: Option<String>,
    bounds: Bounds,
    selected: Option<Pick>,
    font: Arc<dyn LabelFont>,
}

impl GraphView {
    pub fn new(graph: &Graph, lane_width: f32, font: Arc<dyn LabelFont>) -> Self {
        let projection = build::build(graph, lane_width, DEFAULT_TEXT_SIZE, font.as_ref());
        Self {
            lane_width,
            text_size: DEFAULT_TEXT_SIZE,
            floors: projection.floors,
            current_map: projection.initial_map,
            bounds: projection.bounds,
            selected: None,
            font,
        }
    }

    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    pub fn waypoint_radius(&self) -> f32 {
        waypoint_radius(self.lane_width)
    }

    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    pub fn font(&self) -> Arc<dyn LabelFont> {
        Arc::clone(&self.font)
    }

    /// Aggregate bounds of every same-floor lane, padded by half a lane width.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn get_map_names(&self) -> Vec<String> {
        self.floors.keys().cloned().collect()
    }

    pub fn floor(&self, name: &str) -> Option<&FloorBucket> {
        self.floors.get(name)
    }

    /// Make `name` the drawn and picked floor. An unknown name clears the
    /// active floor and returns false.
    pub fn choose_map(&mut self, name: &str) -> bool {
        if self.floors.contains_key(name) {
            self.current_map = Some(name.to_string());
            true
        } else {
            warn!("no floor named {name:?}; clearing the active floor");
            self.current_map = None;
            false
        }
    }

    pub fn current_map(&self) -> Option<&str> {
        self.current_map.as_deref()
    }

    fn current_bucket(&self) -> Option<&FloorBucket> {
        let name = self.current_map.as_ref()?;
        self.floors.get(name)
    }

    pub fn pick(&self, x: f32, y: f32) -> Option<Pick> {
        pick::pick(self, Vec2::new(x, y))
    }

    /// Pick at a viewport pixel, mapped through the transform used to draw.
    pub fn pick_screen(&self, screen: Vec2, transform: &ViewTransform) -> Option<Pick> {
        pick::pick(self, transform.screen_to_world(screen))
    }

    pub fn select(&mut self, chosen: Pick) {
        selection::select(self, chosen);
    }

    pub fn deselect(&mut self) {
        selection::deselect(self);
    }

    pub fn selected(&self) -> Option<Pick> {
        self.selected
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        render::draw(self, target);
    }

    /// Re-measure every label at a new character size. Geometry is untouched.
    pub fn set_text_size(&mut self, size: u32) {
        self.text_size = size;
        labels::relayout(&mut self.floors, size, self.font.as_ref());
    }

    /// One-line description of a picked element, or `None` when the pick does
    /// not match anything drawn.
    pub fn describe(&self, chosen: Pick) -> Option<String> {
        match chosen.element {
            ElementType::Waypoint => self.floors.iter().find_map(|(floor, bucket)| {
                if !bucket.has_waypoint(chosen.index) {
                    return None;
                }
                let label = bucket
                    .waypoint_label(chosen.index)
                    .map(|label| label.text().to_string())
                    .unwrap_or_else(|| chosen.index.to_string());
                let mut line = format!("waypoint {label} on {floor}");
                if let Some(connector) = bucket.connector_label(chosen.index) {
                    line.push_str(&format!(", connects to {}", connector.text()));
                }
                Some(line)
            }),
            ElementType::Lane => self.floors.iter().find_map(|(floor, bucket)| {
                let (capsule, bidirectional) = bucket.lane_capsule(chosen.index)?;
                let (start, end) = (capsule.start(), capsule.end());
                Some(format!(
                    "{} lane {} on {floor}: ({:.2}, {:.2}) {} ({:.2}, {:.2})",
                    if bidirectional { "bidirectional" } else { "one-way" },
                    chosen.index,
                    start.x,
                    start.y,
                    if bidirectional { "<->" } else { "->" },
                    end.x,
                    end.y
                ))
            }),
        }
    }
}
