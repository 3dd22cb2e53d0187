//! Waypoint and connector label construction, plus the text-only relayout
//! pass run when the character size changes.

use std::collections::BTreeMap;

use glam::Vec2;
use navgraph_formats::Waypoint;

use super::bucket::FloorBucket;
use super::palette::{CONNECTOR_LABEL_COLOR, WAYPOINT_LABEL_COLOR};
use crate::draw::{LabelFont, TextLabel};

pub(super) fn waypoint_label(
    waypoint: &Waypoint,
    character_size: u32,
    font: &dyn LabelFont,
) -> TextLabel {
    let mut label = TextLabel::new(waypoint.label(), character_size, font);
    label
        .set_position(Vec2::from(waypoint.location()))
        .set_color(WAYPOINT_LABEL_COLOR);
    label
}

/// "[floor::label]" note placed just below the entry waypoint's own label.
pub(super) fn connector_label(
    parent: &TextLabel,
    destination_map: &str,
    destination_label: &str,
    font: &dyn LabelFont,
) -> TextLabel {
    let text = format!("[{destination_map}::{destination_label}]");
    let mut label = TextLabel::new(text, parent.character_size(), font);
    label
        .set_position(below(parent))
        .set_color(CONNECTOR_LABEL_COLOR);
    label
}

pub(super) fn relayout(
    floors: &mut BTreeMap<String, FloorBucket>,
    character_size: u32,
    font: &dyn LabelFont,
) {
    for bucket in floors.values_mut() {
        for label in bucket.waypoint_labels.values_mut() {
            label.set_character_size(character_size, font);
        }

        for (waypoint, label) in bucket.connector_labels.iter_mut() {
            label.set_character_size(character_size, font);
            if let Some(parent) = bucket.waypoint_labels.get(waypoint) {
                label.set_position(below(parent));
            }
        }
    }
}

fn below(parent: &TextLabel) -> Vec2 {
    parent.position() + Vec2::new(0.0, parent.world_height())
}
