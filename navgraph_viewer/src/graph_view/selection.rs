use log::debug;

use super::palette::{DEFAULT_PALETTE, ElementPalette, HIGHLIGHT_PALETTE};
use super::{ElementType, GraphView, Pick};

pub(super) fn select(view: &mut GraphView, chosen: Pick) {
    if let Some(previous) = view.selected.take() {
        apply_palette(view, previous, &DEFAULT_PALETTE);
    }
    if !apply_palette(view, chosen, &HIGHLIGHT_PALETTE) {
        debug!("selected {chosen:?} has no drawn primitive");
    }
    view.selected = Some(chosen);
}

pub(super) fn deselect(view: &mut GraphView) {
    if let Some(previous) = view.selected.take() {
        apply_palette(view, previous, &DEFAULT_PALETTE);
    }
}

/// Recolor the primitive drawn for `chosen`, searching every floor so the
/// selection survives floor switches. Returns false when nothing matched.
fn apply_palette(view: &mut GraphView, chosen: Pick, palette: &ElementPalette) -> bool {
    match chosen.element {
        ElementType::Waypoint => {
            for bucket in view.floors.values_mut() {
                if let Some(circle) = bucket.find_waypoint_mut(chosen.index) {
                    circle.set_fill(palette.waypoint);
                    return true;
                }
            }
        }
        ElementType::Lane => {
            for bucket in view.floors.values_mut() {
                if let Some(capsule) = bucket.find_bi_lane_mut(chosen.index) {
                    capsule
                        .set_start_color(palette.lane_entry)
                        .set_end_color(palette.lane_entry);
                    return true;
                }
                if let Some(capsule) = bucket.find_mono_lane_mut(chosen.index) {
                    capsule
                        .set_start_color(palette.lane_entry)
                        .set_end_color(palette.lane_exit);
                    return true;
                }
            }
        }
    }
    false
}
