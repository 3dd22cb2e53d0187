use super::GraphView;
use crate::draw::{DrawTarget, Primitive};

/// Issue the active floor's primitives: lanes under arrows, arrows under
/// waypoints, text on top.
pub(super) fn draw(view: &GraphView, target: &mut dyn DrawTarget) {
    let Some(bucket) = view.current_bucket() else {
        return;
    };

    for capsule in &bucket.mono_lanes {
        target.draw(Primitive::Capsule(capsule));
    }
    for capsule in &bucket.bi_lanes {
        target.draw(Primitive::Capsule(capsule));
    }
    for arrow in &bucket.mono_arrows {
        target.draw(Primitive::Arrow(arrow));
    }
    for circle in &bucket.waypoints {
        target.draw(Primitive::Circle(circle));
    }
    for label in bucket.waypoint_labels.values() {
        target.draw(Primitive::Label(label));
    }
    for label in bucket.connector_labels.values() {
        target.draw(Primitive::Label(label));
    }
}
