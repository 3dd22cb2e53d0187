use std::collections::BTreeMap;

use glam::Vec2;

use crate::draw::{ArrowGlyph, Capsule, Circle, TextLabel};

/// Everything drawn for one floor. Each primitive sequence has a parallel
/// sequence of source-graph indices; they are only ever pushed in lockstep.
#[derive(Debug, Clone, Default)]
pub struct FloorBucket {
    pub(super) bi_lanes: Vec<Capsule>,
    pub(super) bi_indices: Vec<usize>,

    pub(super) mono_lanes: Vec<Capsule>,
    pub(super) mono_indices: Vec<usize>,
    pub(super) mono_arrows: Vec<ArrowGlyph>,

    pub(super) waypoints: Vec<Circle>,
    pub(super) waypoint_p: Vec<Vec2>,
    pub(super) waypoint_indices: Vec<usize>,

    pub(super) waypoint_labels: BTreeMap<usize, TextLabel>,
    pub(super) connector_labels: BTreeMap<usize, TextLabel>,
}

impl FloorBucket {
    pub(super) fn push_bidirectional(&mut self, capsule: Capsule, lane: usize) {
        self.bi_lanes.push(capsule);
        self.bi_indices.push(lane);
    }

    pub(super) fn push_one_way(&mut self, capsule: Capsule, arrow: ArrowGlyph, lane: usize) {
        self.mono_lanes.push(capsule);
        self.mono_indices.push(lane);
        self.mono_arrows.push(arrow);
    }

    pub(super) fn push_waypoint(&mut self, circle: Circle, waypoint: usize) {
        self.waypoint_p.push(circle.center());
        self.waypoints.push(circle);
        self.waypoint_indices.push(waypoint);
    }

    pub(super) fn assert_aligned(&self) {
        assert_eq!(self.bi_lanes.len(), self.bi_indices.len());
        assert_eq!(self.mono_lanes.len(), self.mono_indices.len());
        assert_eq!(self.mono_lanes.len(), self.mono_arrows.len());
        assert_eq!(self.waypoints.len(), self.waypoint_indices.len());
        assert_eq!(self.waypoints.len(), self.waypoint_p.len());
    }

    pub fn bi_lanes(&self) -> &[Capsule] {
        &self.bi_lanes
    }

    /// Source lane index of each entry in `bi_lanes`.
    pub fn bi_indices(&self) -> &[usize] {
        &self.bi_indices
    }

    pub fn mono_lanes(&self) -> &[Capsule] {
        &self.mono_lanes
    }

    /// Source lane index of each entry in `mono_lanes`.
    pub fn mono_indices(&self) -> &[usize] {
        &self.mono_indices
    }

    pub fn mono_arrows(&self) -> &[ArrowGlyph] {
        &self.mono_arrows
    }

    pub fn waypoints(&self) -> &[Circle] {
        &self.waypoints
    }

    pub fn waypoint_positions(&self) -> &[Vec2] {
        &self.waypoint_p
    }

    /// Source waypoint index of each entry in `waypoints`.
    pub fn waypoint_indices(&self) -> &[usize] {
        &self.waypoint_indices
    }

    pub fn waypoint_labels(&self) -> &BTreeMap<usize, TextLabel> {
        &self.waypoint_labels
    }

    pub fn connector_labels(&self) -> &BTreeMap<usize, TextLabel> {
        &self.connector_labels
    }

    pub fn waypoint_label(&self, waypoint: usize) -> Option<&TextLabel> {
        self.waypoint_labels.get(&waypoint)
    }

    pub fn connector_label(&self, waypoint: usize) -> Option<&TextLabel> {
        self.connector_labels.get(&waypoint)
    }

    pub(super) fn find_waypoint_mut(&mut self, waypoint: usize) -> Option<&mut Circle> {
        let slot = self.waypoint_indices.iter().position(|&idx| idx == waypoint)?;
        self.waypoints.get_mut(slot)
    }

    pub(super) fn find_bi_lane_mut(&mut self, lane: usize) -> Option<&mut Capsule> {
        let slot = self.bi_indices.iter().position(|&idx| idx == lane)?;
        self.bi_lanes.get_mut(slot)
    }

    pub(super) fn find_mono_lane_mut(&mut self, lane: usize) -> Option<&mut Capsule> {
        let slot = self.mono_indices.iter().position(|&idx| idx == lane)?;
        self.mono_lanes.get_mut(slot)
    }

    pub(super) fn lane_capsule(&self, lane: usize) -> Option<(&Capsule, bool)> {
        if let Some(slot) = self.bi_indices.iter().position(|&idx| idx == lane) {
            return self.bi_lanes.get(slot).map(|capsule| (capsule, true));
        }
        let slot = self.mono_indices.iter().position(|&idx| idx == lane)?;
        self.mono_lanes.get(slot).map(|capsule| (capsule, false))
    }

    pub(super) fn has_waypoint(&self, waypoint: usize) -> bool {
        self.waypoint_indices.contains(&waypoint)
    }
}
