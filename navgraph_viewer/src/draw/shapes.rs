use glam::Vec2;
use serde::Serialize;

use super::Color;

// Arrow geometry in world units, relative to the lane midpoint.
const ARROW_SIDE: f32 = 0.25;
const ARROW_CENTER_SPACING: f32 = 0.0625;
const ARROW_LENGTH: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    center: Vec2,
    radius: f32,
    fill: Color,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32, fill: Color) -> Self {
        Self {
            center,
            radius,
            fill,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius
    }
}

/// Filled triangle marking the travel direction of a one-way lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowGlyph {
    vertices: [Vec2; 3],
    color: Color,
}

impl ArrowGlyph {
    /// Arrow sitting on the midpoint of `start -> end`: the base straddles the
    /// segment just past the midpoint and the tip points toward `end`.
    pub fn along(start: Vec2, end: Vec2, color: Color) -> Self {
        let center = (start + end) * 0.5;
        let direction = (end - start).normalize_or_zero();
        let perpendicular = direction.perp();
        let base = center + direction * ARROW_CENTER_SPACING;

        Self {
            vertices: [
                base - perpendicular * ARROW_SIDE,
                base + perpendicular * ARROW_SIDE,
                center + direction * (ARROW_LENGTH + ARROW_CENTER_SPACING),
            ],
            color,
        }
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        self.vertices
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn centroid(&self) -> Vec2 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let [a, b, c] = self.vertices;
        let d0 = (b - a).perp_dot(point - a);
        let d1 = (c - b).perp_dot(point - b);
        let d2 = (a - c).perp_dot(point - c);
        let has_negative = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
        let has_positive = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
        !(has_negative && has_positive)
    }
}
