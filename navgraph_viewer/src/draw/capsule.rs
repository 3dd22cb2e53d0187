use glam::Vec2;
use serde::Serialize;

use super::Color;
use crate::fit::Bounds;

/// Line segment swept by a disc of `half_width`. The fill blends from
/// `start_color` at `start` to `end_color` at `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capsule {
    start: Vec2,
    end: Vec2,
    half_width: f32,
    start_color: Color,
    end_color: Color,
}

impl Capsule {
    pub fn new(
        start: Vec2,
        start_color: Color,
        end: Vec2,
        end_color: Color,
        half_width: f32,
    ) -> Self {
        Self {
            start,
            end,
            half_width,
            start_color,
            end_color,
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn start_color(&self) -> Color {
        self.start_color
    }

    pub fn end_color(&self) -> Color {
        self.end_color
    }

    pub fn set_start_color(&mut self, color: Color) -> &mut Self {
        self.start_color = color;
        self
    }

    pub fn set_end_color(&mut self, color: Color) -> &mut Self {
        self.end_color = color;
        self
    }

    /// Parameter in `[0, 1]` of the segment point closest to `point`.
    pub fn closest_parameter(&self, point: Vec2) -> f32 {
        let axis = self.end - self.start;
        let length_sq = axis.length_squared();
        if length_sq <= f32::EPSILON {
            return 0.0;
        }
        ((point - self.start).dot(axis) / length_sq).clamp(0.0, 1.0)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        let t = self.closest_parameter(point);
        let closest = self.start + (self.end - self.start) * t;
        closest.distance(point)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.distance_to(point) <= self.half_width
    }

    pub fn color_at(&self, t: f32) -> Color {
        self.start_color.lerp(self.end_color, t)
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        bounds.expand(self.start);
        bounds.expand(self.end);
        bounds.pad(self.half_width);
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane() -> Capsule {
        Capsule::new(
            Vec2::new(0.0, 0.0),
            Color::WHITE,
            Vec2::new(10.0, 0.0),
            Color::BLACK,
            1.0,
        )
    }

    #[test]
    fn contains_points_along_the_body() {
        let capsule = lane();
        assert!(capsule.contains(Vec2::new(5.0, 0.0)));
        assert!(capsule.contains(Vec2::new(5.0, 1.0)));
        assert!(!capsule.contains(Vec2::new(5.0, 1.01)));
    }

    #[test]
    fn end_caps_are_round() {
        let capsule = lane();
        assert!(capsule.contains(Vec2::new(-0.7, 0.7)));
        assert!(!capsule.contains(Vec2::new(-0.8, 0.8)));
        assert!(capsule.contains(Vec2::new(11.0, 0.0)));
        assert!(!capsule.contains(Vec2::new(11.0, 0.5)));
    }

    #[test]
    fn degenerate_segment_behaves_like_a_disc() {
        let capsule = Capsule::new(Vec2::ONE, Color::WHITE, Vec2::ONE, Color::WHITE, 0.5);
        assert!(capsule.contains(Vec2::new(1.4, 1.0)));
        assert!(!capsule.contains(Vec2::new(1.6, 1.0)));
    }

    #[test]
    fn colors_are_independent_and_chainable() {
        let mut capsule = lane();
        capsule
            .set_start_color(Color::CYAN)
            .set_end_color(Color::YELLOW);
        assert_eq!(capsule.start_color(), Color::CYAN);
        assert_eq!(capsule.end_color(), Color::YELLOW);
        assert_eq!(capsule.color_at(0.0), Color::CYAN);
        assert_eq!(capsule.color_at(1.0), Color::YELLOW);
    }

    #[test]
    fn bounds_include_the_half_width() {
        let bounds = lane().bounds();
        assert_eq!(bounds.min, Vec2::new(-1.0, -1.0));
        assert_eq!(bounds.max, Vec2::new(11.0, 1.0));
    }
}
