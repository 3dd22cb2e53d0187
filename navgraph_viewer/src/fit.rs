//! World bounds and the transform that fits them into a viewport. The world is
//! y-up and the viewport is y-down, so the transform flips the vertical axis.

use glam::{UVec2, Vec2};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Inverted box that any `expand` call replaces.
    pub fn empty() -> Self {
        Self {
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand(&mut self, point: Vec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&mut self, other: &Bounds) {
        if other.is_empty() {
            return;
        }
        self.expand(other.min);
        self.expand(other.max);
    }

    pub fn pad(&mut self, amount: f32) {
        self.min -= Vec2::splat(amount);
        self.max += Vec2::splat(amount);
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.y >= self.min.y && point.x <= self.max.x && point.y <= self.max.y
    }
}

/// Fits the union of a set of bounds into a viewport, leaving `margin` (a
/// fraction of the viewport) free on every side.
#[derive(Debug, Clone, Copy)]
pub struct Fit {
    bounds: Bounds,
    margin: f32,
}

impl Fit {
    pub fn new(bounds: impl IntoIterator<Item = Bounds>, margin: f32) -> Self {
        let mut total = Bounds::empty();
        for item in bounds {
            total.union(&item);
        }
        Self {
            bounds: total,
            margin: margin.clamp(0.0, 0.49),
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn compute_transform(&self, viewport: UVec2) -> ViewTransform {
        let viewport = viewport.max(UVec2::ONE).as_vec2();
        if self.bounds.is_empty() {
            return ViewTransform {
                scale: 1.0,
                world_origin: Vec2::ZERO,
                screen_offset: viewport * 0.5,
                viewport_height: viewport.y,
            };
        }

        let usable = viewport * (1.0 - 2.0 * self.margin);
        let extent = Vec2::new(self.bounds.width(), self.bounds.height());
        let scale_x = if extent.x > f32::EPSILON {
            usable.x / extent.x
        } else {
            f32::INFINITY
        };
        let scale_y = if extent.y > f32::EPSILON {
            usable.y / extent.y
        } else {
            f32::INFINITY
        };
        let mut scale = scale_x.min(scale_y);
        if !scale.is_finite() {
            scale = 1.0;
        }

        ViewTransform {
            scale,
            world_origin: self.bounds.min,
            screen_offset: (viewport - extent * scale) * 0.5,
            viewport_height: viewport.y,
        }
    }
}

/// Uniform scale plus translation from world to viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    world_origin: Vec2,
    screen_offset: Vec2,
    viewport_height: f32,
}

impl ViewTransform {
    /// Pixels per world unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let local = (world - self.world_origin) * self.scale + self.screen_offset;
        Vec2::new(local.x, self.viewport_height - local.y)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let local = Vec2::new(screen.x, self.viewport_height - screen.y);
        (local - self.screen_offset) / self.scale + self.world_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn empty_bounds_expand_to_first_point() {
        let mut bounds = Bounds::empty();
        assert!(bounds.is_empty());
        bounds.expand(Vec2::new(3.0, -1.0));
        assert_eq!(bounds.min, Vec2::new(3.0, -1.0));
        assert_eq!(bounds.max, Vec2::new(3.0, -1.0));
        assert!(!bounds.is_empty());
    }

    #[test]
    fn padded_bounds_contain_points_near_the_edge() {
        let mut bounds = Bounds::new(Vec2::ZERO, Vec2::new(4.0, 2.0));
        assert!(bounds.contains(Vec2::new(4.0, 0.0)));
        assert!(!bounds.contains(Vec2::new(4.2, 0.0)));
        bounds.pad(0.3);
        assert!(bounds.contains(Vec2::new(4.2, -0.3)));

        let mut empty = Bounds::empty();
        empty.pad(0.3);
        assert!(!empty.contains(Vec2::ZERO));
    }

    #[test]
    fn fit_keeps_bounds_inside_viewport_with_margin() {
        let bounds = Bounds::new(Vec2::new(-1.0, -1.0), Vec2::new(11.0, 1.0));
        let transform = Fit::new([bounds], 0.02).compute_transform(UVec2::new(1000, 500));

        let lower_left = transform.world_to_screen(bounds.min);
        let upper_right = transform.world_to_screen(bounds.max);
        assert!((lower_left.x - 20.0).abs() < EPSILON);
        assert!((upper_right.x - 980.0).abs() < EPSILON);
        assert!(lower_left.y > upper_right.y, "world up should be screen up");
        assert!((transform.world_to_screen(bounds.center()).y - 250.0).abs() < EPSILON);
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let bounds = Bounds::new(Vec2::new(2.0, 5.0), Vec2::new(8.0, 20.0));
        let transform = Fit::new([bounds], 0.1).compute_transform(UVec2::new(640, 480));
        let world = Vec2::new(4.5, 12.25);
        let round_trip = transform.screen_to_world(transform.world_to_screen(world));
        assert!((round_trip - world).length() < EPSILON);
    }

    #[test]
    fn unions_multiple_bounds_and_skips_empty_ones() {
        let fit = Fit::new(
            [
                Bounds::new(Vec2::ZERO, Vec2::ONE),
                Bounds::empty(),
                Bounds::new(Vec2::new(-2.0, 0.5), Vec2::new(0.0, 3.0)),
            ],
            0.0,
        );
        assert_eq!(fit.bounds().min, Vec2::new(-2.0, 0.0));
        assert_eq!(fit.bounds().max, Vec2::new(1.0, 3.0));
    }
}
