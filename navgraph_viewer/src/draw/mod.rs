//! Render primitives used by the graph view and the targets that consume
//! them. The primitive set is closed: lanes are capsules, waypoints are
//! circles, one-way lanes carry an arrow glyph, and everything textual is a
//! `TextLabel`. A `DrawTarget` receives them one at a time in the order the
//! view issues them.

mod capsule;
mod shapes;
pub mod text;

use serde::{Deserialize, Serialize};

pub use capsule::Capsule;
pub use shapes::{ArrowGlyph, Circle};
pub use text::{FixedAdvanceFont, GlyphBitmap, LabelFont, TEXT_SCALE, TextLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// One drawable handed to a target. Borrowed so walking a floor never clones
/// its geometry.
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    Capsule(&'a Capsule),
    Circle(&'a Circle),
    Arrow(&'a ArrowGlyph),
    Label(&'a TextLabel),
}

pub trait DrawTarget {
    fn draw(&mut self, primitive: Primitive<'_>);
}

/// Owned copy of a primitive, as recorded by `DrawList`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Capsule(Capsule),
    Circle(Circle),
    Arrow(ArrowGlyph),
    Label(TextLabel),
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Capsule(_) => "capsule",
            DrawCommand::Circle(_) => "circle",
            DrawCommand::Arrow(_) => "arrow",
            DrawCommand::Label(_) => "label",
        }
    }
}

/// Target that records every primitive it receives, in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command kinds with consecutive repeats collapsed, e.g.
    /// `["capsule", "arrow", "circle", "label"]`.
    pub fn kind_runs(&self) -> Vec<&'static str> {
        let mut runs: Vec<&'static str> = Vec::new();
        for command in &self.commands {
            let kind = command.kind();
            if runs.last() != Some(&kind) {
                runs.push(kind);
            }
        }
        runs
    }
}

impl DrawTarget for DrawList {
    fn draw(&mut self, primitive: Primitive<'_>) {
        let command = match primitive {
            Primitive::Capsule(capsule) => DrawCommand::Capsule(capsule.clone()),
            Primitive::Circle(circle) => DrawCommand::Circle(circle.clone()),
            Primitive::Arrow(arrow) => DrawCommand::Arrow(arrow.clone()),
            Primitive::Label(label) => DrawCommand::Label(label.clone()),
        };
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn lerp_hits_both_ends_and_midpoint() {
        let start = Color::WHITE;
        let end = Color::rgb(85, 85, 85);
        assert_eq!(start.lerp(end, 0.0), start);
        assert_eq!(start.lerp(end, 1.0), end);
        assert_eq!(start.lerp(end, 0.5), Color::rgb(170, 170, 170));
        assert_eq!(start.lerp(end, 4.0), end);
    }

    #[test]
    fn draw_list_records_in_order_and_collapses_runs() {
        let a = Capsule::new(Vec2::ZERO, Color::WHITE, Vec2::X, Color::WHITE, 0.5);
        let b = Capsule::new(Vec2::ZERO, Color::WHITE, Vec2::Y, Color::WHITE, 0.5);
        let circle = Circle::new(Vec2::ZERO, 0.3, Color::BLUE);

        let mut list = DrawList::new();
        list.draw(Primitive::Capsule(&a));
        list.draw(Primitive::Capsule(&b));
        list.draw(Primitive::Circle(&circle));

        assert_eq!(list.len(), 3);
        assert_eq!(list.kind_runs(), vec!["capsule", "circle"]);
        assert_eq!(list.commands()[1], DrawCommand::Capsule(b));
    }

    #[test]
    fn draw_commands_serialise_with_kind_tag() {
        let circle = Circle::new(Vec2::new(1.0, 2.0), 0.3, Color::BLUE);
        let mut list = DrawList::new();
        list.draw(Primitive::Circle(&circle));
        let json = serde_json::to_value(&list).expect("serialise");
        assert_eq!(json["commands"][0]["kind"], "circle");
        assert_eq!(json["commands"][0]["radius"], 0.3f32 as f64);
    }
}
