//! Text labels placed in world space. Labels are laid out in local pixel
//! units at a character size, centered on their origin, and mapped into the
//! world with `TEXT_SCALE` (y flipped, since the world is y-up). Metrics come
//! from a `LabelFont`: a TTF loaded through fontdue, or fixed advance metrics
//! when no font file is available.

use std::{fs, path::Path, sync::Arc};

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use super::Color;
use crate::fit::Bounds;

/// Local pixel units to world units.
pub const TEXT_SCALE: Vec2 = Vec2::new(1.0 / 40.0, -1.0 / 40.0);

#[derive(Debug, Error)]
pub enum FontError {
    #[error("reading font {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parsing font {path}: {reason}")]
    Parse { path: String, reason: &'static str },
}

/// Coverage bitmap for one glyph, as produced by fontdue.
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub xmin: i32,
    pub ymin: i32,
    pub alpha: Arc<[u8]>,
}

pub trait LabelFont {
    /// Horizontal pen advance for `ch` at `px` pixels.
    fn advance(&self, ch: char, px: f32) -> f32;

    fn line_height(&self, px: f32) -> f32;

    fn ascent(&self, px: f32) -> f32;

    fn rasterize(&self, _ch: char, _px: f32) -> Option<GlyphBitmap> {
        None
    }

    fn measure(&self, text: &str, px: f32) -> Vec2 {
        let width = text.chars().map(|ch| self.advance(ch, px)).sum();
        Vec2::new(width, self.line_height(px))
    }
}

impl LabelFont for fontdue::Font {
    fn advance(&self, ch: char, px: f32) -> f32 {
        self.metrics(ch, px).advance_width
    }

    fn line_height(&self, px: f32) -> f32 {
        self.horizontal_line_metrics(px)
            .map(|metrics| metrics.ascent - metrics.descent)
            .unwrap_or(px)
    }

    fn ascent(&self, px: f32) -> f32 {
        self.horizontal_line_metrics(px)
            .map(|metrics| metrics.ascent)
            .unwrap_or(px * 0.8)
    }

    fn rasterize(&self, ch: char, px: f32) -> Option<GlyphBitmap> {
        let (metrics, bitmap) = fontdue::Font::rasterize(self, ch, px);
        Some(GlyphBitmap {
            width: metrics.width as u32,
            height: metrics.height as u32,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            alpha: Arc::from(bitmap.into_boxed_slice()),
        })
    }
}

/// Monospace metrics with no glyph shapes. Lets the view lay out labels
/// without a font file; raster output then omits the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceFont {
    pub advance_ratio: f32,
    pub line_ratio: f32,
}

impl Default for FixedAdvanceFont {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_ratio: 1.0,
        }
    }
}

impl LabelFont for FixedAdvanceFont {
    fn advance(&self, _ch: char, px: f32) -> f32 {
        px * self.advance_ratio
    }

    fn line_height(&self, px: f32) -> f32 {
        px * self.line_ratio
    }

    fn ascent(&self, px: f32) -> f32 {
        px * self.line_ratio * 0.8
    }
}

pub fn load_font(path: &Path) -> Result<fontdue::Font, FontError> {
    let data = fs::read(path).map_err(|source| FontError::Read {
        path: path.display().to_string(),
        source,
    })?;
    fontdue::Font::from_bytes(data, fontdue::FontSettings::default()).map_err(|reason| {
        FontError::Parse {
            path: path.display().to_string(),
            reason,
        }
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    text: String,
    character_size: u32,
    position: Vec2,
    origin: Vec2,
    scale: Vec2,
    local_size: Vec2,
    color: Color,
}

impl TextLabel {
    /// Label measured with `font` and centered on its origin.
    pub fn new(text: impl Into<String>, character_size: u32, font: &dyn LabelFont) -> Self {
        let mut label = Self {
            text: text.into(),
            character_size,
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            scale: TEXT_SCALE,
            local_size: Vec2::ZERO,
            color: Color::WHITE,
        };
        label.relayout(font);
        label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn character_size(&self) -> u32 {
        self.character_size
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn local_size(&self) -> Vec2 {
        self.local_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_position(&mut self, position: Vec2) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn set_character_size(&mut self, character_size: u32, font: &dyn LabelFont) {
        self.character_size = character_size;
        self.relayout(font);
    }

    /// Signed world-space height of the label; negative because the text
    /// scale flips y.
    pub fn world_height(&self) -> f32 {
        self.local_size.y * self.scale.y
    }

    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + (local - self.origin) * self.scale
    }

    pub fn world_bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        bounds.expand(self.local_to_world(Vec2::ZERO));
        bounds.expand(self.local_to_world(self.local_size));
        bounds
    }

    fn relayout(&mut self, font: &dyn LabelFont) {
        self.local_size = font.measure(&self.text, self.character_size as f32);
        self.origin = self.local_size * 0.5;
    }
}
