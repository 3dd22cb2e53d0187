//! Software rasteriser used for headless frame export. Shapes are filled by
//! testing each covered pixel center against the primitive in world space,
//! so what is painted matches what `GraphView::pick` reports.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::{Result, ensure};
use glam::{UVec2, Vec2};
use image::{ColorType, ImageEncoder, codecs::png::PngEncoder};

use crate::draw::{ArrowGlyph, Capsule, Circle, Color, DrawTarget, LabelFont, Primitive, TextLabel};
use crate::fit::{Bounds, ViewTransform};

pub const DEFAULT_BACKGROUND: Color = Color::rgb(16, 20, 28);

pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    transform: ViewTransform,
    font: Arc<dyn LabelFont>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterStats {
    pub total_pixels: u32,
    pub painted_pixels: u32,
}

impl Raster {
    pub fn new(
        size: UVec2,
        transform: ViewTransform,
        background: Color,
        font: Arc<dyn LabelFont>,
    ) -> Self {
        let width = size.x.max(1);
        let height = size.y.max(1);
        let mut raster = Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
            transform,
            font,
        };
        raster.clear(background);
        raster
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color.to_array());
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let rgba: [u8; 4] = self.pixels[idx..idx + 4].try_into().ok()?;
        Some(Color::from_array(rgba))
    }

    /// Pixels whose color differs from `background`.
    pub fn stats(&self, background: Color) -> RasterStats {
        let background = background.to_array();
        let painted = self
            .pixels
            .chunks_exact(4)
            .filter(|chunk| *chunk != background)
            .count();
        RasterStats {
            total_pixels: self.width * self.height,
            painted_pixels: painted as u32,
        }
    }

    pub fn write_png(&self, destination: &Path) -> Result<()> {
        let expected_len = self.width as usize * self.height as usize * 4;
        ensure!(
            self.pixels.len() == expected_len,
            "RGBA buffer size {} does not match dimensions {}x{}",
            self.pixels.len(),
            self.width,
            self.height
        );
        let file = File::create(destination)?;
        let encoder = PngEncoder::new(file);
        encoder.write_image(&self.pixels, self.width, self.height, ColorType::Rgba8.into())?;
        Ok(())
    }

    fn fill_world<F>(&mut self, bounds: Bounds, mut shade: F)
    where
        F: FnMut(Vec2) -> Option<Color>,
    {
        let Some((x0, y0, x1, y1)) = self.screen_span(&bounds) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(color) = shade(self.transform.screen_to_world(center)) {
                    self.blend(x, y, color, 255);
                }
            }
        }
    }

    fn screen_span(&self, bounds: &Bounds) -> Option<(u32, u32, u32, u32)> {
        if bounds.is_empty() {
            return None;
        }
        let a = self.transform.world_to_screen(bounds.min);
        let b = self.transform.world_to_screen(bounds.max);
        let min = a.min(b).floor().max(Vec2::ZERO);
        let max = a.max(b).ceil().min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return None;
        }
        Some((min.x as u32, min.y as u32, max.x as u32, max.y as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let alpha = (coverage as u32 * color.a as u32) / 255;
        if alpha == 0 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let src = color.to_array();
        for channel in 0..3 {
            let dst = self.pixels[idx + channel] as u32;
            self.pixels[idx + channel] =
                ((src[channel] as u32 * alpha + dst * (255 - alpha)) / 255) as u8;
        }
        self.pixels[idx + 3] = 255;
    }

    fn draw_capsule(&mut self, capsule: &Capsule) {
        self.fill_world(capsule.bounds(), |point| {
            capsule
                .contains(point)
                .then(|| capsule.color_at(capsule.closest_parameter(point)))
        });
    }

    fn draw_circle(&mut self, circle: &Circle) {
        let mut bounds = Bounds::empty();
        bounds.expand(circle.center());
        bounds.pad(circle.radius());
        self.fill_world(bounds, |point| circle.contains(point).then(|| circle.fill()));
    }

    fn draw_arrow(&mut self, arrow: &ArrowGlyph) {
        let mut bounds = Bounds::empty();
        for vertex in arrow.vertices() {
            bounds.expand(vertex);
        }
        self.fill_world(bounds, |point| arrow.contains(point).then(|| arrow.color()));
    }

    fn draw_label(&mut self, label: &TextLabel) {
        let font = Arc::clone(&self.font);
        let local_px = label.character_size() as f32;
        let screen_px = local_px * label.scale().x.abs() * self.transform.scale();
        if screen_px < 1.0 {
            return;
        }

        let ascent = font.ascent(local_px);
        let mut pen_x = 0.0f32;
        for ch in label.text().chars() {
            let pen = self
                .transform
                .world_to_screen(label.local_to_world(Vec2::new(pen_x, ascent)));
            pen_x += font.advance(ch, local_px);

            let Some(glyph) = font.rasterize(ch, screen_px) else {
                continue;
            };
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let start_x = pen.x.round() as i32 + glyph.xmin;
            let start_y = pen.y.round() as i32 - (glyph.ymin + glyph.height as i32);
            for gy in 0..glyph.height {
                let dest_y = start_y + gy as i32;
                if dest_y < 0 {
                    continue;
                }
                let row = gy as usize * glyph.width as usize;
                for gx in 0..glyph.width {
                    let coverage = glyph.alpha[row + gx as usize];
                    let dest_x = start_x + gx as i32;
                    if coverage == 0 || dest_x < 0 {
                        continue;
                    }
                    self.blend(dest_x as u32, dest_y as u32, label.color(), coverage);
                }
            }
        }
    }
}

impl DrawTarget for Raster {
    fn draw(&mut self, primitive: Primitive<'_>) {
        match primitive {
            Primitive::Capsule(capsule) => self.draw_capsule(capsule),
            Primitive::Circle(circle) => self.draw_circle(circle),
            Primitive::Arrow(arrow) => self.draw_arrow(arrow),
            Primitive::Label(label) => self.draw_label(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::FixedAdvanceFont;
    use crate::fit::Fit;

    fn raster_for(bounds: Bounds) -> Raster {
        let size = UVec2::new(120, 40);
        let transform = Fit::new([bounds], 0.0).compute_transform(size);
        Raster::new(
            size,
            transform,
            DEFAULT_BACKGROUND,
            Arc::new(FixedAdvanceFont::default()),
        )
    }

    #[test]
    fn capsule_paints_its_body_and_leaves_corners_clear() {
        let capsule = Capsule::new(
            Vec2::new(0.0, 0.0),
            Color::WHITE,
            Vec2::new(10.0, 0.0),
            Color::WHITE,
            1.0,
        );
        let mut raster = raster_for(capsule.bounds());
        raster.draw(Primitive::Capsule(&capsule));

        // 12 x 2 world units onto 120 x 40 pixels: 10 pixels per unit, centered.
        assert_eq!(raster.pixel(60, 20), Some(Color::WHITE));
        assert_eq!(raster.pixel(0, 10), Some(DEFAULT_BACKGROUND));
        let stats = raster.stats(DEFAULT_BACKGROUND);
        assert!(stats.painted_pixels > 1500);
        assert!(stats.painted_pixels < stats.total_pixels);
    }

    #[test]
    fn one_way_gradient_darkens_toward_the_exit() {
        let capsule = Capsule::new(
            Vec2::new(0.0, 0.0),
            Color::WHITE,
            Vec2::new(10.0, 0.0),
            Color::rgb(85, 85, 85),
            1.0,
        );
        let mut raster = raster_for(capsule.bounds());
        raster.draw(Primitive::Capsule(&capsule));
        let near_entry = raster.pixel(15, 20).unwrap();
        let near_exit = raster.pixel(105, 20).unwrap();
        assert!(near_entry.r > near_exit.r);
    }

    #[test]
    fn labels_without_glyphs_leave_the_frame_untouched() {
        let font = FixedAdvanceFont::default();
        let mut label = TextLabel::new("dock", 24, &font);
        label.set_position(Vec2::new(5.0, 0.0));
        let mut raster = raster_for(Bounds::new(Vec2::new(-1.0, -1.0), Vec2::new(11.0, 1.0)));
        raster.draw(Primitive::Label(&label));
        assert_eq!(raster.stats(DEFAULT_BACKGROUND).painted_pixels, 0);
    }

    #[test]
    fn writes_png_file() {
        let raster = raster_for(Bounds::new(Vec2::ZERO, Vec2::ONE));
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("frame.png");
        raster.write_png(&path).expect("write png");
        assert!(path.metadata().expect("metadata").len() > 0);
    }
}
