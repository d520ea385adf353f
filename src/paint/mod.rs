//! Paint pad
//!
//! A small fixed-size drawing surface: brush, eraser and paint bucket over
//! an RGBA buffer, exported as a PNG data URL for the gallery.

pub mod buffer;
pub mod export;
pub mod fill;
pub mod stroke;

pub use buffer::{PixelBuffer, Rgba};
pub use export::{PNG_DATA_URL_PREFIX, encode_png, to_data_url};
pub use fill::flood_fill;
pub use stroke::{BlendMode, composite, stroke_segment};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::gallery::{ImageStore, normalize_author};
use crate::settings::Settings;

/// Active drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    /// Paint bucket
    Fill,
}

impl Tool {
    /// Blend mode for strokes; the bucket does not stroke
    pub fn blend_mode(&self) -> Option<BlendMode> {
        match self {
            Tool::Brush => Some(BlendMode::SourceOver),
            Tool::Eraser => Some(BlendMode::DestinationOut),
            Tool::Fill => None,
        }
    }
}

/// Default color swatches
pub const DEFAULT_PALETTE: [Rgba; 8] = [
    Rgba::rgb(0x00, 0x00, 0x00),
    Rgba::rgb(0xff, 0xff, 0xff),
    Rgba::rgb(0xff, 0x00, 0x00),
    Rgba::rgb(0x00, 0xff, 0x00),
    Rgba::rgb(0x00, 0x00, 0xff),
    Rgba::rgb(0xff, 0xff, 0x00),
    Rgba::rgb(0xff, 0x00, 0xff),
    Rgba::rgb(0x00, 0xff, 0xff),
];

/// Drawing session over a pixel buffer
#[derive(Debug, Clone)]
pub struct PaintPad {
    buffer: PixelBuffer,
    pub tool: Tool,
    pub color: Rgba,
    brush_size: f32,
    /// Last sampled pointer position while a stroke is active
    last_point: Option<Vec2>,
    /// Set whenever pixels change, cleared by the renderer
    dirty: bool,
}

impl PaintPad {
    /// White pad of the given size with a small black brush
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height, Rgba::WHITE)?,
            tool: Tool::Brush,
            color: Rgba::BLACK,
            brush_size: DEFAULT_BRUSH_SIZE,
            last_point: None,
            dirty: true,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut pad = Self::new(settings.pad_width, settings.pad_height)?;
        pad.color = settings.brush_color;
        pad.set_brush_size(settings.brush_size);
        Ok(pad)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// Pick color `index` from `palette`. The eraser hands over to the brush.
    pub fn select_swatch(&mut self, palette: &[Rgba], index: usize) -> bool {
        let Some(&color) = palette.get(index) else {
            return false;
        };
        self.color = color;
        if self.tool == Tool::Eraser {
            self.tool = Tool::Brush;
        }
        true
    }

    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    /// Returns true once per change, for redraw throttling
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Pointer went down: start a stroke, or fill with the bucket
    pub fn pointer_down(&mut self, p: Vec2) {
        match self.tool {
            Tool::Fill => {
                let seed = (p.x.floor() as i32, p.y.floor() as i32);
                self.flood_fill(seed, self.color);
            }
            Tool::Brush | Tool::Eraser => self.last_point = Some(p),
        }
    }

    /// Pointer moved: extend the active stroke to `p`
    pub fn pointer_move(&mut self, p: Vec2) {
        let Some(last) = self.last_point else {
            return;
        };
        self.stroke(last, p, self.tool, self.color, self.brush_size);
        self.last_point = Some(p);
    }

    /// Pointer released or left the pad
    pub fn pointer_up(&mut self) {
        self.last_point = None;
    }

    /// Draw one segment with the given tool. The bucket tool draws nothing.
    pub fn stroke(&mut self, from: Vec2, to: Vec2, tool: Tool, color: Rgba, size: f32) {
        let Some(mode) = tool.blend_mode() else {
            return;
        };
        if stroke_segment(&mut self.buffer, from, to, color, size, mode) > 0 {
            self.dirty = true;
        }
    }

    /// Paint-bucket fill; returns pixels written
    pub fn flood_fill(&mut self, seed: (i32, i32), color: Rgba) -> usize {
        let filled = flood_fill(&mut self.buffer, seed, color);
        if filled > 0 {
            self.dirty = true;
        }
        filled
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_point = None;
        self.dirty = true;
    }

    /// PNG data URL of the current drawing
    pub fn export(&self) -> Result<String> {
        to_data_url(&self.buffer)
    }

    /// Send the drawing to the gallery. Clears the pad when it was accepted.
    pub fn submit<S: ImageStore>(&mut self, store: &mut S, author: &str, now_ms: f64) -> bool {
        let image = match self.export() {
            Ok(image) => image,
            Err(e) => {
                log::error!("Could not export drawing: {}", e);
                return false;
            }
        };
        let author = normalize_author(author);
        let stored = store.store(&image, &author, now_ms);
        if stored {
            log::info!("Drawing by {} added to gallery", author);
            self.clear();
        } else {
            log::warn!("Gallery rejected drawing by {}", author);
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{GalleryItem, MonthlyGallery};

    /// Store that refuses everything
    struct Refusing;

    impl ImageStore for Refusing {
        fn store(&mut self, _image: &str, _author: &str, _now_ms: f64) -> bool {
            false
        }

        fn list(&mut self, _now_ms: f64) -> Vec<GalleryItem> {
            Vec::new()
        }
    }

    fn black_pixels(pad: &PaintPad) -> usize {
        pad.buffer()
            .pixels()
            .iter()
            .filter(|p| **p == Rgba::BLACK)
            .count()
    }

    #[test]
    fn test_default_pad() {
        let pad = PaintPad::new(PAD_WIDTH, PAD_HEIGHT).unwrap();
        assert_eq!(pad.buffer().width(), 400);
        assert_eq!(pad.buffer().height(), 300);
        assert_eq!(pad.buffer().get(0, 0), Some(Rgba::WHITE));
        assert_eq!(pad.brush_size(), 4.0);
    }

    #[test]
    fn test_move_without_down_draws_nothing() {
        let mut pad = PaintPad::new(50, 50).unwrap();
        pad.pointer_move(Vec2::new(10.0, 10.0));
        pad.pointer_move(Vec2::new(30.0, 30.0));
        assert_eq!(black_pixels(&pad), 0);
    }

    #[test]
    fn test_strokes_chain_from_previous_point() {
        let mut pad = PaintPad::new(50, 50).unwrap();
        pad.pointer_down(Vec2::new(5.0, 10.0));
        pad.pointer_move(Vec2::new(20.0, 10.0));
        pad.pointer_move(Vec2::new(20.0, 40.0));
        pad.pointer_up();

        assert_eq!(pad.buffer().get(12, 10), Some(Rgba::BLACK));
        assert_eq!(pad.buffer().get(20, 30), Some(Rgba::BLACK));
        // Not on either segment
        assert_eq!(pad.buffer().get(10, 30), Some(Rgba::WHITE));

        let count = black_pixels(&pad);
        pad.pointer_move(Vec2::new(45.0, 45.0));
        assert_eq!(black_pixels(&pad), count);
    }

    #[test]
    fn test_eraser_tool() {
        let mut pad = PaintPad::new(50, 50).unwrap();
        pad.pointer_down(Vec2::new(5.0, 25.0));
        pad.pointer_move(Vec2::new(45.0, 25.0));
        pad.pointer_up();

        pad.tool = Tool::Eraser;
        pad.pointer_down(Vec2::new(20.0, 25.0));
        pad.pointer_move(Vec2::new(30.0, 25.0));
        pad.pointer_up();

        assert_eq!(pad.buffer().get(25, 25), Some(Rgba::TRANSPARENT));
        assert_eq!(pad.buffer().get(10, 25), Some(Rgba::BLACK));
    }

    #[test]
    fn test_bucket_fills_on_pointer_down() {
        let mut pad = PaintPad::new(20, 20).unwrap();
        pad.tool = Tool::Fill;
        pad.color = Rgba::rgb(0, 0, 255);
        pad.pointer_down(Vec2::new(3.7, 4.2));
        assert!(!pad.is_drawing());
        assert!(pad.buffer().pixels().iter().all(|p| *p == Rgba::rgb(0, 0, 255)));
    }

    #[test]
    fn test_brush_size_clamped() {
        let mut pad = PaintPad::new(10, 10).unwrap();
        pad.set_brush_size(0.0);
        assert_eq!(pad.brush_size(), MIN_BRUSH_SIZE);
        pad.set_brush_size(99.0);
        assert_eq!(pad.brush_size(), MAX_BRUSH_SIZE);
    }

    #[test]
    fn test_stroke_survives_leaving_the_pad() {
        let mut pad = PaintPad::new(20, 20).unwrap();
        pad.pointer_down(Vec2::new(5.0, 10.0));
        pad.pointer_move(Vec2::new(-30.0, 10.0));
        pad.pointer_move(Vec2::new(15.0, 10.0));
        assert!(pad.is_drawing());
        pad.pointer_up();
        assert!(!pad.is_drawing());
        assert_eq!(pad.buffer().get(0, 10), Some(Rgba::BLACK));
        assert_eq!(pad.buffer().get(15, 10), Some(Rgba::BLACK));
    }

    #[test]
    fn test_swatch_sets_brush_color() {
        let mut pad = PaintPad::new(10, 10).unwrap();
        pad.tool = Tool::Eraser;
        assert!(pad.select_swatch(&DEFAULT_PALETTE, 2));
        assert_eq!(pad.color, DEFAULT_PALETTE[2]);
        assert_eq!(pad.tool, Tool::Brush);

        assert!(!pad.select_swatch(&DEFAULT_PALETTE, DEFAULT_PALETTE.len()));
        assert_eq!(pad.color, DEFAULT_PALETTE[2]);

        pad.tool = Tool::Fill;
        pad.select_swatch(&DEFAULT_PALETTE, 0);
        assert_eq!(pad.tool, Tool::Fill);
        pad.pointer_down(Vec2::new(5.0, 5.0));
        assert_eq!(pad.buffer().get(5, 5), Some(DEFAULT_PALETTE[0]));
    }

    #[test]
    fn test_oversized_pad_settings_rejected() {
        let settings = Settings {
            pad_width: 65536,
            pad_height: 65537,
            ..Settings::default()
        };
        assert!(matches!(
            PaintPad::from_settings(&settings),
            Err(crate::error::CanvasError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut pad = PaintPad::new(10, 10).unwrap();
        assert!(pad.take_dirty());
        assert!(!pad.take_dirty());
        pad.flood_fill((0, 0), Rgba::WHITE);
        assert!(!pad.take_dirty());
        pad.flood_fill((0, 0), Rgba::BLACK);
        assert!(pad.take_dirty());
    }

    #[test]
    fn test_submit_clears_on_success() {
        let mut pad = PaintPad::new(10, 10).unwrap();
        pad.flood_fill((0, 0), Rgba::BLACK);
        let mut gallery = MonthlyGallery::new();
        let now = 1_760_600_000_000.0;

        assert!(pad.submit(&mut gallery, "  Ada  ", now));
        assert_eq!(pad.buffer().get(5, 5), Some(Rgba::WHITE));

        let items = gallery.list(now);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].author_name, "Ada");
        assert!(items[0].image_data.starts_with(PNG_DATA_URL_PREFIX));
    }

    #[test]
    fn test_submit_keeps_drawing_on_failure() {
        let mut pad = PaintPad::new(10, 10).unwrap();
        pad.flood_fill((0, 0), Rgba::BLACK);
        assert!(!pad.submit(&mut Refusing, "Ada", 0.0));
        assert_eq!(pad.buffer().get(5, 5), Some(Rgba::BLACK));
    }
}
