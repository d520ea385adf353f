//! 2D rendering module
//!
//! Scenes draw through the `Surface` trait. The browser build implements it
//! over a canvas 2D context; `DrawList` records commands for native use and
//! tests.

pub mod scene;

pub use scene::{draw_game, draw_pad};

use glam::Vec2;

use crate::paint::{PixelBuffer, Rgba};

/// How line ends are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    /// Canvas `lineCap` value
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

/// Stroke parameters for `Surface::line`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    /// Dash and gap lengths; solid when `None`
    pub dash: Option<[f32; 2]>,
    pub cap: LineCap,
}

impl LineStyle {
    pub fn solid(width: f32) -> Self {
        Self {
            width,
            dash: None,
            cap: LineCap::Butt,
        }
    }

    pub fn dashed(width: f32, dash: f32, gap: f32) -> Self {
        Self {
            width,
            dash: Some([dash, gap]),
            cap: LineCap::Butt,
        }
    }
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    /// Drawable width and height
    fn size(&self) -> Vec2;

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, style: LineStyle);
    /// Bold text, horizontally centered on `pos`
    fn text(&mut self, text: &str, pos: Vec2, color: Rgba, size_px: f32);
    /// Copy raw pixels with their top-left corner at `origin`
    fn put_pixels(&mut self, origin: Vec2, pixels: &PixelBuffer);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { min: Vec2, size: Vec2, color: Rgba },
    StrokeRect { min: Vec2, size: Vec2, color: Rgba, width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    FillEllipse { center: Vec2, radii: Vec2, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32, color: Rgba, width: f32 },
    Line { from: Vec2, to: Vec2, color: Rgba, style: LineStyle },
    Text { text: String, pos: Vec2, color: Rgba, size_px: f32 },
    PutPixels { origin: Vec2, width: u32, height: u32 },
}

/// Surface that records every call
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { min, size, color });
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            min,
            size,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, style: LineStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            style,
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, color: Rgba, size_px: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
            size_px,
        });
    }

    fn put_pixels(&mut self, origin: Vec2, pixels: &PixelBuffer) {
        self.commands.push(DrawCommand::PutPixels {
            origin,
            width: pixels.width(),
            height: pixels.height(),
        });
    }
}
