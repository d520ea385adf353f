//! RGBA pixel buffer for the paint pad

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PIXELS;
use crate::error::{CanvasError, Result};

/// One RGBA8 pixel, straight (non-premultiplied) alpha
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color at full opacity
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string with alpha
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// A fixed-size grid of pixels, row-major from the top-left corner
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    background: Rgba,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Create a buffer filled with `background`
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptySurface { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| len <= MAX_PIXELS)
            .ok_or(CanvasError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; len],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Index into `pixels`; caller checks bounds
    #[inline]
    pub(crate) fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.in_bounds(x, y).then(|| self.pixels[self.index(x, y)])
    }

    /// Write one pixel. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if self.in_bounds(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Back to the background color
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Raw RGBA8 bytes, ready for PNG encoding or a canvas blit
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
