//! Brush and eraser strokes
//!
//! A stroke is one segment with round caps, rasterized hard-edged: a pixel
//! is covered when its center lies within half the line width of the
//! segment. Pointer moves chain segments end to end.

use glam::Vec2;

use super::buffer::{PixelBuffer, Rgba};

/// How stroke pixels combine with what is already there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Paint over the destination
    SourceOver,
    /// Remove destination coverage; fully erased pixels become transparent
    DestinationOut,
}

/// Composite one source pixel onto one destination pixel
pub fn composite(dst: Rgba, src: Rgba, mode: BlendMode) -> Rgba {
    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0;
    match mode {
        BlendMode::SourceOver => {
            if src.a == 255 {
                return src;
            }
            let out_a = sa + da * (1.0 - sa);
            if out_a <= 0.0 {
                return Rgba::TRANSPARENT;
            }
            let mix = |s: u8, d: u8| {
                ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as u8
            };
            Rgba::new(
                mix(src.r, dst.r),
                mix(src.g, dst.g),
                mix(src.b, dst.b),
                (out_a * 255.0).round() as u8,
            )
        }
        BlendMode::DestinationOut => {
            let out_a = (da * (1.0 - sa) * 255.0).round() as u8;
            if out_a == 0 {
                Rgba::TRANSPARENT
            } else {
                Rgba { a: out_a, ..dst }
            }
        }
    }
}

/// Distance from `p` to the segment `a`-`b`
fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-8 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Draw a round-capped segment of the given width. Returns pixels touched.
pub fn stroke_segment(
    buffer: &mut PixelBuffer,
    from: Vec2,
    to: Vec2,
    color: Rgba,
    width: f32,
    mode: BlendMode,
) -> usize {
    // Thin lines still cover the pixel under the pointer
    let radius = (width / 2.0).max(std::f32::consts::FRAC_1_SQRT_2);

    let min = from.min(to) - Vec2::splat(radius);
    let max = from.max(to) + Vec2::splat(radius);
    let x0 = (min.x.floor() as i32).max(0);
    let y0 = (min.y.floor() as i32).max(0);
    let x1 = (max.x.ceil() as i32).min(buffer.width() as i32 - 1);
    let y1 = (max.y.ceil() as i32).min(buffer.height() as i32 - 1);

    let mut touched = 0;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if distance_to_segment(center, from, to) <= radius {
                let i = buffer.index(x, y);
                let pixels = buffer.pixels_mut();
                pixels[i] = composite(pixels[i], color, mode);
                touched += 1;
            }
        }
    }
    touched
}
