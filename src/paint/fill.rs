//! Flood fill (paint bucket)
//!
//! 4-connected, stack-based, exact color match. Anti-aliased fringes with a
//! slightly different color stop the fill; there is no tolerance.

use super::buffer::{PixelBuffer, Rgba};

/// Fill the region connected to `seed` that shares the seed's color.
///
/// Returns the number of pixels written. Seeds outside the buffer and
/// regions already painted `fill` are left alone.
pub fn flood_fill(buffer: &mut PixelBuffer, seed: (i32, i32), fill: Rgba) -> usize {
    let fill = fill.opaque();
    let Some(target) = buffer.get(seed.0, seed.1) else {
        return 0;
    };
    if target == fill {
        return 0;
    }

    let mut visited = vec![false; buffer.pixels().len()];
    let mut stack = vec![seed];
    let mut filled = 0;

    while let Some((x, y)) = stack.pop() {
        if !buffer.in_bounds(x, y) {
            continue;
        }
        let i = buffer.index(x, y);
        if visited[i] || buffer.pixels()[i] != target {
            continue;
        }
        visited[i] = true;
        buffer.pixels_mut()[i] = fill;
        filled += 1;

        stack.push((x, y - 1));
        stack.push((x + 1, y));
        stack.push((x, y + 1));
        stack.push((x - 1, y));
    }

    log::debug!("Flood fill from {:?} wrote {} pixels", seed, filled);
    filled
}
