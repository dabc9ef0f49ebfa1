//! Filled circle rasterizer (midpoint / Bresenham variant)

use crate::geometry::{Rect, signed};

/// One-pixel-high scanline of width `2 * half_width + 1` centered on `cx`.
///
/// The odd width gives every row a single center pixel, which keeps the
/// circle symmetric around the crosshair center.
fn centered_line(cx: i32, row: i32, half_width: i32) -> Rect {
    Rect::new(
        cx.saturating_sub(half_width),
        row,
        (half_width as u32).saturating_mul(2).saturating_add(1),
        1,
    )
}

/// Fill a circle of `radius` (at least 1) with horizontal scanlines.
///
/// Walks one octant with the integer decision variable and mirrors each
/// step into the other octants. Rows may be emitted more than once; the
/// union is what matters to the display server.
pub fn filled_circle(cx: i32, cy: i32, radius: u32) -> Vec<Rect> {
    let mut rects = Vec::new();

    let mut x: i32 = 0;
    let mut y: i32 = signed(radius);
    let mut d: i64 = 3 - 2 * y as i64;

    while y >= x {
        // wide bands, y is the half-width
        if x > 0 {
            rects.push(centered_line(cx, cy.saturating_sub(x), y));
            rects.push(centered_line(cx, cy.saturating_add(x), y));
        } else {
            rects.push(centered_line(cx, cy, y));
        }

        // narrow bands near the poles; x == y is already covered above
        if x != y {
            rects.push(centered_line(cx, cy.saturating_sub(y), x));
            rects.push(centered_line(cx, cy.saturating_add(y), x));
        }

        if d > 0 {
            y -= 1;
            d += 4 * (x as i64 - y as i64) + 10;
        } else {
            d += 4 * x as i64 + 6;
        }
        x += 1;
    }

    rects
}
