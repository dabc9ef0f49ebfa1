//! Background outline layer

use crate::geometry::{Rect, signed};

/// Grow every rectangle by `thickness` on all four sides.
///
/// Returns an empty layer when `thickness` is zero. Output rectangles are not
/// merged; overlapping outlines are fine for filled painting and for the
/// bounding region union.
pub fn outline(rects: &[Rect], thickness: u32) -> Vec<Rect> {
    if thickness == 0 {
        return Vec::new();
    }

    let t = signed(thickness);
    let grow = thickness.saturating_mul(2);
    rects
        .iter()
        .map(|r| {
            Rect::new(
                r.x.saturating_sub(t),
                r.y.saturating_sub(t),
                r.width.saturating_add(grow),
                r.height.saturating_add(grow),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{circle, cross};

    #[test]
    fn grows_each_rect_by_thickness() {
        let rects = cross(100, 100, 10, 2, 0);
        for t in 1..=6u32 {
            let outlined = outline(&rects, t);
            assert_eq!(outlined.len(), rects.len());
            for (o, r) in outlined.iter().zip(&rects) {
                assert_eq!(o.x, r.x - t as i32);
                assert_eq!(o.y, r.y - t as i32);
                assert_eq!(o.width, r.width + 2 * t);
                assert_eq!(o.height, r.height + 2 * t);
            }
        }
    }

    #[test]
    fn zero_thickness_is_empty() {
        assert!(outline(&cross(0, 0, 10, 2, 0), 0).is_empty());
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(outline(&[], 3).is_empty());
    }

    #[test]
    fn circle_outline_keeps_overlaps() {
        let rects = circle(0, 0, 4);
        let outlined = outline(&rects, 1);
        assert_eq!(outlined.len(), rects.len());
        assert_eq!(outlined[0], Rect::new(-5, -1, 11, 3));
    }
}
