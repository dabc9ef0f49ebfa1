//! Rectangle decomposition of crosshair shapes
//!
//! All generators are pure integer arithmetic: the same inputs always produce
//! the same rectangles, in the same order, and nothing here touches the
//! display server. Zero-area rectangles are never emitted.

mod circle;
mod outline;

pub use circle::filled_circle;
pub use outline::outline;

use crosshair_types::{Rgb, Shape};

use crate::geometry::{CenterPoint, Rect, signed};

/// Smallest dot drawn inside a cross-dot
const MIN_CROSS_DOT_SIZE: u32 = 2;

/// Everything needed to draw one frame of the crosshair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosshairSpec {
    pub shape: Shape,
    pub size: u32,
    pub thickness: u32,
    pub gap: u32,
    pub outline_thickness: u32,
    pub color: Rgb,
    pub outline_color: Rgb,
}

impl Default for CrosshairSpec {
    fn default() -> Self {
        Self {
            shape: Shape::Cross,
            size: 10,
            thickness: 2,
            gap: 0,
            outline_thickness: 0,
            color: Rgb::GREEN,
            outline_color: Rgb::BLACK,
        }
    }
}

impl CrosshairSpec {
    pub fn has_outline(&self) -> bool {
        self.outline_thickness > 0
    }

    /// Shape layer centered on `center`
    pub fn shape_layer(&self, center: CenterPoint) -> Vec<Rect> {
        generate(
            self.shape,
            center.x,
            center.y,
            self.size,
            self.thickness,
            self.gap,
        )
    }

    /// Outline layer derived from an already generated shape layer
    pub fn outline_layer(&self, shape_layer: &[Rect]) -> Vec<Rect> {
        outline(shape_layer, self.outline_thickness)
    }
}

/// Generate the rectangles for `shape` centered on `(cx, cy)`.
///
/// For [`Shape::Circle`], `size` is the radius. For [`Shape::Dot`] it is the
/// diameter.
pub fn generate(shape: Shape, cx: i32, cy: i32, size: u32, thickness: u32, gap: u32) -> Vec<Rect> {
    match shape {
        Shape::Cross => cross(cx, cy, size, thickness, gap),
        Shape::Dot => dot(cx, cy, size),
        Shape::Circle => circle(cx, cy, size),
        Shape::CrossDot => cross_dot(cx, cy, size, thickness, gap),
    }
}

/// Plus-shaped cross. A zero gap gives two full bars, any other gap gives four
/// arms that stop `gap / 2` pixels short of the center.
///
/// Odd thicknesses sit one pixel toward the negative axis.
pub fn cross(cx: i32, cy: i32, size: u32, thickness: u32, gap: u32) -> Vec<Rect> {
    let half_thickness = signed(thickness / 2);
    let s = signed(size);
    let mut rects = Vec::with_capacity(4);

    if gap == 0 {
        let length = size.saturating_mul(2);
        rects.extend(Rect::non_empty(
            cx.saturating_sub(s),
            cy.saturating_sub(half_thickness),
            length,
            thickness,
        ));
        rects.extend(Rect::non_empty(
            cx.saturating_sub(half_thickness),
            cy.saturating_sub(s),
            thickness,
            length,
        ));
        return rects;
    }

    let half_gap = gap / 2;
    let arm = size.saturating_sub(half_gap);
    let hg = signed(half_gap);

    // left, right, top, bottom
    rects.extend(Rect::non_empty(
        cx.saturating_sub(s),
        cy.saturating_sub(half_thickness),
        arm,
        thickness,
    ));
    rects.extend(Rect::non_empty(
        cx.saturating_add(hg),
        cy.saturating_sub(half_thickness),
        arm,
        thickness,
    ));
    rects.extend(Rect::non_empty(
        cx.saturating_sub(half_thickness),
        cy.saturating_sub(s),
        thickness,
        arm,
    ));
    rects.extend(Rect::non_empty(
        cx.saturating_sub(half_thickness),
        cy.saturating_add(hg),
        thickness,
        arm,
    ));
    rects
}

/// Filled dot of diameter `size`; sizes below 2 collapse to the center pixel
pub fn dot(cx: i32, cy: i32, size: u32) -> Vec<Rect> {
    if size == 0 {
        return Vec::new();
    }
    let radius = size / 2;
    if radius < 1 {
        return vec![Rect::new(cx, cy, 1, 1)];
    }
    filled_circle(cx, cy, radius)
}

/// Filled circle of the given radius
pub fn circle(cx: i32, cy: i32, radius: u32) -> Vec<Rect> {
    if radius == 0 {
        return Vec::new();
    }
    filled_circle(cx, cy, radius)
}

/// Cross with a center dot. The gap is widened to the dot size when needed
/// so that the arms never touch the dot.
pub fn cross_dot(cx: i32, cy: i32, size: u32, thickness: u32, gap: u32) -> Vec<Rect> {
    let dot_size = (size / 3).max(MIN_CROSS_DOT_SIZE);
    let effective_gap = gap.max(dot_size);

    let mut rects = cross(cx, cy, size, thickness, effective_gap);
    rects.extend(dot(cx, cy, dot_size));
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative(rects: &[Rect], cx: i32, cy: i32) -> Vec<Rect> {
        rects
            .iter()
            .map(|r| Rect::new(r.x - cx, r.y - cy, r.width, r.height))
            .collect()
    }

    #[test]
    fn solid_cross_fixture() {
        let rects = generate(Shape::Cross, 100, 100, 10, 2, 0);
        assert_eq!(
            rects,
            vec![Rect::new(90, 99, 20, 2), Rect::new(99, 90, 2, 20)]
        );
    }

    #[test]
    fn solid_cross_always_two_rects() {
        for size in 1..40 {
            for thickness in 1..8 {
                assert_eq!(cross(0, 0, size, thickness, 0).len(), 2);
            }
        }
    }

    #[test]
    fn odd_thickness_biases_negative() {
        let rects = cross(50, 50, 5, 3, 0);
        assert_eq!(rects[0], Rect::new(45, 49, 10, 3));
        assert_eq!(rects[1], Rect::new(49, 45, 3, 10));
    }

    #[test]
    fn gapped_cross_has_four_disjoint_arms() {
        // Odd gaps leave room for a one-pixel overlap at the center corner
        // because of the negative bias of odd thicknesses.
        for size in 6..30 {
            for gap in (2..=10).step_by(2) {
                for thickness in 1..=gap {
                    let rects = cross(200, 120, size, thickness, gap);
                    assert_eq!(rects.len(), 4, "size={size} gap={gap} t={thickness}");
                    for (i, a) in rects.iter().enumerate() {
                        for b in &rects[i + 1..] {
                            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn gapped_cross_leaves_center_clear() {
        let (cx, cy, gap) = (0, 0, 8);
        let half_gap = (gap / 2) as i32;
        let clear = Rect::new(
            cx - half_gap,
            cy - half_gap,
            (2 * half_gap) as u32,
            (2 * half_gap) as u32,
        );
        for arm in cross(cx, cy, 20, 2, gap) {
            assert!(!arm.intersects(&clear), "{arm:?} enters the gap");
        }
    }

    #[test]
    fn gapped_cross_arm_geometry() {
        let rects = cross(0, 0, 10, 2, 4);
        assert_eq!(
            rects,
            vec![
                Rect::new(-10, -1, 8, 2),
                Rect::new(2, -1, 8, 2),
                Rect::new(-1, -10, 2, 8),
                Rect::new(-1, 2, 2, 8),
            ]
        );
    }

    #[test]
    fn degenerate_cross_emits_nothing() {
        assert!(cross(0, 0, 0, 2, 0).is_empty());
        assert!(cross(0, 0, 10, 0, 0).is_empty());
        // gap swallows the whole arm
        assert!(cross(0, 0, 3, 2, 10).is_empty());
    }

    #[test]
    fn tiny_dot_is_single_pixel() {
        assert_eq!(generate(Shape::Dot, 0, 0, 1, 0, 0), vec![Rect::new(0, 0, 1, 1)]);
        assert!(generate(Shape::Dot, 0, 0, 0, 0, 0).is_empty());
    }

    #[test]
    fn dot_uses_half_size_as_radius() {
        assert_eq!(dot(7, 7, 8), filled_circle(7, 7, 4));
        assert_eq!(dot(7, 7, 9), filled_circle(7, 7, 4));
    }

    #[test]
    fn circle_shape_uses_size_as_radius() {
        assert!(generate(Shape::Circle, 0, 0, 0, 2, 0).is_empty());
        assert_eq!(generate(Shape::Circle, 3, 4, 6, 2, 0), filled_circle(3, 4, 6));
    }

    #[test]
    fn cross_dot_fixture() {
        let rects = generate(Shape::CrossDot, 0, 0, 30, 2, 0);
        let arms = cross(0, 0, 30, 2, 10);
        let dot_rects = dot(0, 0, 10);

        assert_eq!(rects.len(), arms.len() + dot_rects.len());
        assert_eq!(arms.len(), 4);
        assert_eq!(&rects[..4], arms.as_slice());
        assert_eq!(&rects[4..], dot_rects.as_slice());

        for r in &rects[4..] {
            assert!(r.x >= -5 && r.right() <= 6, "{r:?}");
            assert!(r.y >= -5 && r.bottom() <= 6, "{r:?}");
        }
    }

    #[test]
    fn cross_dot_keeps_larger_gap() {
        let rects = cross_dot(0, 0, 30, 2, 20);
        assert_eq!(&rects[..4], cross(0, 0, 30, 2, 20).as_slice());
    }

    #[test]
    fn cross_dot_minimum_dot() {
        // size / 3 == 1, so the dot is clamped to 2 (radius 1)
        let rects = cross_dot(0, 0, 4, 1, 0);
        assert_eq!(&rects[4..], filled_circle(0, 0, 1).as_slice());
    }

    #[test]
    fn shape_layer_follows_center() {
        let spec = CrosshairSpec::default();
        let a = spec.shape_layer(CenterPoint::new(0, 0));
        let b = spec.shape_layer(CenterPoint::new(300, -40));
        assert_eq!(a, relative(&b, 300, -40));
    }

    #[test]
    fn outline_layer_disabled_by_default() {
        let spec = CrosshairSpec::default();
        let shape = spec.shape_layer(CenterPoint::default());
        assert!(!spec.has_outline());
        assert!(spec.outline_layer(&shape).is_empty());
    }

    #[test]
    fn extreme_offsets_do_not_overflow() {
        let center = CenterPoint::new(960, 540).offset(i32::MAX, i32::MAX);
        for shape in Shape::ALL {
            let spec = CrosshairSpec {
                shape,
                size: 500,
                outline_thickness: 50,
                ..Default::default()
            };
            let layer = spec.shape_layer(center);
            assert!(!layer.is_empty(), "{shape}");
            assert!(!spec.outline_layer(&layer).is_empty(), "{shape}");

            let layer = spec.shape_layer(CenterPoint::new(i32::MIN, i32::MIN));
            assert!(!layer.is_empty(), "{shape}");
        }
    }
}
