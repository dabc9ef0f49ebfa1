//! Pixel geometry primitives shared by the shape generator and the overlay

/// Axis-aligned rectangle in device pixels.
///
/// Every rectangle produced by this crate has a non-zero area; use
/// [`Rect::non_empty`] when a computed size may collapse to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle, or `None` when it would have zero area
    pub fn non_empty(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self::new(x, y, width, height))
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }
}

/// Resolved pixel at which the crosshair is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CenterPoint {
    pub x: i32,
    pub y: i32,
}

impl CenterPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a configured offset (positive x = right, positive y = down)
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Clamp an unsigned dimension into signed coordinate space
#[inline]
pub(crate) fn signed(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_is_rejected() {
        assert_eq!(Rect::non_empty(0, 0, 0, 5), None);
        assert_eq!(Rect::non_empty(0, 0, 5, 0), None);
        assert_eq!(Rect::non_empty(-3, 2, 1, 1), Some(Rect::new(-3, 2, 1, 1)));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, 10, 5, 5)));
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
    }

    #[test]
    fn center_offset() {
        assert_eq!(CenterPoint::new(960, 540).offset(-10, 4), CenterPoint::new(950, 544));
    }
}
