//! Pixel geometry primitives.
//!
//! All canvas coordinates are integer pixels with y growing downwards.

use glam::IVec2;
use std::fmt;

/// A pixel position
pub type Point = IVec2;

/// Build a [`Point`] from raw coordinates
#[inline]
pub fn px(x: i32, y: i32) -> Point {
    IVec2::new(x, y)
}

/// Axis-aligned bounding box, inclusive on every edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Box from its top-left corner and size
    pub fn from_origin_size(origin: Point, width: i32, height: i32) -> Self {
        Self {
            min: origin,
            max: origin + px(width, height),
        }
    }

    /// Smallest box holding every point, or `None` for an empty slice
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds {
            min: *first,
            max: *first,
        };
        for p in rest {
            bounds.min = bounds.min.min(*p);
            bounds.max = bounds.max.max(*p);
        }
        Some(bounds)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Whether `(x, y)` lies in the box grown by the given thresholds
    pub fn contains_within(&self, x: i32, x_threshold: i32, y: i32, y_threshold: i32) -> bool {
        self.min.x - x_threshold <= x
            && x <= self.max.x + x_threshold
            && self.min.y - y_threshold <= y
            && y <= self.max.y + y_threshold
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{} {}x{}]",
            self.min.x,
            self.min.y,
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let b = Bounds::from_origin_size(px(10, 20), 5, 5);
        assert!(b.contains_within(10, 0, 20, 0));
        assert!(b.contains_within(15, 0, 25, 0));
        assert!(!b.contains_within(16, 0, 25, 0));
    }

    #[test]
    fn threshold_grows_the_box() {
        let b = Bounds::from_origin_size(px(10, 20), 5, 5);
        assert!(!b.contains_within(8, 0, 22, 0));
        assert!(b.contains_within(8, 2, 22, 0));
        assert!(b.contains_within(12, 0, 27, 2));
    }

    #[test]
    fn enclosing_points() {
        let b = Bounds::enclosing(&[px(3, 9), px(-1, 4), px(7, 5)]).unwrap();
        assert_eq!(b.min, px(-1, 4));
        assert_eq!(b.max, px(7, 9));
        assert!(Bounds::enclosing(&[]).is_none());
    }
}
