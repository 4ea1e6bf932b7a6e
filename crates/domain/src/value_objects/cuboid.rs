//! Axis-aligned block cuboids.
//!
//! Both corners are inclusive: a cuboid spanning `(0,0,0)` to `(4,0,4)`
//! covers 5 x 1 x 5 = 25 blocks.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::point::{Point, Vector3d};

/// Orientation of a cuboid, derived from which dimensions are one block thick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuboidShape {
    /// One block high, lying flat.
    Flat,
    /// Upright, one block deep along the x axis (a wall running north-south).
    WallAlongZ,
    /// Upright, one block deep along the z axis (a wall running east-west).
    WallAlongX,
    /// Thicker than one block in every dimension.
    Solid,
}

/// Size of a cuboid in blocks along each axis.
///
/// Wider than [`Point`] so a cuboid spanning the full coordinate range fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cuboid {
    min: Point,
    max: Point,
}

impl Cuboid {
    /// Creates the cuboid spanned by two opposite corners, in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    /// Size in blocks along each axis.
    pub fn dimensions(&self) -> Dimensions {
        let span = |min: i32, max: i32| i64::from(max) - i64::from(min) + 1;
        Dimensions {
            x: span(self.min.x, self.max.x),
            y: span(self.min.y, self.max.y),
            z: span(self.min.z, self.max.z),
        }
    }

    /// Number of blocks in the cuboid, saturating at `i64::MAX`.
    pub fn volume(&self) -> i64 {
        let dims = self.dimensions();
        dims.x.saturating_mul(dims.y).saturating_mul(dims.z)
    }

    pub fn center(&self) -> Vector3d {
        Vector3d::new(
            (self.min.x as f64 + self.max.x as f64) / 2.0,
            (self.min.y as f64 + self.max.y as f64) / 2.0,
            (self.min.z as f64 + self.max.z as f64) / 2.0,
        )
    }

    /// The block containing the center.
    pub fn center_block(&self) -> Point {
        self.center().floor()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Returns a copy extended by the given amount on both sides of each axis.
    ///
    /// Corners stop at the edge of the coordinate range.
    pub fn grow(&self, x: i32, y: i32, z: i32) -> Cuboid {
        Cuboid::new(
            self.min.offset(x.saturating_neg(), y.saturating_neg(), z.saturating_neg()),
            self.max.offset(x, y, z),
        )
    }

    /// Whether `point` lies inside the cuboid or within `range` blocks of its boundary.
    pub fn is_in_range(&self, point: Point, range: u16) -> bool {
        let range = i32::from(range);
        self.grow(range, range, range).contains(point)
    }

    /// Distance from the center of the cuboid to the center of the block at `point`.
    pub fn distance_from_center(&self, point: Point) -> f64 {
        self.center().distance(&point.to_vector())
    }

    pub fn shape(&self) -> CuboidShape {
        let dims = self.dimensions();
        if dims.y == 1 {
            CuboidShape::Flat
        } else if dims.x == 1 {
            CuboidShape::WallAlongZ
        } else if dims.z == 1 {
            CuboidShape::WallAlongX
        } else {
            CuboidShape::Solid
        }
    }
}

impl fmt::Display for Cuboid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> Cuboid {
        Cuboid::new(Point::new(0, 0, 0), Point::new(4, 0, 4))
    }

    #[test]
    fn corners_are_normalized() {
        let cuboid = Cuboid::new(Point::new(4, 3, -1), Point::new(0, 0, 2));
        assert_eq!(cuboid.min(), Point::new(0, 0, -1));
        assert_eq!(cuboid.max(), Point::new(4, 3, 2));
    }

    #[test]
    fn volume_counts_inclusive_blocks() {
        assert_eq!(gate().volume(), 25);
        assert_eq!(Cuboid::new(Point::new(1, 1, 1), Point::new(1, 1, 1)).volume(), 1);
    }

    #[test]
    fn center_is_midpoint_of_corners() {
        assert_eq!(gate().center(), Vector3d::new(2.0, 0.0, 2.0));
        assert_eq!(gate().center_block(), Point::new(2, 0, 2));
    }

    #[test]
    fn range_check_includes_adjacent_blocks_only() {
        let cuboid = gate();
        assert!(cuboid.is_in_range(Point::new(2, 0, 5), 1));
        assert!(cuboid.is_in_range(Point::new(2, 0, 2), 1));
        assert!(!cuboid.is_in_range(Point::new(2, 0, 6), 1));
        assert!(!cuboid.is_in_range(Point::new(-2, 0, 0), 1));
    }

    #[test]
    fn full_coordinate_range_does_not_overflow() {
        let span = Cuboid::new(Point::new(i32::MIN, 0, 0), Point::new(i32::MAX, 0, 0));
        assert_eq!(span.dimensions().x, 1_i64 << 32);
        assert_eq!(span.volume(), 1_i64 << 32);
        assert_eq!(span.shape(), CuboidShape::Flat);

        let everything = Cuboid::new(
            Point::new(i32::MIN, i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MAX, i32::MAX),
        );
        assert_eq!(everything.volume(), i64::MAX);
    }

    #[test]
    fn growing_at_the_edge_saturates() {
        let edge = Cuboid::new(Point::new(i32::MAX - 2, 0, 0), Point::new(i32::MAX, 0, 0));
        assert!(edge.is_in_range(Point::new(i32::MAX, 0, 1), 1));
        assert_eq!(edge.grow(1, 1, 1).max(), Point::new(i32::MAX, 1, 1));

        let low = Cuboid::new(Point::new(i32::MIN, 0, 0), Point::new(i32::MIN + 1, 0, 0));
        assert_eq!(low.grow(3, 0, 0).min().x, i32::MIN);
    }

    #[test]
    fn contains_is_inclusive() {
        let cuboid = gate();
        assert!(cuboid.contains(Point::new(4, 0, 4)));
        assert!(!cuboid.contains(Point::new(2, -1, 2)));
    }

    #[test]
    fn shape_follows_thin_dimension() {
        assert_eq!(gate().shape(), CuboidShape::Flat);
        assert_eq!(
            Cuboid::new(Point::new(0, 0, 0), Point::new(0, 3, 4)).shape(),
            CuboidShape::WallAlongZ
        );
        assert_eq!(
            Cuboid::new(Point::new(0, 0, 0), Point::new(4, 3, 0)).shape(),
            CuboidShape::WallAlongX
        );
        assert_eq!(
            Cuboid::new(Point::new(0, 0, 0), Point::new(2, 2, 2)).shape(),
            CuboidShape::Solid
        );
    }
}
