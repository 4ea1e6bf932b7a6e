//! Block positions and world-bound locations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::WorldId;

/// Integer block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Moves the point, clamping at the edge of the coordinate range.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Point {
        Point::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    pub fn to_vector(self) -> Vector3d {
        Vector3d::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl std::str::FromStr for Point {
    type Err = DomainError;

    /// Parses `x y z` or `x,y,z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 {
            return Err(DomainError::parse(format!(
                "Expected three coordinates, got: {}",
                s
            )));
        }
        let coord = |raw: &str| {
            raw.parse::<i32>()
                .map_err(|_| DomainError::parse(format!("Invalid coordinate: {}", raw)))
        };
        Ok(Point::new(coord(parts[0])?, coord(parts[1])?, coord(parts[2])?))
    }
}

/// Floating point vector, used for centers and distances.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Vector3d) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Rounds every component down to the containing block.
    pub fn floor(&self) -> Point {
        Point::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl fmt::Display for Vector3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// A block position inside a specific world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldId,
    pub point: Point,
}

impl Location {
    pub fn new(world: WorldId, point: Point) -> Self {
        Self { world, point }
    }

    pub fn is_in_world(&self, world: WorldId) -> bool {
        world_matches(self.world, world)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.point, self.world)
    }
}

/// Whether two world references denote the same world.
pub fn world_matches(a: WorldId, b: WorldId) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_and_comma_separated_points() {
        assert_eq!("1 2 3".parse::<Point>(), Ok(Point::new(1, 2, 3)));
        assert_eq!("4,-1, 0".parse::<Point>(), Ok(Point::new(4, -1, 0)));
    }

    #[test]
    fn rejects_malformed_points() {
        assert!("1 2".parse::<Point>().is_err());
        assert!("a b c".parse::<Point>().is_err());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vector3d::new(0.0, 0.0, 0.0);
        let b = Vector3d::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn floor_rounds_towards_negative_infinity() {
        assert_eq!(Vector3d::new(1.5, -0.5, 2.0).floor(), Point::new(1, -1, 2));
    }

    #[test]
    fn locations_in_other_worlds_do_not_match() {
        let world = WorldId::new();
        let loc = Location::new(world, Point::new(0, 0, 0));
        assert!(loc.is_in_world(world));
        assert!(!loc.is_in_world(WorldId::new()));
    }
}
