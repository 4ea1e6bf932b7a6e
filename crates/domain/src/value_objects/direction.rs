//! Movement directions a structure can open in.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    North,
    East,
    South,
    West,
    Up,
    Down,
    Clockwise,
    Counterclockwise,
}

impl MovementDirection {
    /// The four horizontal compass directions.
    pub const CARDINAL: [MovementDirection; 4] = [
        MovementDirection::North,
        MovementDirection::East,
        MovementDirection::South,
        MovementDirection::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::North => "north",
            MovementDirection::East => "east",
            MovementDirection::South => "south",
            MovementDirection::West => "west",
            MovementDirection::Up => "up",
            MovementDirection::Down => "down",
            MovementDirection::Clockwise => "clockwise",
            MovementDirection::Counterclockwise => "counterclockwise",
        }
    }
}

impl std::fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(MovementDirection::North),
            "east" | "e" => Ok(MovementDirection::East),
            "south" | "s" => Ok(MovementDirection::South),
            "west" | "w" => Ok(MovementDirection::West),
            "up" => Ok(MovementDirection::Up),
            "down" => Ok(MovementDirection::Down),
            "clockwise" | "cw" => Ok(MovementDirection::Clockwise),
            "counterclockwise" | "ccw" => Ok(MovementDirection::Counterclockwise),
            _ => Err(DomainError::parse(format!("Unknown direction: {}", s))),
        }
    }
}

/// Renders a direction list as `north, east, south`.
pub fn format_directions(directions: &[MovementDirection]) -> String {
    directions
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
