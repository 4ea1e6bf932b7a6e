//! Movable structures and their kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::player::StructureOwner;
use crate::error::DomainError;
use crate::ids::{StructureUid, WorldId};
use crate::value_objects::{Cuboid, CuboidShape, MovementDirection, Point, StructureName};

/// The kinds of structure a creator session can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Rotates around a vertical hinge.
    BigDoor,
    /// Rotates up or down around a horizontal hinge.
    Drawbridge,
    /// Slides straight up or down.
    Portcullis,
    /// Slides horizontally.
    SlidingDoor,
}

impl StructureKind {
    pub const ALL: [StructureKind; 4] = [
        StructureKind::BigDoor,
        StructureKind::Drawbridge,
        StructureKind::Portcullis,
        StructureKind::SlidingDoor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::BigDoor => "bigdoor",
            StructureKind::Drawbridge => "drawbridge",
            StructureKind::Portcullis => "portcullis",
            StructureKind::SlidingDoor => "slidingdoor",
        }
    }

    /// Directions this kind can open in, given the shape of its cuboid.
    pub fn valid_directions(&self, cuboid: &Cuboid) -> Vec<MovementDirection> {
        use MovementDirection::*;
        match self {
            StructureKind::BigDoor => vec![Clockwise, Counterclockwise],
            StructureKind::Portcullis => vec![Up, Down],
            StructureKind::Drawbridge => match cuboid.shape() {
                CuboidShape::Flat => MovementDirection::CARDINAL.to_vec(),
                CuboidShape::WallAlongZ => vec![East, West],
                CuboidShape::WallAlongX => vec![North, South],
                CuboidShape::Solid => Vec::new(),
            },
            StructureKind::SlidingDoor => match cuboid.shape() {
                CuboidShape::WallAlongZ => vec![North, South],
                CuboidShape::WallAlongX => vec![East, West],
                CuboidShape::Flat | CuboidShape::Solid => MovementDirection::CARDINAL.to_vec(),
            },
        }
    }

    /// Whether the player chooses the rotation point, or it is derived from the cuboid.
    pub fn needs_rotation_point(&self) -> bool {
        matches!(self, StructureKind::BigDoor | StructureKind::Drawbridge)
    }

    /// Finishes a draft into a structure of this kind.
    pub fn construct(&self, draft: StructureDraft) -> Structure {
        let dims = draft.cuboid.dimensions();
        let blocks_to_move = match self {
            StructureKind::Portcullis => Some(dims.y.unsigned_abs()),
            StructureKind::SlidingDoor => Some(match draft.open_direction {
                MovementDirection::North | MovementDirection::South => dims.z.unsigned_abs(),
                _ => dims.x.unsigned_abs(),
            }),
            StructureKind::BigDoor | StructureKind::Drawbridge => None,
        };
        let rotation_point = draft
            .rotation_point
            .unwrap_or_else(|| draft.cuboid.center_block());

        Structure {
            uid: StructureUid::UNASSIGNED,
            name: draft.name,
            kind: *self,
            world: draft.world,
            cuboid: draft.cuboid,
            rotation_point,
            trigger_point: draft.trigger_point,
            open_direction: draft.open_direction,
            is_open: draft.is_open,
            is_locked: draft.is_locked,
            blocks_to_move,
            primary_owner: draft.primary_owner,
            created_at: draft.created_at,
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StructureKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "bigdoor" => Ok(StructureKind::BigDoor),
            "drawbridge" => Ok(StructureKind::Drawbridge),
            "portcullis" => Ok(StructureKind::Portcullis),
            "slidingdoor" => Ok(StructureKind::SlidingDoor),
            _ => Err(DomainError::parse(format!("Unknown structure kind: {}", s))),
        }
    }
}

/// Everything a creator session collects before the structure is built.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDraft {
    pub name: StructureName,
    pub world: WorldId,
    pub cuboid: Cuboid,
    /// `None` for kinds that derive their rotation point from the cuboid.
    pub rotation_point: Option<Point>,
    pub trigger_point: Point,
    pub open_direction: MovementDirection,
    pub is_open: bool,
    pub is_locked: bool,
    pub primary_owner: StructureOwner,
    pub created_at: DateTime<Utc>,
}

/// A fully constructed movable structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub uid: StructureUid,
    pub name: StructureName,
    pub kind: StructureKind,
    pub world: WorldId,
    pub cuboid: Cuboid,
    pub rotation_point: Point,
    pub trigger_point: Point,
    pub open_direction: MovementDirection,
    pub is_open: bool,
    pub is_locked: bool,
    /// Distance moved by sliding kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks_to_move: Option<u64>,
    pub primary_owner: StructureOwner,
    pub created_at: DateTime<Utc>,
}

impl Structure {
    /// Copy of this structure carrying the uid assigned by storage.
    pub fn with_uid(mut self, uid: StructureUid) -> Self {
        self.uid = uid;
        self.primary_owner = self.primary_owner.with_structure_uid(uid);
        self
    }
}
