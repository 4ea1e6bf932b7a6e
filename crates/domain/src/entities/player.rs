//! Players and structure ownership.

use serde::{Deserialize, Serialize};

use crate::ids::{PlayerId, StructureUid};

/// The acting player of a creator session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Ownership tiers, ordered from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    Creator,
    Admin,
    User,
}

/// Link between a structure and one of its owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureOwner {
    pub structure_uid: StructureUid,
    pub permission: PermissionLevel,
    pub player: Player,
}

impl StructureOwner {
    /// Owner record for the player creating a structure that has not been stored yet.
    pub fn creator(player: Player) -> Self {
        Self {
            structure_uid: StructureUid::UNASSIGNED,
            permission: PermissionLevel::Creator,
            player,
        }
    }

    pub fn with_structure_uid(mut self, uid: StructureUid) -> Self {
        self.structure_uid = uid;
        self
    }
}
