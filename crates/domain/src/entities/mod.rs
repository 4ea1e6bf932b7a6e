//! Domain entities - objects with identity.

mod player;
mod structure;

pub use player::{PermissionLevel, Player, StructureOwner};
pub use structure::{Structure, StructureDraft, StructureKind};
