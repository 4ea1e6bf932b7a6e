pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{PermissionLevel, Player, Structure, StructureDraft, StructureKind, StructureOwner};

pub use error::DomainError;

// Re-export ID types
pub use ids::{PlayerId, StructureUid, WorldId};

// Re-export value objects
pub use value_objects::{
    format_directions, format_price, world_matches, CreatorSettings, Cuboid, CuboidShape, Dimensions,
    Location, MovementDirection, Point, PriceFormat, StructureName, Vector3d, DEFAULT_MAX_NAME_LENGTH,
};
