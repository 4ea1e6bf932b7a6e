//! Value objects - Immutable objects defined by their attributes

mod cuboid;
mod direction;
mod names;
mod point;
mod price;
mod settings;

pub use cuboid::{Cuboid, CuboidShape, Dimensions};
pub use direction::{format_directions, MovementDirection};
pub use names::{StructureName, DEFAULT_MAX_NAME_LENGTH};
pub use point::{world_matches, Location, Point, Vector3d};
pub use price::{format_price, PriceFormat};
pub use settings::CreatorSettings;
