//! Helper types for port operations.

use std::fmt;

use doorwright_domain::{
    format_directions, MovementDirection, Point, Structure, StructureKind, StructureUid,
};

// =============================================================================
// Limits
// =============================================================================

/// Per-player ceilings a host may impose on new structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    /// Maximum number of blocks in a structure.
    RegionSize,
    /// Maximum distance between a structure's center and its trigger point.
    TriggerDistance,
}

// =============================================================================
// Persistence
// =============================================================================

/// Outcome of a persistence request.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistResult {
    /// The write was vetoed before it happened.
    pub cancelled: bool,
    /// The stored structure, with its assigned uid.
    pub structure: Option<Structure>,
}

impl PersistResult {
    pub fn stored(structure: Structure) -> Self {
        Self {
            cancelled: false,
            structure: Some(structure),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            structure: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            cancelled: false,
            structure: None,
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Message templates sent to players, each carrying its own arguments.
///
/// `Display` renders the English text; hosts with their own localization can
/// match on the variant instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatorMessage {
    InvalidName { reason: String },
    NameInUse { name: String },
    WrongInputKind { expected: &'static str },
    NoPermission { point: Point },
    WrongWorld,
    SizeLimitExceeded { volume: i64, limit: i64 },
    UnsupportedShape { kind: StructureKind },
    RotationPointOutOfRange { point: Point, range: u16 },
    TriggerInsideStructure { point: Point },
    TriggerTooFar { distance: f64, limit: i64 },
    InvalidDirection {
        direction: MovementDirection,
        valid: Vec<MovementDirection>,
    },
    ToolGiven,
    PriceRefused,
    InsufficientFunds { price: String },
    Purchased { price: String },
    Cancelled,
    TimedOut,
    CreationCancelled { name: String },
    CreationFailed,
    StructureCreated { name: String, uid: StructureUid },
}

impl fmt::Display for CreatorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { reason } => write!(f, "That name cannot be used: {}", reason),
            Self::NameInUse { name } => {
                write!(f, "Another structure called '{}' is being created right now", name)
            }
            Self::WrongInputKind { expected } => write!(f, "Please provide {}", expected),
            Self::NoPermission { point } => {
                write!(f, "You are not allowed to build at {}", point)
            }
            Self::WrongWorld => write!(f, "All positions must be in the same world"),
            Self::SizeLimitExceeded { volume, limit } => write!(
                f,
                "This structure would contain {} blocks, but your limit is {}",
                volume, limit
            ),
            Self::UnsupportedShape { kind } => write!(
                f,
                "A {} cannot be built in this shape; make it one block thick",
                kind
            ),
            Self::RotationPointOutOfRange { point, range } => write!(
                f,
                "The rotation point {} must be within {} block(s) of the structure",
                point, range
            ),
            Self::TriggerInsideStructure { point } => write!(
                f,
                "The trigger point {} cannot be inside the structure",
                point
            ),
            Self::TriggerTooFar { distance, limit } => write!(
                f,
                "The trigger point is {:.1} blocks away, but your limit is {}",
                distance, limit
            ),
            Self::InvalidDirection { direction, valid } => write!(
                f,
                "'{}' is not a valid direction here; choose one of: {}",
                direction,
                format_directions(valid)
            ),
            Self::ToolGiven => write!(f, "You have been given the creator tool"),
            Self::PriceRefused => write!(f, "Structure creation cancelled"),
            Self::InsufficientFunds { price } => write!(
                f,
                "You cannot afford this structure; it costs {}",
                price
            ),
            Self::Purchased { price } => write!(f, "Paid {} for this structure", price),
            Self::Cancelled => write!(f, "Structure creation cancelled"),
            Self::TimedOut => write!(f, "Structure creation timed out"),
            Self::CreationCancelled { name } => {
                write!(f, "Creation of '{}' was cancelled", name)
            }
            Self::CreationFailed => write!(f, "Something went wrong creating your structure"),
            Self::StructureCreated { name, uid } => {
                write!(f, "Structure '{}' created with uid {}", name, uid)
            }
        }
    }
}
