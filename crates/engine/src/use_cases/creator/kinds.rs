//! Per-kind capability descriptors.
//!
//! One [`Creator`](super::Creator) drives every kind; what differs between
//! kinds is captured here as plain function pointers.

use doorwright_domain::{Cuboid, MovementDirection, Structure, StructureDraft, StructureKind};

use super::context::CreatorContext;
use super::steps::StepFactory;
use crate::use_cases::procedure::Step;

#[derive(Clone, Copy)]
pub struct KindDescriptor {
    pub kind: StructureKind,
    /// Directions the structure may open in, given its cuboid.
    pub valid_directions: fn(&Cuboid) -> Vec<MovementDirection>,
    /// Ordered steps of the creation flow.
    pub steps: fn(&StepFactory) -> Vec<Step<CreatorContext>>,
    /// Builds the final structure from a completed draft.
    pub construct: fn(StructureDraft) -> Structure,
}

impl KindDescriptor {
    pub fn for_kind(kind: StructureKind) -> Self {
        match kind {
            StructureKind::BigDoor => Self {
                kind,
                valid_directions: |cuboid| StructureKind::BigDoor.valid_directions(cuboid),
                steps: StepFactory::rotating_flow,
                construct: |draft| StructureKind::BigDoor.construct(draft),
            },
            StructureKind::Drawbridge => Self {
                kind,
                valid_directions: |cuboid| StructureKind::Drawbridge.valid_directions(cuboid),
                steps: StepFactory::rotating_flow,
                construct: |draft| StructureKind::Drawbridge.construct(draft),
            },
            StructureKind::Portcullis => Self {
                kind,
                valid_directions: |cuboid| StructureKind::Portcullis.valid_directions(cuboid),
                steps: StepFactory::sliding_flow,
                construct: |draft| StructureKind::Portcullis.construct(draft),
            },
            StructureKind::SlidingDoor => Self {
                kind,
                valid_directions: |cuboid| StructureKind::SlidingDoor.valid_directions(cuboid),
                steps: StepFactory::sliding_flow,
                construct: |draft| StructureKind::SlidingDoor.construct(draft),
            },
        }
    }

    pub fn needs_rotation_point(&self) -> bool {
        self.kind.needs_rotation_point()
    }
}

impl std::fmt::Debug for KindDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindDescriptor")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
