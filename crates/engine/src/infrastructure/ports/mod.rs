//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Player messaging (could swap console -> chat)
//! - Limits, permissions and the creator tool (owned by the host)
//! - Economy (could swap fixed prices -> a real economy plugin)
//! - Persistence (could swap JSON file -> database)
//! - Clock (for testing)

mod error;
mod external;
mod testing;
pub mod types;

pub use error::RepoError;

pub use types::{CreatorMessage, LimitKind, PersistResult};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    EconomyPort, LimitsPort, NotifierPort, PermissionPort, StructureStorePort, ToolPort,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{
    MockEconomyPort, MockLimitsPort, MockNotifierPort, MockPermissionPort,
    MockStructureStorePort, MockToolPort,
};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;
