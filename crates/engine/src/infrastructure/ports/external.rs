//! Collaborator ports consumed by the creator (messaging, limits, economy,
//! persistence, permissions, tools).

use async_trait::async_trait;
use doorwright_domain::{Location, Player, PlayerId, Structure, StructureKind, WorldId};

use super::error::RepoError;
use super::types::{CreatorMessage, LimitKind, PersistResult};

// =============================================================================
// Messaging
// =============================================================================

/// Fire-and-forget message sink towards a player.
#[cfg_attr(test, mockall::automock)]
pub trait NotifierPort: Send + Sync {
    fn send_info(&self, player: PlayerId, message: CreatorMessage);
    fn send_error(&self, player: PlayerId, message: CreatorMessage);
    fn send_success(&self, player: PlayerId, message: CreatorMessage);
}

// =============================================================================
// Limits
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait LimitsPort: Send + Sync {
    /// `None` means unlimited.
    fn get_limit(&self, player: &Player, kind: LimitKind) -> Option<i64>;
}

// =============================================================================
// Economy
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EconomyPort: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Price of a structure of `kind` with `block_count` blocks.
    /// `None` or a non-positive price means free.
    fn get_price(&self, kind: StructureKind, block_count: i64) -> Option<f64>;

    /// Charges the player; `false` when they cannot afford it.
    async fn purchase(
        &self,
        player: &Player,
        world: WorldId,
        kind: StructureKind,
        block_count: i64,
    ) -> bool;
}

// =============================================================================
// Persistence
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructureStorePort: Send + Sync {
    async fn add_structure(
        &self,
        structure: Structure,
        creator: &Player,
    ) -> Result<PersistResult, RepoError>;
}

// =============================================================================
// Permissions
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait PermissionPort: Send + Sync {
    /// Whether the player may build at the location (region protection etc.).
    fn may_act_at(&self, player: &Player, location: &Location) -> bool;
}

// =============================================================================
// Tools
// =============================================================================

/// The creator tool handed to a player for selecting positions.
#[cfg_attr(test, mockall::automock)]
pub trait ToolPort: Send + Sync {
    fn grant_tool(&self, player: &Player);
    fn revoke_tool(&self, player: &Player);
}
