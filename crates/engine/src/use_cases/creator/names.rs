//! Names claimed by in-progress creator sessions.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use doorwright_domain::{PlayerId, StructureName};
use uuid::Uuid;

/// Identifies the creator holding a claim.
///
/// A player may run a new creator while an old one is winding down, so
/// claims are released per creator rather than per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimToken {
    player: PlayerId,
    creator: Uuid,
}

impl ClaimToken {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            creator: Uuid::new_v4(),
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }
}

/// Shared registry of names held by active sessions, keyed case-insensitively.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct NameClaims {
    claims: Arc<DashMap<String, ClaimToken>>,
}

impl NameClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name` for `token`. Fails when another player holds it; a
    /// claim held by the same player moves to the newer creator.
    pub fn claim(&self, name: &StructureName, token: ClaimToken) -> bool {
        match self.claims.entry(name.key()) {
            Entry::Occupied(mut entry) => {
                if entry.get().player != token.player {
                    return false;
                }
                entry.insert(token);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(token);
                true
            }
        }
    }

    /// Releases `name` if `token` still holds it.
    pub fn release(&self, name: &StructureName, token: ClaimToken) {
        self.claims.remove_if(&name.key(), |_, holder| *holder == token);
    }

    pub fn is_claimed(&self, name: &StructureName) -> bool {
        self.claims.contains_key(&name.key())
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
