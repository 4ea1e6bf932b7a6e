//! Test fixtures and common test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::CreatorFixture;
//!
//! #[tokio::test]
//! async fn test_rejects_big_cuboids() {
//!     let mut fixture = CreatorFixture::new();
//!     fixture.size_limit = Some(20);
//!     let mut creator = fixture.creator(StructureKind::Drawbridge, Some("Gate1"));
//!     // ... test logic
//! }
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use doorwright_domain::{
    CreatorSettings, Location, Player, PlayerId, Point, StructureKind, StructureUid, WorldId,
};

use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::ports::{
    ClockPort, CreatorMessage, LimitKind, MockEconomyPort, MockLimitsPort, MockPermissionPort,
    MockStructureStorePort, MockToolPort, NotifierPort, PersistResult, RepoError,
};
use crate::use_cases::creator::{Creator, CreatorPorts, NameClaims};
use crate::use_cases::procedure::StepInput;

// =============================================================================
// Notifier
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
    Success,
}

/// Notifier that keeps every message it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(PlayerId, Level, CreatorMessage)>>,
}

impl RecordingNotifier {
    fn record(&self, player: PlayerId, level: Level, message: CreatorMessage) {
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .push((player, level, message));
    }

    pub fn messages(&self, level: Level) -> Vec<CreatorMessage> {
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .filter(|(_, l, _)| *l == level)
            .map(|(_, _, m)| m.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<CreatorMessage> {
        self.messages(Level::Error)
    }

    pub fn infos(&self) -> Vec<CreatorMessage> {
        self.messages(Level::Info)
    }

    pub fn successes(&self) -> Vec<CreatorMessage> {
        self.messages(Level::Success)
    }

    pub fn last_error(&self) -> Option<CreatorMessage> {
        self.errors().pop()
    }
}

impl NotifierPort for RecordingNotifier {
    fn send_info(&self, player: PlayerId, message: CreatorMessage) {
        self.record(player, Level::Info, message);
    }

    fn send_error(&self, player: PlayerId, message: CreatorMessage) {
        self.record(player, Level::Error, message);
    }

    fn send_success(&self, player: PlayerId, message: CreatorMessage) {
        self.record(player, Level::Success, message);
    }
}

// =============================================================================
// Creator fixture
// =============================================================================

/// What the mocked store answers to a persistence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    Stored,
    Cancelled,
    Empty,
    Failed,
}

/// Configurable collaborators for a creator under test.
///
/// `Some(n)` in one of the call-count fields turns into a `times(n)`
/// expectation on the corresponding mock.
pub struct CreatorFixture {
    pub world: WorldId,
    pub player: Player,
    pub notifier: Arc<RecordingNotifier>,
    pub names: NameClaims,
    pub settings: CreatorSettings,
    pub size_limit: Option<i64>,
    pub trigger_limit: Option<i64>,
    pub economy_enabled: bool,
    pub price: Option<f64>,
    pub can_afford: bool,
    pub purchases: Option<usize>,
    pub allowed: bool,
    pub grants: Option<usize>,
    pub revokes: Option<usize>,
    pub persist: Persist,
    pub persist_calls: Option<usize>,
}

impl CreatorFixture {
    pub fn new() -> Self {
        Self {
            world: WorldId::new(),
            player: Player::new(PlayerId::new(), "alex"),
            notifier: Arc::new(RecordingNotifier::default()),
            names: NameClaims::new(),
            settings: CreatorSettings::default(),
            size_limit: Some(100),
            trigger_limit: Some(10),
            economy_enabled: false,
            price: None,
            can_afford: true,
            purchases: None,
            allowed: true,
            grants: None,
            revokes: None,
            persist: Persist::Stored,
            persist_calls: None,
        }
    }

    /// Location input in the fixture's world.
    pub fn at(&self, x: i32, y: i32, z: i32) -> StepInput {
        StepInput::Location(Location::new(self.world, Point::new(x, y, z)))
    }

    /// The instant every fixture clock reports.
    pub fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .single()
            .expect("valid fixture time")
    }

    pub fn clock(&self) -> Arc<dyn ClockPort> {
        Arc::new(FixedClock(self.now()))
    }

    pub fn ports(&self) -> CreatorPorts {
        let size_limit = self.size_limit;
        let trigger_limit = self.trigger_limit;
        let mut limits = MockLimitsPort::new();
        limits.expect_get_limit().returning(move |_, kind| match kind {
            LimitKind::RegionSize => size_limit,
            LimitKind::TriggerDistance => trigger_limit,
        });

        let mut economy = MockEconomyPort::new();
        economy.expect_is_enabled().return_const(self.economy_enabled);
        economy.expect_get_price().return_const(self.price);
        let purchase = economy.expect_purchase().return_const(self.can_afford);
        if let Some(n) = self.purchases {
            purchase.times(n);
        }

        let mut permissions = MockPermissionPort::new();
        permissions.expect_may_act_at().return_const(self.allowed);

        let mut tools = MockToolPort::new();
        let grant = tools.expect_grant_tool().return_const(());
        if let Some(n) = self.grants {
            grant.times(n);
        }
        let revoke = tools.expect_revoke_tool().return_const(());
        if let Some(n) = self.revokes {
            revoke.times(n);
        }

        let behaviour = self.persist;
        let mut store = MockStructureStorePort::new();
        let add = store
            .expect_add_structure()
            .returning(move |structure, _| match behaviour {
                Persist::Stored => Ok(PersistResult::stored(
                    structure.with_uid(StructureUid::new(1)),
                )),
                Persist::Cancelled => Ok(PersistResult::cancelled()),
                Persist::Empty => Ok(PersistResult::empty()),
                Persist::Failed => Err(RepoError::storage("add_structure", "disk full")),
            });
        if let Some(n) = self.persist_calls {
            add.times(n);
        }

        CreatorPorts {
            notifier: self.notifier.clone(),
            limits: Arc::new(limits),
            economy: Arc::new(economy),
            store: Arc::new(store),
            permissions: Arc::new(permissions),
            tools: Arc::new(tools),
            clock: self.clock(),
        }
    }

    pub fn creator(&self, kind: StructureKind, name: Option<&str>) -> Creator {
        Creator::new(
            self.player.clone(),
            kind,
            name.map(str::to_string),
            self.ports(),
            Arc::new(self.settings.clone()),
            self.names.clone(),
        )
    }
}

impl Default for CreatorFixture {
    fn default() -> Self {
        Self::new()
    }
}
