//! Application state and composition.

use std::sync::Arc;

use doorwright_domain::{CreatorSettings, Player, StructureKind};

use crate::infrastructure::{
    clock::SystemClock,
    console::{AllowAll, ConsoleNotifier, ConsoleTools, StaticLimits},
    economy::FixedPriceEconomy,
    ports::{
        ClockPort, EconomyPort, LimitsPort, NotifierPort, PermissionPort, StructureStorePort,
        ToolPort,
    },
    settings::AppConfig,
    store::JsonFileStructureStore,
};
use crate::use_cases::{Creator, CreatorPorts, CreatorSessions, NameClaims};

/// Main application state.
///
/// Holds the collaborators shared by every creator and the session registry.
pub struct App {
    pub settings: Arc<CreatorSettings>,
    pub ports: CreatorPorts,
    pub names: NameClaims,
    pub sessions: CreatorSessions,
}

impl App {
    /// Wires the console host adapters described by `config`.
    pub fn new(config: &AppConfig) -> Self {
        let notifier: Arc<dyn NotifierPort> = Arc::new(ConsoleNotifier::new());
        let limits: Arc<dyn LimitsPort> = Arc::new(StaticLimits {
            region_size: config.host.region_size_limit,
            trigger_distance: config.host.trigger_distance_limit,
        });
        let economy: Arc<dyn EconomyPort> = Arc::new(FixedPriceEconomy::new(
            config.host.price_per_block,
            config.host.starting_balance,
        ));
        let store: Arc<dyn StructureStorePort> =
            Arc::new(JsonFileStructureStore::new(&config.host.store_path));
        let permissions: Arc<dyn PermissionPort> = Arc::new(AllowAll);
        let tools: Arc<dyn ToolPort> = Arc::new(ConsoleTools);
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let ports = CreatorPorts {
            notifier,
            limits,
            economy,
            store,
            permissions,
            tools,
            clock,
        };
        Self::with_ports(ports, config.creator.clone())
    }

    /// Builds the app around an existing set of collaborators.
    pub fn with_ports(ports: CreatorPorts, settings: CreatorSettings) -> Self {
        let sessions = CreatorSessions::new(
            ports.notifier.clone(),
            ports.clock.clone(),
            settings.session_timeout_secs,
        );
        Self {
            settings: Arc::new(settings),
            ports,
            names: NameClaims::new(),
            sessions,
        }
    }

    /// Creates a creator for `player`. `kind` falls back to the configured default.
    pub fn creator(
        &self,
        player: Player,
        kind: Option<StructureKind>,
        name: Option<String>,
    ) -> Creator {
        Creator::new(
            player,
            kind.unwrap_or(self.settings.default_kind),
            name,
            self.ports.clone(),
            self.settings.clone(),
            self.names.clone(),
        )
    }

    /// Creates a creator for `player` and registers it as their session.
    pub async fn start_session(
        &self,
        player: Player,
        kind: Option<StructureKind>,
        name: Option<String>,
    ) {
        let creator = self.creator(player, kind, name);
        self.sessions.start(creator).await;
    }
}
