//! Working state of a creator session and the handlers that fill it in.
//!
//! Every handler either commits its field and returns `true`, or reports the
//! problem to the player and returns `false` without touching any field.

use std::sync::Arc;

use doorwright_domain::{
    format_price, world_matches, CreatorSettings, Cuboid, Location, MovementDirection, Player,
    Point, StructureDraft, StructureName, StructureOwner, WorldId,
};
use tokio::task::JoinHandle;

use super::kinds::KindDescriptor;
use super::names::{ClaimToken, NameClaims};
use super::CreatorPorts;
use crate::infrastructure::ports::{CreatorMessage, LimitKind, PersistResult};

/// Lifecycle of a creator session. `Completed` and `Aborted` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorStatus {
    Active,
    Completed,
    Aborted,
}

/// Decision taken by a step that does not advance implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Advance,
    Abort,
}

fn required<'a, T>(field: &'a Option<T>, name: &str) -> &'a T {
    match field {
        Some(value) => value,
        None => panic!("creator field `{}` read before the step that sets it", name),
    }
}

/// Fields collected step by step. Each is set by exactly one step handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingState {
    name: Option<StructureName>,
    world: Option<WorldId>,
    first_pos: Option<Point>,
    cuboid: Option<Cuboid>,
    rotation_point: Option<Point>,
    trigger_point: Option<Point>,
    open_direction: Option<MovementDirection>,
    is_open: bool,
    is_locked: bool,
}

impl WorkingState {
    // Accessors for fields an earlier step must have set. Reading one too
    // early means the step list is malformed.

    pub fn name(&self) -> &StructureName {
        required(&self.name, "name")
    }

    pub fn world(&self) -> WorldId {
        *required(&self.world, "world")
    }

    pub fn first_pos(&self) -> Point {
        *required(&self.first_pos, "first_pos")
    }

    pub fn cuboid(&self) -> &Cuboid {
        required(&self.cuboid, "cuboid")
    }

    pub fn rotation_point(&self) -> Point {
        *required(&self.rotation_point, "rotation_point")
    }

    pub fn trigger_point(&self) -> Point {
        *required(&self.trigger_point, "trigger_point")
    }

    pub fn open_direction(&self) -> MovementDirection {
        *required(&self.open_direction, "open_direction")
    }

    // Non-panicking views, for hosts and tests.

    pub fn name_opt(&self) -> Option<&StructureName> {
        self.name.as_ref()
    }

    pub fn cuboid_opt(&self) -> Option<&Cuboid> {
        self.cuboid.as_ref()
    }

    pub fn rotation_point_opt(&self) -> Option<Point> {
        self.rotation_point
    }

    pub fn trigger_point_opt(&self) -> Option<Point> {
        self.trigger_point
    }

    pub fn open_direction_opt(&self) -> Option<MovementDirection> {
        self.open_direction
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }
}

/// Everything a step executor can see and change.
pub struct CreatorContext {
    pub(crate) player: Player,
    pub(crate) descriptor: KindDescriptor,
    pub(crate) settings: Arc<CreatorSettings>,
    pub(crate) ports: CreatorPorts,
    pub(crate) names: NameClaims,
    pub(crate) claim: ClaimToken,
    pub(crate) state: WorkingState,
    pub(crate) status: CreatorStatus,
    pub(crate) name_preset: bool,
    pub(crate) tool_granted: bool,
    pub(crate) transition: Option<Transition>,
    pub(crate) persistence: Option<JoinHandle<()>>,
}

impl CreatorContext {
    pub(crate) fn new(
        player: Player,
        descriptor: KindDescriptor,
        settings: Arc<CreatorSettings>,
        ports: CreatorPorts,
        names: NameClaims,
    ) -> Self {
        let claim = ClaimToken::new(player.id);
        Self {
            player,
            descriptor,
            settings,
            ports,
            names,
            claim,
            state: WorkingState::default(),
            status: CreatorStatus::Active,
            name_preset: false,
            tool_granted: false,
            transition: None,
            persistence: None,
        }
    }

    fn info(&self, message: CreatorMessage) {
        self.ports.notifier.send_info(self.player.id, message);
    }

    fn error(&self, message: CreatorMessage) {
        self.ports.notifier.send_error(self.player.id, message);
    }

    fn may_act_at(&self, location: &Location) -> bool {
        if self.ports.permissions.may_act_at(&self.player, location) {
            return true;
        }
        self.error(CreatorMessage::NoPermission {
            point: location.point,
        });
        false
    }

    fn in_session_world(&self, location: &Location) -> bool {
        if world_matches(location.world, self.state.world()) {
            return true;
        }
        self.error(CreatorMessage::WrongWorld);
        false
    }

    pub(crate) fn take_transition(&mut self) -> Option<Transition> {
        self.transition.take()
    }

    // =========================================================================
    // Tool
    // =========================================================================

    pub(crate) fn grant_tool(&mut self) {
        if self.tool_granted {
            return;
        }
        self.ports.tools.grant_tool(&self.player);
        self.tool_granted = true;
        self.info(CreatorMessage::ToolGiven);
    }

    pub(crate) fn revoke_tool(&mut self) {
        if !self.tool_granted {
            return;
        }
        self.ports.tools.revoke_tool(&self.player);
        self.tool_granted = false;
    }

    // =========================================================================
    // Terminal transitions
    // =========================================================================

    /// Moves an active session to `Aborted`. Returns false if already terminal.
    pub(crate) fn abort_session(&mut self) -> bool {
        if self.status != CreatorStatus::Active {
            return false;
        }
        self.status = CreatorStatus::Aborted;
        self.revoke_tool();
        if let Some(name) = &self.state.name {
            self.names.release(name, self.claim);
        }
        tracing::info!(
            player = %self.player.id,
            kind = %self.descriptor.kind,
            "Creator session aborted"
        );
        true
    }

    // =========================================================================
    // Step handlers
    // =========================================================================

    pub(crate) fn set_name(&mut self, raw: String) -> bool {
        let name = match StructureName::with_max_length(raw, self.settings.max_name_length) {
            Ok(name) => name,
            Err(e) => {
                self.error(CreatorMessage::InvalidName {
                    reason: e.to_string(),
                });
                return false;
            }
        };
        if !self.names.claim(&name, self.claim) {
            self.error(CreatorMessage::NameInUse {
                name: name.to_string(),
            });
            return false;
        }
        if let Some(previous) = self.state.name.take() {
            if previous.key() != name.key() {
                self.names.release(&previous, self.claim);
            }
        }
        tracing::debug!(player = %self.player.id, name = %name, "Structure name set");
        self.state.name = Some(name);
        true
    }

    pub(crate) fn set_first_pos(&mut self, location: Location) -> bool {
        if !self.may_act_at(&location) {
            return false;
        }
        self.state.world = Some(location.world);
        self.state.first_pos = Some(location.point);
        true
    }

    pub(crate) fn set_second_pos(&mut self, location: Location) -> bool {
        let first = self.state.first_pos();
        if !self.in_session_world(&location) || !self.may_act_at(&location) {
            return false;
        }

        let cuboid = Cuboid::new(first, location.point);
        let volume = cuboid.volume();
        if let Some(limit) = self
            .ports
            .limits
            .get_limit(&self.player, LimitKind::RegionSize)
        {
            if volume > limit {
                tracing::debug!(player = %self.player.id, volume, limit, "Cuboid exceeds size limit");
                self.error(CreatorMessage::SizeLimitExceeded { volume, limit });
                return false;
            }
        }
        if (self.descriptor.valid_directions)(&cuboid).is_empty() {
            tracing::debug!(player = %self.player.id, cuboid = %cuboid, "Cuboid has no valid direction");
            self.error(CreatorMessage::UnsupportedShape {
                kind: self.descriptor.kind,
            });
            return false;
        }
        self.state.cuboid = Some(cuboid);
        true
    }

    pub(crate) fn set_rotation_point(&mut self, location: Location) -> bool {
        let cuboid = *self.state.cuboid();
        if !self.in_session_world(&location) {
            return false;
        }
        let range = self.settings.rotation_point_range;
        if !cuboid.is_in_range(location.point, range) {
            self.error(CreatorMessage::RotationPointOutOfRange {
                point: location.point,
                range,
            });
            return false;
        }
        self.state.rotation_point = Some(location.point);
        true
    }

    pub(crate) fn set_trigger_pos(&mut self, location: Location) -> bool {
        let cuboid = *self.state.cuboid();
        if !self.in_session_world(&location) || !self.may_act_at(&location) {
            return false;
        }
        if cuboid.contains(location.point) {
            self.error(CreatorMessage::TriggerInsideStructure {
                point: location.point,
            });
            return false;
        }
        let distance = cuboid.distance_from_center(location.point);
        if let Some(limit) = self
            .ports
            .limits
            .get_limit(&self.player, LimitKind::TriggerDistance)
        {
            if distance > limit as f64 {
                self.error(CreatorMessage::TriggerTooFar { distance, limit });
                return false;
            }
        }
        self.state.trigger_point = Some(location.point);
        self.revoke_tool();
        true
    }

    pub(crate) fn set_open_status(&mut self, is_open: bool) -> bool {
        self.state.is_open = is_open;
        true
    }

    pub(crate) fn valid_directions(&self) -> Vec<MovementDirection> {
        (self.descriptor.valid_directions)(self.state.cuboid())
    }

    pub(crate) fn set_open_direction(&mut self, direction: MovementDirection) -> bool {
        let valid = self.valid_directions();
        if !valid.contains(&direction) {
            self.error(CreatorMessage::InvalidDirection { direction, valid });
            return false;
        }
        self.state.open_direction = Some(direction);
        true
    }

    // =========================================================================
    // Economy
    // =========================================================================

    /// Price of the structure as currently shaped; `None` when it is free.
    pub(crate) fn price(&self) -> Option<f64> {
        let economy = &self.ports.economy;
        if !economy.is_enabled() {
            return None;
        }
        economy
            .get_price(self.descriptor.kind, self.state.cuboid().volume())
            .filter(|price| *price > 0.0)
    }

    pub(crate) fn formatted_price(&self) -> String {
        format_price(self.price().unwrap_or(0.0), &self.settings.price_format)
    }

    /// Refusal and failed payment ask for an abort; a successful payment
    /// advances. The input is consumed in all three cases.
    pub(crate) async fn confirm_price(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            self.info(CreatorMessage::PriceRefused);
            self.transition = Some(Transition::Abort);
            return true;
        }

        let price = self.formatted_price();
        let purchased = self
            .ports
            .economy
            .purchase(
                &self.player,
                self.state.world(),
                self.descriptor.kind,
                self.state.cuboid().volume(),
            )
            .await;
        if !purchased {
            self.error(CreatorMessage::InsufficientFunds { price });
            self.transition = Some(Transition::Abort);
            return true;
        }

        self.info(CreatorMessage::Purchased { price });
        self.transition = Some(Transition::Advance);
        true
    }

    // =========================================================================
    // Completion
    // =========================================================================

    fn draft(&self) -> StructureDraft {
        let rotation_point = self
            .descriptor
            .needs_rotation_point()
            .then(|| self.state.rotation_point());
        StructureDraft {
            name: self.state.name().clone(),
            world: self.state.world(),
            cuboid: *self.state.cuboid(),
            rotation_point,
            trigger_point: self.state.trigger_point(),
            open_direction: self.state.open_direction(),
            is_open: self.state.is_open,
            is_locked: self.state.is_locked,
            primary_owner: StructureOwner::creator(self.player.clone()),
            created_at: self.ports.clock.now(),
        }
    }

    /// Builds the structure and hands it to storage without waiting for the
    /// outcome. Runs at most once per session.
    pub(crate) fn complete(&mut self) -> bool {
        if self.status != CreatorStatus::Active {
            return false;
        }
        let structure = (self.descriptor.construct)(self.draft());
        self.status = CreatorStatus::Completed;
        self.revoke_tool();
        self.names.release(self.state.name(), self.claim);

        tracing::info!(
            player = %self.player.id,
            kind = %self.descriptor.kind,
            name = %structure.name,
            "Structure constructed, requesting persistence"
        );

        let store = self.ports.store.clone();
        let notifier = self.ports.notifier.clone();
        let player = self.player.clone();
        self.persistence = Some(tokio::spawn(async move {
            let name = structure.name.to_string();
            match store.add_structure(structure, &player).await {
                Ok(PersistResult {
                    cancelled: true, ..
                }) => {
                    tracing::warn!(player = %player.id, name = %name, "Structure creation cancelled by storage");
                    notifier.send_error(player.id, CreatorMessage::CreationCancelled { name });
                }
                Ok(PersistResult {
                    structure: Some(stored),
                    ..
                }) => {
                    tracing::info!(player = %player.id, name = %name, uid = %stored.uid, "Structure persisted");
                    notifier.send_success(
                        player.id,
                        CreatorMessage::StructureCreated {
                            name,
                            uid: stored.uid,
                        },
                    );
                }
                Ok(_) => {
                    tracing::error!(player = %player.id, name = %name, "Storage accepted structure but returned nothing");
                    notifier.send_error(player.id, CreatorMessage::CreationFailed);
                }
                Err(e) => {
                    tracing::error!(player = %player.id, name = %name, error = %e, "Failed to persist structure");
                    notifier.send_error(player.id, CreatorMessage::CreationFailed);
                }
            }
        }));
        true
    }
}
