//! Interactive structure creation.
//!
//! A [`Creator`] walks one player through the steps needed to define a
//! structure: name, two corners, rotation point, trigger point, open status,
//! open direction and, when the economy charges for it, a price confirmation.
//! The final step builds the structure and hands it to storage.
//!
//! Input delivery must be serialised per creator;
//! [`CreatorSessions`](crate::use_cases::session::CreatorSessions) does that for hosts that
//! cannot guarantee it.

mod context;
mod kinds;
mod names;
mod prompts;
mod steps;


use std::sync::Arc;

use doorwright_domain::{CreatorSettings, Player, StructureKind};
use tokio::task::JoinHandle;

use crate::infrastructure::ports::{
    ClockPort, CreatorMessage, EconomyPort, LimitsPort, NotifierPort, PermissionPort,
    StructureStorePort, ToolPort,
};
use crate::use_cases::procedure::{InputKind, Procedure, ProcedureError, StepInput};

use context::Transition;

pub use context::{CreatorContext, CreatorStatus, WorkingState};
pub use kinds::KindDescriptor;
pub use names::{ClaimToken, NameClaims};
pub use steps::{names as step_names, StepFactory};

/// Collaborators a creator talks to.
#[derive(Clone)]
pub struct CreatorPorts {
    pub notifier: Arc<dyn NotifierPort>,
    pub limits: Arc<dyn LimitsPort>,
    pub economy: Arc<dyn EconomyPort>,
    pub store: Arc<dyn StructureStorePort>,
    pub permissions: Arc<dyn PermissionPort>,
    pub tools: Arc<dyn ToolPort>,
    pub clock: Arc<dyn ClockPort>,
}

pub struct Creator {
    ctx: CreatorContext,
    procedure: Procedure<CreatorContext>,
}

impl Creator {
    /// Starts a session for `player`.
    ///
    /// A valid `name` is applied immediately and the naming step is skipped;
    /// an invalid one is reported and the player is asked for a name as usual.
    pub fn new(
        player: Player,
        kind: StructureKind,
        name: Option<String>,
        ports: CreatorPorts,
        settings: Arc<CreatorSettings>,
        names: NameClaims,
    ) -> Self {
        let descriptor = KindDescriptor::for_kind(kind);
        let mut ctx = CreatorContext::new(player, descriptor, settings, ports, names);
        if let Some(name) = name {
            ctx.name_preset = ctx.set_name(name);
        }
        let procedure = Procedure::new((descriptor.steps)(&StepFactory::new()), &ctx);

        tracing::info!(
            player = %ctx.player.id,
            kind = %kind,
            steps = procedure.len(),
            "Creator session started"
        );

        let mut creator = Self { ctx, procedure };
        creator.prepare_current_step();
        creator
    }

    pub fn player(&self) -> &Player {
        &self.ctx.player
    }

    pub fn kind(&self) -> StructureKind {
        self.ctx.descriptor.kind
    }

    pub fn status(&self) -> CreatorStatus {
        self.ctx.status
    }

    pub fn working_state(&self) -> &WorkingState {
        &self.ctx.state
    }

    pub fn is_done(&self) -> bool {
        self.ctx.status != CreatorStatus::Active || self.procedure.is_done(&self.ctx)
    }

    pub fn current_step_name(&self) -> Option<&'static str> {
        if self.ctx.status != CreatorStatus::Active {
            return None;
        }
        self.procedure.current_step(&self.ctx).map(|step| step.name())
    }

    /// Kind of input the current step expects.
    pub fn expected_input(&self) -> Option<InputKind> {
        if self.ctx.status != CreatorStatus::Active {
            return None;
        }
        self.procedure
            .current_step(&self.ctx)
            .map(|step| step.executor().input_kind())
    }

    pub fn current_step_prompt(&self) -> Option<String> {
        if self.ctx.status != CreatorStatus::Active {
            return None;
        }
        self.procedure
            .current_step(&self.ctx)
            .map(|step| step.prompt(&self.ctx))
    }

    /// Re-enters the flow at the named step.
    pub fn skip_to(&mut self, name: &str) -> Result<(), ProcedureError> {
        self.procedure.skip_to(name, &self.ctx)?;
        tracing::debug!(player = %self.ctx.player.id, step = name, "Skipped to step");
        self.prepare_current_step();
        Ok(())
    }

    /// Aborts the session. Safe to call at any time; only the first call on
    /// an active session has any effect.
    pub fn abort(&mut self) {
        if self.ctx.abort_session() {
            self.procedure.finish();
        }
    }

    /// Takes the handle of the persistence request issued on completion.
    ///
    /// The flow itself never waits for it; hosts that want to await the
    /// report can.
    pub fn take_persistence(&mut self) -> Option<JoinHandle<()>> {
        self.ctx.persistence.take()
    }

    /// Feeds one input to the current step.
    ///
    /// Returns whether the input was accepted. Rejected input leaves the
    /// session on the same step.
    pub async fn handle_input(&mut self, input: StepInput) -> bool {
        if self.is_done() {
            tracing::debug!(player = %self.ctx.player.id, "Input for finished creator ignored");
            return false;
        }
        let accepted = self.apply(input).await;
        if accepted {
            self.run_automatic_steps().await;
        }
        accepted
    }

    fn prepare_current_step(&mut self) {
        if let Some(prepare) = self.procedure.take_preparation(&self.ctx) {
            prepare(&mut self.ctx);
        }
    }

    async fn apply(&mut self, input: StepInput) -> bool {
        let Some(step) = self.procedure.current_step(&self.ctx) else {
            return false;
        };
        let name = step.name();
        let executor = step.executor();
        let implicit_advance = step.implicit_advance();

        let expected = executor.input_kind();
        if input.kind() != expected {
            tracing::warn!(
                player = %self.ctx.player.id,
                step = name,
                expected = ?expected,
                received = ?input.kind(),
                "Input of the wrong kind for step"
            );
            self.ctx.ports.notifier.send_error(
                self.ctx.player.id,
                CreatorMessage::WrongInputKind {
                    expected: expected.describe(),
                },
            );
            return false;
        }

        self.prepare_current_step();

        let Ok(execution) = executor.execute(&mut self.ctx, input) else {
            return false;
        };
        if !execution.await {
            tracing::debug!(player = %self.ctx.player.id, step = name, "Step input rejected");
            return false;
        }

        let advance = match self.ctx.take_transition() {
            Some(Transition::Abort) => {
                self.abort();
                return true;
            }
            Some(Transition::Advance) => true,
            None => implicit_advance,
        };
        if advance {
            self.procedure.advance(&self.ctx);
            tracing::debug!(
                player = %self.ctx.player.id,
                from = name,
                to = ?self.procedure.current_step(&self.ctx).map(|s| s.name()),
                "Creator advanced"
            );
        }
        if self.ctx.status == CreatorStatus::Completed {
            self.procedure.finish();
        }
        true
    }

    /// Runs steps that do not wait for input as soon as they become current.
    async fn run_automatic_steps(&mut self) {
        loop {
            self.prepare_current_step();
            let waits = match self.procedure.current_step(&self.ctx) {
                Some(step) => step.waits_for_input(),
                None => break,
            };
            if waits || self.ctx.status != CreatorStatus::Active {
                break;
            }
            if !self.apply(StepInput::None).await {
                break;
            }
        }
    }
}

impl std::fmt::Debug for Creator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creator")
            .field("player", &self.ctx.player.id)
            .field("kind", &self.ctx.descriptor.kind)
            .field("status", &self.ctx.status)
            .field("procedure", &self.procedure)
            .finish()
    }
}
