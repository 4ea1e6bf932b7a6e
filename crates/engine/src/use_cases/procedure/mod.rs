//! Step-sequenced procedures.
//!
//! A [`Procedure`] is an ordered list of [`Step`]s with a cursor. Skip
//! predicates are evaluated against the owning context every time the active
//! step is resolved, never cached: a step that was skipped a moment ago may
//! become active once an earlier step changes the context.

mod step;

pub use step::{InputKind, Step, StepBuilder, StepExecutor, StepInput};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcedureError {
    #[error("Step not found: {0}")]
    StepNotFound(String),
}

pub struct Procedure<C> {
    steps: Vec<Step<C>>,
    cursor: usize,
    /// Index of the step whose preparation already ran for the current visit.
    prepared: Option<usize>,
}

impl<C> Procedure<C> {
    pub fn new(steps: Vec<Step<C>>, ctx: &C) -> Self {
        let mut procedure = Self {
            steps,
            cursor: 0,
            prepared: None,
        };
        procedure.cursor = procedure.first_active_from(0, ctx);
        procedure
    }

    fn first_active_from(&self, start: usize, ctx: &C) -> usize {
        (start..self.steps.len())
            .find(|&index| !self.steps[index].should_skip(ctx))
            .unwrap_or(self.steps.len())
    }

    fn move_cursor(&mut self, index: usize) {
        if index != self.cursor {
            self.prepared = None;
        }
        self.cursor = index;
    }

    /// The first step at or after the cursor that is not skipped.
    pub fn current_step(&self, ctx: &C) -> Option<&Step<C>> {
        self.steps.get(self.first_active_from(self.cursor, ctx))
    }

    /// Moves past the current step, then past any steps that are skipped.
    pub fn advance(&mut self, ctx: &C) {
        let current = self.first_active_from(self.cursor, ctx);
        if current >= self.steps.len() {
            self.move_cursor(current);
            return;
        }
        let next = self.first_active_from(current + 1, ctx);
        self.prepared = None;
        self.move_cursor(next);
    }

    /// Puts the cursor on the named step.
    ///
    /// If that step is currently skipped, the active step becomes the next
    /// one that is not.
    pub fn skip_to(&mut self, name: &str, ctx: &C) -> Result<(), ProcedureError> {
        let index = self
            .steps
            .iter()
            .position(|step| step.name() == name)
            .ok_or_else(|| ProcedureError::StepNotFound(name.to_string()))?;
        let target = self.first_active_from(index, ctx);
        self.prepared = None;
        self.move_cursor(target);
        Ok(())
    }

    /// Moves the cursor to the terminal position.
    pub fn finish(&mut self) {
        self.move_cursor(self.steps.len());
    }

    pub fn is_done(&self, ctx: &C) -> bool {
        self.current_step(ctx).is_none()
    }

    /// The preparation of the current step, if it has one that has not run
    /// during this visit. Marks it as run.
    pub fn take_preparation(&mut self, ctx: &C) -> Option<fn(&mut C)> {
        let index = self.first_active_from(self.cursor, ctx);
        if self.prepared == Some(index) {
            return None;
        }
        let prepare = self.steps.get(index)?.preparation()?;
        self.prepared = Some(index);
        Some(prepare)
    }

    pub fn step_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|step| step.name())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<C> std::fmt::Debug for Procedure<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Procedure")
            .field("steps", &self.step_names().collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .finish()
    }
}
