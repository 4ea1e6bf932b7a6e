//! Steps: one named stage of a procedure, bound to a typed executor.

use doorwright_domain::{Location, MovementDirection};
use futures_util::future::BoxFuture;

/// Raw input delivered to the active step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    Boolean(bool),
    Text(String),
    Location(Location),
    Direction(MovementDirection),
    None,
}

impl StepInput {
    pub fn kind(&self) -> InputKind {
        match self {
            StepInput::Boolean(_) => InputKind::Boolean,
            StepInput::Text(_) => InputKind::Text,
            StepInput::Location(_) => InputKind::Location,
            StepInput::Direction(_) => InputKind::Direction,
            StepInput::None => InputKind::None,
        }
    }
}

/// The kind of input an executor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Boolean,
    Text,
    Location,
    Direction,
    None,
}

impl InputKind {
    /// Short description for "please provide ..." messages.
    pub fn describe(&self) -> &'static str {
        match self {
            InputKind::Boolean => "yes or no",
            InputKind::Text => "a name",
            InputKind::Location => "a location",
            InputKind::Direction => "a direction",
            InputKind::None => "no input",
        }
    }
}

/// Validates one input, applies it to the context and reports success.
///
/// An executor that returns `false` must leave the context untouched.
pub enum StepExecutor<C> {
    Boolean(for<'a> fn(&'a mut C, bool) -> BoxFuture<'a, bool>),
    Text(for<'a> fn(&'a mut C, String) -> BoxFuture<'a, bool>),
    Location(for<'a> fn(&'a mut C, Location) -> BoxFuture<'a, bool>),
    Direction(for<'a> fn(&'a mut C, MovementDirection) -> BoxFuture<'a, bool>),
    Void(for<'a> fn(&'a mut C) -> BoxFuture<'a, bool>),
}

impl<C> Clone for StepExecutor<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for StepExecutor<C> {}

impl<C> StepExecutor<C> {
    pub fn input_kind(&self) -> InputKind {
        match self {
            StepExecutor::Boolean(_) => InputKind::Boolean,
            StepExecutor::Text(_) => InputKind::Text,
            StepExecutor::Location(_) => InputKind::Location,
            StepExecutor::Direction(_) => InputKind::Direction,
            StepExecutor::Void(_) => InputKind::None,
        }
    }

    /// Starts the executor on `input`.
    ///
    /// Returns the expected kind instead when `input` does not match; no
    /// coercion between kinds is attempted.
    pub fn execute<'a>(
        self,
        ctx: &'a mut C,
        input: StepInput,
    ) -> Result<BoxFuture<'a, bool>, InputKind> {
        match (self, input) {
            (StepExecutor::Boolean(f), StepInput::Boolean(value)) => Ok(f(ctx, value)),
            (StepExecutor::Text(f), StepInput::Text(value)) => Ok(f(ctx, value)),
            (StepExecutor::Location(f), StepInput::Location(value)) => Ok(f(ctx, value)),
            (StepExecutor::Direction(f), StepInput::Direction(value)) => Ok(f(ctx, value)),
            (StepExecutor::Void(f), StepInput::None) => Ok(f(ctx)),
            (executor, _) => Err(executor.input_kind()),
        }
    }
}

impl<C> std::fmt::Debug for StepExecutor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StepExecutor::{:?}", self.input_kind())
    }
}

/// Immutable step descriptor. Build with [`StepBuilder`].
pub struct Step<C> {
    name: &'static str,
    executor: StepExecutor<C>,
    prompt: Option<fn(&C) -> String>,
    skip_if: Option<fn(&C) -> bool>,
    prepare: Option<fn(&mut C)>,
    waits_for_input: bool,
    implicit_advance: bool,
}

impl<C> Step<C> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn executor(&self) -> StepExecutor<C> {
        self.executor
    }

    /// Prompt text for the current context; empty when the step has none.
    pub fn prompt(&self, ctx: &C) -> String {
        self.prompt.map(|prompt| prompt(ctx)).unwrap_or_default()
    }

    /// Evaluates the skip predicate against the current context.
    pub fn should_skip(&self, ctx: &C) -> bool {
        self.skip_if.is_some_and(|skip| skip(ctx))
    }

    pub fn preparation(&self) -> Option<fn(&mut C)> {
        self.prepare
    }

    pub fn waits_for_input(&self) -> bool {
        self.waits_for_input
    }

    pub fn implicit_advance(&self) -> bool {
        self.implicit_advance
    }
}

impl<C> Clone for Step<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            executor: self.executor,
            prompt: self.prompt,
            skip_if: self.skip_if,
            prepare: self.prepare,
            waits_for_input: self.waits_for_input,
            implicit_advance: self.implicit_advance,
        }
    }
}

impl<C> std::fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("executor", &self.executor)
            .field("waits_for_input", &self.waits_for_input)
            .field("implicit_advance", &self.implicit_advance)
            .finish()
    }
}

/// Reusable step template.
///
/// A builder can be kept as a factory and specialised per flow; `build` does
/// not consume it.
pub struct StepBuilder<C> {
    step: Step<C>,
}

impl<C> StepBuilder<C> {
    pub fn new(name: &'static str, executor: StepExecutor<C>) -> Self {
        Self {
            step: Step {
                name,
                executor,
                prompt: None,
                skip_if: None,
                prepare: None,
                waits_for_input: true,
                implicit_advance: true,
            },
        }
    }

    pub fn with_prompt(mut self, prompt: fn(&C) -> String) -> Self {
        self.step.prompt = Some(prompt);
        self
    }

    pub fn with_skip_if(mut self, skip_if: fn(&C) -> bool) -> Self {
        self.step.skip_if = Some(skip_if);
        self
    }

    pub fn with_prepare(mut self, prepare: fn(&mut C)) -> Self {
        self.step.prepare = Some(prepare);
        self
    }

    pub fn waits_for_input(mut self, waits: bool) -> Self {
        self.step.waits_for_input = waits;
        self
    }

    pub fn implicit_advance(mut self, implicit: bool) -> Self {
        self.step.implicit_advance = implicit;
        self
    }

    pub fn build(&self) -> Step<C> {
        self.step.clone()
    }
}

impl<C> Clone for StepBuilder<C> {
    fn clone(&self) -> Self {
        Self {
            step: self.step.clone(),
        }
    }
}
