//! Step templates for creator flows.

use doorwright_domain::{Location, MovementDirection};
use futures_util::future::{ready, BoxFuture};
use futures_util::FutureExt;

use super::context::CreatorContext;
use super::prompts;
use crate::use_cases::procedure::{Step, StepBuilder, StepExecutor};

/// Step identifiers, usable with [`Creator::skip_to`](super::Creator::skip_to).
pub mod names {
    pub const SET_NAME: &str = "set_name";
    pub const SET_FIRST_POS: &str = "set_first_pos";
    pub const SET_SECOND_POS: &str = "set_second_pos";
    pub const SET_ROTATION_POINT: &str = "set_rotation_point";
    pub const SET_TRIGGER_POS: &str = "set_trigger_pos";
    pub const SET_OPEN_STATUS: &str = "set_open_status";
    pub const SET_OPEN_DIRECTION: &str = "set_open_direction";
    pub const CONFIRM_PRICE: &str = "confirm_price";
    pub const COMPLETE_PROCESS: &str = "complete_process";
}

// Executor adapters. Only the price confirmation actually awaits anything.

fn exec_set_name(ctx: &mut CreatorContext, raw: String) -> BoxFuture<'_, bool> {
    ready(ctx.set_name(raw)).boxed()
}

fn exec_set_first_pos(ctx: &mut CreatorContext, location: Location) -> BoxFuture<'_, bool> {
    ready(ctx.set_first_pos(location)).boxed()
}

fn exec_set_second_pos(ctx: &mut CreatorContext, location: Location) -> BoxFuture<'_, bool> {
    ready(ctx.set_second_pos(location)).boxed()
}

fn exec_set_rotation_point(ctx: &mut CreatorContext, location: Location) -> BoxFuture<'_, bool> {
    ready(ctx.set_rotation_point(location)).boxed()
}

fn exec_set_trigger_pos(ctx: &mut CreatorContext, location: Location) -> BoxFuture<'_, bool> {
    ready(ctx.set_trigger_pos(location)).boxed()
}

fn exec_set_open_status(ctx: &mut CreatorContext, is_open: bool) -> BoxFuture<'_, bool> {
    ready(ctx.set_open_status(is_open)).boxed()
}

fn exec_set_open_direction(
    ctx: &mut CreatorContext,
    direction: MovementDirection,
) -> BoxFuture<'_, bool> {
    ready(ctx.set_open_direction(direction)).boxed()
}

fn exec_confirm_price(ctx: &mut CreatorContext, confirmed: bool) -> BoxFuture<'_, bool> {
    ctx.confirm_price(confirmed).boxed()
}

fn exec_complete(ctx: &mut CreatorContext) -> BoxFuture<'_, bool> {
    ready(ctx.complete()).boxed()
}

/// Reusable builders for every step a creator flow may contain.
pub struct StepFactory {
    pub set_name: StepBuilder<CreatorContext>,
    pub set_first_pos: StepBuilder<CreatorContext>,
    pub set_second_pos: StepBuilder<CreatorContext>,
    pub set_rotation_point: StepBuilder<CreatorContext>,
    pub set_trigger_pos: StepBuilder<CreatorContext>,
    pub set_open_status: StepBuilder<CreatorContext>,
    pub set_open_direction: StepBuilder<CreatorContext>,
    pub confirm_price: StepBuilder<CreatorContext>,
    pub complete_process: StepBuilder<CreatorContext>,
}

impl StepFactory {
    pub fn new() -> Self {
        Self {
            set_name: StepBuilder::new(names::SET_NAME, StepExecutor::Text(exec_set_name))
                .with_prompt(prompts::set_name)
                .with_skip_if(|ctx| ctx.name_preset),
            set_first_pos: StepBuilder::new(
                names::SET_FIRST_POS,
                StepExecutor::Location(exec_set_first_pos),
            )
            .with_prompt(prompts::set_first_pos)
            .with_prepare(|ctx| ctx.grant_tool()),
            set_second_pos: StepBuilder::new(
                names::SET_SECOND_POS,
                StepExecutor::Location(exec_set_second_pos),
            )
            .with_prompt(prompts::set_second_pos),
            set_rotation_point: StepBuilder::new(
                names::SET_ROTATION_POINT,
                StepExecutor::Location(exec_set_rotation_point),
            )
            .with_prompt(prompts::set_rotation_point),
            set_trigger_pos: StepBuilder::new(
                names::SET_TRIGGER_POS,
                StepExecutor::Location(exec_set_trigger_pos),
            )
            .with_prompt(prompts::set_trigger_pos),
            set_open_status: StepBuilder::new(
                names::SET_OPEN_STATUS,
                StepExecutor::Boolean(exec_set_open_status),
            )
            .with_prompt(prompts::set_open_status),
            set_open_direction: StepBuilder::new(
                names::SET_OPEN_DIRECTION,
                StepExecutor::Direction(exec_set_open_direction),
            )
            .with_prompt(prompts::set_open_direction),
            confirm_price: StepBuilder::new(
                names::CONFIRM_PRICE,
                StepExecutor::Boolean(exec_confirm_price),
            )
            .with_prompt(prompts::confirm_price)
            .with_skip_if(|ctx| ctx.price().is_none())
            .implicit_advance(false),
            complete_process: StepBuilder::new(
                names::COMPLETE_PROCESS,
                StepExecutor::Void(exec_complete),
            )
            .waits_for_input(false),
        }
    }

    /// Flow for kinds that pivot around a player-chosen rotation point.
    pub fn rotating_flow(&self) -> Vec<Step<CreatorContext>> {
        vec![
            self.set_name.build(),
            self.set_first_pos.build(),
            self.set_second_pos.build(),
            self.set_rotation_point.build(),
            self.set_trigger_pos.build(),
            self.set_open_status.build(),
            self.set_open_direction.build(),
            self.confirm_price.build(),
            self.complete_process.build(),
        ]
    }

    /// Flow for kinds that slide and derive their rotation point.
    pub fn sliding_flow(&self) -> Vec<Step<CreatorContext>> {
        vec![
            self.set_name.build(),
            self.set_first_pos.build(),
            self.set_second_pos.build(),
            self.set_trigger_pos.build(),
            self.set_open_status.build(),
            self.set_open_direction.build(),
            self.confirm_price.build(),
            self.complete_process.build(),
        ]
    }
}

impl Default for StepFactory {
    fn default() -> Self {
        Self::new()
    }
}
