//! Prompt text shown while a step waits for input.

use doorwright_domain::format_directions;

use super::context::CreatorContext;

pub(crate) fn set_name(ctx: &CreatorContext) -> String {
    format!("Enter a name for your new {}.", ctx.descriptor.kind)
}

pub(crate) fn set_first_pos(ctx: &CreatorContext) -> String {
    format!(
        "Use the creator tool to select the first corner of your {}.",
        ctx.descriptor.kind
    )
}

pub(crate) fn set_second_pos(_ctx: &CreatorContext) -> String {
    "Now select the opposite corner.".to_string()
}

pub(crate) fn set_rotation_point(ctx: &CreatorContext) -> String {
    format!(
        "Select the point to rotate around; it must be within {} block(s) of the structure.",
        ctx.settings.rotation_point_range
    )
}

pub(crate) fn set_trigger_pos(ctx: &CreatorContext) -> String {
    format!(
        "Select the block that will toggle your {}. It must be outside the structure.",
        ctx.descriptor.kind
    )
}

pub(crate) fn set_open_status(ctx: &CreatorContext) -> String {
    format!("Is the {} currently open? (yes/no)", ctx.descriptor.kind)
}

pub(crate) fn set_open_direction(ctx: &CreatorContext) -> String {
    format!(
        "Which way should it open? Choose one of: {}",
        format_directions(&ctx.valid_directions())
    )
}

pub(crate) fn confirm_price(ctx: &CreatorContext) -> String {
    format!(
        "This {} costs {}. Do you want to buy it? (yes/no)",
        ctx.descriptor.kind,
        ctx.formatted_price()
    )
}
