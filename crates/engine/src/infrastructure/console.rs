//! Adapters for the line-oriented console host.
//!
//! The console has a single player and no region protection, so limits are
//! static and every location is permitted.

use doorwright_domain::{Location, MovementDirection, Player, PlayerId, Point, WorldId};

use crate::infrastructure::ports::{
    CreatorMessage, LimitKind, LimitsPort, NotifierPort, PermissionPort, ToolPort,
};
use crate::use_cases::procedure::{InputKind, StepInput};

/// Turns a console line into the input the current step expects.
///
/// Locations are read as `x y z` (or `x,y,z`) in `world`.
pub fn parse_input(expected: InputKind, line: &str, world: WorldId) -> Result<StepInput, String> {
    let line = line.trim();
    match expected {
        InputKind::Text => Ok(StepInput::Text(line.to_string())),
        InputKind::Boolean => match line.to_lowercase().as_str() {
            "y" | "yes" | "true" => Ok(StepInput::Boolean(true)),
            "n" | "no" | "false" => Ok(StepInput::Boolean(false)),
            _ => Err(format!("Please answer yes or no, not '{}'", line)),
        },
        InputKind::Location => line
            .parse::<Point>()
            .map(|point| StepInput::Location(Location::new(world, point)))
            .map_err(|e| e.to_string()),
        InputKind::Direction => line
            .parse::<MovementDirection>()
            .map(StepInput::Direction)
            .map_err(|e| e.to_string()),
        InputKind::None => Ok(StepInput::None),
    }
}

/// Prints player messages to stdout with a level prefix.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotifierPort for ConsoleNotifier {
    fn send_info(&self, player: PlayerId, message: CreatorMessage) {
        tracing::trace!(player = %player, "info message");
        println!("[info] {}", message);
    }

    fn send_error(&self, player: PlayerId, message: CreatorMessage) {
        tracing::trace!(player = %player, "error message");
        println!("[error] {}", message);
    }

    fn send_success(&self, player: PlayerId, message: CreatorMessage) {
        tracing::trace!(player = %player, "success message");
        println!("[ok] {}", message);
    }
}

/// The same limits for every player.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLimits {
    pub region_size: Option<i64>,
    pub trigger_distance: Option<i64>,
}

impl LimitsPort for StaticLimits {
    fn get_limit(&self, _player: &Player, kind: LimitKind) -> Option<i64> {
        match kind {
            LimitKind::RegionSize => self.region_size,
            LimitKind::TriggerDistance => self.trigger_distance,
        }
    }
}

/// Permits building anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionPort for AllowAll {
    fn may_act_at(&self, _player: &Player, _location: &Location) -> bool {
        true
    }
}

/// The console has no inventory; handing out the tool is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTools;

impl ToolPort for ConsoleTools {
    fn grant_tool(&self, player: &Player) {
        tracing::debug!(player = %player.id, "Creator tool granted");
    }

    fn revoke_tool(&self, player: &Player) {
        tracing::debug!(player = %player.id, "Creator tool revoked");
    }
}
