use chase_core::{Action, ActionLevels, StrategyKind, MAX_ACTION_LEVEL};
use rand::RngCore;

use crate::{discard_invalid, Context, Strategy};

/// Heads away from the opponent on both axes.
///
/// When the roles share a column or row the role escapes right or up.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveAway;

impl Strategy for MoveAway {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MoveAway
    }

    fn action_levels(&mut self, ctx: &Context<'_>, _rng: &mut dyn RngCore) -> ActionLevels {
        let me = ctx.role().position();
        let target = ctx.opponent().position();
        let mut levels = ActionLevels::new();

        let horizontal = if me.x() >= target.x() {
            Action::Right
        } else {
            Action::Left
        };
        let vertical = if me.y() >= target.y() {
            Action::Up
        } else {
            Action::Down
        };
        levels.set(horizontal, MAX_ACTION_LEVEL);
        levels.set(vertical, MAX_ACTION_LEVEL);

        discard_invalid(&mut levels, ctx);
        levels
    }
}

/// Heads towards the opponent on every axis where the roles differ.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveClose;

impl Strategy for MoveClose {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MoveClose
    }

    fn action_levels(&mut self, ctx: &Context<'_>, _rng: &mut dyn RngCore) -> ActionLevels {
        let me = ctx.role().position();
        let target = ctx.opponent().position();
        let mut levels = ActionLevels::new();

        if me.x() > target.x() {
            levels.set(Action::Left, MAX_ACTION_LEVEL);
        } else if me.x() < target.x() {
            levels.set(Action::Right, MAX_ACTION_LEVEL);
        }
        if me.y() > target.y() {
            levels.set(Action::Down, MAX_ACTION_LEVEL);
        } else if me.y() < target.y() {
            levels.set(Action::Up, MAX_ACTION_LEVEL);
        }

        discard_invalid(&mut levels, ctx);
        levels
    }
}
