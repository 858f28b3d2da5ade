use chase_core::{Action, ActionLevels, Position, StrategyKind, MAX_ACTION_LEVEL};
use rand::RngCore;

use crate::{discard_invalid, Context, Strategy};

/// Depth of the scanned rectangle; its width is twice this value.
const SCAN_RANGE: i32 = 5;

/// Prefers directions with fewer known walls nearby.
///
/// Cells outside the map count as walls. Cells the role has not revealed yet
/// count as open ground, even when they hide a wall.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallDensity;

impl Strategy for WallDensity {
    fn kind(&self) -> StrategyKind {
        StrategyKind::WallDensity
    }

    fn action_levels(&mut self, ctx: &Context<'_>, _rng: &mut dyn RngCore) -> ActionLevels {
        let mut levels = ActionLevels::new();
        for action in [Action::Up, Action::Down, Action::Left, Action::Right] {
            levels.set(action, (1.0 - density(ctx, action)) * MAX_ACTION_LEVEL);
        }
        discard_invalid(&mut levels, ctx);
        levels
    }
}

/// Smoothed share of wall cells in the rectangle scanned for `action`, rounded
/// to two decimals.
fn density(ctx: &Context<'_>, action: Action) -> f64 {
    let Some((begin, end)) = scan_area(ctx.role().position(), action) else {
        return 1.0;
    };

    let role = ctx.role();
    let map = ctx.map();
    let mut total = 1_u32;
    let mut walls = 1_u32;
    for x in begin.x()..end.x() {
        for y in begin.y()..end.y() {
            let cell = Position::new(x, y);
            total += 1;
            if !map.valid(cell) || (role.revealed(cell) && map.is_wall(cell)) {
                walls += 1;
            }
        }
    }

    let ratio = f64::from(walls) / f64::from(total);
    (ratio * 100.0).round() / 100.0
}

/// Half-open rectangle `[begin, end)` scanned in the direction of `action`.
fn scan_area(position: Position, action: Action) -> Option<(Position, Position)> {
    let (x, y) = (position.x(), position.y());
    let area = match action {
        Action::Left => (
            Position::new(x - SCAN_RANGE, y - SCAN_RANGE),
            Position::new(x, y + SCAN_RANGE),
        ),
        Action::Right => (
            Position::new(x, y - SCAN_RANGE),
            Position::new(x + SCAN_RANGE, y + SCAN_RANGE),
        ),
        Action::Up => (
            Position::new(x - SCAN_RANGE, y),
            Position::new(x + SCAN_RANGE, y + SCAN_RANGE),
        ),
        Action::Down => (
            Position::new(x - SCAN_RANGE, y - SCAN_RANGE),
            Position::new(x + SCAN_RANGE, y),
        ),
        Action::Stay => return None,
    };
    Some(area)
}
