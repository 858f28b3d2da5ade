use chase_core::{Action, ActionLevels, Heuristic, Position, StrategyKind, MAX_ACTION_LEVEL};
use chase_system_pathfinding::{CellCost, PathSearch};
use rand::RngCore;
use tracing::debug;

use crate::{Context, Strategy};

/// Chases the opponent along an A* path over the role's own map knowledge.
///
/// Cells the role has not revealed are assumed to cost as much as grass.
/// Walls the role discovers are pruned from its private search grid and never
/// considered again.
#[derive(Clone, Debug)]
pub struct AStar {
    search: PathSearch,
    unknown_cost: f64,
}

impl AStar {
    /// Creates a search covering a `width × height` map.
    #[must_use]
    pub fn new(width: u32, height: u32, heuristic: Heuristic, unknown_cost: f64) -> Self {
        Self {
            search: PathSearch::new(width, height, heuristic),
            unknown_cost,
        }
    }

    /// Path found by the most recent evaluation.
    #[must_use]
    pub fn prev_path(&self) -> &[Position] {
        self.search.last_path()
    }
}

impl Strategy for AStar {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AStar
    }

    fn action_levels(&mut self, ctx: &Context<'_>, rng: &mut dyn RngCore) -> ActionLevels {
        let role = ctx.role();
        let map = ctx.map();
        let from = role.position();
        let to = ctx.opponent().position();
        let unknown_cost = self.unknown_cost;

        let path = self.search.search(from, to, |cell| {
            if !role.revealed(cell) {
                CellCost::Enter(unknown_cost)
            } else if map.is_wall(cell) {
                CellCost::Pruned
            } else {
                CellCost::Enter(map.move_cost(cell))
            }
        });

        let mut levels = ActionLevels::new();
        if let Some(&next) = path.get(1) {
            let action = Action::next(from, next, rng);
            debug!(role = ?ctx.role_id(), ?action, length = path.len(), "following path");
            levels.set(action, MAX_ACTION_LEVEL);
        }
        levels
    }

    fn last_path(&self) -> Option<&[Position]> {
        Some(self.prev_path())
    }
}
