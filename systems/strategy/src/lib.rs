#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Decision strategies that recommend actions for a role.
//!
//! Every strategy scores the five actions independently. A [`Pipeline`] owns
//! the strategies loaded for one role and fuses their recommendations through
//! an [`ActionSelector`] into the single action the role attempts this turn.

mod astar;
mod direction;
mod pipeline;
mod random;
mod selector;
mod wall_density;

use std::fmt;

use chase_core::{Action, ActionLevels, Config, Position, RoleId, StrategyKind, Terrain};
use chase_world::{query, Map, Role, Status, World};
use rand::RngCore;

pub use astar::AStar;
pub use direction::{MoveAway, MoveClose};
pub use pipeline::Pipeline;
pub use random::Random;
pub use selector::ActionSelector;
pub use wall_density::WallDensity;

/// Read-only view of the match handed to strategies.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    map: &'a Map,
    status: &'a Status,
    role: RoleId,
}

impl<'a> Context<'a> {
    /// Creates a view of `world` from the perspective of `role`.
    #[must_use]
    pub fn new(world: &'a World, role: RoleId) -> Self {
        Self {
            map: query::map(world),
            status: query::status(world),
            role,
        }
    }

    /// Terrain layout of the match.
    #[must_use]
    pub const fn map(&self) -> &'a Map {
        self.map
    }

    /// Match bookkeeping.
    #[must_use]
    pub const fn status(&self) -> &'a Status {
        self.status
    }

    /// Identifier of the acting role.
    #[must_use]
    pub const fn role_id(&self) -> RoleId {
        self.role
    }

    /// The acting role.
    #[must_use]
    pub fn role(&self) -> &'a Role {
        self.status.role(self.role)
    }

    /// The role competing against the acting one.
    #[must_use]
    pub fn opponent(&self) -> &'a Role {
        self.status.opponent(self.role)
    }
}

/// Scores every action for the acting role.
pub trait Strategy: fmt::Debug {
    /// Configuration key of the strategy.
    fn kind(&self) -> StrategyKind;

    /// Recommendation level of every action for the current turn.
    fn action_levels(&mut self, ctx: &Context<'_>, rng: &mut dyn RngCore) -> ActionLevels;

    /// Path computed during the most recent evaluation, for strategies that plan one.
    fn last_path(&self) -> Option<&[Position]> {
        None
    }
}

/// Builds the strategy registered under `kind` for a match on `map`.
#[must_use]
pub fn build_strategy(kind: StrategyKind, map: &Map, config: &Config) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Random => Box::new(Random),
        StrategyKind::MoveAway => Box::new(MoveAway),
        StrategyKind::MoveClose => Box::new(MoveClose),
        StrategyKind::WallDensity => Box::new(WallDensity),
        StrategyKind::AStar => Box::new(AStar::new(
            map.width(),
            map.height(),
            config.heuristic,
            config.move_cost.cost(Terrain::Grass),
        )),
    }
}

/// Zeroes every action leading off the map or into a wall the role knows about.
///
/// Walls the role has not revealed yet are left untouched.
pub fn discard_invalid(levels: &mut ActionLevels, ctx: &Context<'_>) {
    let role = ctx.role();
    for action in Action::ALL {
        let dest = action.dest(role.position());
        let invalid = !ctx.map().valid(dest);
        let known_wall = !invalid && role.revealed(dest) && ctx.map().is_wall(dest);
        if invalid || known_wall {
            levels.set(action, 0.0);
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chase_core::{Grid, MoveCosts, Position, Terrain};
    use chase_world::{Map, World};

    /// Builds a world from rows drawn top to bottom.
    ///
    /// `#` is a wall, `"` a bush, `A` and `E` mark the roles on grass and
    /// anything else is grass.
    pub(crate) fn world(rows: &[&str]) -> World {
        let height = rows.len();
        let width = rows[0].len();
        let mut agent = None;
        let mut enemy = None;
        let mut cells = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let y = i32::try_from(height - 1 - row).expect("row fits");
            for (x, symbol) in line.chars().enumerate() {
                let position = Position::new(i32::try_from(x).expect("column fits"), y);
                let terrain = match symbol {
                    '#' => Terrain::Wall,
                    '"' => Terrain::Bush,
                    'A' => {
                        agent = Some(position);
                        Terrain::Grass
                    }
                    'E' => {
                        enemy = Some(position);
                        Terrain::Grass
                    }
                    _ => Terrain::Grass,
                };
                cells.push((position, terrain));
            }
        }

        let grid = Grid::from_fn(
            u32::try_from(width).expect("width fits"),
            u32::try_from(height).expect("height fits"),
            |position| {
                cells
                    .iter()
                    .find(|(cell, _)| *cell == position)
                    .map_or(Terrain::Grass, |(_, terrain)| *terrain)
            },
        );
        let map = Map::new(
            grid,
            MoveCosts::from_iter([(Terrain::Grass, 1.0), (Terrain::Bush, 2.0)]),
        );
        World::new(
            map,
            agent.expect("agent marker"),
            enemy.expect("enemy marker"),
        )
    }
}
