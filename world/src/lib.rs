#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Chase.
//!
//! The world owns the terrain and the match status. Every mutation goes through
//! [`apply`], which reports what happened as [`Event`] values.

mod map;
mod role;
mod status;

use chase_core::{Action, Command, Event, Occupancy, Position, RoleId};
use tracing::{debug, info};

pub use map::Map;
pub use role::{MoveOutcome, Role};
pub use status::{Status, CLOSE_DISTANCE};

/// Represents the authoritative Chase world state.
#[derive(Clone, Debug)]
pub struct World {
    map: Map,
    status: Status,
}

impl World {
    /// Creates a world by spawning the agent and then the enemy on `map`.
    ///
    /// # Panics
    ///
    /// Panics if either spawn cell is not free.
    #[must_use]
    pub fn new(map: Map, agent_at: Position, enemy_at: Position) -> Self {
        let agent = Role::spawn(
            RoleId::Agent,
            RoleId::Agent.visibility(),
            &map,
            agent_at,
            &[],
        );
        let enemy = Role::spawn(
            RoleId::Enemy,
            RoleId::Enemy.visibility(),
            &map,
            enemy_at,
            &[agent_at],
        );
        debug!(?agent_at, ?enemy_at, "roles spawned");

        Self {
            map,
            status: Status::new(agent, enemy),
        }
    }

    /// Moves `id` by `action` and updates its terrain memory.
    ///
    /// Returns the outcome of the attempt together with the cells the role
    /// discovered.
    pub fn move_role(&mut self, id: RoleId, action: Action) -> (MoveOutcome, Vec<Position>) {
        let target = action.dest(self.status.role(id).position());
        let occupancy = self.map.occupied(target, &self.status);
        let terrain = self.map.terrain(target);

        let role = self.status.role_mut(id);
        let outcome = role.try_move(target, occupancy, terrain);
        let discovered = role.reveal();
        (outcome, discovered)
    }

    /// Reports whether every action of `id` leads to an occupied cell.
    #[must_use]
    pub fn stuck(&self, id: RoleId) -> bool {
        let position = self.status.role(id).position();
        Action::ALL.iter().all(|action| {
            self.map.occupied(action.dest(position), &self.status) != Occupancy::Free
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveRole { role, action } => {
            let from = world.status.role(role).position();
            let (outcome, discovered) = world.move_role(role, action);
            let to = world.status.role(role).position();

            match outcome {
                MoveOutcome::Moved => out_events.push(Event::RoleMoved { role, from, to }),
                MoveOutcome::Stayed => out_events.push(Event::RoleStayed { role, at: from }),
                MoveOutcome::Trapped => out_events.push(Event::RoleTrapped { role, at: from }),
                MoveOutcome::Blocked(cause) => {
                    let target = action.dest(from);
                    debug!(?role, ?target, ?cause, "move blocked");
                    out_events.push(Event::MoveBlocked {
                        role,
                        target,
                        cause,
                    });
                }
            }

            out_events.extend(
                discovered
                    .into_iter()
                    .map(|cell| Event::CellRevealed { role, cell }),
            );
        }
        Command::AdvanceStep => {
            world.status.new_step();
            out_events.push(Event::StepAdvanced {
                steps: world.status.steps(),
                good_steps: world.status.good_steps(),
            });
        }
        Command::EndGame => {
            if world.status.is_game_over() {
                return;
            }
            world.status.end_game();
            let score = world.status.score();
            info!(
                score,
                steps = world.status.steps(),
                good_steps = world.status.good_steps(),
                "game ended"
            );
            out_events.push(Event::GameEnded { score });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use chase_core::{Position, RoleId};

    use super::{Map, Role, Status, World};

    /// Terrain layout of the match.
    #[must_use]
    pub fn map(world: &World) -> &Map {
        &world.map
    }

    /// Current match bookkeeping.
    #[must_use]
    pub fn status(world: &World) -> &Status {
        &world.status
    }

    /// Role identified by `id`.
    #[must_use]
    pub fn role(world: &World, id: RoleId) -> &Role {
        world.status.role(id)
    }

    /// Cell currently occupied by `id`.
    #[must_use]
    pub fn position(world: &World, id: RoleId) -> Position {
        world.status.role(id).position()
    }

    /// Whether the match has finished.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.status.is_game_over()
    }

    /// Current score of the agent.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.status.score()
    }

    /// Reports whether `id` has no free cell to move into.
    #[must_use]
    pub fn stuck(world: &World, id: RoleId) -> bool {
        world.stuck(id)
    }
}
