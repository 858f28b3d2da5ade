use chase_core::{Command, Config, Event, Position, RoleId};
use chase_system_strategy::{Context, Pipeline};
use chase_world::{apply, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{create_map, spawn_positions, SetupError};

/// State of the match after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The match continues.
    Running,
    /// The match is over.
    Finished {
        /// Final score of the agent.
        score: u32,
    },
}

/// Drives a single match: owns the world, both strategy pipelines and the
/// random number generator every decision draws from.
#[derive(Debug)]
pub struct Session {
    world: World,
    config: Config,
    agent: Pipeline,
    enemy: Pipeline,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Session {
    /// Sets up a match on a freshly generated map.
    pub fn new(config: &Config, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = create_map(config, &mut rng)?;
        let (agent_at, enemy_at) =
            spawn_positions(&map, &mut rng).ok_or(SetupError::NoSpawnRoom)?;
        let world = World::new(map, agent_at, enemy_at);
        Self::from_world(world, config, rng)
    }

    /// Sets up a match on an existing world.
    pub fn from_world(world: World, config: &Config, rng: ChaCha8Rng) -> Result<Self, SetupError> {
        config.validate()?;
        let map = query::map(&world);
        let agent = Pipeline::load(RoleId::Agent, map, config)?;
        let enemy = Pipeline::load(RoleId::Enemy, map, config)?;

        Ok(Self {
            world,
            config: config.clone(),
            agent,
            enemy,
            rng,
            tick: 0,
        })
    }

    /// Authoritative world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the match runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Strategy pipeline of `role`.
    #[must_use]
    pub fn pipeline(&self, role: RoleId) -> &Pipeline {
        match role {
            RoleId::Agent => &self.agent,
            RoleId::Enemy => &self.enemy,
        }
    }

    /// Number of ticks played so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    /// Remaining path the enemy planned towards the agent.
    #[must_use]
    pub fn enemy_path(&self) -> Vec<Position> {
        self.enemy
            .path(query::position(&self.world, RoleId::Enemy))
    }

    /// Plays one turn.
    ///
    /// The agent moves every tick and the enemy every second tick, starting
    /// with the second. The match ends once the agent is stuck or the step
    /// limit is reached. Ticking a finished match changes nothing.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) -> TickOutcome {
        if query::is_game_over(&self.world) {
            return self.outcome();
        }

        self.move_role(RoleId::Agent, out_events);
        if self.tick % 2 == 1 {
            self.move_role(RoleId::Enemy, out_events);
        }
        apply(&mut self.world, Command::AdvanceStep, out_events);
        self.tick += 1;

        let steps = query::status(&self.world).steps();
        if query::stuck(&self.world, RoleId::Agent) || steps >= self.config.max_steps {
            debug!(steps, "match over");
            apply(&mut self.world, Command::EndGame, out_events);
        }
        self.outcome()
    }

    /// Plays until the match is over and returns the agent's score.
    pub fn run(&mut self, out_events: &mut Vec<Event>) -> u32 {
        loop {
            if let TickOutcome::Finished { score } = self.tick(out_events) {
                return score;
            }
        }
    }

    fn move_role(&mut self, role: RoleId, out_events: &mut Vec<Event>) {
        let pipeline = match role {
            RoleId::Agent => &mut self.agent,
            RoleId::Enemy => &mut self.enemy,
        };
        let action = pipeline.peek_action(&Context::new(&self.world, role), &mut self.rng);
        apply(&mut self.world, Command::MoveRole { role, action }, out_events);
    }

    fn outcome(&self) -> TickOutcome {
        if query::is_game_over(&self.world) {
            TickOutcome::Finished {
                score: query::score(&self.world),
            }
        } else {
            TickOutcome::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chase_core::{Grid, MoveCosts, StrategyKind, Terrain};
    use chase_world::Map;
    use std::collections::BTreeMap;

    fn corridor_world() -> World {
        let grid = Grid::new(6, 1, Terrain::Grass);
        let map = Map::new(grid, MoveCosts::from_iter([(Terrain::Grass, 1.0)]));
        World::new(map, Position::new(2, 0), Position::new(5, 0))
    }

    fn chase_config(max_steps: u64) -> Config {
        let mut config = Config::default();
        config.max_steps = max_steps;
        config.strategy_weights.agent = BTreeMap::from([(StrategyKind::MoveClose, 1.0)]);
        config.strategy_weights.enemy = BTreeMap::from([(StrategyKind::MoveAway, 1.0)]);
        config
    }

    fn moves(events: &[Event], role: RoleId) -> usize {
        events
            .iter()
            .filter(|event| match event {
                Event::RoleMoved { role: mover, .. }
                | Event::RoleStayed { role: mover, .. }
                | Event::MoveBlocked { role: mover, .. }
                | Event::RoleTrapped { role: mover, .. } => *mover == role,
                _ => false,
            })
            .count()
    }

    #[test]
    fn enemy_moves_every_other_tick() {
        let config = chase_config(50);
        let mut session =
            Session::from_world(corridor_world(), &config, ChaCha8Rng::seed_from_u64(1))
                .expect("session");
        let mut events = Vec::new();

        assert_eq!(session.tick(&mut events), TickOutcome::Running);
        assert_eq!(moves(&events, RoleId::Agent), 1);
        assert_eq!(moves(&events, RoleId::Enemy), 0);

        assert_eq!(session.tick(&mut events), TickOutcome::Running);
        assert_eq!(moves(&events, RoleId::Agent), 2);
        assert_eq!(moves(&events, RoleId::Enemy), 1);

        assert_eq!(session.tick(&mut events), TickOutcome::Running);
        assert_eq!(moves(&events, RoleId::Enemy), 1);
        assert_eq!(session.ticks(), 3);
    }

    #[test]
    fn match_ends_at_the_step_limit() {
        let config = chase_config(4);
        let mut session =
            Session::from_world(corridor_world(), &config, ChaCha8Rng::seed_from_u64(1))
                .expect("session");
        let mut events = Vec::new();

        let score = session.run(&mut events);

        assert_eq!(score, 0);
        assert_eq!(query::status(session.world()).steps(), 4);
        assert_eq!(session.ticks(), 3);
        assert_eq!(
            events.iter().filter(|event| matches!(event, Event::GameEnded { .. })).count(),
            1
        );
        assert_eq!(
            session.tick(&mut events),
            TickOutcome::Finished { score: 0 }
        );
        assert_eq!(session.ticks(), 3);
    }

    #[test]
    fn match_ends_when_the_agent_is_cornered() {
        let grid = Grid::from_fn(3, 1, |position| {
            if position == Position::new(0, 0) {
                Terrain::Wall
            } else {
                Terrain::Grass
            }
        });
        let map = Map::new(grid, MoveCosts::from_iter([(Terrain::Grass, 1.0)]));
        let world = World::new(map, Position::new(1, 0), Position::new(2, 0));
        let mut session =
            Session::from_world(world, &chase_config(100), ChaCha8Rng::seed_from_u64(1))
                .expect("session");
        let mut events = Vec::new();

        assert_eq!(
            session.tick(&mut events),
            TickOutcome::Finished { score: 0 }
        );
        assert_eq!(query::status(session.world()).steps(), 2);
    }

    #[test]
    fn new_session_validates_the_config() {
        let mut config = Config::default();
        config.fps = 0;

        assert!(matches!(
            Session::new(&config, 1),
            Err(SetupError::Config(chase_core::ConfigError::NonPositiveTickRate))
        ));
    }

    #[test]
    fn enemy_path_starts_at_the_enemy() {
        let mut session = Session::new(&Config::default(), 42).expect("session");
        let mut events = Vec::new();
        let _ = session.tick(&mut events);
        let _ = session.tick(&mut events);

        let path = session.enemy_path();
        if let Some(first) = path.first() {
            assert_eq!(*first, query::position(session.world(), RoleId::Enemy));
        }
    }
}
