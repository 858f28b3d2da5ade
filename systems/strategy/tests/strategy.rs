use std::collections::BTreeMap;

use chase_core::{Command, Config, Event, Grid, MoveCosts, Position, RoleId, StrategyKind, Terrain};
use chase_system_strategy::{Context, Pipeline};
use chase_world::{apply, query, Map, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Rows are listed from the top of the board down.
const MAZE: [&str; 5] = ["A....", "####.", ".....", ".####", "....E"];

fn maze() -> World {
    let height = MAZE.len() as i32;
    let grid = Grid::from_fn(5, 5, |position| {
        let row = MAZE[(height - 1 - position.y()) as usize];
        match row.as_bytes()[position.x() as usize] {
            b'#' => Terrain::Wall,
            _ => Terrain::Grass,
        }
    });
    let map = Map::new(grid, MoveCosts::from_iter([(Terrain::Grass, 1.0)]));
    World::new(map, Position::new(0, 4), Position::new(4, 0))
}

fn hunter_config() -> Config {
    let mut config = Config::default();
    config.strategy_weights.enemy = BTreeMap::from([(StrategyKind::AStar, 1.0)]);
    config
}

#[test]
fn astar_enemy_learns_the_maze_and_reaches_the_agent() {
    let mut world = maze();
    let config = hunter_config();
    let mut enemy = Pipeline::load(RoleId::Enemy, query::map(&world), &config).expect("pipeline");
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let agent = query::position(&world, RoleId::Agent);
    let mut events = Vec::new();

    let mut turns = 0;
    while query::position(&world, RoleId::Enemy).manhattan_distance(agent) > 1 {
        assert!(turns < 60, "enemy failed to reach the agent");
        let action = enemy.peek_action(&Context::new(&world, RoleId::Enemy), &mut rng);
        apply(
            &mut world,
            Command::MoveRole {
                role: RoleId::Enemy,
                action,
            },
            &mut events,
        );
        turns += 1;
    }

    let bumps = events
        .iter()
        .filter(|event| matches!(event, Event::MoveBlocked { .. }))
        .count();
    assert!(bumps > 0, "the maze hides walls the enemy must discover");
    for event in &events {
        if let Event::MoveBlocked { target, .. } = event {
            assert!(query::map(&world).is_wall(*target));
        }
    }
}

#[test]
fn two_by_two_turn_never_scores() {
    let grid = Grid::new(2, 2, Terrain::Grass);
    let map = Map::new(grid, MoveCosts::from_iter([(Terrain::Grass, 1.0)]));
    let mut world = World::new(map, Position::new(0, 0), Position::new(1, 1));
    let config = hunter_config();
    let mut agent = Pipeline::load(RoleId::Agent, query::map(&world), &config).expect("pipeline");
    let mut enemy = Pipeline::load(RoleId::Enemy, query::map(&world), &config).expect("pipeline");
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut events = Vec::new();

    let action = agent.peek_action(&Context::new(&world, RoleId::Agent), &mut rng);
    apply(
        &mut world,
        Command::MoveRole {
            role: RoleId::Agent,
            action,
        },
        &mut events,
    );
    let action = enemy.peek_action(&Context::new(&world, RoleId::Enemy), &mut rng);
    apply(
        &mut world,
        Command::MoveRole {
            role: RoleId::Enemy,
            action,
        },
        &mut events,
    );
    apply(&mut world, Command::AdvanceStep, &mut events);

    let attempts = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::RoleMoved { .. }
                    | Event::RoleStayed { .. }
                    | Event::RoleTrapped { .. }
                    | Event::MoveBlocked { .. }
            )
        })
        .count();
    assert_eq!(attempts, 2);
    let status = query::status(&world);
    assert_eq!(
        (status.steps(), status.good_steps(), query::score(&world)),
        (2, 0, 0)
    );
    assert!(!query::is_game_over(&world));
}

#[test]
fn agent_pipeline_keeps_its_distance_in_the_open() {
    let grid = Grid::new(9, 9, Terrain::Grass);
    let map = Map::new(grid, MoveCosts::from_iter([(Terrain::Grass, 1.0)]));
    let mut world = World::new(map, Position::new(4, 4), Position::new(3, 3));
    let mut config = Config::default();
    config.strategy_weights.agent = BTreeMap::from([(StrategyKind::MoveAway, 1.0)]);
    let mut agent = Pipeline::load(RoleId::Agent, query::map(&world), &config).expect("pipeline");
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut events = Vec::new();

    for _ in 0..4 {
        let action = agent.peek_action(&Context::new(&world, RoleId::Agent), &mut rng);
        apply(
            &mut world,
            Command::MoveRole {
                role: RoleId::Agent,
                action,
            },
            &mut events,
        );
    }

    let position = query::position(&world, RoleId::Agent);
    assert!(position.manhattan_distance(Position::new(3, 3)) >= 5);
    assert!(position.x() > 3 && position.y() > 3);
}
