#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that prepares a Chase match and drives it tick by tick.

mod session;

use chase_core::{Config, ConfigError, Position};
use chase_world::Map;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

pub use session::{Session, TickOutcome};

/// Number of maps drawn before giving up on finding room for both roles.
pub const MAP_GENERATION_ATTEMPTS: u32 = 100;

/// Reasons a match cannot be set up.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// No generated map had room for both roles.
    #[error("failed to create a map containing at least 2 blanks within {attempts} attempts")]
    MapGeneration {
        /// Number of maps that were drawn.
        attempts: u32,
    },
    /// The provided map has fewer than two blank cells.
    #[error("map has no room to spawn both roles")]
    NoSpawnRoom,
}

/// Generates a map with room for at least two roles.
///
/// Dimensions are drawn uniformly from the configured ranges. A fresh map is
/// drawn up to [`MAP_GENERATION_ATTEMPTS`] times.
pub fn create_map<R>(config: &Config, rng: &mut R) -> Result<Map, SetupError>
where
    R: Rng + ?Sized,
{
    config.map_size.validate()?;
    let size = config.map_size;

    for attempt in 1..=MAP_GENERATION_ATTEMPTS {
        let width = rng.gen_range(size.width.min..=size.width.max);
        let height = rng.gen_range(size.height.min..=size.height.max);
        let map = Map::generate(
            width,
            height,
            &config.terrain_prob,
            config.move_cost.clone(),
            rng,
        )?;

        let blanks = map.blanks().len();
        if blanks >= 2 {
            debug!(attempt, width, height, blanks, "map generated");
            return Ok(map);
        }
        debug!(attempt, width, height, blanks, "map rejected");
    }

    Err(SetupError::MapGeneration {
        attempts: MAP_GENERATION_ATTEMPTS,
    })
}

/// Picks two distinct blank cells, the agent's first.
///
/// Returns `None` when the map has fewer than two blank cells.
pub fn spawn_positions<R>(map: &Map, rng: &mut R) -> Option<(Position, Position)>
where
    R: Rng + ?Sized,
{
    let mut blanks = map.blanks();
    if blanks.len() < 2 {
        return None;
    }

    let agent = blanks.remove(rng.gen_range(0..blanks.len()));
    let enemy = blanks.remove(rng.gen_range(0..blanks.len()));
    Some((agent, enemy))
}
