//! Terrain layout shared by every participant of a match.

use chase_core::{ConfigError, Grid, MoveCosts, Occupancy, Position, Terrain, TerrainProbabilities};
use rand::Rng;

use crate::Status;

/// Immutable terrain grid together with the cost of crossing each terrain.
///
/// Any coordinate outside the grid reads as [`Terrain::Wall`], so callers may
/// probe neighbouring cells without bounds checks.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    terrain: Grid<Terrain>,
    costs: MoveCosts,
}

impl Map {
    /// Creates a map from an explicit terrain layout.
    #[must_use]
    pub fn new(terrain: Grid<Terrain>, costs: MoveCosts) -> Self {
        Self { terrain, costs }
    }

    /// Generates a map by drawing every cell independently.
    ///
    /// Each cell becomes a wall with probability `probabilities.wall`;
    /// otherwise it becomes a bush with probability `probabilities.bush`, and
    /// grass in the remaining cases.
    pub fn generate<R>(
        width: u32,
        height: u32,
        probabilities: &TerrainProbabilities,
        costs: MoveCosts,
        rng: &mut R,
    ) -> Result<Self, ConfigError>
    where
        R: Rng + ?Sized,
    {
        if width <= 1 || height <= 1 {
            return Err(ConfigError::InvalidMapDimensions { width, height });
        }
        probabilities.validate()?;

        let terrain = Grid::from_fn(width, height, |_| {
            if rng.gen::<f64>() < probabilities.wall {
                Terrain::Wall
            } else if rng.gen::<f64>() < probabilities.bush {
                Terrain::Bush
            } else {
                Terrain::Grass
            }
        });

        Ok(Self::new(terrain, costs))
    }

    /// Number of columns on the map.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.terrain.width()
    }

    /// Number of rows on the map.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.terrain.height()
    }

    /// Reports whether `position` lies on the map.
    #[must_use]
    pub fn valid(&self, position: Position) -> bool {
        self.terrain.valid(position)
    }

    /// Terrain at `position`, or [`Terrain::Wall`] outside the map.
    #[must_use]
    pub fn terrain(&self, position: Position) -> Terrain {
        self.terrain
            .spot(position)
            .copied()
            .unwrap_or(Terrain::Wall)
    }

    /// Reports whether `position` is a wall or lies outside the map.
    #[must_use]
    pub fn is_wall(&self, position: Position) -> bool {
        self.terrain(position) == Terrain::Wall
    }

    /// Every non-wall position, x outer and y inner.
    #[must_use]
    pub fn blanks(&self) -> Vec<Position> {
        self.terrain
            .positions()
            .filter(|position| !self.is_wall(*position))
            .collect()
    }

    /// Classifies whether a role may enter `position` given the match status.
    #[must_use]
    pub fn occupied(&self, position: Position, status: &Status) -> Occupancy {
        self.classify(
            position,
            &[status.agent().position(), status.enemy().position()],
        )
    }

    /// Classifies `position` against the terrain and the provided role positions.
    #[must_use]
    pub fn classify(&self, position: Position, roles: &[Position]) -> Occupancy {
        if !self.valid(position) {
            Occupancy::Invalid
        } else if self.is_wall(position) {
            Occupancy::Wall
        } else if roles.contains(&position) {
            Occupancy::Role
        } else {
            Occupancy::Free
        }
    }

    /// Cost of entering `position`; infinite for walls and unconfigured terrain.
    #[must_use]
    pub fn move_cost(&self, position: Position) -> f64 {
        self.costs.cost(self.terrain(position))
    }

    /// Configured cost of entering each terrain.
    #[must_use]
    pub fn costs(&self) -> &MoveCosts {
        &self.costs
    }

    /// Underlying terrain grid.
    #[must_use]
    pub fn terrain_grid(&self) -> &Grid<Terrain> {
        &self.terrain
    }
}
