//! Match configuration supplied once before a match is constructed.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Position, RoleId, Terrain, Visibility};

/// Every tunable parameter of a match.
///
/// A configuration is loaded once, validated with [`Config::validate`] and
/// then passed by reference into every constructor that needs it. It is never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Frames drawn per tick by presentation adapters; unused by the core.
    pub fps: u32,
    /// Number of steps after which the match ends.
    pub max_steps: u64,
    /// Distance estimate used by A* path searches.
    #[serde(default)]
    pub heuristic: Heuristic,
    /// Inclusive ranges the map dimensions are drawn from.
    pub map_size: MapSize,
    /// Probabilities used when generating terrain.
    pub terrain_prob: TerrainProbabilities,
    /// Cost of entering each passable terrain.
    pub move_cost: MoveCosts,
    /// Strategy weights for each role.
    pub strategy_weights: StrategyWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 8,
            max_steps: 200,
            heuristic: Heuristic::Manhattan,
            map_size: MapSize {
                width: SizeRange { min: 10, max: 16 },
                height: SizeRange { min: 8, max: 12 },
            },
            terrain_prob: TerrainProbabilities {
                wall: 0.2,
                bush: 0.1,
            },
            move_cost: MoveCosts::from_iter([(Terrain::Grass, 1.0), (Terrain::Bush, 2.0)]),
            strategy_weights: StrategyWeights {
                agent: BTreeMap::from([
                    (StrategyKind::MoveAway, 3.0),
                    (StrategyKind::WallDensity, 1.0),
                    (StrategyKind::Random, 1.0),
                ]),
                enemy: BTreeMap::from([
                    (StrategyKind::AStar, 3.0),
                    (StrategyKind::MoveClose, 1.0),
                    (StrategyKind::Random, 0.5),
                ]),
            },
        }
    }
}

impl Config {
    /// Checks every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::NonPositiveTickRate);
        }
        if self.max_steps == 0 {
            return Err(ConfigError::InvalidMaxSteps);
        }

        self.map_size.validate()?;
        self.terrain_prob.validate()?;
        self.move_cost.validate()?;

        for role in RoleId::ALL {
            for (&kind, &weight) in self.weights_for(role) {
                kind.check_weight(role, weight)?;
            }
        }

        Ok(())
    }

    /// Strategy weights configured for `role`, ordered by strategy kind.
    #[must_use]
    pub fn weights_for(&self, role: RoleId) -> &BTreeMap<StrategyKind, f64> {
        match role {
            RoleId::Agent => &self.strategy_weights.agent,
            RoleId::Enemy => &self.strategy_weights.enemy,
        }
    }
}

/// Inclusive bounds for a single map dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRange {
    /// Smallest allowed value.
    pub min: u32,
    /// Largest allowed value.
    pub max: u32,
}

impl SizeRange {
    fn is_valid(&self) -> bool {
        1 < self.min && self.min <= self.max
    }
}

/// Ranges the map width and height are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapSize {
    /// Range of map widths.
    pub width: SizeRange,
    /// Range of map heights.
    pub height: SizeRange,
}

impl MapSize {
    /// Checks that both ranges satisfy `1 < min <= max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.width.is_valid() || !self.height.is_valid() {
            return Err(ConfigError::InvalidMapSize { size: *self });
        }
        Ok(())
    }
}

/// Terrain generation probabilities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerrainProbabilities {
    /// Probability of a cell becoming a wall, within `[0, 1)`.
    pub wall: f64,
    /// Probability of a non-wall cell becoming a bush, within `[0, 1]`.
    pub bush: f64,
}

impl TerrainProbabilities {
    /// Checks that both probabilities lie within their allowed ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.wall) {
            return Err(ConfigError::InvalidTerrainProbability {
                terrain: Terrain::Wall,
                probability: self.wall,
            });
        }
        if !(0.0..=1.0).contains(&self.bush) {
            return Err(ConfigError::InvalidTerrainProbability {
                terrain: Terrain::Bush,
                probability: self.bush,
            });
        }
        Ok(())
    }
}

/// Cost of entering each configured terrain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveCosts {
    costs: BTreeMap<Terrain, f64>,
}

impl MoveCosts {
    /// Cost of entering `terrain`.
    ///
    /// Walls and terrains without a configured cost are infinitely expensive.
    #[must_use]
    pub fn cost(&self, terrain: Terrain) -> f64 {
        if terrain == Terrain::Wall {
            return f64::INFINITY;
        }
        self.costs.get(&terrain).copied().unwrap_or(f64::INFINITY)
    }

    /// Checks that grass has a cost and that every cost is a non-negative number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.costs.contains_key(&Terrain::Grass) {
            return Err(ConfigError::MissingMoveCost {
                terrain: Terrain::Grass,
            });
        }
        for (&terrain, &cost) in &self.costs {
            if cost.is_nan() || cost < 0.0 {
                return Err(ConfigError::InvalidMoveCost { terrain, cost });
            }
        }
        Ok(())
    }
}

impl FromIterator<(Terrain, f64)> for MoveCosts {
    fn from_iter<I: IntoIterator<Item = (Terrain, f64)>>(iter: I) -> Self {
        Self {
            costs: iter.into_iter().collect(),
        }
    }
}

/// Strategy weights for both roles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyWeights {
    /// Weights used by the agent.
    #[serde(default)]
    pub agent: BTreeMap<StrategyKind, f64>,
    /// Weights used by the enemy.
    #[serde(default)]
    pub enemy: BTreeMap<StrategyKind, f64>,
}

/// Closed set of decision strategies a role may load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    /// Picks a random valid direction.
    Random,
    /// Heads away from the opponent.
    MoveAway,
    /// Heads towards the opponent.
    MoveClose,
    /// Prefers directions with fewer known walls.
    WallDensity,
    /// Follows an A* path towards the opponent.
    AStar,
}

impl StrategyKind {
    /// Configuration key of the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::MoveAway => "moveAway",
            Self::MoveClose => "moveClose",
            Self::WallDensity => "wallDensity",
            Self::AStar => "aStar",
        }
    }

    /// Validates a weight assigned to the strategy for `role`.
    ///
    /// Weights must be finite and non-negative, and a strategy with a positive
    /// weight must be available to the role's visibility mode.
    pub fn check_weight(self, role: RoleId, weight: f64) -> Result<(), ConfigError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidStrategyWeight {
                role,
                kind: self,
                weight,
            });
        }
        if weight > 0.0 && !self.supports(role.visibility()) {
            return Err(ConfigError::UnsupportedStrategy { role, kind: self });
        }
        Ok(())
    }

    /// Reports whether a role with the given visibility may load the strategy.
    ///
    /// A* search only makes sense over partial knowledge of the map, so it is
    /// reserved for fog-of-war roles.
    #[must_use]
    pub const fn supports(self, visibility: Visibility) -> bool {
        match self {
            Self::AStar => matches!(visibility, Visibility::FogOfWar),
            Self::Random | Self::MoveAway | Self::MoveClose | Self::WallDensity => true,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distance estimate used by A* searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Sum of the absolute axis differences.
    #[default]
    Manhattan,
    /// Always zero, turning the search into a uniform-cost search.
    Zero,
}

impl Heuristic {
    /// Estimated distance between two positions.
    #[must_use]
    pub fn distance(self, from: Position, to: Position) -> f64 {
        match self {
            Self::Manhattan => f64::from(from.manhattan_distance(to)),
            Self::Zero => 0.0,
        }
    }
}

/// Reasons a configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The display tick rate must be positive.
    #[error("fps must be positive")]
    NonPositiveTickRate,
    /// The step limit must be positive.
    #[error("max_steps must be positive")]
    InvalidMaxSteps,
    /// A map size range does not satisfy `1 < min <= max`.
    #[error("invalid map size ranges {size:?}; expected 1 < min <= max on both axes")]
    InvalidMapSize {
        /// Offending ranges.
        size: MapSize,
    },
    /// Concrete map dimensions must both exceed one.
    #[error("invalid map dimensions {width}x{height}; both must be greater than 1")]
    InvalidMapDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A terrain probability lies outside its allowed range.
    #[error("invalid probability {probability} for {terrain:?}")]
    InvalidTerrainProbability {
        /// Terrain whose probability is invalid.
        terrain: Terrain,
        /// Offending probability.
        probability: f64,
    },
    /// A terrain required by the path search has no configured cost.
    #[error("missing move cost for {terrain:?}")]
    MissingMoveCost {
        /// Terrain without a cost.
        terrain: Terrain,
    },
    /// A move cost is negative or not a number.
    #[error("invalid move cost {cost} for {terrain:?}")]
    InvalidMoveCost {
        /// Terrain whose cost is invalid.
        terrain: Terrain,
        /// Offending cost.
        cost: f64,
    },
    /// A strategy weight is negative or not finite.
    #[error("invalid weight {weight} for strategy `{kind}` of {role:?}")]
    InvalidStrategyWeight {
        /// Role the weight belongs to.
        role: RoleId,
        /// Strategy the weight belongs to.
        kind: StrategyKind,
        /// Offending weight.
        weight: f64,
    },
    /// A strategy is not available to the role it was configured for.
    #[error("strategy `{kind}` is not available to {role:?}")]
    UnsupportedStrategy {
        /// Role the strategy was configured for.
        role: RoleId,
        /// Strategy that cannot be loaded.
        kind: StrategyKind,
    },
}
