#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Chase engine.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the decision systems and the adapters. Drivers submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems read immutable world state and respond with new
//! commands, never mutating the world directly.

mod config;
mod grid;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use config::{
    Config, ConfigError, Heuristic, MapSize, MoveCosts, SizeRange, StrategyKind, StrategyWeights,
    TerrainProbabilities,
};
pub use grid::{Grid, Neighbors};

/// Highest recommendation level a strategy may assign to a single action.
pub const MAX_ACTION_LEVEL: f64 = 10.0;

/// Location of a single grid cell.
///
/// Coordinates are signed so that destinations stepping off the grid can be
/// represented and then rejected by bounds checks. The y axis grows upwards:
/// [`Action::Up`] increments `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from its column and row.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Identifies one of the two participants of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleId {
    /// The evading participant.
    Agent,
    /// The chasing participant.
    Enemy,
}

impl RoleId {
    /// Both roles in turn order.
    pub const ALL: [RoleId; 2] = [RoleId::Agent, RoleId::Enemy];

    /// Returns the role competing against `self`.
    #[must_use]
    pub const fn opponent(self) -> RoleId {
        match self {
            Self::Agent => Self::Enemy,
            Self::Enemy => Self::Agent,
        }
    }

    /// Visibility mode a role of this kind plays with.
    #[must_use]
    pub const fn visibility(self) -> Visibility {
        match self {
            Self::Agent => Visibility::FullyVisible,
            Self::Enemy => Visibility::FogOfWar,
        }
    }
}

/// How much of the map a role is aware of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Every cell of the map is known from the start.
    FullyVisible,
    /// Cells are only known after being stood on or bumped into.
    FogOfWar,
}

/// The five moves available to a role each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Remain on the current cell.
    Stay,
    /// Move towards increasing `y`.
    Up,
    /// Move towards decreasing `y`.
    Down,
    /// Move towards decreasing `x`.
    Left,
    /// Move towards increasing `x`.
    Right,
}

impl Action {
    /// Every action in enumeration order.
    pub const ALL: [Action; 5] = [
        Action::Stay,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
    ];

    /// Dense index of the action within [`Action::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Stay => 0,
            Self::Up => 1,
            Self::Down => 2,
            Self::Left => 3,
            Self::Right => 4,
        }
    }

    /// Cell reached by performing the action from `src`.
    #[must_use]
    pub const fn dest(self, src: Position) -> Position {
        match self {
            Self::Stay => src,
            Self::Up => Position::new(src.x(), src.y() + 1),
            Self::Down => Position::new(src.x(), src.y() - 1),
            Self::Left => Position::new(src.x() - 1, src.y()),
            Self::Right => Position::new(src.x() + 1, src.y()),
        }
    }

    /// Chooses the single step that brings `src` closer to `dest`.
    ///
    /// When both axes differ the horizontal and vertical corrections are
    /// equally likely; when neither differs the result is [`Action::Stay`].
    pub fn next<R>(src: Position, dest: Position, rng: &mut R) -> Action
    where
        R: Rng + ?Sized,
    {
        let horizontal = if src.x() < dest.x() {
            Some(Action::Right)
        } else if src.x() > dest.x() {
            Some(Action::Left)
        } else {
            None
        };
        let vertical = if src.y() < dest.y() {
            Some(Action::Up)
        } else if src.y() > dest.y() {
            Some(Action::Down)
        } else {
            None
        };

        match (horizontal, vertical) {
            (Some(horizontal), Some(vertical)) => {
                if rng.gen_bool(0.5) {
                    horizontal
                } else {
                    vertical
                }
            }
            (Some(action), None) | (None, Some(action)) => action,
            (None, None) => Action::Stay,
        }
    }
}

/// Kind of ground covering a map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Impassable cell.
    Wall,
    /// Open ground.
    Grass,
    /// Passable cell that costs the next move attempt.
    Bush,
}

/// Result of checking whether a role may enter a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    /// Nothing prevents entering the cell.
    Free,
    /// The cell lies outside the map.
    Invalid,
    /// The cell is a wall.
    Wall,
    /// Another role stands on the cell.
    Role,
}

/// Recommendation level assigned to every action by a single strategy.
///
/// Levels range from zero up to [`MAX_ACTION_LEVEL`]; actions that were never
/// assigned stay at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionLevels {
    levels: [f64; 5],
}

impl ActionLevels {
    /// Creates a level table where every action is at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { levels: [0.0; 5] }
    }

    /// Level currently assigned to `action`.
    #[must_use]
    pub const fn get(&self, action: Action) -> f64 {
        self.levels[action.index()]
    }

    /// Assigns a level to `action`.
    pub fn set(&mut self, action: Action, level: f64) {
        self.levels[action.index()] = level;
    }

    /// Iterates over every action together with its level in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        Action::ALL
            .iter()
            .map(move |action| (*action, self.levels[action.index()]))
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Attempts to move a role by performing the provided action.
    MoveRole {
        /// Role attempting the move.
        role: RoleId,
        /// Action chosen for the role this turn.
        action: Action,
    },
    /// Records the end of a turn and updates the score counters.
    AdvanceStep,
    /// Marks the match as finished.
    EndGame,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A role entered a new cell.
    RoleMoved {
        /// Role that moved.
        role: RoleId,
        /// Cell the role occupied before moving.
        from: Position,
        /// Cell the role occupies after moving.
        to: Position,
    },
    /// A role chose to remain where it stands.
    RoleStayed {
        /// Role that stayed.
        role: RoleId,
        /// Cell the role occupies.
        at: Position,
    },
    /// A move attempt was rejected by the occupancy rules.
    MoveBlocked {
        /// Role whose move was rejected.
        role: RoleId,
        /// Cell the role tried to enter.
        target: Position,
        /// Classification that rejected the move.
        cause: Occupancy,
    },
    /// A role lost its move because it was caught in a bush.
    RoleTrapped {
        /// Role that lost the move.
        role: RoleId,
        /// Bush cell the role is stuck on.
        at: Position,
    },
    /// A role with limited visibility discovered a cell.
    CellRevealed {
        /// Role that discovered the cell.
        role: RoleId,
        /// Cell that became known.
        cell: Position,
    },
    /// A turn was recorded.
    StepAdvanced {
        /// Steps recorded so far, including the initial one.
        steps: u64,
        /// Steps during which the roles kept their distance.
        good_steps: u64,
    },
    /// The match finished.
    GameEnded {
        /// Final score of the agent.
        score: u32,
    },
}
