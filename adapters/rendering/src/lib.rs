#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Chase adapters.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use chase_core::{Grid, Position, RoleId, Terrain};
use chase_world::{query, World};

/// Read-only snapshot of everything a frame shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Terrain of every cell.
    pub terrain: Grid<Terrain>,
    /// Cells the agent has revealed.
    pub agent_revealed: Grid<bool>,
    /// Cells the enemy has revealed.
    pub enemy_revealed: Grid<bool>,
    /// Cell occupied by the agent.
    pub agent: Position,
    /// Cell occupied by the enemy.
    pub enemy: Position,
    /// Remaining path the enemy planned towards the agent.
    pub enemy_path: Vec<Position>,
    /// Steps recorded so far.
    pub steps: u64,
    /// Whether the match is over.
    pub game_over: bool,
    /// Current score of the agent.
    pub score: u32,
}

impl Scene {
    /// Captures the current state of `world`.
    #[must_use]
    pub fn capture(world: &World, enemy_path: Vec<Position>) -> Self {
        let status = query::status(world);
        Self {
            terrain: query::map(world).terrain_grid().clone(),
            agent_revealed: query::role(world, RoleId::Agent).revealed_cells().clone(),
            enemy_revealed: query::role(world, RoleId::Enemy).revealed_cells().clone(),
            agent: query::position(world, RoleId::Agent),
            enemy: query::position(world, RoleId::Enemy),
            enemy_path,
            steps: status.steps(),
            game_over: status.is_game_over(),
            score: status.score(),
        }
    }

    /// Character drawn for `position`.
    ///
    /// Roles are drawn above the enemy path, the path above the fog, and the
    /// fog above the terrain.
    #[must_use]
    pub fn glyph(&self, position: Position, show_fog: bool) -> char {
        if position == self.agent {
            'A'
        } else if position == self.enemy {
            'E'
        } else if self.enemy_path.contains(&position) {
            '*'
        } else if show_fog && !self.enemy_revealed.spot(position).copied().unwrap_or(false) {
            '~'
        } else {
            match self.terrain.spot(position) {
                Some(Terrain::Grass) => '.',
                Some(Terrain::Bush) => '"',
                Some(Terrain::Wall) | None => '#',
            }
        }
    }

    /// Rows of glyphs, the highest row first.
    #[must_use]
    pub fn rows(&self, show_fog: bool) -> Vec<String> {
        let width = i32::try_from(self.terrain.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.terrain.height()).unwrap_or(i32::MAX);
        (0..height)
            .rev()
            .map(|y| {
                (0..width)
                    .map(|x| self.glyph(Position::new(x, y), show_fog))
                    .collect()
            })
            .collect()
    }
}

/// Rendering backend capable of presenting Chase scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Backend that draws scenes as plain text.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
    show_fog: bool,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing frames to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_fog: false,
        }
    }

    /// Draws cells the enemy has not revealed as fog.
    #[must_use]
    pub fn with_fog(mut self, show_fog: bool) -> Self {
        self.show_fog = show_fog;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        for row in scene.rows(self.show_fog) {
            writeln!(self.writer, "{row}").context("failed to write frame row")?;
        }
        let state = if scene.game_over { "over" } else { "running" };
        writeln!(
            self.writer,
            "step {} score {} ({state})\n",
            scene.steps, scene.score
        )
        .context("failed to write frame footer")?;
        self.writer.flush().context("failed to flush frame")
    }
}
