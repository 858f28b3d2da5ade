//! Participant state: position, terrain memory and movement rules.

use chase_core::{Grid, Occupancy, Position, RoleId, Terrain, Visibility};

use crate::Map;

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The target was the current cell.
    Stayed,
    /// The role entered the target cell.
    Moved,
    /// The role was held in place by the bush it entered previously.
    Trapped,
    /// The target could not be entered.
    Blocked(Occupancy),
}

impl MoveOutcome {
    /// Reports whether the attempt counts as a successful move.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Stayed | Self::Moved)
    }
}

/// A participant of the match.
///
/// Agent and enemy share this representation and differ only through their
/// [`Visibility`]: a fully visible role knows every cell, while a fog-of-war
/// role learns cells by standing on them or bumping into walls.
#[derive(Clone, Debug)]
pub struct Role {
    id: RoleId,
    visibility: Visibility,
    position: Position,
    revealed: Grid<bool>,
    last_target: Position,
    wall_blocked: bool,
    bush_trapped: bool,
}

impl Role {
    /// Places a new role on `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not free, taking the `others` role positions
    /// into account.
    #[must_use]
    pub fn spawn(
        id: RoleId,
        visibility: Visibility,
        map: &Map,
        position: Position,
        others: &[Position],
    ) -> Self {
        let occupancy = map.classify(position, others);
        assert!(
            occupancy == Occupancy::Free,
            "{id:?} cannot spawn on {position:?}: cell is {occupancy:?}"
        );

        let known = matches!(visibility, Visibility::FullyVisible);
        let mut role = Self {
            id,
            visibility,
            position,
            revealed: Grid::new(map.width(), map.height(), known),
            last_target: position,
            wall_blocked: false,
            bush_trapped: false,
        };
        role.bush_trapped = map.terrain(position) == Terrain::Bush;
        let _ = role.reveal();
        role
    }

    /// Identifier of the role.
    #[must_use]
    pub const fn id(&self) -> RoleId {
        self.id
    }

    /// Visibility mode of the role.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Cell the role currently occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Terrain under the role.
    #[must_use]
    pub fn terrain(&self, map: &Map) -> Terrain {
        map.terrain(self.position)
    }

    /// Whether the role lost its next move to the bush it stands in.
    #[must_use]
    pub const fn is_bush_trapped(&self) -> bool {
        self.bush_trapped
    }

    /// Reports whether the role knows the terrain at `position`.
    ///
    /// Fully visible roles know every cell; positions outside the map are
    /// never revealed to fog-of-war roles.
    #[must_use]
    pub fn revealed(&self, position: Position) -> bool {
        match self.visibility {
            Visibility::FullyVisible => true,
            Visibility::FogOfWar => self.revealed.spot(position).copied().unwrap_or(false),
        }
    }

    /// Per-cell memory of which terrain the role knows.
    #[must_use]
    pub fn revealed_cells(&self) -> &Grid<bool> {
        &self.revealed
    }

    /// Attempts to enter `target`.
    ///
    /// `occupancy` and `terrain` describe the target cell as seen by the map
    /// at the time of the attempt. A role standing in a bush loses exactly
    /// one attempt that does not target its own cell.
    pub fn try_move(
        &mut self,
        target: Position,
        occupancy: Occupancy,
        terrain: Terrain,
    ) -> MoveOutcome {
        self.last_target = target;
        self.wall_blocked = false;

        if target == self.position {
            return MoveOutcome::Stayed;
        }
        if self.bush_trapped {
            self.bush_trapped = false;
            return MoveOutcome::Trapped;
        }
        if occupancy != Occupancy::Free {
            self.wall_blocked = occupancy == Occupancy::Wall;
            return MoveOutcome::Blocked(occupancy);
        }

        self.position = target;
        self.bush_trapped = terrain == Terrain::Bush;
        MoveOutcome::Moved
    }

    /// Updates the terrain memory after a move attempt.
    ///
    /// The current cell becomes known, and so does the previously targeted
    /// cell when the attempt bumped into a wall. Returns the cells that were
    /// not known before. Fully visible roles never learn anything new.
    pub fn reveal(&mut self) -> Vec<Position> {
        let mut discovered = Vec::new();
        if self.visibility == Visibility::FullyVisible {
            return discovered;
        }

        let mut cells = vec![self.position];
        if self.wall_blocked {
            cells.push(self.last_target);
        }
        for cell in cells {
            if let Some(known) = self.revealed.spot_mut(cell) {
                if !*known {
                    *known = true;
                    discovered.push(cell);
                }
            }
        }
        discovered
    }
}
