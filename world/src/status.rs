//! Match bookkeeping: both roles, the step counters and the terminal flag.

use chase_core::RoleId;

use crate::Role;

/// Minimum distance on each axis for a step to count towards the score.
pub const CLOSE_DISTANCE: u32 = 2;

/// Progress of a single match.
#[derive(Clone, Debug)]
pub struct Status {
    agent: Role,
    enemy: Role,
    steps: u64,
    good_steps: u64,
    game_end: bool,
}

impl Status {
    /// Starts a match with the provided roles.
    ///
    /// # Panics
    ///
    /// Panics if both roles stand on the same cell.
    #[must_use]
    pub fn new(agent: Role, enemy: Role) -> Self {
        assert_ne!(
            agent.position(),
            enemy.position(),
            "agent and enemy must not share a cell"
        );
        Self {
            agent,
            enemy,
            steps: 1,
            good_steps: 0,
            game_end: false,
        }
    }

    /// Steps recorded so far, starting at one.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Steps during which the agent kept its distance on both axes.
    #[must_use]
    pub const fn good_steps(&self) -> u64 {
        self.good_steps
    }

    /// Whether the match has finished.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_end
    }

    /// Percentage of good steps, rounded down.
    #[must_use]
    pub fn score(&self) -> u32 {
        let ratio = self.good_steps.saturating_mul(100) / self.steps.max(1);
        u32::try_from(ratio).unwrap_or(u32::MAX)
    }

    /// Records a completed turn.
    ///
    /// # Panics
    ///
    /// Panics if the match has already ended.
    pub fn new_step(&mut self) {
        assert!(!self.game_end, "cannot advance a finished match");

        self.steps += 1;
        let agent = self.agent.position();
        let enemy = self.enemy.position();
        if agent.x().abs_diff(enemy.x()) >= CLOSE_DISTANCE
            && agent.y().abs_diff(enemy.y()) >= CLOSE_DISTANCE
        {
            self.good_steps += 1;
        }
    }

    /// Marks the match as finished.
    pub fn end_game(&mut self) {
        self.game_end = true;
    }

    /// Role identified by `id`.
    #[must_use]
    pub const fn role(&self, id: RoleId) -> &Role {
        match id {
            RoleId::Agent => &self.agent,
            RoleId::Enemy => &self.enemy,
        }
    }

    pub(crate) fn role_mut(&mut self, id: RoleId) -> &mut Role {
        match id {
            RoleId::Agent => &mut self.agent,
            RoleId::Enemy => &mut self.enemy,
        }
    }

    /// The evading role.
    #[must_use]
    pub const fn agent(&self) -> &Role {
        &self.agent
    }

    /// The chasing role.
    #[must_use]
    pub const fn enemy(&self) -> &Role {
        &self.enemy
    }

    /// Role competing against `id`.
    #[must_use]
    pub const fn opponent(&self, id: RoleId) -> &Role {
        self.role(id.opponent())
    }
}
