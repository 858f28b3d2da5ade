use chase_core::{Action, ActionLevels, Config, ConfigError, Position, RoleId, StrategyKind};
use chase_world::Map;
use rand::RngCore;
use tracing::{debug, warn};

use crate::{build_strategy, ActionSelector, Context, Random, Strategy};

/// Strategies loaded for one role together with the selector that fuses them.
#[derive(Debug)]
pub struct Pipeline {
    role: RoleId,
    strategies: Vec<Box<dyn Strategy>>,
    selector: ActionSelector,
}

impl Pipeline {
    /// Loads the strategies configured for `role` in strategy-kind order.
    ///
    /// Strategies weighted zero are skipped. When nothing remains the role
    /// falls back to [`Random`] with weight one.
    pub fn load(role: RoleId, map: &Map, config: &Config) -> Result<Self, ConfigError> {
        let mut strategies = Vec::new();
        let mut weights = Vec::new();
        for (&kind, &weight) in config.weights_for(role) {
            kind.check_weight(role, weight)?;
            if weight == 0.0 {
                debug!(?role, %kind, "skipping strategy with zero weight");
                continue;
            }
            strategies.push(build_strategy(kind, map, config));
            weights.push(weight);
        }

        if strategies.is_empty() {
            warn!(?role, "no strategy loaded, falling back to random");
            strategies.push(Box::new(Random));
            weights.push(1.0);
        }

        Ok(Self {
            role,
            strategies,
            selector: ActionSelector::new(weights),
        })
    }

    /// Role the pipeline decides for.
    #[must_use]
    pub const fn role(&self) -> RoleId {
        self.role
    }

    /// Evaluates every strategy and returns the action the role should attempt.
    pub fn peek_action(&mut self, ctx: &Context<'_>, rng: &mut dyn RngCore) -> Action {
        let mut levels: Vec<ActionLevels> = Vec::with_capacity(self.strategies.len());
        for strategy in &mut self.strategies {
            levels.push(strategy.action_levels(ctx, rng));
        }

        let action = self.selector.highest(&levels, rng);
        debug!(role = ?self.role, ?action, "action chosen");
        action
    }

    /// Kinds of the loaded strategies in load order.
    #[must_use]
    pub fn kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|strategy| strategy.kind()).collect()
    }

    /// Weights of the loaded strategies in load order.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        self.selector.weights()
    }

    /// Replaces the weights of the loaded strategies.
    ///
    /// # Panics
    ///
    /// Panics if the number of weights differs from the number of strategies.
    pub fn set_weights(&mut self, weights: Vec<f64>) {
        assert_eq!(
            weights.len(),
            self.strategies.len(),
            "one weight is required per strategy"
        );
        self.selector.set_weights(weights);
    }

    /// Remainder of the most recently planned path, starting at `current`.
    ///
    /// Empty when no strategy plans paths or `current` is not on the path.
    #[must_use]
    pub fn path(&self, current: Position) -> Vec<Position> {
        let Some(path) = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.last_path())
        else {
            return Vec::new();
        };

        path.iter()
            .position(|cell| *cell == current)
            .map(|start| path[start..].to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::world;
    use chase_core::Command;
    use chase_world::{apply, query};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;

    fn config_with(agent: &[(StrategyKind, f64)], enemy: &[(StrategyKind, f64)]) -> Config {
        let mut config = Config::default();
        config.strategy_weights.agent = agent.iter().copied().collect::<BTreeMap<_, _>>();
        config.strategy_weights.enemy = enemy.iter().copied().collect::<BTreeMap<_, _>>();
        config
    }

    #[test]
    fn loads_configured_strategies_in_kind_order() {
        let world = world(&["A...", "...E"]);
        let config = Config::default();

        let agent = Pipeline::load(RoleId::Agent, query::map(&world), &config).expect("agent");
        let enemy = Pipeline::load(RoleId::Enemy, query::map(&world), &config).expect("enemy");

        assert_eq!(
            agent.kinds(),
            vec![
                StrategyKind::Random,
                StrategyKind::MoveAway,
                StrategyKind::WallDensity
            ]
        );
        assert_eq!(agent.weights(), &[1.0, 3.0, 1.0]);
        assert_eq!(
            enemy.kinds(),
            vec![
                StrategyKind::Random,
                StrategyKind::MoveClose,
                StrategyKind::AStar
            ]
        );
        assert_eq!(enemy.weights(), &[0.5, 1.0, 3.0]);
    }

    #[test]
    fn zero_weights_are_skipped() {
        let world = world(&["A...", "...E"]);
        let config = config_with(
            &[(StrategyKind::MoveAway, 2.0), (StrategyKind::Random, 0.0)],
            &[],
        );

        let agent = Pipeline::load(RoleId::Agent, query::map(&world), &config).expect("agent");

        assert_eq!(agent.kinds(), vec![StrategyKind::MoveAway]);
        assert_eq!(agent.weights(), &[2.0]);
    }

    #[test]
    fn empty_table_falls_back_to_random() {
        let world = world(&["A...", "...E"]);
        let config = config_with(&[], &[(StrategyKind::AStar, 0.0)]);

        let enemy = Pipeline::load(RoleId::Enemy, query::map(&world), &config).expect("enemy");

        assert_eq!(enemy.kinds(), vec![StrategyKind::Random]);
        assert_eq!(enemy.weights(), &[1.0]);
    }

    #[test]
    fn agent_rejects_astar() {
        let world = world(&["A...", "...E"]);
        let config = config_with(&[(StrategyKind::AStar, 1.0)], &[]);

        let error = Pipeline::load(RoleId::Agent, query::map(&world), &config)
            .expect_err("aStar requires fog of war");

        assert_eq!(
            error,
            ConfigError::UnsupportedStrategy {
                role: RoleId::Agent,
                kind: StrategyKind::AStar
            }
        );
    }

    #[test]
    fn negative_weights_are_rejected() {
        let world = world(&["A...", "...E"]);
        let config = config_with(&[(StrategyKind::MoveAway, -1.0)], &[]);

        assert!(matches!(
            Pipeline::load(RoleId::Agent, query::map(&world), &config),
            Err(ConfigError::InvalidStrategyWeight { .. })
        ));
    }

    #[test]
    fn peek_action_follows_the_dominant_strategy() {
        let world = world(&["E...A"]);
        let config = config_with(&[], &[(StrategyKind::MoveClose, 1.0)]);
        let mut enemy = Pipeline::load(RoleId::Enemy, query::map(&world), &config).expect("enemy");
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let action = enemy.peek_action(&Context::new(&world, RoleId::Enemy), &mut rng);

        assert_eq!(action, Action::Right);
    }

    #[test]
    fn path_is_trimmed_to_the_current_position() {
        let mut world = world(&["E...A"]);
        let config = config_with(&[], &[(StrategyKind::AStar, 1.0)]);
        let mut enemy = Pipeline::load(RoleId::Enemy, query::map(&world), &config).expect("enemy");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(enemy.path(Position::new(0, 0)).is_empty());

        let action = enemy.peek_action(&Context::new(&world, RoleId::Enemy), &mut rng);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveRole {
                role: RoleId::Enemy,
                action,
            },
            &mut events,
        );
        let current = query::position(&world, RoleId::Enemy);

        assert_eq!(current, Position::new(1, 0));
        assert_eq!(
            enemy.path(current),
            vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0),
                Position::new(4, 0),
            ]
        );
        assert!(enemy.path(Position::new(9, 9)).is_empty());
    }

    #[test]
    fn pipelines_without_planners_have_no_path() {
        let world = world(&["E...A"]);
        let config = Config::default();
        let agent = Pipeline::load(RoleId::Agent, query::map(&world), &config).expect("agent");

        assert!(agent.path(Position::new(4, 0)).is_empty());
    }

    #[test]
    #[should_panic(expected = "one weight is required per strategy")]
    fn set_weights_requires_matching_length() {
        let world = world(&["E...A"]);
        let mut agent =
            Pipeline::load(RoleId::Agent, query::map(&world), &Config::default()).expect("agent");

        agent.set_weights(vec![1.0]);
    }
}
