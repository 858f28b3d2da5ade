use chase_core::{Action, ActionLevels, StrategyKind, MAX_ACTION_LEVEL};
use rand::{Rng, RngCore};

use crate::{discard_invalid, Context, Strategy};

/// Picks a random valid direction.
///
/// Every action receives a uniform integer level, invalid actions and
/// [`Action::Stay`] are zeroed, and the first action holding the highest level
/// is promoted to the maximum so that it clearly dominates the draw. When
/// every level ends up at zero the promoted action is [`Action::Stay`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Random;

impl Strategy for Random {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }

    fn action_levels(&mut self, ctx: &Context<'_>, rng: &mut dyn RngCore) -> ActionLevels {
        let mut levels = ActionLevels::new();
        for action in Action::ALL {
            let level: u8 = rng.gen_range(0..=10);
            levels.set(action, f64::from(level));
        }
        discard_invalid(&mut levels, ctx);
        levels.set(Action::Stay, 0.0);

        let mut best = Action::Stay;
        for (action, level) in levels.iter() {
            if level > levels.get(best) {
                best = action;
            }
        }
        levels.set(best, MAX_ACTION_LEVEL);
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::world;
    use chase_core::RoleId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn a_valid_action_is_promoted() {
        let world = world(&["A..", "...", "..E"]);
        let ctx = Context::new(&world, RoleId::Agent);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        for _ in 0..200 {
            let levels = Random.action_levels(&ctx, &mut rng);
            let promoted: Vec<_> = levels
                .iter()
                .filter(|(_, level)| *level == MAX_ACTION_LEVEL)
                .map(|(action, _)| action)
                .collect();

            assert!(!promoted.is_empty());
            assert!(promoted
                .iter()
                .all(|action| matches!(action, Action::Stay | Action::Down | Action::Right)));
            assert_eq!(levels.get(Action::Up), 0.0);
            assert_eq!(levels.get(Action::Left), 0.0);
            for (action, level) in levels.iter() {
                assert!((0.0..=MAX_ACTION_LEVEL).contains(&level), "{action:?}");
            }
            if levels.get(Action::Stay) == MAX_ACTION_LEVEL {
                assert_eq!(levels.get(Action::Down), 0.0);
                assert_eq!(levels.get(Action::Right), 0.0);
            }
        }
    }

    #[test]
    fn boxed_in_role_falls_back_to_staying() {
        let world = world(&["#E", "A#"]);
        let ctx = Context::new(&world, RoleId::Agent);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let levels = Random.action_levels(&ctx, &mut rng);

        assert_eq!(levels.get(Action::Stay), MAX_ACTION_LEVEL);
        for action in [Action::Up, Action::Down, Action::Left, Action::Right] {
            assert_eq!(levels.get(action), 0.0);
        }
    }

    #[test]
    fn both_open_directions_are_chosen_over_time() {
        let world = world(&["A..", "...", "..E"]);
        let ctx = Context::new(&world, RoleId::Agent);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut down = 0;
        let mut right = 0;

        for _ in 0..500 {
            let levels = Random.action_levels(&ctx, &mut rng);
            if levels.get(Action::Down) == MAX_ACTION_LEVEL {
                down += 1;
            }
            if levels.get(Action::Right) == MAX_ACTION_LEVEL {
                right += 1;
            }
        }

        assert!(down > 100, "down promoted {down} times");
        assert!(right > 100, "right promoted {right} times");
    }
}
