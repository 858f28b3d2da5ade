use chase_core::{Action, ActionLevels};
use rand::Rng;

/// Fuses the recommendations of several strategies into one action.
///
/// The selector holds one weight per strategy. Each action's score is the
/// weighted sum of its levels, and ties for the best score are broken
/// uniformly at random.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSelector {
    weights: Vec<f64>,
}

impl ActionSelector {
    /// Creates a selector with explicit per-strategy weights.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Creates a selector that weighs `count` strategies equally.
    #[must_use]
    pub fn equal(count: usize) -> Self {
        Self::new(vec![1.0; count])
    }

    /// Weight of every strategy in load order.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Replaces the weights.
    pub fn set_weights(&mut self, weights: Vec<f64>) {
        self.weights = weights;
    }

    /// Chooses the action with the highest weighted level.
    ///
    /// `levels` holds one row per strategy, in the same order as the weights.
    /// An empty matrix yields [`Action::Stay`].
    ///
    /// # Panics
    ///
    /// Panics if the number of rows differs from the number of weights.
    pub fn highest<R>(&self, levels: &[ActionLevels], rng: &mut R) -> Action
    where
        R: Rng + ?Sized,
    {
        if levels.is_empty() {
            return Action::Stay;
        }
        assert_eq!(
            levels.len(),
            self.weights.len(),
            "one level row is required per weight"
        );

        let mut totals = ActionLevels::new();
        for (row, weight) in levels.iter().zip(&self.weights) {
            for (action, level) in row.iter() {
                totals.set(action, totals.get(action) + level * weight);
            }
        }

        let mut best = Action::Stay;
        let mut choices = Vec::with_capacity(Action::ALL.len());
        for (action, total) in totals.iter() {
            if total > totals.get(best) {
                best = action;
                choices.clear();
                choices.push(action);
            } else if total == totals.get(best) {
                choices.push(action);
            }
        }

        choices[rng.gen_range(0..choices.len())]
    }
}
