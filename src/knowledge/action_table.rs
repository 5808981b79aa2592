//! Action table for a single board state

use serde::{Deserialize, Serialize};

use crate::tictactoe::Position;

/// Visit count every action starts with
pub const OPTIMISTIC_VISITS: u32 = 1;

/// Mean return every action starts with
pub const OPTIMISTIC_MEAN: f64 = 1.0;

/// Available actions for one board state with their running statistics
///
/// `actions`, `visits` and `means` always have the same length and share
/// indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTable {
    actions: Vec<Position>,
    visits: Vec<u32>,
    means: Vec<f64>,
}

impl ActionTable {
    /// Create a table for `actions` with the optimistic prior on every entry
    pub fn new(actions: Vec<Position>) -> Self {
        let len = actions.len();
        Self {
            actions,
            visits: vec![OPTIMISTIC_VISITS; len],
            means: vec![OPTIMISTIC_MEAN; len],
        }
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Coordinates in the order they were recorded (row-major)
    pub fn actions(&self) -> &[Position] {
        &self.actions
    }

    pub fn visits(&self) -> &[u32] {
        &self.visits
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Coordinate for an action index
    pub fn action(&self, index: usize) -> Position {
        self.actions[index]
    }

    /// Index of the highest mean; ties go to the lowest index.
    ///
    /// Returns `None` for an empty table.
    pub fn greedy_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, &mean) in self.means.iter().enumerate() {
            match best {
                Some((_, best_mean)) if mean <= best_mean => {}
                _ => best = Some((index, mean)),
            }
        }
        best.map(|(index, _)| index)
    }

    /// Fold one observed return into the running mean of `index`.
    ///
    /// The optimistic prior counts as the first sample, so after the visit
    /// count is bumped to `n`: `mean ← (n − 1)/n · mean + reward/n`. After `k`
    /// returns the mean is `(1 + Σ reward) / (1 + k)`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, which means the caller recorded an
    /// action that this table never offered.
    pub fn record_return(&mut self, index: usize, reward: f64) {
        self.assert_consistent();
        assert!(
            index < self.actions.len(),
            "action index {index} out of range for a table of {} actions",
            self.actions.len()
        );

        self.visits[index] += 1;
        let n = f64::from(self.visits[index]);
        self.means[index] = (n - 1.0) / n * self.means[index] + reward / n;
    }

    /// Describe the first broken invariant, if any
    pub(crate) fn invariant_violation(&self) -> Option<String> {
        if self.visits.len() != self.actions.len() || self.means.len() != self.actions.len() {
            return Some(format!(
                "length mismatch: {} actions, {} visit counts, {} means",
                self.actions.len(),
                self.visits.len(),
                self.means.len()
            ));
        }
        if let Some(index) = self.visits.iter().position(|&v| v == 0) {
            return Some(format!("action {index} has a visit count of zero"));
        }
        if let Some(index) = self.means.iter().position(|m| !m.is_finite()) {
            return Some(format!("action {index} has a non-finite mean"));
        }
        let mut seen = [false; 9];
        for action in &self.actions {
            if std::mem::replace(&mut seen[action.index()], true) {
                return Some(format!("action {action} is listed twice"));
            }
        }
        None
    }

    fn assert_consistent(&self) {
        if let Some(violation) = self.invariant_violation() {
            panic!("corrupted action table: {violation}");
        }
    }
}
