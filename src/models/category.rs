//! Category model.
//!
//! A category is one competition class (e.g. an age bracket) with its own
//! team list and repeat count. Categories sharing a group id share fields,
//! match duration, and a contiguous schedule segment per day.

use serde::{Deserialize, Serialize};

use super::Team;

/// A competition category.
///
/// Immutable once scheduling begins: the scheduler derives per-category
/// metrics (fixtures, robins per day) into its own working records and
/// never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Resource group this category belongs to (1-based).
    pub group: u32,
    /// Number of repeated round-robin passes.
    pub runs: u32,
    /// Ordered team list.
    pub teams: Vec<Team>,
}

impl Category {
    /// Creates a category.
    pub fn new(name: impl Into<String>, group: u32, runs: u32, teams: Vec<Team>) -> Self {
        Self {
            name: name.into(),
            group,
            runs,
            teams,
        }
    }

    /// Number of teams.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Matches per round: `floor(teams / 2)`.
    pub fn matches_per_round(&self) -> usize {
        self.teams.len() / 2
    }

    /// Rounds in one round-robin pass: `n - 1` for even team counts,
    /// `n` for odd (every round then rests one team).
    pub fn rounds_per_pass(&self) -> usize {
        let n = self.teams.len();
        match n {
            0 | 1 => 0,
            n if n % 2 == 0 => n - 1,
            n => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(n: usize) -> Vec<Team> {
        (0..n).map(|i| Team::new(format!("team{i}"))).collect()
    }

    #[test]
    fn test_round_metrics_even() {
        let cat = Category::new("U13", 1, 2, teams(8));
        assert_eq!(cat.rounds_per_pass(), 7);
        assert_eq!(cat.matches_per_round(), 4);
    }

    #[test]
    fn test_round_metrics_odd() {
        let cat = Category::new("U11", 1, 1, teams(5));
        assert_eq!(cat.rounds_per_pass(), 5);
        assert_eq!(cat.matches_per_round(), 2);
    }

    #[test]
    fn test_round_metrics_degenerate() {
        assert_eq!(Category::new("empty", 1, 1, teams(0)).rounds_per_pass(), 0);
        assert_eq!(Category::new("solo", 1, 1, teams(1)).rounds_per_pass(), 0);
    }
}
