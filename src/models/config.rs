//! Group configuration and tournament-wide options.

use serde::{Deserialize, Serialize};

/// How the scheduler treats a team booked in two temporally adjacent
/// events without sufficient rest (a "double mission").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleMissionPolicy {
    /// Insert empty buffer match events so no two adjacent events share a team.
    EmptyField,
    /// Insert explicit pause events of a configured duration.
    Pause,
    /// Leave conflicts in place.
    #[default]
    Ignore,
}

/// Per-group scheduling parameters.
///
/// All categories sharing a group id play on the same fields with the
/// same match duration and conflict policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Duration of one match event in minutes.
    pub match_duration_min: u32,
    /// Number of fields available, i.e. the maximum simultaneous matches.
    pub field_count: usize,
    /// Double-mission handling policy.
    pub double_mission: DoubleMissionPolicy,
    /// Pause length in minutes. Only meaningful for [`DoubleMissionPolicy::Pause`].
    pub pause_duration_min: u32,
}

impl GroupConfig {
    /// Creates a config with the `Ignore` policy.
    pub fn new(match_duration_min: u32, field_count: usize) -> Self {
        Self {
            match_duration_min,
            field_count,
            double_mission: DoubleMissionPolicy::Ignore,
            pause_duration_min: 0,
        }
    }

    /// Sets the double-mission policy.
    pub fn with_double_mission(mut self, policy: DoubleMissionPolicy) -> Self {
        self.double_mission = policy;
        self
    }

    /// Sets the pause duration (minutes).
    pub fn with_pause_duration(mut self, pause_duration_min: u32) -> Self {
        self.pause_duration_min = pause_duration_min;
        self
    }
}

/// A reproducible shuffle seed.
///
/// Text seeds are hashed to an integer with a version-stable hash so the
/// resulting team order is identical across process restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShuffleSeed {
    /// Integer seed, used directly.
    Number(u64),
    /// Text seed, hashed to an integer.
    Text(String),
}

impl ShuffleSeed {
    /// The integer seed value fed to the RNG.
    pub fn as_u64(&self) -> u64 {
        match self {
            ShuffleSeed::Number(n) => *n,
            ShuffleSeed::Text(s) => fxhash::hash64(s.as_bytes()),
        }
    }
}

impl Default for ShuffleSeed {
    fn default() -> Self {
        ShuffleSeed::Number(0)
    }
}

/// Tournament-wide scheduling options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentOptions {
    /// Shuffle each category's team order before fixture generation.
    pub shuffle: bool,
    /// Seed for the team-order shuffle.
    pub shuffle_seed: ShuffleSeed,
    /// Flip home/away on odd repeat runs to balance sides.
    pub alternate_sides: bool,
    /// Rotate round order per day so consecutive days do not open with
    /// the same fixtures. Effective when the run count is an exact
    /// multiple of the day count.
    pub prevent_identical_category_days: bool,
}

impl Default for TournamentOptions {
    fn default() -> Self {
        Self {
            shuffle: false,
            shuffle_seed: ShuffleSeed::default(),
            alternate_sides: true,
            prevent_identical_category_days: false,
        }
    }
}
