//! Round-robin fixture generation.
//!
//! # Algorithm
//!
//! Circle method: fix the first team and rotate the rest by one position
//! after each round; round `r` pairs position `i` with position `n-1-i`.
//! The fixed seat's pairing alternates orientation between rounds
//! (Berger tables), otherwise the fixed team would play every match of a
//! pass at home. Odd team counts get a synthetic bye appended for
//! pairing only; pairs involving it are dropped, so every round rests
//! exactly one team.
//!
//! `n` even yields `n-1` rounds, `n` odd yields `n` rounds; every
//! unordered pair occurs exactly once per pass. Output ordering is fully
//! deterministic for identical inputs.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::models::{Match, ShuffleSeed, Team};

/// One round-robin pass: rounds of simultaneous-capable pairings.
pub fn round_robin_rounds(teams: &[Team]) -> Vec<Vec<Match>> {
    if teams.len() < 2 {
        return Vec::new();
    }

    // Positions hold indices into `teams`; `None` is the bye.
    let mut ring: Vec<Option<usize>> = (0..teams.len()).map(Some).collect();
    if ring.len() % 2 == 1 {
        ring.push(None);
    }
    let n = ring.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for round in 0..n - 1 {
        let mut matches = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (ring[i], ring[n - 1 - i]) {
                // The fixed seat plays away on odd rounds; every other
                // seat gets its balance from the rotation itself.
                let (home, away) = if i == 0 && round % 2 == 1 {
                    (b, a)
                } else {
                    (a, b)
                };
                matches.push(Match::new(teams[home].clone(), teams[away].clone()));
            }
        }
        rounds.push(matches);

        // Rotate everything but the fixed first position.
        let last = ring[n - 1];
        ring.copy_within(1..n - 1, 2);
        ring[1] = last;
    }
    rounds
}

/// Repeated round-robin passes for a category.
///
/// With `alternate_sides`, odd-indexed passes flip home and away so each
/// team's home and away counts differ by at most one across the runs.
pub fn fixture_rounds(teams: &[Team], runs: u32, alternate_sides: bool) -> Vec<Vec<Match>> {
    let base = round_robin_rounds(teams);
    let mut rounds = Vec::with_capacity(base.len() * runs as usize);
    for run in 0..runs {
        for round in &base {
            if alternate_sides && run % 2 == 1 {
                rounds.push(round.iter().map(Match::flipped).collect());
            } else {
                rounds.push(round.clone());
            }
        }
    }
    rounds
}

/// Deterministically shuffled copy of a team list.
///
/// The seed fully determines the order; identical seeds reproduce the
/// identical permutation across process restarts and platforms.
pub fn shuffled_teams(teams: &[Team], seed: &ShuffleSeed) -> Vec<Team> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.as_u64());
    let mut shuffled = teams.to_vec();
    shuffled.shuffle(&mut rng);
    shuffled
}

/// Builds the flat, consumption-ordered fixture list for one category.
///
/// `rotate_per_day` rotates the base round order left by one per
/// consumed-day slice so no two consecutive days open with the same
/// round. It only applies when the run count is an exact multiple of the
/// day count: the per-day robin allotment is then uniform and the day
/// slices align with whole passes.
pub fn category_fixtures(
    teams: &[Team],
    runs: u32,
    alternate_sides: bool,
    rotate_per_day: bool,
    day_count: usize,
) -> Vec<Match> {
    if rotate_per_day && day_count > 0 && runs as usize % day_count == 0 {
        let base = round_robin_rounds(teams);
        if base.len() < 2 {
            return flatten(fixture_rounds(teams, runs, alternate_sides));
        }
        let runs_per_day = runs as usize / day_count;
        let mut matches = Vec::new();
        for day in 0..day_count {
            for rep in 0..runs_per_day {
                let run = day * runs_per_day + rep;
                let flip = alternate_sides && run % 2 == 1;
                for r in 0..base.len() {
                    let round = &base[(r + day) % base.len()];
                    if flip {
                        matches.extend(round.iter().map(Match::flipped));
                    } else {
                        matches.extend(round.iter().cloned());
                    }
                }
            }
        }
        matches
    } else {
        flatten(fixture_rounds(teams, runs, alternate_sides))
    }
}

fn flatten(rounds: Vec<Vec<Match>>) -> Vec<Match> {
    rounds.into_iter().flatten().collect()
}
