//! Match distribution across days, fields, and groups.
//!
//! # Algorithm
//!
//! Per category the distributor precomputes a flat fixture list and its
//! robin metrics (a robin = one fixture round of `floor(teams/2)`
//! matches). Robins are spread over the days with a floor-plus-remainder
//! rule; the first `remainder` days of the allocation order receive one
//! extra robin.
//!
//! Each group is allocated starting at the currently least-loaded day
//! (by total scheduled duration, ties broken toward the lowest index)
//! and proceeds in wrapping day order from there. Categories sharing a
//! group are merged day by day into rounds, concatenated, and re-chunked
//! into match events of field-count size; events are appended through
//! the placeholder-filling slot append so fixed-event anchors stay put.
//!
//! The merge is a deterministic greedy heuristic. It balances per-day
//! load and interleaves categories evenly; it does not search for a
//! globally minimal-conflict schedule.

use log::debug;

use crate::error::ScheduleError;
use crate::models::{Category, EventDay, GroupConfig, Match, MatchEvent, TournamentOptions};

use super::round_robin;

/// Scheduler-local working record for one category.
///
/// Holds everything the distributor derives from a [`Category`]; the
/// category itself is never mutated and the record is dropped when
/// generation finishes.
#[derive(Debug, Clone)]
pub struct CategoryPlan {
    /// Category name, for diagnostics.
    pub name: String,
    /// Flat fixture list in consumption order.
    matches: Vec<Match>,
    /// Matches per robin: `floor(teams / 2)`.
    matches_per_robin: usize,
    /// Robins across all runs.
    total_robins: usize,
    /// `floor(total_robins / day_count)`.
    base_robins_per_day: usize,
    /// Days still owed one extra robin.
    extras_remaining: usize,
    /// Consumption cursor into `matches`.
    cursor: usize,
}

impl CategoryPlan {
    /// Derives the working record for a category.
    pub fn build(category: &Category, options: &TournamentOptions, day_count: usize) -> Self {
        let teams = if options.shuffle {
            round_robin::shuffled_teams(&category.teams, &options.shuffle_seed)
        } else {
            category.teams.clone()
        };
        let matches = round_robin::category_fixtures(
            &teams,
            category.runs,
            options.alternate_sides,
            options.prevent_identical_category_days,
            day_count,
        );
        let total_robins = category.rounds_per_pass() * category.runs as usize;
        Self {
            name: category.name.clone(),
            matches,
            matches_per_robin: category.matches_per_round(),
            total_robins,
            base_robins_per_day: total_robins / day_count.max(1),
            extras_remaining: total_robins % day_count.max(1),
            cursor: 0,
        }
    }

    /// Draws up to `n` matches from the fixture list.
    fn take(&mut self, n: usize) -> &[Match] {
        let start = self.cursor;
        let end = (start + n).min(self.matches.len());
        self.cursor = end;
        &self.matches[start..end]
    }

    fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// The day with the least total scheduled duration (lowest index wins ties).
pub fn least_loaded_day(days: &[EventDay]) -> usize {
    days.iter()
        .enumerate()
        .min_by_key(|(idx, day)| (day.total_duration_min(), *idx))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Distributes one group's categories into `days` at `block_index`.
pub fn distribute_group(
    days: &mut [EventDay],
    block_index: usize,
    cfg: &GroupConfig,
    mut plans: Vec<CategoryPlan>,
) -> Result<(), ScheduleError> {
    plans.retain(|p| p.match_count() > 0);
    if plans.is_empty() || days.is_empty() {
        return Ok(());
    }

    let start = least_loaded_day(days);
    let order: Vec<usize> = (0..days.len())
        .map(|offset| (start + offset) % days.len())
        .collect();
    debug!(
        "block {block_index}: distributing {} categor{} starting at day {start}",
        plans.len(),
        if plans.len() == 1 { "y" } else { "ies" },
    );

    if plans.len() == 1 {
        distribute_single(days, block_index, cfg, &mut plans[0], &order)
    } else {
        distribute_merged(days, block_index, cfg, &mut plans, &order)
    }
}

/// Single category: chunk the flat fixture list into whole match events
/// and spread the event counts floor-plus-remainder over the day order.
/// Matches that do not fill a whole event form one trailing partial.
fn distribute_single(
    days: &mut [EventDay],
    block_index: usize,
    cfg: &GroupConfig,
    plan: &mut CategoryPlan,
    order: &[usize],
) -> Result<(), ScheduleError> {
    let total_events = plan.match_count().div_ceil(cfg.field_count);
    let base = total_events / order.len();
    let remainder = total_events % order.len();

    for (position, &day_idx) in order.iter().enumerate() {
        let event_count = base + usize::from(position < remainder);
        for _ in 0..event_count {
            let chunk = plan.take(cfg.field_count).to_vec();
            let event = MatchEvent::with_matches(cfg.match_duration_min, chunk)?;
            days[day_idx].blocks[block_index].append_to_next_available_slot(event);
        }
    }
    Ok(())
}

/// Multiple categories: merge day by day into rounds.
///
/// Each day, every category is allotted its floor robin count plus one
/// extra while its remainder counter lasts (categories with more robins
/// per day are served first). The day is built as `max allotment`
/// rounds: a category within one of the maximum contributes whole
/// robins to the leading rounds; a smaller allotment spreads each of
/// its robins across all rounds as evenly as possible, reversing the
/// uneven split on alternate robins so no round is systematically
/// front- or back-loaded.
fn distribute_merged(
    days: &mut [EventDay],
    block_index: usize,
    cfg: &GroupConfig,
    plans: &mut [CategoryPlan],
    order: &[usize],
) -> Result<(), ScheduleError> {
    // Priority: higher average robins per day first. Day counts are
    // equal across categories, so total robins compare the averages.
    let mut priority: Vec<usize> = (0..plans.len()).collect();
    priority.sort_by(|&a, &b| plans[b].total_robins.cmp(&plans[a].total_robins));

    for &day_idx in order {
        let mut allotments = vec![0usize; plans.len()];
        for &p in &priority {
            let mut robins = plans[p].base_robins_per_day;
            if plans[p].extras_remaining > 0 {
                plans[p].extras_remaining -= 1;
                robins += 1;
            }
            allotments[p] = robins;
        }
        let round_count = allotments.iter().copied().max().unwrap_or(0);
        if round_count == 0 {
            continue;
        }
        debug!("block {block_index}: day {day_idx} builds {round_count} rounds");

        let mut rounds: Vec<Vec<Match>> = vec![Vec::new(); round_count];
        for &p in &priority {
            let allotted = allotments[p];
            let plan = &mut plans[p];
            if allotted + 1 >= round_count {
                // Whole robins, one per leading round.
                for round in rounds.iter_mut().take(allotted) {
                    round.extend_from_slice(plan.take(plan.matches_per_robin));
                }
            } else {
                spread_robins(plan, allotted, &mut rounds);
            }
        }

        let day_matches: Vec<Match> = rounds.into_iter().flatten().collect();
        for chunk in day_matches.chunks(cfg.field_count) {
            let event = MatchEvent::with_matches(cfg.match_duration_min, chunk.to_vec())?;
            days[day_idx].blocks[block_index].append_to_next_available_slot(event);
        }
    }
    Ok(())
}

/// Spreads `allotted` robins of a low-allotment category across all of
/// the day's rounds.
fn spread_robins(plan: &mut CategoryPlan, allotted: usize, rounds: &mut [Vec<Match>]) {
    let round_count = rounds.len();
    let base = plan.matches_per_robin / round_count;
    let remainder = plan.matches_per_robin % round_count;

    for robin in 0..allotted {
        let mut sizes: Vec<usize> = (0..round_count)
            .map(|r| base + usize::from(r < remainder))
            .collect();
        if remainder != 0 && robin % 2 == 1 {
            sizes.reverse();
        }
        for (round, &size) in rounds.iter_mut().zip(&sizes) {
            round.extend_from_slice(plan.take(size));
        }
    }
}
