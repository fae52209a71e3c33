//! Tournament schedule generation.
//!
//! The pipeline turns a [`TournamentPlan`] into a list of [`EventDay`]
//! containers:
//!
//! 1. Validate the plan (see [`crate::validation`]).
//! 2. Lay out each day as `group count + 1` blocks; the trailing block
//!    holds events anchored after the last group.
//! 3. Anchor configured fixed events into the blocks.
//! 4. Generate fixtures per category and distribute them over days and
//!    fields, group by group in ascending id order.
//! 5. Resolve double missions per group policy.
//! 6. Compact away placeholder slots that were never filled.
//!
//! Fixed events are placed before any match so that duration-based
//! load balancing during distribution sees them.

mod distribute;
mod double_mission;
mod fixed_events;
mod round_robin;

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{Category, EventDay, GroupConfig, OtherEvent, TournamentOptions};
use crate::validation::validate_plan;

pub use distribute::{least_loaded_day, CategoryPlan};
pub use round_robin::{fixture_rounds, round_robin_rounds, shuffled_teams};

/// Complete input to schedule generation.
///
/// Groups are keyed by 1-based contiguous ids; fixed events are keyed
/// by the group they anchor to, with group 0 denoting the start of the
/// day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentPlan {
    /// Number of tournament days.
    pub day_count: usize,
    /// Competing categories.
    pub categories: Vec<Category>,
    /// Per-group scheduling parameters.
    pub groups: BTreeMap<u32, GroupConfig>,
    /// Fixed events per anchor group.
    pub other_events: BTreeMap<u32, Vec<OtherEvent>>,
    /// Tournament-wide options.
    pub options: TournamentOptions,
}

impl TournamentPlan {
    /// Creates an empty plan over `day_count` days.
    pub fn new(day_count: usize) -> Self {
        Self {
            day_count,
            ..Self::default()
        }
    }

    /// Adds a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Configures a group.
    pub fn with_group(mut self, id: u32, cfg: GroupConfig) -> Self {
        self.groups.insert(id, cfg);
        self
    }

    /// Adds a fixed event anchored to `group`.
    pub fn with_other_event(mut self, group: u32, event: OtherEvent) -> Self {
        self.other_events.entry(group).or_default().push(event);
        self
    }

    /// Sets the tournament-wide options.
    pub fn with_options(mut self, options: TournamentOptions) -> Self {
        self.options = options;
        self
    }
}

/// Generates the full tournament schedule for a plan.
///
/// # Returns
/// One [`EventDay`] per tournament day, or [`ScheduleError::InvalidPlan`]
/// listing every validation failure.
pub fn generate_schedule(plan: &TournamentPlan) -> Result<Vec<EventDay>, ScheduleError> {
    validate_plan(plan).map_err(ScheduleError::InvalidPlan)?;
    if plan.day_count == 0 {
        return Ok(Vec::new());
    }

    info!(
        "scheduling {} categories in {} groups over {} days",
        plan.categories.len(),
        plan.groups.len(),
        plan.day_count
    );

    let block_count = plan.groups.len() + 1;
    let mut days: Vec<EventDay> = (0..plan.day_count)
        .map(|_| EventDay::with_blocks(block_count))
        .collect();

    fixed_events::place_other_events(&mut days, &plan.other_events);

    for (&group, cfg) in &plan.groups {
        let plans: Vec<CategoryPlan> = plan
            .categories
            .iter()
            .filter(|cat| cat.group == group)
            .map(|cat| CategoryPlan::build(cat, &plan.options, plan.day_count))
            .collect();
        distribute::distribute_group(&mut days, group as usize - 1, cfg, plans)?;
    }

    for (idx, day) in days.iter_mut().enumerate() {
        for (&group, cfg) in &plan.groups {
            double_mission::resolve_block(&mut day.blocks[group as usize - 1], cfg)?;
        }
        day.compact();
        debug!(
            "day {idx}: {} events, {} matches, {} min",
            day.event_count(),
            day.match_count(),
            day.total_duration_min()
        );
    }

    Ok(days)
}
