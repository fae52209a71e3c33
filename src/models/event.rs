//! Event models and the slot variant.
//!
//! A schedule position holds either nothing yet (a meaningful placeholder,
//! not mere absence), a set of simultaneous matches, or a fixed event such
//! as a ceremony or break. The three-way [`Slot`] variant keeps the
//! positional semantics explicit.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ScheduleError;
use super::{Match, Team};

/// Placement of a fixed event relative to its group's segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    /// At the start of the group's own segment.
    Before,
    /// Inside the segment, after the given number of match events.
    During(usize),
    /// Immediately following the group's segment.
    After,
}

/// A set of matches played simultaneously on the group's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Event duration in minutes.
    pub duration_min: u32,
    /// Simultaneous matches, at most one per field.
    pub matches: Vec<Match>,
}

impl MatchEvent {
    /// Creates an empty match event.
    ///
    /// Fails fast on a zero duration; no schedule may be built from an
    /// invalid event.
    pub fn new(duration_min: u32) -> Result<Self, ScheduleError> {
        if duration_min == 0 {
            return Err(ScheduleError::InvalidDuration);
        }
        Ok(Self {
            duration_min,
            matches: Vec::new(),
        })
    }

    /// Creates a match event holding the given matches.
    pub fn with_matches(duration_min: u32, matches: Vec<Match>) -> Result<Self, ScheduleError> {
        let mut ev = Self::new(duration_min)?;
        ev.matches = matches;
        Ok(ev)
    }

    /// All distinct teams seated in this event.
    pub fn unique_teams(&self) -> HashSet<&Team> {
        let mut teams = HashSet::new();
        for m in &self.matches {
            teams.insert(&m.home);
            teams.insert(&m.away);
        }
        teams
    }

    /// Whether the given team plays in any match of this event.
    pub fn involves(&self, team: &Team) -> bool {
        self.matches.iter().any(|m| m.involves(team))
    }

    /// Whether this event shares at least one team with `other`.
    pub fn shares_team_with(&self, other: &MatchEvent) -> bool {
        let mine = self.unique_teams();
        other.matches.iter().any(|m| mine.contains(&m.home) || mine.contains(&m.away))
    }
}

/// A fixed event: ceremony, break, announcement, or generated pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherEvent {
    /// Event duration in minutes.
    pub duration_min: u32,
    /// Display label.
    pub label: String,
    /// Render the label bold.
    pub bold: bool,
    /// Display color (hex). `None` = renderer default.
    pub color: Option<String>,
    /// Target day: 0 = every day, otherwise 1-based day number.
    pub day_index: u32,
    /// Anchor phase relative to the group segment. `None` for events the
    /// scheduler generates itself (pauses), which are placed directly.
    pub phase: Option<EventPhase>,
}

impl OtherEvent {
    /// Creates a fixed event targeting every day, with no anchor phase.
    ///
    /// Fails fast on a zero duration.
    pub fn new(duration_min: u32, label: impl Into<String>) -> Result<Self, ScheduleError> {
        if duration_min == 0 {
            return Err(ScheduleError::InvalidDuration);
        }
        Ok(Self {
            duration_min,
            label: label.into(),
            bold: false,
            color: None,
            day_index: 0,
            phase: None,
        })
    }

    /// Creates a generated pause event.
    pub fn pause(duration_min: u32) -> Result<Self, ScheduleError> {
        Self::new(duration_min, "Pause")
    }

    /// Sets the anchor phase.
    pub fn with_phase(mut self, phase: EventPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Targets a single day (1-based).
    pub fn on_day(mut self, day_index: u32) -> Self {
        self.day_index = day_index;
        self
    }

    /// Renders the label bold.
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// The atomic addressable unit of an [`super::EventBlock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Slot {
    /// Reserved position, filled later or dropped at compaction.
    Empty,
    /// Simultaneous matches.
    Match(MatchEvent),
    /// Fixed event.
    Other(OtherEvent),
}

impl Slot {
    /// Whether this slot is a placeholder.
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Duration in minutes; placeholders have none.
    pub fn duration_min(&self) -> u32 {
        match self {
            Slot::Empty => 0,
            Slot::Match(ev) => ev.duration_min,
            Slot::Other(ev) => ev.duration_min,
        }
    }

    /// The contained match event, if any.
    pub fn as_match(&self) -> Option<&MatchEvent> {
        match self {
            Slot::Match(ev) => Some(ev),
            _ => None,
        }
    }

    /// The contained fixed event, if any.
    pub fn as_other(&self) -> Option<&OtherEvent> {
        match self {
            Slot::Other(ev) => Some(ev),
            _ => None,
        }
    }
}

impl From<MatchEvent> for Slot {
    fn from(ev: MatchEvent) -> Self {
        Slot::Match(ev)
    }
}

impl From<OtherEvent> for Slot {
    fn from(ev: OtherEvent) -> Self {
        Slot::Other(ev)
    }
}
