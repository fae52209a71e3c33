//! Per-day schedule container.
//!
//! An [`EventDay`] holds one block per group plus a trailing block that
//! absorbs end-of-day "after" events. Aggregate queries span all blocks;
//! the flattened view indexes non-empty slots across block boundaries.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use super::{EventBlock, Slot, Team};

/// One tournament day: an ordered list of group blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDay {
    /// Group blocks in group order, plus the trailing after-block.
    pub blocks: Vec<EventBlock>,
}

impl EventDay {
    /// Creates a day with `block_count` empty blocks.
    pub fn with_blocks(block_count: usize) -> Self {
        Self {
            blocks: (0..block_count).map(|_| EventBlock::new()).collect(),
        }
    }

    /// Returns the block at `index`.
    pub fn block(&self, index: usize) -> Result<&EventBlock, ScheduleError> {
        self.blocks.get(index).ok_or(ScheduleError::SlotOutOfRange {
            index,
            len: self.blocks.len(),
        })
    }

    /// Total duration of all non-empty slots across all blocks (minutes).
    pub fn total_duration_min(&self) -> u32 {
        self.blocks.iter().map(EventBlock::total_duration_min).sum()
    }

    /// Number of non-empty slots across all blocks.
    pub fn event_count(&self) -> usize {
        self.blocks.iter().map(EventBlock::event_count).sum()
    }

    /// Number of matches across all blocks.
    pub fn match_count(&self) -> usize {
        self.blocks.iter().map(EventBlock::match_count).sum()
    }

    /// Largest simultaneous match count of any match event this day.
    pub fn max_fields(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| b.slots.iter())
            .filter_map(Slot::as_match)
            .map(|ev| ev.matches.len())
            .max()
            .unwrap_or(0)
    }

    /// Iterates over all non-empty slots across blocks, in day order.
    pub fn valid_events(&self) -> impl Iterator<Item = &Slot> {
        self.blocks.iter().flat_map(EventBlock::valid_events)
    }

    /// Returns the `index`-th non-empty slot across blocks.
    pub fn valid_event(&self, index: usize) -> Result<&Slot, ScheduleError> {
        self.valid_events()
            .nth(index)
            .ok_or(ScheduleError::EventNotFound { index })
    }

    /// Replaces the `index`-th non-empty slot across blocks.
    pub fn set_valid_event(
        &mut self,
        index: usize,
        slot: impl Into<Slot>,
    ) -> Result<(), ScheduleError> {
        let slot = slot.into();
        let mut remaining = index;
        for block in &mut self.blocks {
            for s in &mut block.slots {
                if !s.is_empty() {
                    if remaining == 0 {
                        *s = slot.into();
                        return Ok(());
                    }
                    remaining -= 1;
                }
            }
        }
        Err(ScheduleError::EventNotFound { index })
    }

    /// How many times the team appears as home across all matches.
    pub fn count_team_home(&self, team: &Team) -> usize {
        self.all_matches().filter(|m| &m.home == team).count()
    }

    /// How many times the team appears as away across all matches.
    pub fn count_team_away(&self, team: &Team) -> usize {
        self.all_matches().filter(|m| &m.away == team).count()
    }

    /// Total appearances of the team (home or away).
    pub fn count_team_total(&self, team: &Team) -> usize {
        self.count_team_home(team) + self.count_team_away(team)
    }

    /// Drops all placeholders from every block.
    pub fn compact(&mut self) {
        for block in &mut self.blocks {
            block.compact();
        }
    }

    fn all_matches(&self) -> impl Iterator<Item = &super::Match> {
        self.blocks
            .iter()
            .flat_map(|b| b.slots.iter())
            .filter_map(Slot::as_match)
            .flat_map(|ev| ev.matches.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, MatchEvent, OtherEvent};

    fn m(home: &str, away: &str) -> Match {
        Match::new(Team::new(home), Team::new(away))
    }

    fn sample_day() -> EventDay {
        let mut day = EventDay::with_blocks(2);
        day.blocks[0].append(MatchEvent::with_matches(15, vec![m("A", "B"), m("C", "D")]).unwrap());
        day.blocks[0].insert_at_position(2, OtherEvent::new(10, "break").unwrap());
        day.blocks[1].append(MatchEvent::with_matches(15, vec![m("A", "C")]).unwrap());
        day
    }

    #[test]
    fn test_aggregates_span_blocks() {
        let day = sample_day();
        assert_eq!(day.total_duration_min(), 40);
        assert_eq!(day.event_count(), 3);
        assert_eq!(day.match_count(), 3);
        assert_eq!(day.max_fields(), 2);
    }

    #[test]
    fn test_flattened_view_skips_placeholders() {
        let day = sample_day();
        // Block 0 holds [match, Empty, other]; the flattened view sees
        // [match, other, match].
        assert!(day.valid_event(0).unwrap().as_match().is_some());
        assert_eq!(day.valid_event(1).unwrap().as_other().unwrap().label, "break");
        assert!(day.valid_event(2).unwrap().as_match().is_some());
        assert!(matches!(
            day.valid_event(3),
            Err(ScheduleError::EventNotFound { index: 3 })
        ));
    }

    #[test]
    fn test_set_valid_event() {
        let mut day = sample_day();
        day.set_valid_event(1, OtherEvent::new(20, "longer").unwrap())
            .unwrap();
        assert_eq!(day.valid_event(1).unwrap().duration_min(), 20);
        assert!(day
            .set_valid_event(9, OtherEvent::new(5, "x").unwrap())
            .is_err());
    }

    #[test]
    fn test_team_counts() {
        let day = sample_day();
        let a = Team::new("A");
        assert_eq!(day.count_team_home(&a), 2);
        assert_eq!(day.count_team_away(&a), 0);
        assert_eq!(day.count_team_total(&a), 2);

        let c = Team::new("C");
        assert_eq!(day.count_team_home(&c), 1);
        assert_eq!(day.count_team_away(&c), 1);
        assert_eq!(day.count_team_total(&c), 2);
    }

    #[test]
    fn test_compact_drops_placeholders() {
        let mut day = sample_day();
        day.compact();
        assert_eq!(day.blocks[0].slots.len(), 2);
        assert!(day.blocks[0].slots.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_block_access_bounds() {
        let day = sample_day();
        assert!(day.block(1).is_ok());
        assert!(day.block(2).is_err());
    }
}
