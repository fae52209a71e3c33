//! Sparse, position-addressable event container.
//!
//! An [`EventBlock`] is one group's segment of one day. Placeholder slots
//! reserve positions for match events placed later; fixed events inserted
//! relative to placeholders keep their anchoring even as the block grows.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use super::Slot;

/// Ordered sequence of slots for one group segment of one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBlock {
    /// The slots, in schedule order.
    pub slots: Vec<Slot>,
}

impl EventBlock {
    /// Creates an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slot at the end.
    pub fn append(&mut self, slot: impl Into<Slot>) {
        self.slots.push(slot.into());
    }

    /// Returns the slot at `index`.
    pub fn get(&self, index: usize) -> Result<&Slot, ScheduleError> {
        self.slots.get(index).ok_or(ScheduleError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    /// Replaces the slot at `index`.
    pub fn set(&mut self, index: usize, slot: impl Into<Slot>) -> Result<(), ScheduleError> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            Some(s) => {
                *s = slot.into();
                Ok(())
            }
            None => Err(ScheduleError::SlotOutOfRange { index, len }),
        }
    }

    /// Removes the slot at `index`, shifting later slots down.
    pub fn remove(&mut self, index: usize) -> Result<Slot, ScheduleError> {
        if index >= self.slots.len() {
            return Err(ScheduleError::SlotOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots.remove(index))
    }

    /// Writes a slot at `position`, extending the block with placeholders
    /// as needed. Existing content at the position is overwritten.
    pub fn put_at_position(&mut self, position: usize, slot: impl Into<Slot>) {
        while self.slots.len() <= position {
            self.slots.push(Slot::Empty);
        }
        self.slots[position] = slot.into();
    }

    /// Inserts a slot at `position` without overwriting, extending the
    /// block with placeholders if it is shorter than `position`.
    pub fn insert_at_position(&mut self, position: usize, slot: impl Into<Slot>) {
        while self.slots.len() < position {
            self.slots.push(Slot::Empty);
        }
        self.slots.insert(position, slot.into());
    }

    /// Inserts a slot immediately after the `n`-th placeholder, skipping
    /// any contiguous run of non-empty slots glued to that point.
    ///
    /// Skipping the run means an insertion never splits events already
    /// anchored to the same placeholder. If fewer than `n` placeholders
    /// exist, the block is extended with placeholders first. `n = 0`
    /// anchors at the block start.
    pub fn insert_after_n_empties(&mut self, n: usize, slot: impl Into<Slot>) {
        let existing = self.slots.iter().filter(|s| s.is_empty()).count();
        if existing < n {
            self.slots
                .extend(std::iter::repeat_with(|| Slot::Empty).take(n - existing));
        }

        // Position immediately following the nth placeholder.
        let mut idx = 0;
        if n > 0 {
            let mut seen = 0;
            while idx < self.slots.len() {
                let empty = self.slots[idx].is_empty();
                idx += 1;
                if empty {
                    seen += 1;
                    if seen == n {
                        break;
                    }
                }
            }
        }

        // Skip the contiguous non-empty run glued to the anchor.
        while idx < self.slots.len() && !self.slots[idx].is_empty() {
            idx += 1;
        }

        self.slots.insert(idx, slot.into());
    }

    /// Fills the first placeholder with the slot, or appends at the end
    /// if no placeholder exists.
    pub fn append_to_next_available_slot(&mut self, slot: impl Into<Slot>) {
        match self.slots.iter().position(|s| s.is_empty()) {
            Some(idx) => self.slots[idx] = slot.into(),
            None => self.slots.push(slot.into()),
        }
    }

    /// Iterates over the non-empty slots in order.
    pub fn valid_events(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| !s.is_empty())
    }

    /// Total duration of all non-empty slots (minutes).
    pub fn total_duration_min(&self) -> u32 {
        self.slots.iter().map(Slot::duration_min).sum()
    }

    /// Number of non-empty slots.
    pub fn event_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Number of matches contained across all match events.
    pub fn match_count(&self) -> usize {
        self.slots
            .iter()
            .filter_map(Slot::as_match)
            .map(|ev| ev.matches.len())
            .sum()
    }

    /// Drops all placeholders, leaving the dense event sequence.
    pub fn compact(&mut self) {
        self.slots.retain(|s| !s.is_empty());
    }
}
