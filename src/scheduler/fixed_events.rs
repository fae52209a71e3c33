//! Anchoring of configured fixed events into day blocks.
//!
//! Pass order matters: after-events first, then before-events, then
//! during-events, because the during pass counts placeholders and
//! anchored runs left by the earlier passes. "After group g" is represented as "start
//! of block g+1", which for the last group lands in the trailing
//! after-block of the day. Group 0 is the day-start anchor: its
//! after-events open block 0.

use std::collections::BTreeMap;

use crate::models::{EventDay, EventPhase, OtherEvent, Slot};

/// Places all configured fixed events into the day containers.
///
/// `day_index` 0 broadcasts an event to the corresponding block of every
/// day (each day gets its own clone); a non-zero index targets that
/// single 1-based day.
pub fn place_other_events(days: &mut [EventDay], events: &BTreeMap<u32, Vec<OtherEvent>>) {
    // After-events land at the start of the next group's block, so the
    // block index is the group id itself.
    for (&group, group_events) in events {
        for event in group_events {
            if event.phase == Some(EventPhase::After) {
                for day in targeted_days(days, event.day_index) {
                    day.blocks[group as usize].append(event.clone());
                }
            }
        }
    }

    for (&group, group_events) in events {
        for event in group_events {
            if event.phase == Some(EventPhase::Before) {
                for day in targeted_days(days, event.day_index) {
                    day.blocks[group as usize - 1].append(event.clone());
                }
            }
        }
    }

    for (&group, group_events) in events {
        for event in group_events {
            if let Some(EventPhase::During(index)) = event.phase {
                for day in targeted_days(days, event.day_index) {
                    day.blocks[group as usize - 1]
                        .insert_after_n_empties(index, Slot::Other(event.clone()));
                }
            }
        }
    }
}

fn targeted_days<'a>(
    days: &'a mut [EventDay],
    day_index: u32,
) -> impl Iterator<Item = &'a mut EventDay> + 'a {
    let range = if day_index == 0 {
        0..days.len()
    } else {
        let idx = day_index as usize - 1;
        idx..idx + 1
    };
    days[range].iter_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventDay, OtherEvent};

    fn days(day_count: usize, block_count: usize) -> Vec<EventDay> {
        (0..day_count)
            .map(|_| EventDay::with_blocks(block_count))
            .collect()
    }

    fn event(dur: u32, phase: EventPhase, day: u32) -> OtherEvent {
        OtherEvent::new(dur, "ceremony")
            .unwrap()
            .with_phase(phase)
            .on_day(day)
    }

    fn single(group: u32, e: OtherEvent) -> BTreeMap<u32, Vec<OtherEvent>> {
        BTreeMap::from([(group, vec![e])])
    }

    #[test]
    fn test_after_events_per_day_targeting() {
        let mut tournament = days(3, 4);
        let events = BTreeMap::from([(
            1,
            vec![
                event(15, EventPhase::After, 0),
                event(10, EventPhase::After, 2),
            ],
        )]);
        place_other_events(&mut tournament, &events);

        // Broadcast event everywhere, the day-2 event only there.
        for (idx, day) in tournament.iter().enumerate() {
            let expected = if idx == 1 { 2 } else { 1 };
            assert_eq!(day.blocks[1].event_count(), expected, "day {idx}");
            for (b, block) in day.blocks.iter().enumerate() {
                if b != 1 {
                    assert_eq!(block.event_count(), 0);
                }
            }
        }
    }

    #[test]
    fn test_before_events_land_in_own_block() {
        let mut tournament = days(3, 4);
        let events = BTreeMap::from([(
            1,
            vec![
                event(15, EventPhase::Before, 0),
                event(10, EventPhase::Before, 2),
            ],
        )]);
        place_other_events(&mut tournament, &events);

        for (idx, day) in tournament.iter().enumerate() {
            let expected = if idx == 1 { 2 } else { 1 };
            assert_eq!(day.blocks[0].event_count(), expected, "day {idx}");
        }
    }

    #[test]
    fn test_during_events_reserve_placeholders() {
        let mut tournament = days(3, 4);
        let events = BTreeMap::from([(
            3,
            vec![
                event(15, EventPhase::During(4), 0),
                event(10, EventPhase::During(4), 2),
            ],
        )]);
        place_other_events(&mut tournament, &events);

        for (idx, day) in tournament.iter().enumerate() {
            let expected = if idx == 1 { 2 } else { 1 };
            let block = &day.blocks[2];
            assert_eq!(block.event_count(), expected, "day {idx}");
            // Four placeholders precede the anchored events.
            assert!(block.slots[..4].iter().all(Slot::is_empty));
            assert!(!block.slots[4].is_empty());
        }
    }

    #[test]
    fn test_during_glues_to_anchored_run() {
        let mut tournament = days(1, 2);
        let events = BTreeMap::from([(
            1,
            vec![
                event(15, EventPhase::During(2), 0),
                event(10, EventPhase::During(2), 0),
            ],
        )]);
        place_other_events(&mut tournament, &events);

        let block = &tournament[0].blocks[0];
        assert_eq!(block.slots.len(), 4);
        assert_eq!(block.slots[2].duration_min(), 15);
        assert_eq!(block.slots[3].duration_min(), 10);
    }

    #[test]
    fn test_day_start_after_event() {
        let mut tournament = days(2, 3);
        place_other_events(&mut tournament, &single(0, event(20, EventPhase::After, 0)));
        for day in &tournament {
            assert_eq!(day.blocks[0].event_count(), 1);
        }
    }

    #[test]
    fn test_after_last_group_uses_trailing_block() {
        let mut tournament = days(1, 3);
        place_other_events(&mut tournament, &single(2, event(20, EventPhase::After, 0)));
        assert_eq!(tournament[0].blocks[2].event_count(), 1);
    }
}
