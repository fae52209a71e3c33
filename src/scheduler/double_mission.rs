//! Double-mission conflict resolution.
//!
//! A double mission is a team booked in two temporally adjacent events
//! without sufficient rest. Resolution runs per day and group after
//! distribution, according to the group's policy:
//!
//! - `EmptyField` rebuilds the block so no two adjacent match events
//!   share a team, inserting empty buffer events where a whole free
//!   slot is the only separation available.
//! - `Pause` keeps the match layout and inserts explicit pause events,
//!   shortened by any fixed-event time already separating the conflict.
//! - `Ignore` leaves the block untouched.

use std::collections::HashSet;

use log::debug;

use crate::error::ScheduleError;
use crate::models::{
    DoubleMissionPolicy, EventBlock, GroupConfig, Match, MatchEvent, OtherEvent, Slot,
};

/// Resolves double missions in one group block per its policy.
pub fn resolve_block(block: &mut EventBlock, cfg: &GroupConfig) -> Result<(), ScheduleError> {
    match cfg.double_mission {
        DoubleMissionPolicy::Ignore => Ok(()),
        DoubleMissionPolicy::EmptyField => resolve_empty_field(block, cfg),
        DoubleMissionPolicy::Pause => {
            split_parallel_conflicts(block, cfg)?;
            insert_sequential_pauses(block, cfg)
        }
    }
}

fn team_names(matches: &[Match]) -> HashSet<String> {
    let mut names = HashSet::new();
    for m in matches {
        names.insert(m.home.name.clone());
        names.insert(m.away.name.clone());
    }
    names
}

/// Rebuilds the block, re-accumulating matches into events so that no
/// two adjacent match events share a team.
///
/// Fixed events are emitted where encountered. While matches are still
/// accumulating, the position just before the fixed-event run is
/// remembered as the accumulation's rest anchor: if a conflict later
/// forces a flush, the event is inserted there, so the fixed event keeps
/// its place in the block and its duration really does separate the two
/// events. Once the accumulated fixed duration since the last flush
/// reaches the match duration, the memory of previously seated teams is
/// cleared, and a rested accumulation needs no buffer when flushed.
/// Where no such separation exists, an empty buffer match event (full
/// duration, zero matches) is inserted. Growing the accumulation past a
/// fixed event drops the anchor; the merged event then belongs after it.
fn resolve_empty_field(block: &mut EventBlock, cfg: &GroupConfig) -> Result<(), ScheduleError> {
    let duration = cfg.match_duration_min;
    let old = std::mem::take(&mut block.slots);
    let old_len = old.len();
    let mut out: Vec<Slot> = Vec::with_capacity(old_len);

    let mut current: Vec<Match> = Vec::new();
    let mut prev_teams: HashSet<String> = HashSet::new();
    let mut fixed_since_flush = 0u32;
    // Output position before the fixed-event run behind `current`.
    let mut rest_anchor: Option<usize> = None;

    // Flushes the accumulating event, at the rest anchor if one is set,
    // and remembers its teams.
    fn flush(
        out: &mut Vec<Slot>,
        current: &mut Vec<Match>,
        prev_teams: &mut HashSet<String>,
        fixed_since_flush: &mut u32,
        rest_anchor: &mut Option<usize>,
        duration: u32,
    ) -> Result<(), ScheduleError> {
        if current.is_empty() {
            return Ok(());
        }
        *prev_teams = team_names(current);
        *fixed_since_flush = 0;
        let matches = std::mem::take(current);
        let event = Slot::Match(MatchEvent::with_matches(duration, matches)?);
        match rest_anchor.take() {
            Some(pos) => out.insert(pos, event),
            None => out.push(event),
        }
        Ok(())
    }

    for slot in old {
        match slot {
            Slot::Empty => {}
            Slot::Other(ev) => {
                if !current.is_empty() && rest_anchor.is_none() {
                    rest_anchor = Some(out.len());
                }
                fixed_since_flush += ev.duration_min;
                if fixed_since_flush >= duration {
                    prev_teams.clear();
                }
                out.push(Slot::Other(ev));
            }
            Slot::Match(ev) => {
                for m in ev.matches {
                    let in_current = current.iter().any(|c| c.involves(&m.home) || c.involves(&m.away));
                    let in_prev =
                        prev_teams.contains(&m.home.name) || prev_teams.contains(&m.away.name);

                    if in_current {
                        let rested = rest_anchor.is_some() && fixed_since_flush >= duration;
                        flush(&mut out, &mut current, &mut prev_teams, &mut fixed_since_flush, &mut rest_anchor, duration)?;
                        if rested {
                            // The fixed-event run now sits between the
                            // flushed event and the rest of the block.
                            prev_teams.clear();
                        } else {
                            out.push(Slot::Match(MatchEvent::new(duration)?));
                            prev_teams.clear();
                            fixed_since_flush = 0;
                        }
                        current.push(m);
                    } else if in_prev {
                        if current.is_empty() {
                            // Nothing to separate with: buffer explicitly.
                            out.push(Slot::Match(MatchEvent::new(duration)?));
                            prev_teams.clear();
                            fixed_since_flush = 0;
                        } else {
                            flush(&mut out, &mut current, &mut prev_teams, &mut fixed_since_flush, &mut rest_anchor, duration)?;
                        }
                        current.push(m);
                    } else {
                        current.push(m);
                        rest_anchor = None;
                        if current.len() == cfg.field_count {
                            flush(&mut out, &mut current, &mut prev_teams, &mut fixed_since_flush, &mut rest_anchor, duration)?;
                        }
                    }
                }
            }
        }
    }
    flush(&mut out, &mut current, &mut prev_teams, &mut fixed_since_flush, &mut rest_anchor, duration)?;

    debug!("empty-field resolution: {old_len} slots -> {} slots", out.len());
    block.slots = out;
    Ok(())
}

/// Splits matches that reuse a team already seated in the same
/// simultaneous event into follow-up events, each preceded by a pause.
fn split_parallel_conflicts(block: &mut EventBlock, cfg: &GroupConfig) -> Result<(), ScheduleError> {
    // Back-to-front so insertions do not shift unprocessed indices.
    for idx in (0..block.slots.len()).rev() {
        let Some(ev) = block.slots[idx].as_match() else {
            continue;
        };
        let Some(parts) = split_overbooked(&ev.matches) else {
            continue;
        };
        debug!("splitting overbooked event at slot {idx} into {} parts", parts.len());

        let duration = ev.duration_min;
        let mut parts = parts.into_iter();
        let first = parts.next().unwrap_or_default();
        block.slots[idx] = Slot::Match(MatchEvent::with_matches(duration, first)?);

        let mut inserts: Vec<Slot> = Vec::new();
        for part in parts {
            // No fixed-event buffer separates parallel parts, so the full
            // pause applies whenever one is configured.
            if cfg.pause_duration_min > 0 {
                inserts.push(Slot::Other(OtherEvent::pause(cfg.pause_duration_min)?));
            }
            inserts.push(Slot::Match(MatchEvent::with_matches(duration, part)?));
        }
        block.slots.splice(idx + 1..idx + 1, inserts);
    }
    Ok(())
}

/// Peels maximal team-disjoint prefixes off an overbooked match list.
/// Returns `None` when every team is seated only once.
fn split_overbooked(matches: &[Match]) -> Option<Vec<Vec<Match>>> {
    if team_names(matches).len() == matches.len() * 2 {
        return None;
    }
    let mut remaining: Vec<Match> = matches.to_vec();
    let mut parts = Vec::new();
    while !remaining.is_empty() {
        let mut seated: HashSet<String> = HashSet::new();
        let mut part = Vec::new();
        let mut rest = Vec::new();
        for m in remaining {
            if seated.contains(&m.home.name) || seated.contains(&m.away.name) {
                rest.push(m);
            } else {
                seated.insert(m.home.name.clone());
                seated.insert(m.away.name.clone());
                part.push(m);
            }
        }
        parts.push(part);
        remaining = rest;
    }
    Some(parts)
}

/// Inserts pause events between consecutive match events that share a
/// team, shortened by the fixed-event time already between them.
/// Insertions are applied back-to-front so earlier ones do not
/// invalidate later indices.
fn insert_sequential_pauses(block: &mut EventBlock, cfg: &GroupConfig) -> Result<(), ScheduleError> {
    let mut inserts: Vec<(usize, u32)> = Vec::new();
    let mut prev_teams: Option<HashSet<String>> = None;
    let mut fixed_between = 0u32;

    for (idx, slot) in block.slots.iter().enumerate() {
        match slot {
            Slot::Empty => {}
            Slot::Other(ev) => fixed_between += ev.duration_min,
            Slot::Match(ev) => {
                let teams = team_names(&ev.matches);
                if let Some(prev) = &prev_teams {
                    if !teams.is_disjoint(prev) {
                        let remaining = cfg.pause_duration_min.saturating_sub(fixed_between);
                        if remaining > 0 {
                            inserts.push((idx, remaining));
                        }
                    }
                }
                prev_teams = Some(teams);
                fixed_between = 0;
            }
        }
    }

    for (idx, duration) in inserts.into_iter().rev() {
        block
            .slots
            .insert(idx, Slot::Other(OtherEvent::pause(duration)?));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;

    fn m(home: &str, away: &str) -> Match {
        Match::new(Team::new(home), Team::new(away))
    }

    fn match_event(dur: u32, matches: Vec<Match>) -> Slot {
        Slot::Match(MatchEvent::with_matches(dur, matches).unwrap())
    }

    fn other(dur: u32, label: &str) -> Slot {
        Slot::Other(OtherEvent::new(dur, label).unwrap())
    }

    fn empty_field_cfg() -> GroupConfig {
        GroupConfig::new(15, 2).with_double_mission(DoubleMissionPolicy::EmptyField)
    }

    fn pause_cfg() -> GroupConfig {
        GroupConfig::new(15, 2)
            .with_double_mission(DoubleMissionPolicy::Pause)
            .with_pause_duration(5)
    }

    /// No two temporally adjacent match events share a team, treating
    /// inserted zero-match buffers as separation.
    fn assert_no_adjacent_repeats(block: &EventBlock) {
        let mut prev: Option<HashSet<String>> = None;
        for slot in &block.slots {
            if let Some(ev) = slot.as_match() {
                let teams = team_names(&ev.matches);
                if let Some(p) = &prev {
                    assert!(
                        p.is_disjoint(&teams),
                        "adjacent events share teams: {:?}",
                        p.intersection(&teams).collect::<Vec<_>>()
                    );
                }
                prev = Some(teams);
            }
        }
    }

    #[test]
    fn test_ignore_leaves_block_unchanged() {
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("A", "B"), m("C", "D")]));
        block.append(match_event(15, vec![m("A", "C")]));
        let before = block.clone();
        resolve_block(&mut block, &GroupConfig::new(15, 2)).unwrap();
        assert_eq!(block, before);
    }

    #[test]
    fn test_empty_field_rebuild() {
        // Four consecutive rounds of a 6-team robin, chunked pairwise:
        // resolution has to break up every sequential repeat.
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("t0", "t5"), m("t1", "t4")]));
        block.append(match_event(15, vec![m("t2", "t3"), m("t0", "t4")]));
        block.append(match_event(15, vec![m("t5", "t3"), m("t1", "t2")]));
        block.append(match_event(15, vec![m("t0", "t3"), m("t4", "t2")]));
        block.append(match_event(15, vec![m("t5", "t1"), m("t0", "t2")]));
        block.append(match_event(15, vec![m("t3", "t1"), m("t4", "t5")]));

        resolve_block(&mut block, &empty_field_cfg()).unwrap();

        assert_eq!(block.slots.len(), 9);
        assert_eq!(block.total_duration_min(), 135);
        assert_eq!(block.match_count(), 12);
        // The rebuild reaches an unseparable repeat at the fifth event.
        assert_eq!(block.slots[4].as_match().unwrap().matches.len(), 0);
        assert_no_adjacent_repeats(&block);
    }

    #[test]
    fn test_empty_field_fixed_event_clears_memory() {
        // A fixed event as long as a match is sufficient rest: the
        // repeat right after it needs no buffer, and the block keeps
        // its order.
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("A", "B")]));
        block.append(other(15, "break"));
        block.append(match_event(15, vec![m("A", "C")]));

        resolve_block(&mut block, &empty_field_cfg()).unwrap();
        assert_eq!(block.slots.len(), 3);
        assert_eq!(block.match_count(), 2);
        assert_eq!(block.slots[0].as_match().unwrap().matches.len(), 1);
        assert!(block.slots[1].as_other().is_some());
        assert_eq!(block.slots[2].as_match().unwrap().matches.len(), 1);
    }

    #[test]
    fn test_empty_field_short_break_still_buffers() {
        // A break shorter than a match is not enough rest: the repeat
        // still gets a buffer, inserted after the break.
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("A", "B")]));
        block.append(other(10, "break"));
        block.append(match_event(15, vec![m("A", "C")]));

        resolve_block(&mut block, &empty_field_cfg()).unwrap();
        assert_eq!(block.slots.len(), 4);
        assert_eq!(block.slots[0].as_match().unwrap().matches.len(), 1);
        assert!(block.slots[1].as_other().is_some());
        assert_eq!(block.slots[2].as_match().unwrap().matches.len(), 0);
        assert_eq!(block.slots[3].as_match().unwrap().matches.len(), 1);
    }

    #[test]
    fn test_empty_field_with_anchored_event() {
        // The day-0 layout of the 6-team tournament: a during-event
        // anchored after two match events. Expected rebuild traced from
        // the pairing order.
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("t0", "t4"), m("t5", "t3")]));
        block.append(match_event(15, vec![m("t1", "t2"), m("t0", "t3")]));
        block.append(other(15, "lunch"));
        block.append(match_event(15, vec![m("t4", "t2"), m("t5", "t1")]));
        block.append(match_event(15, vec![m("t0", "t2"), m("t3", "t1")]));
        block.append(match_event(15, vec![m("t4", "t5"), m("t0", "t1")]));
        block.append(match_event(15, vec![m("t2", "t5"), m("t3", "t4")]));

        resolve_block(&mut block, &empty_field_cfg()).unwrap();

        assert_eq!(block.slots.len(), 10);
        assert_eq!(block.total_duration_min(), 150);
        let match_len =
            |i: usize| block.slots[i].as_match().map(|ev| ev.matches.len());
        assert_eq!(match_len(1), Some(1));
        assert_eq!(match_len(4), Some(1));
        assert_eq!(match_len(5), Some(1));
        assert_eq!(match_len(7), Some(0));
        assert_eq!(match_len(9), Some(1));
        assert!(block.slots[2].as_other().is_some());
    }

    #[test]
    fn test_pause_sequential_conflicts() {
        // Four rounds of a 5-team robin: every consecutive pair of
        // events shares a team, so three pauses appear.
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("t1", "t4"), m("t2", "t3")]));
        block.append(match_event(15, vec![m("t0", "t4"), m("t1", "t2")]));
        block.append(match_event(15, vec![m("t0", "t3"), m("t4", "t2")]));
        block.append(match_event(15, vec![m("t0", "t2"), m("t3", "t1")]));

        resolve_block(&mut block, &pause_cfg()).unwrap();

        assert_eq!(block.slots.len(), 7);
        assert_eq!(block.total_duration_min(), 75);
        assert_eq!(block.match_count(), 8);
    }

    #[test]
    fn test_pause_shortened_by_fixed_event() {
        // The intervening fixed event exceeds the pause: no insertion
        // between events 2 and 3, pauses elsewhere.
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("t0", "t4"), m("t1", "t2")]));
        block.append(match_event(15, vec![m("t0", "t3"), m("t4", "t2")]));
        block.append(other(15, "lunch"));
        block.append(match_event(15, vec![m("t0", "t2"), m("t3", "t1")]));
        block.append(match_event(15, vec![m("t0", "t1"), m("t3", "t4")]));

        resolve_block(&mut block, &pause_cfg()).unwrap();

        assert_eq!(block.slots.len(), 7);
        assert_eq!(block.total_duration_min(), 85);
    }

    #[test]
    fn test_pause_parallel_conflict_split() {
        let mut block = EventBlock::new();
        block.append(match_event(15, vec![m("A", "B"), m("A", "C")]));

        resolve_block(&mut block, &pause_cfg()).unwrap();

        // Split into two events with a pause between.
        assert_eq!(block.slots.len(), 3);
        assert_eq!(block.slots[0].as_match().unwrap().matches.len(), 1);
        assert_eq!(block.slots[1].as_other().unwrap().duration_min, 5);
        assert_eq!(block.slots[2].as_match().unwrap().matches.len(), 1);
    }

    #[test]
    fn test_split_overbooked_detection() {
        assert!(split_overbooked(&[m("A", "B"), m("C", "D")]).is_none());
        let parts = split_overbooked(&[m("A", "B"), m("B", "C"), m("D", "E")]).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 2); // A-B and D-E fit together
        assert_eq!(parts[1].len(), 1);
    }
}
