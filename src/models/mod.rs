//! Tournament scheduling domain models.
//!
//! Provides the core data types exchanged with the surrounding system:
//! the input side (teams, categories, group configuration, fixed events,
//! options) and the output side (the sparse slot/block/day containers).
//!
//! All types serialize with serde; the excluded persistence layer
//! round-trips exactly these shapes.

mod block;
mod category;
mod config;
mod day;
mod event;
mod team;

pub use block::EventBlock;
pub use category::Category;
pub use config::{DoubleMissionPolicy, GroupConfig, ShuffleSeed, TournamentOptions};
pub use day::EventDay;
pub use event::{EventPhase, MatchEvent, OtherEvent, Slot};
pub use team::{Match, Team};
