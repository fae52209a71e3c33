//! Tournament scheduling engine.
//!
//! Generates complete multi-day tournament schedules: round-robin
//! fixtures per category, match distribution over days and fields,
//! fixed events anchored between group segments, and resolution of
//! double missions (teams booked twice without rest).
//!
//! # Modules
//!
//! - **`models`**: Domain types. [`Team`](models::Team),
//!   [`Category`](models::Category), [`MatchEvent`](models::MatchEvent),
//!   [`EventBlock`](models::EventBlock), [`EventDay`](models::EventDay)
//! - **`scheduler`**: The generation pipeline.
//!   [`TournamentPlan`](scheduler::TournamentPlan) in,
//!   [`generate_schedule`](scheduler::generate_schedule) out
//! - **`validation`**: Pre-flight plan checks (group contiguity,
//!   degenerate parameters, anchor phases)
//! - **`error`**: The crate error type
//!
//! # Example
//!
//! ```
//! use matchplan::models::{Category, GroupConfig, Team};
//! use matchplan::scheduler::{generate_schedule, TournamentPlan};
//!
//! let teams: Vec<Team> = (0..6).map(|i| Team::new(format!("team{i}"))).collect();
//! let plan = TournamentPlan::new(2)
//!     .with_group(1, GroupConfig::new(15, 2))
//!     .with_category(Category::new("Open", 1, 1, teams));
//!
//! let days = generate_schedule(&plan)?;
//! assert_eq!(days.len(), 2);
//! # Ok::<(), matchplan::error::ScheduleError>(())
//! ```
//!
//! # References
//!
//! - Kirkman (1847), circle method for round-robin pairing
//! - de Werra (1988), "Some models of graphs for scheduling sports
//!   competitions"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
