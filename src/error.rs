//! Error types for schedule construction and generation.
//!
//! Construction-time validation (event durations) and container access
//! errors are reported individually; plan-level configuration problems
//! are collected by [`crate::validation`] and surfaced as a single
//! [`ScheduleError::InvalidPlan`] at the scheduling entry point.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced by the scheduling core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// An event was constructed with a zero duration.
    #[error("event duration must be positive")]
    InvalidDuration,

    /// A slot index was outside the bounds of an [`crate::models::EventBlock`].
    #[error("slot index {index} out of range (block holds {len} slots)")]
    SlotOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of slots in the block.
        len: usize,
    },

    /// A flattened event index did not resolve to a non-empty slot.
    ///
    /// Distinct from [`ScheduleError::SlotOutOfRange`]: the day exists and
    /// is addressable, but holds fewer valid events than requested.
    #[error("no event at flattened index {index}")]
    EventNotFound {
        /// The requested flattened index.
        index: usize,
    },

    /// The tournament plan failed pre-flight validation.
    #[error("invalid tournament plan: {} issue(s) found", .0.len())]
    InvalidPlan(Vec<ValidationError>),
}
