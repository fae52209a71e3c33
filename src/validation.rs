//! Pre-flight validation of tournament plans.
//!
//! Checks structural integrity of the plan before scheduling. Detects:
//! - Group references with no matching configuration
//! - Non-contiguous group ids
//! - Degenerate group parameters (zero fields, zero match duration)
//! - Fixed events targeting days beyond the tournament
//! - Fixed events without an anchor phase, or day-start events with one
//!   that does not apply
//! - Duplicate team names within a category
//!
//! Upstream configuration surfaces are expected to have reconciled these
//! already; the core rejects rather than self-heals.

use std::collections::HashSet;

use crate::models::EventPhase;
use crate::scheduler::TournamentPlan;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A category or fixed event references a group with no configuration.
    UnknownGroup,
    /// Configured group ids do not form a contiguous 1-based range.
    NonContiguousGroups,
    /// A group is configured with zero fields.
    ZeroFieldCount,
    /// A group is configured with a zero match duration.
    ZeroMatchDuration,
    /// A fixed event targets a day beyond the tournament.
    DayIndexOutOfRange,
    /// A configured fixed event has no anchor phase.
    MissingPhase,
    /// A day-start (group 0) event uses a phase other than `after`.
    MisanchoredDayStart,
    /// Two teams in one category share a name.
    DuplicateTeam,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a tournament plan.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_plan(plan: &TournamentPlan) -> ValidationResult {
    let mut errors = Vec::new();

    // Group ids must be contiguous 1..=n so the block layout is dense.
    let group_count = plan.groups.len() as u32;
    let contiguous = plan
        .groups
        .keys()
        .zip(1..=group_count)
        .all(|(&id, expected)| id == expected);
    if !contiguous {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonContiguousGroups,
            format!(
                "group ids must form the range 1..={group_count}, got {:?}",
                plan.groups.keys().collect::<Vec<_>>()
            ),
        ));
    }

    for (&id, cfg) in &plan.groups {
        if cfg.field_count == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroFieldCount,
                format!("group {id} has zero fields"),
            ));
        }
        if cfg.match_duration_min == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroMatchDuration,
                format!("group {id} has zero match duration"),
            ));
        }
    }

    for cat in &plan.categories {
        if !plan.groups.contains_key(&cat.group) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownGroup,
                format!(
                    "category '{}' references unconfigured group {}",
                    cat.name, cat.group
                ),
            ));
        }

        let mut seen = HashSet::new();
        for team in &cat.teams {
            if !seen.insert(team.name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateTeam,
                    format!("category '{}' lists team '{}' twice", cat.name, team.name),
                ));
            }
        }
    }

    for (&group, events) in &plan.other_events {
        // Group 0 is the day-start anchor, legal for after-events only;
        // every other id must be configured.
        if group != 0 && !plan.groups.contains_key(&group) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownGroup,
                format!("fixed events reference unconfigured group {group}"),
            ));
        }

        for event in events {
            match event.phase {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingPhase,
                    format!("fixed event '{}' has no anchor phase", event.label),
                )),
                Some(EventPhase::Before) | Some(EventPhase::During(_)) if group == 0 => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MisanchoredDayStart,
                        format!("day-start event '{}' must use the after phase", event.label),
                    ));
                }
                Some(_) => {}
            }

            if event.day_index as usize > plan.day_count {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DayIndexOutOfRange,
                    format!(
                        "fixed event '{}' targets day {} of {}",
                        event.label, event.day_index, plan.day_count
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
