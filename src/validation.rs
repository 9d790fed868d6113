//! Input validation and result verification for line balancing.
//!
//! Checks structural integrity of process steps before balancing and
//! re-checks the invariants of a finished balance. Detects:
//! - Duplicate step IDs
//! - Non-positive precedence levels
//! - Negative or non-finite durations
//! - Stations out of level order
//! - Bottleneck sharing, ceiling overruns, lost or duplicated work
//!
//! The level-ordering check is generic over [`TierSpan`] so the search can
//! use it on partial stations as well as on finished [`WorkStation`]s.
//!
//! [`WorkStation`]: crate::models::WorkStation

use std::collections::{HashMap, HashSet};

use crate::balancer::{find_bottleneck, CEILING_EPSILON};
use crate::models::{LineBalance, ProcessStep};

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
    /// Two steps share the same ID.
    DuplicateId,
    /// A step has level 0.
    InvalidLevel,
    /// A step duration is negative, NaN, or infinite.
    InvalidDuration,
    /// A station holds no steps.
    EmptyStation,
    /// A station precedes another station holding a lower tier.
    LevelOrderViolation,
    /// The bottleneck step shares its station.
    BottleneckShared,
    /// A non-bottleneck station exceeds the cycle ceiling.
    CeilingExceeded,
    /// An input step is not assigned to any station.
    MissingStep,
    /// A step is assigned more than once, or is not part of the input.
    UnexpectedStep,
    /// Station loads do not add up to the input work content.
    WorkNotConserved,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Lowest and highest precedence tier held by a station.
pub trait TierSpan {
    /// Lowest tier. Empty stations report `u32::MAX`.
    fn min_level(&self) -> u32;

    /// Highest tier. Empty stations report `0`.
    fn max_level(&self) -> u32;
}

impl<T: TierSpan + ?Sized> TierSpan for &T {
    fn min_level(&self) -> u32 {
        (**self).min_level()
    }

    fn max_level(&self) -> u32 {
        (**self).max_level()
    }
}

/// Whether every adjacent station pair satisfies
/// `max_level(earlier) <= min_level(later)`.
///
/// Empty stations are neutral: they never cause a violation on their own.
pub fn is_level_ordered<S: TierSpan>(stations: &[S]) -> bool {
    stations
        .windows(2)
        .all(|pair| pair[0].max_level() <= pair[1].min_level())
}

/// Validates a step list before balancing.
///
/// Checks:
/// 1. No duplicate step IDs
/// 2. Every level is at least 1
/// 3. Every duration is finite and non-negative
///
/// An empty list passes; emptiness is reported by the balancer itself.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_steps(steps: &[ProcessStep]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for step in steps {
        if !ids.insert(step.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate step ID: {}", step.id),
            ));
        }

        if step.level == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLevel,
                format!("Step '{}' has level 0; levels start at 1", step.id),
            ));
        }

        if !step.duration_secs.is_finite() || step.duration_secs < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Step '{}' has invalid duration {}",
                    step.id, step.duration_secs
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Verifies a finished balance against the steps it was built from.
///
/// Checks, without re-running search:
/// 1. No station is empty
/// 2. Every input step appears exactly once, and nothing else appears
/// 3. The bottleneck step is alone at its station
/// 4. Every other station stays within the bottleneck duration
/// 5. Stations are in level order
/// 6. Station loads add up to the input work content
pub fn verify_balance(steps: &[ProcessStep], balance: &LineBalance) -> ValidationResult {
    let mut errors = Vec::new();

    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for step in steps {
        *remaining.entry(step.id.as_str()).or_default() += 1;
    }

    for ws in &balance.stations {
        if ws.steps.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyStation,
                format!("Station {} has no steps", ws.number),
            ));
        }
        for step in &ws.steps {
            match remaining.get_mut(step.id.as_str()) {
                Some(count) if *count > 0 => *count -= 1,
                _ => errors.push(ValidationError::new(
                    ValidationErrorKind::UnexpectedStep,
                    format!(
                        "Station {} holds unexpected or repeated step '{}'",
                        ws.number, step.id
                    ),
                )),
            }
        }
    }

    let mut missing: Vec<&str> = remaining
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(id, _)| *id)
        .collect();
    missing.sort_unstable();
    for id in missing {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingStep,
            format!("Step '{id}' is not assigned to any station"),
        ));
    }

    if let Some(bottleneck) = find_bottleneck(steps) {
        let ceiling = bottleneck.duration_secs;
        for ws in &balance.stations {
            if ws.contains(&bottleneck.id) {
                if ws.steps.len() > 1 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::BottleneckShared,
                        format!(
                            "Bottleneck '{}' shares station {} with {} other step(s)",
                            bottleneck.id,
                            ws.number,
                            ws.steps.len() - 1
                        ),
                    ));
                }
            } else if ws.total_secs > ceiling + CEILING_EPSILON {
                errors.push(ValidationError::new(
                    ValidationErrorKind::CeilingExceeded,
                    format!(
                        "Station {} load {} exceeds cycle ceiling {}",
                        ws.number, ws.total_secs, ceiling
                    ),
                ));
            }
        }
    }

    if !is_level_ordered(&balance.stations) {
        errors.push(ValidationError::new(
            ValidationErrorKind::LevelOrderViolation,
            "Stations are not in precedence-level order",
        ));
    }

    let input_work: f64 = steps.iter().map(|s| s.duration_secs).sum();
    let assigned_work: f64 = balance.stations.iter().map(|s| s.total_secs).sum();
    if (input_work - assigned_work).abs() > 1e-6 * input_work.abs().max(1.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::WorkNotConserved,
            format!("Stations carry {assigned_work}s of {input_work}s input work"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
