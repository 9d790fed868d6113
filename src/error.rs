//! Error types for line balancing.
//!
//! All failures of the balancer are surfaced as [`BalanceError`]. The
//! balancer is deterministic, so none of these are retried internally.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced by the line balancer and its helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// No process steps were supplied.
    #[error("cannot balance an empty step list")]
    EmptyInput,

    /// Neither exact search nor the greedy fallback produced a valid partition.
    ///
    /// Indicates an upstream invariant violation; the greedy path cannot fail
    /// on validated, non-empty input.
    #[error("no feasible partition: {reason}")]
    InfeasiblePartition {
        /// What the last attempted search path reported.
        reason: String,
    },

    /// The step list failed input validation.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Balance rate requested for a line with no stations or no load.
    #[error("balance rate undefined for {station_count} stations with max load {max_load}")]
    UndefinedBalanceRate {
        /// Number of stations passed in.
        station_count: usize,
        /// Maximum station load passed in (seconds).
        max_load: f64,
    },

    /// A requested precedence level is not a positive finite number.
    #[error("invalid level: {0}")]
    InvalidLevel(f64),

    /// The balancer configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for balancing operations.
pub type BalanceResult<T> = Result<T, BalanceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message_joins_errors() {
        let err = BalanceError::InvalidInput(vec![
            ValidationError {
                kind: ValidationErrorKind::DuplicateId,
                message: "Duplicate step ID: S1".into(),
            },
            ValidationError {
                kind: ValidationErrorKind::InvalidLevel,
                message: "Step 'S2' has level 0".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate step ID: S1; Step 'S2' has level 0"
        );
    }

    #[test]
    fn test_undefined_rate_message() {
        let err = BalanceError::UndefinedBalanceRate {
            station_count: 0,
            max_load: 10.0,
        };
        assert!(err.to_string().contains("0 stations"));
    }
}
