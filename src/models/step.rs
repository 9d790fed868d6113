//! Process step model.
//!
//! A process step is the smallest unit of work on an assembly line. Steps
//! carry a precedence tier (`level`): a step may never be placed at a
//! station positioned before a step of a strictly lower tier. Steps of the
//! same tier are interchangeable.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A manufacturing process step to be assigned to a workstation.
///
/// # Time Representation
/// Durations are in seconds. Fractional seconds are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    /// Unique step identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Precedence tier (1-based). Lower tiers run earlier on the line.
    ///
    /// JSON accepts any integral number (`2` or `2.0`).
    #[serde(with = "serde_level")]
    pub level: u32,
    /// Work content (seconds).
    #[serde(rename = "durationSeconds")]
    pub duration_secs: f64,
    /// Tie-break order within a tier.
    pub sequence_index: i32,
}

impl ProcessStep {
    /// Creates a step at tier 1 with zero duration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            level: 1,
            duration_secs: 0.0,
            sequence_index: 0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the precedence tier.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Sets the work duration (seconds).
    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Sets the within-tier sequence index.
    pub fn with_sequence(mut self, sequence_index: i32) -> Self {
        self.sequence_index = sequence_index;
        self
    }

    /// Canonical (level, sequence_index) ordering.
    ///
    /// Equal keys compare as equal; callers sort stably so input order
    /// decides among them.
    #[inline]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.level
            .cmp(&other.level)
            .then(self.sequence_index.cmp(&other.sequence_index))
    }
}

mod serde_level {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(level: &u32, s: S) -> Result<S::Ok, S::Error> {
        level.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let raw = f64::deserialize(d)?;
        if raw.fract() != 0.0 || raw < 0.0 || raw > f64::from(u32::MAX) {
            return Err(D::Error::custom(format!(
                "level must be a non-negative integer, got {raw}"
            )));
        }
        Ok(raw as u32)
    }
}
