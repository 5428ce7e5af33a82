//! Matcher tuning knobs.

use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// Default maximum edit distance tolerated per segment.
pub const DEFAULT_MAX_NODE_DISTANCE: usize = 5;
/// Default minimum length (in characters) for fuzzy comparison.
pub const DEFAULT_MIN_NODE_LENGTH: usize = 6;
/// Default minimum per-segment fuzzy score.
pub const DEFAULT_MIN_SCORE: f32 = 0.75;

/// Matcher configuration.
///
/// A zero value means "use the default", so a partially filled TOML section
/// or `MatcherConfig { min_score: 0.9, ..Zero }` behaves as expected once
/// passed through [`MatcherConfig::with_defaults`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Maximum edit distance between a query segment and a part name
    pub max_node_distance: usize,
    /// Segments or part names shorter than this are never fuzzy matched
    pub min_node_length: usize,
    /// Minimum fuzzy score for a segment to count as matched
    pub min_score: f32,
}

impl MatcherConfig {
    /// All-zero configuration; every knob falls back to its default.
    pub const ZERO: MatcherConfig = MatcherConfig {
        max_node_distance: 0,
        min_node_length: 0,
        min_score: 0.0,
    };

    /// Replace zero values with defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.max_node_distance == 0 {
            self.max_node_distance = DEFAULT_MAX_NODE_DISTANCE;
        }
        if self.min_node_length == 0 {
            self.min_node_length = DEFAULT_MIN_NODE_LENGTH;
        }
        if self.min_score == 0.0 {
            self.min_score = DEFAULT_MIN_SCORE;
        }
        self
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_score > 0.0 && self.min_score <= 1.0) {
            return Err(MatchError::InvalidConfig(format!(
                "min_score must be in (0, 1], got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::ZERO.with_defaults()
    }
}
