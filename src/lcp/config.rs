//! Configuration options for the LCP solver.
//!
//! This module provides the knobs that bound the equilibrium search and the
//! statistics gathered while it runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lcp::tableau::DEFAULT_MAX_PIVOTS;

/// Largest display precision accepted for floating point output.
pub const MAX_DECIMALS: usize = 17;

/// Configuration for the LCP solver.
///
/// This struct controls:
/// - How many distinct solutions to keep (`stop_after`)
/// - How deep the multi-path search may go (`max_depth`)
/// - The pivot budget of a single Lemke path
/// - Display precision of floating point profiles
///
/// # Example
/// ```
/// use lemke_howson::lcp::LcpConfig;
///
/// let config = LcpConfig::default();
/// assert_eq!(config.stop_after, 0); // search every accessible equilibrium
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcpConfig {
    /// Maximum number of distinct solutions to retain (0 = unlimited).
    ///
    /// A value of 1 runs the classical single Lemke-Howson path from
    /// label 1 instead of the multi-path search.
    pub stop_after: usize,

    /// Maximum recursion depth of the multi-path search (0 = unlimited).
    pub max_depth: usize,

    /// Pivot budget of a single Lemke path.
    ///
    /// Exceeding it aborts the solve. It only triggers when degenerate
    /// input makes the lowest-index tie-break cycle.
    pub max_pivots: usize,

    /// Fixed-point decimals used when rendering floating point profiles.
    ///
    /// Exact arithmetic ignores this and prints fractions.
    pub decimals: usize,
}

impl Default for LcpConfig {
    fn default() -> Self {
        Self {
            stop_after: 0,
            max_depth: 0,
            max_pivots: DEFAULT_MAX_PIVOTS,
            decimals: 6,
        }
    }
}

impl LcpConfig {
    /// Create a new LcpConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for a single Lemke-Howson path from label 1.
    pub fn single() -> Self {
        Self {
            stop_after: 1,
            ..Default::default()
        }
    }

    /// Builder method: set the solution cap.
    pub fn with_stop_after(mut self, stop_after: usize) -> Self {
        self.stop_after = stop_after;
        self
    }

    /// Builder method: set the search depth cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder method: set the pivot budget.
    pub fn with_max_pivots(mut self, max_pivots: usize) -> Self {
        self.max_pivots = max_pivots;
        self
    }

    /// Builder method: set display precision.
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pivots == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_pivots".to_string(),
                message: "Pivot budget must be positive".to_string(),
            });
        }

        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "decimals".to_string(),
                message: format!("At most {} decimals are supported", MAX_DECIMALS),
            });
        }

        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The configuration file could not be read.
    IoError(String),
    /// The configuration could not be parsed.
    ParseError(String),
    /// A field holds an unusable value.
    InvalidValue {
        /// Offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics tracked during a solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Search nodes entered (including rejected ones).
    pub nodes_visited: usize,

    /// Total pivots across all Lemke paths.
    pub pivots: usize,

    /// Nodes rejected because their BFS was already known.
    pub duplicates: usize,

    /// Nodes rejected because the solution cap was reached.
    pub capped: usize,

    /// Nodes cut off by the depth cap.
    pub depth_cutoffs: usize,

    /// Deepest node entered.
    pub max_depth_reached: usize,

    /// Distinct basic feasible solutions retained.
    pub candidates: usize,

    /// Profiles emitted.
    pub profiles: usize,

    /// Candidates discarded because a player's weights summed to zero.
    pub discarded: usize,

    /// Wall-clock time of the solve (in seconds).
    pub elapsed_seconds: f64,
}

impl SolveStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LcpConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 0);
        assert_eq!(config.max_pivots, DEFAULT_MAX_PIVOTS);
        assert_eq!(LcpConfig::single().stop_after, 1);
    }

    #[test]
    fn test_builders() {
        let config = LcpConfig::new()
            .with_stop_after(3)
            .with_max_depth(5)
            .with_max_pivots(100)
            .with_decimals(2);
        assert_eq!(config.stop_after, 3);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.max_pivots, 100);
        assert_eq!(config.decimals, 2);
    }

    #[test]
    fn test_json_partial_fields() {
        let config = LcpConfig::from_json_str(r#"{ "max_depth": 4 }"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.stop_after, 0);
        assert_eq!(config.decimals, 6);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            LcpConfig::new().with_max_pivots(0).validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            LcpConfig::from_json_str(r#"{ "decimals": 40 }"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            LcpConfig::from_json_str("{"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
