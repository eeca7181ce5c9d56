//! Errors raised while building or pivoting an LCP tableau.

use crate::games::GameError;
use crate::lcp::config::ConfigError;

/// Failure of a solve.
///
/// Any of these aborts the whole search: results accumulated before the
/// failure are discarded and no profile is emitted.
#[derive(Debug, Clone)]
pub enum LcpError {
    /// The ratio test found no leaving row for the entering variable.
    UnboundedRay {
        /// Label of the entering variable.
        label: usize,
    },
    /// A single Lemke path exceeded its pivot budget.
    PivotLimit {
        /// Label the path was started from.
        label: usize,
        /// Budget that was exhausted.
        limit: usize,
    },
    /// A pivot label outside `[min, max]` was requested.
    InvalidLabel {
        /// Requested label.
        label: usize,
        /// Smallest valid label.
        min: usize,
        /// Largest valid label.
        max: usize,
    },
    /// Matrix or vector dimensions do not agree.
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Length found.
        actual: usize,
    },
    /// The game or support handed to the solver is malformed.
    Game(GameError),
    /// The solver configuration is unusable.
    Config(ConfigError),
}

impl std::fmt::Display for LcpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundedRay { label } => {
                write!(f, "Unbounded ray while entering label {}", label)
            }
            Self::PivotLimit { label, limit } => {
                write!(f, "Lemke path from label {} exceeded {} pivots", label, limit)
            }
            Self::InvalidLabel { label, min, max } => {
                write!(f, "Invalid pivot label {} (valid range {}..={})", label, min, max)
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            Self::Game(e) => write!(f, "Game error: {}", e),
            Self::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for LcpError {}

impl From<GameError> for LcpError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

impl From<ConfigError> for LcpError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
