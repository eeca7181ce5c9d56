//! Strategic-form games handed to the LCP solver.
//!
//! The solver itself only needs a [`StrategySupport`]: player count,
//! per-player strategy counts and restricted payoff lookups. This module
//! provides a small strategic-form model that can supply those:
//!
//! - [`strategic`]: N-player game with exact payoffs, loadable from JSON
//! - [`support`]: restriction of a game to a subset of strategies per player
//! - [`classic`]: reference games with known equilibria
//!
//! ## JSON Format
//!
//! ```text
//! {
//!   "title": "Matching Pennies",
//!   "players": [
//!     { "name": "Row",    "strategies": ["H", "T"] },
//!     { "name": "Column", "strategies": ["H", "T"] }
//!   ],
//!   "payoffs": [[1, -1], [-1, 1], [-1, 1], [1, -1]]
//! }
//! ```
//!
//! `payoffs` lists one entry per pure profile with the first player's
//! strategy varying slowest. Each entry holds one payoff per player, either
//! as a JSON number or as a string such as `"-1/3"` or `"0.25"`.

pub mod classic;
pub mod strategic;
pub mod support;

pub use strategic::{Player, StrategicGame};
pub use support::StrategySupport;

/// Errors from loading or restricting a game.
#[derive(Debug, Clone)]
pub enum GameError {
    /// The game file could not be read.
    Io(String),
    /// The game description could not be parsed.
    Parse(String),
    /// The game is structurally inconsistent.
    InvalidGame(String),
    /// A support restriction refers to missing players or strategies.
    InvalidSupport(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidGame(e) => write!(f, "Invalid game: {}", e),
            Self::InvalidSupport(e) => write!(f, "Invalid support: {}", e),
        }
    }
}

impl std::error::Error for GameError {}
