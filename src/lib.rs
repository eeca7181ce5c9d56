//! # Lemke-Howson
//!
//! Nash equilibria of two-player strategic games by Lemke-Howson
//! complementary pivoting.
//!
//! ## Features
//!
//! - **Exact or Fast**: Pivot over `BigRational` for exact equilibria or `f64` with a tolerance
//! - **Multiple Equilibria**: Follows paths from every endpoint found, not just the first
//! - **Search Caps**: Stop after a number of equilibria or limit the path depth
//! - **Strategy Supports**: Solve a game restricted to a subset of strategies
//! - **JSON Games**: Read games from JSON, write profiles as CSV lines or JSON records
//!
//! ## Quick Start
//!
//! ```
//! use lemke_howson::games::{classic, StrategySupport};
//! use lemke_howson::lcp::{LcpConfig, LcpSolver};
//! use num_rational::BigRational;
//!
//! // 1. Load or build a two-player game
//! let game = classic::matching_pennies();
//!
//! // 2. Create a solver
//! let mut solver = LcpSolver::<BigRational>::new(LcpConfig::default());
//!
//! // 3. Solve
//! let profiles = solver.solve(&StrategySupport::full(&game)).unwrap();
//!
//! // 4. Print
//! for profile in &profiles {
//!     println!("{}", profile.to_csv_line("NE", 6));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`lcp`]: Tableau pivoting, equilibrium search and profile extraction
//! - [`games`]: Strategic games, strategy supports and reference games
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      LcpSolver (Generic)                        │
//! │  - Tableau construction    - Profile normalization              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ drives
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!   ┌───────────┐        ┌────────────┐        ┌───────────┐
//!   │ LHTableau │        │ LemkeSearch│        │    Bfs    │
//!   │  pivots   │        │  all paths │        │ solutions │
//!   └───────────┘        └────────────┘        └───────────┘
//! ```

#![warn(missing_docs)]

/// Lemke-Howson solver module.
///
/// Tableaux, the multi-path search and the solver driver.
pub mod lcp;

/// Game representation module.
///
/// Strategic games, supports and a few reference games for testing.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use games::{GameError, StrategicGame, StrategySupport};
pub use lcp::{LcpConfig, LcpError, LcpSolver, MixedStrategyProfile, SolveStats};
