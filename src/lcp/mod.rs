//! Lemke-Howson solver module.
//!
//! Nash equilibria of two-player strategic games via complementary pivoting
//! on the linear complementarity problem of the bimatrix game.
//!
//! # Overview
//!
//! The game `(a, b)` is shifted so every payoff is positive and written as
//! two tableaux, one per player:
//!
//! ```text
//! player 1:  [A1 | I] (y, s) = 1     A1 = a + shift      (n1 × n2)
//! player 2:  [A2 | I] (x, r) = 1     A2 = (b + shift)ᵀ   (n2 × n1)
//! ```
//!
//! Labels `1..=n1` belong to player 1's strategies, `n1+1..=n1+n2` to player
//! 2's. A label is present when either its strategy variable or its slack is
//! nonbasic. Starting at the artificial equilibrium (all slacks basic), a
//! Lemke path drops one label and pivots until it is picked up again, ending
//! at another completely labeled point.
//!
//! Following paths from every reachable endpoint with every label finds
//! additional equilibria; [`LemkeSearch`] does that with optional caps on the
//! number of solutions and the path depth.
//!
//! # Example
//!
//! ```
//! use lemke_howson::games::classic;
//! use lemke_howson::lcp::{solve_strategic, LcpConfig};
//! use num_rational::BigRational;
//!
//! let game = classic::battle_of_the_sexes();
//! let profiles = solve_strategic::<BigRational>(&game, LcpConfig::default()).unwrap();
//!
//! assert_eq!(profiles.len(), 3);
//! ```
//!
//! # References
//!
//! - Lemke, C. E., Howson, J. T. "Equilibrium Points of Bimatrix Games" (1964)
//! - von Stengel, B. "Computing Equilibria for Two-Person Games" (2002)

pub mod bfs;
pub mod config;
pub mod error;
pub mod linalg;
pub mod profile;
pub mod scalar;
pub mod search;
pub mod solver;
pub mod tableau;

pub use bfs::Bfs;
pub use config::{ConfigError, LcpConfig, SolveStats};
pub use error::LcpError;
pub use linalg::{Matrix, Vector};
pub use profile::{write_profiles, MixedStrategyProfile, PlayerRecord, ProfileRecord};
pub use scalar::Scalar;
pub use search::{Expansion, LemkeSearch};
pub use solver::{solve_strategic, LcpSolver};
pub use tableau::{LHTableau, Tableau, Variable, DEFAULT_MAX_PIVOTS};
