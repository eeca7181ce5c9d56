//! Lemke-Howson driver.
//!
//! [`LcpSolver`] turns a two-player strategy support into the LCP tableau,
//! runs either the classical single path or the multi-path search, and
//! normalizes the surviving basic feasible solutions into profiles.
//!
//! The solver is generic over the numeric type: `f64` for speed,
//! [`num_rational::BigRational`] for exact equilibria.

use std::marker::PhantomData;
use std::time::Instant;

use log::{info, warn};

use crate::games::{StrategicGame, StrategySupport};
use crate::lcp::bfs::Bfs;
use crate::lcp::config::{LcpConfig, SolveStats};
use crate::lcp::error::LcpError;
use crate::lcp::linalg::{Matrix, Vector};
use crate::lcp::profile::MixedStrategyProfile;
use crate::lcp::scalar::Scalar;
use crate::lcp::search::{Expansion, LemkeSearch};
use crate::lcp::tableau::LHTableau;

/// The LCP solver.
///
/// # Type Parameters
/// - `T`: numeric type the tableau pivots over
///
/// # Example
/// ```
/// use lemke_howson::games::{classic, StrategySupport};
/// use lemke_howson::lcp::{LcpConfig, LcpSolver};
///
/// let game = classic::matching_pennies();
/// let mut solver = LcpSolver::<f64>::new(LcpConfig::single());
/// let profiles = solver.solve(&StrategySupport::full(&game)).unwrap();
///
/// assert_eq!(profiles.len(), 1);
/// assert!((profiles[0].player(0)[0] - 0.5).abs() < 1e-9);
/// ```
pub struct LcpSolver<T> {
    /// Configuration for the solver.
    config: LcpConfig,

    /// Statistics of the last solve.
    stats: SolveStats,

    /// Phantom data for the numeric type.
    _phantom: PhantomData<T>,
}

impl<T: Scalar> LcpSolver<T> {
    /// Create a new solver.
    pub fn new(config: LcpConfig) -> Self {
        Self {
            config,
            stats: SolveStats::new(),
            _phantom: PhantomData,
        }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &LcpConfig {
        &self.config
    }

    /// Statistics of the last solve.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Find equilibria of the game restricted to `support`.
    ///
    /// Games without exactly two players yield no profiles. Any pivoting
    /// failure aborts the whole solve and nothing found so far is returned.
    pub fn solve(
        &mut self,
        support: &StrategySupport<'_>,
    ) -> Result<Vec<MixedStrategyProfile<T>>, LcpError> {
        self.solve_with_callback(support, |_| {})
    }

    /// Like [`solve`](Self::solve), reporting every search edge to `callback`.
    pub fn solve_with_callback<F>(
        &mut self,
        support: &StrategySupport<'_>,
        callback: F,
    ) -> Result<Vec<MixedStrategyProfile<T>>, LcpError>
    where
        F: FnMut(&Expansion),
    {
        let start_time = Instant::now();
        self.stats = SolveStats::new();
        self.config.validate()?;

        if support.num_players() != 2 {
            warn!(
                "'{}' has {} players; only two-player games are supported",
                support.game().title(),
                support.num_players()
            );
            return Ok(Vec::new());
        }

        let tableau = build_tableau::<T>(support)?.with_max_pivots(self.config.max_pivots);
        let mut search = LemkeSearch::new(&self.config);
        if self.config.stop_after == 1 {
            search.single_path(tableau)?;
        } else {
            search.run_with_callback(tableau, callback)?;
        }

        let (solutions, stats) = search.finish();
        self.stats = stats;
        let profiles = self.add_solutions(support, &solutions);

        self.stats.candidates = solutions.len();
        self.stats.profiles = profiles.len();
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "'{}': {} profile(s) from {} candidate(s), {} pivots in {:.3}s",
            support.game().title(),
            self.stats.profiles,
            self.stats.candidates,
            self.stats.pivots,
            self.stats.elapsed_seconds
        );

        Ok(profiles)
    }

    /// Normalize retained solutions into profiles.
    ///
    /// Solutions where either player's weights sum to zero (the artificial
    /// equilibrium among them) are skipped.
    pub fn add_solutions(
        &mut self,
        support: &StrategySupport<'_>,
        solutions: &[Bfs<T>],
    ) -> Vec<MixedStrategyProfile<T>> {
        let mut profiles = Vec::with_capacity(solutions.len());
        for bfs in solutions {
            match MixedStrategyProfile::from_bfs(support, bfs) {
                Some(profile) => profiles.push(profile),
                None => self.stats.discarded += 1,
            }
        }
        profiles
    }
}

/// Player 1's block: `A1[i][j] = a(i, j) + shift`, `n1 × n2`.
pub fn make_a1<T: Scalar>(support: &StrategySupport<'_>, shift: &T) -> Matrix<T> {
    let (n1, n2) = (support.num_strategies(0), support.num_strategies(1));
    let mut a1 = Matrix::zeros(n1, n2);
    for i in 0..n1 {
        for j in 0..n2 {
            a1[(i, j)] = T::from_rational(support.payoff(0, &[i, j])) + shift.clone();
        }
    }
    a1
}

/// Player 2's block, transposed: `A2[j][i] = b(i, j) + shift`, `n2 × n1`.
pub fn make_a2<T: Scalar>(support: &StrategySupport<'_>, shift: &T) -> Matrix<T> {
    let (n1, n2) = (support.num_strategies(0), support.num_strategies(1));
    let mut a2 = Matrix::zeros(n2, n1);
    for i in 0..n1 {
        for j in 0..n2 {
            a2[(j, i)] = T::from_rational(support.payoff(1, &[i, j])) + shift.clone();
        }
    }
    a2
}

/// Right-hand side of player 1's system.
pub fn make_b1<T: Scalar>(support: &StrategySupport<'_>) -> Vector<T> {
    Vector::filled(support.num_strategies(0), T::one())
}

/// Right-hand side of player 2's system.
pub fn make_b2<T: Scalar>(support: &StrategySupport<'_>) -> Vector<T> {
    Vector::filled(support.num_strategies(1), T::one())
}

/// Offset making every restricted payoff of both players at least one.
pub fn payoff_shift<T: Scalar>(support: &StrategySupport<'_>) -> T {
    let (n1, n2) = (support.num_strategies(0), support.num_strategies(1));
    let mut min = T::zero();
    for i in 0..n1 {
        for j in 0..n2 {
            for player in 0..2 {
                let payoff = T::from_rational(support.payoff(player, &[i, j]));
                if payoff < min {
                    min = payoff;
                }
            }
        }
    }
    T::one() - min
}

/// Build the initial tableau (the artificial equilibrium) for a support.
pub fn build_tableau<T: Scalar>(support: &StrategySupport<'_>) -> Result<LHTableau<T>, LcpError> {
    let shift = payoff_shift::<T>(support);
    LHTableau::new(
        &make_a1(support, &shift),
        &make_a2(support, &shift),
        &make_b1(support),
        &make_b2(support),
    )
}

/// Solve a whole game with the given configuration.
pub fn solve_strategic<T: Scalar>(
    game: &StrategicGame,
    config: LcpConfig,
) -> Result<Vec<MixedStrategyProfile<T>>, LcpError> {
    LcpSolver::new(config).solve(&StrategySupport::full(game))
}
