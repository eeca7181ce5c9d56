//! Lemke-Howson pivoting tableau.
//!
//! The LCP of a bimatrix game is kept as two independent linear systems with
//! slack variables:
//!
//! ```text
//! tableau 1 (rows = player 1 strategies):  s_i + Σ_j A1[i][j] y_j = b1_i
//! tableau 2 (rows = player 2 strategies):  r_j + Σ_i A2[j][i] x_i = b2_j
//! ```
//!
//! Labels `1..=n1` name player 1's strategies and `n1+1..=n1+n2` player 2's.
//! Every label owns two complementary variables, one in each tableau:
//! the strategy variable (`x_k` or `y_k`) and the slack of the opposing
//! best-response row (`s_k` or `r_k`). A basis in which every label has
//! exactly one basic variable is completely labeled, i.e. an equilibrium
//! (or the artificial equilibrium at the origin).

use log::trace;

use crate::lcp::bfs::Bfs;
use crate::lcp::error::LcpError;
use crate::lcp::linalg::{Matrix, Vector};
use crate::lcp::scalar::Scalar;

/// Default pivot budget for a single Lemke path.
pub const DEFAULT_MAX_PIVOTS: usize = 10_000;

/// A variable of the LCP, identified by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// Probability weight of strategy `label`.
    Strategy(usize),
    /// Slack of the best-response constraint for strategy `label`.
    Slack(usize),
}

impl Variable {
    /// The label this variable carries.
    pub fn label(&self) -> usize {
        match *self {
            Variable::Strategy(label) | Variable::Slack(label) => label,
        }
    }

    /// The other variable carrying the same label.
    pub fn complement(&self) -> Variable {
        match *self {
            Variable::Strategy(label) => Variable::Slack(label),
            Variable::Slack(label) => Variable::Strategy(label),
        }
    }
}

/// One linear system `[A | I] z = b` in canonical form.
#[derive(Debug, Clone)]
pub struct Tableau<T> {
    coefficients: Matrix<T>,
    rhs: Vector<T>,
    columns: Vec<Variable>,
    basis: Vec<Variable>,
}

impl<T: Scalar> Tableau<T> {
    /// Build `[a | I] z = b` with the slacks initially basic.
    ///
    /// `structural` names the columns of `a`, `slacks` the rows.
    pub fn new(
        a: &Matrix<T>,
        b: &Vector<T>,
        structural: Vec<Variable>,
        slacks: Vec<Variable>,
    ) -> Result<Self, LcpError> {
        if b.len() != a.rows() || slacks.len() != a.rows() {
            return Err(LcpError::DimensionMismatch {
                expected: a.rows(),
                actual: b.len().min(slacks.len()),
            });
        }
        if structural.len() != a.cols() {
            return Err(LcpError::DimensionMismatch {
                expected: a.cols(),
                actual: structural.len(),
            });
        }

        let rows = a.rows();
        let cols = a.cols() + rows;
        let mut coefficients = Matrix::zeros(rows, cols);
        for r in 0..rows {
            for c in 0..a.cols() {
                coefficients[(r, c)] = a[(r, c)].clone();
            }
            coefficients[(r, a.cols() + r)] = T::one();
        }

        let mut columns = structural;
        columns.extend(slacks.iter().copied());

        Ok(Self {
            coefficients,
            rhs: b.clone(),
            columns,
            basis: slacks,
        })
    }

    /// Number of constraint rows.
    pub fn num_rows(&self) -> usize {
        self.basis.len()
    }

    /// True if `var` is one of this tableau's columns.
    pub fn contains(&self, var: Variable) -> bool {
        self.columns.contains(&var)
    }

    /// True if `var` is currently basic here.
    pub fn is_basic(&self, var: Variable) -> bool {
        self.basis.contains(&var)
    }

    /// Basic variables, by row.
    pub fn basis(&self) -> &[Variable] {
        &self.basis
    }

    /// Current value of `var`: its right-hand side if basic, zero otherwise.
    pub fn value(&self, var: Variable) -> T {
        self.basis
            .iter()
            .position(|&v| v == var)
            .map_or_else(T::zero, |row| self.rhs[row].clone())
    }

    /// Minimum-ratio test for column `col`.
    ///
    /// Only rows with a coefficient above `eps` qualify. Ties are broken
    /// lexicographically on the slack block (the current basis inverse)
    /// scaled by the pivot coefficient, and finally by the lowest label.
    /// The lexicographic step keeps degenerate games from cycling.
    fn ratio_test(&self, col: usize, eps: &T) -> Option<usize> {
        let mut best: Option<usize> = None;

        for row in 0..self.num_rows() {
            if !self.coefficients[(row, col)].exceeds(eps) {
                continue;
            }
            best = match best {
                Some(current) if !self.leaves_before(row, current, col, eps) => Some(current),
                _ => Some(row),
            };
        }

        best
    }

    /// True if `row` should leave instead of `other` when `col` enters.
    fn leaves_before(&self, row: usize, other: usize, col: usize, eps: &T) -> bool {
        let p = self.coefficients[(row, col)].clone();
        let q = self.coefficients[(other, col)].clone();
        let first_slack = self.columns.len() - self.num_rows();

        let ratio = self.rhs[row].clone() / p.clone();
        let other_ratio = self.rhs[other].clone() / q.clone();
        if !ratio.approx_eq(&other_ratio, eps) {
            return ratio < other_ratio;
        }

        for c in first_slack..self.columns.len() {
            let a = self.coefficients[(row, c)].clone() / p.clone();
            let b = self.coefficients[(other, c)].clone() / q.clone();
            if !a.approx_eq(&b, eps) {
                return a < b;
            }
        }

        self.basis[row].label() < self.basis[other].label()
    }

    /// Bring `entering` into the basis. Returns the variable that left.
    pub fn enter(&mut self, entering: Variable, eps: &T) -> Result<Variable, LcpError> {
        let col = self
            .columns
            .iter()
            .position(|&v| v == entering)
            .ok_or(LcpError::InvalidLabel {
                label: entering.label(),
                min: 0,
                max: 0,
            })?;

        let row = self.ratio_test(col, eps).ok_or(LcpError::UnboundedRay {
            label: entering.label(),
        })?;

        self.pivot(row, col);
        let leaving = std::mem::replace(&mut self.basis[row], entering);
        Ok(leaving)
    }

    /// Gauss-Jordan elimination on `(row, col)`.
    fn pivot(&mut self, row: usize, col: usize) {
        let pivot = self.coefficients[(row, col)].clone();
        self.coefficients.scale_row(row, &pivot);
        self.rhs[row] = self.rhs[row].clone() / pivot;
        self.coefficients[(row, col)] = T::one();

        for r in 0..self.num_rows() {
            if r == row {
                continue;
            }
            let factor = self.coefficients[(r, col)].clone();
            if factor.is_zero() {
                continue;
            }
            self.coefficients.row_axpy(r, row, &factor);
            self.rhs[r] = self.rhs[r].clone() - factor * self.rhs[row].clone();
            self.coefficients[(r, col)] = T::zero();
        }
    }
}

/// The pair of tableaux making up the Lemke-Howson LCP.
#[derive(Debug, Clone)]
pub struct LHTableau<T> {
    n1: usize,
    n2: usize,
    player1: Tableau<T>,
    player2: Tableau<T>,
    max_pivots: usize,
}

impl<T: Scalar> LHTableau<T> {
    /// Assemble the LCP from its blocks.
    ///
    /// `a1` is `n1 × n2` (player 1's payoffs), `a2` is `n2 × n1`
    /// (player 2's payoffs, transposed). `b1` and `b2` are the right-hand
    /// sides of the two systems.
    pub fn new(
        a1: &Matrix<T>,
        a2: &Matrix<T>,
        b1: &Vector<T>,
        b2: &Vector<T>,
    ) -> Result<Self, LcpError> {
        let n1 = a1.rows();
        let n2 = a1.cols();
        if a2.rows() != n2 {
            return Err(LcpError::DimensionMismatch {
                expected: n2,
                actual: a2.rows(),
            });
        }
        if a2.cols() != n1 {
            return Err(LcpError::DimensionMismatch {
                expected: n1,
                actual: a2.cols(),
            });
        }

        let player1 = Tableau::new(
            a1,
            b1,
            (n1 + 1..=n1 + n2).map(Variable::Strategy).collect(),
            (1..=n1).map(Variable::Slack).collect(),
        )?;
        let player2 = Tableau::new(
            a2,
            b2,
            (1..=n1).map(Variable::Strategy).collect(),
            (n1 + 1..=n1 + n2).map(Variable::Slack).collect(),
        )?;

        Ok(Self {
            n1,
            n2,
            player1,
            player2,
            max_pivots: DEFAULT_MAX_PIVOTS,
        })
    }

    /// Builder method: set the pivot budget of a single path.
    pub fn with_max_pivots(mut self, max_pivots: usize) -> Self {
        self.max_pivots = max_pivots;
        self
    }

    /// Number of player 1 strategies.
    pub fn n1(&self) -> usize {
        self.n1
    }

    /// Number of player 2 strategies.
    pub fn n2(&self) -> usize {
        self.n2
    }

    /// Smallest valid pivot label.
    pub fn min_col(&self) -> usize {
        1
    }

    /// Largest valid pivot label.
    pub fn max_col(&self) -> usize {
        self.n1 + self.n2
    }

    /// Numeric tolerance used by every comparison on this tableau.
    pub fn epsilon(&self) -> T {
        T::tolerance()
    }

    fn owner(&self, var: Variable) -> &Tableau<T> {
        if self.player1.contains(var) {
            &self.player1
        } else {
            &self.player2
        }
    }

    fn owner_mut(&mut self, var: Variable) -> &mut Tableau<T> {
        if self.player1.contains(var) {
            &mut self.player1
        } else {
            &mut self.player2
        }
    }

    /// True if `var` is currently basic.
    pub fn is_basic(&self, var: Variable) -> bool {
        self.owner(var).is_basic(var)
    }

    /// Current value of `var` (zero if non-basic).
    pub fn value(&self, var: Variable) -> T {
        self.owner(var).value(var)
    }

    /// Follow the complementary pivoting path that drops `label`.
    ///
    /// Whichever of the label's two variables is non-basic enters; after
    /// each pivot the complement of the leaving variable enters next. The
    /// path ends when a variable carrying `label` leaves, which restores a
    /// completely labeled basis. Returns the number of pivots performed.
    pub fn lemke_path(&mut self, label: usize) -> Result<usize, LcpError> {
        if label < self.min_col() || label > self.max_col() {
            return Err(LcpError::InvalidLabel {
                label,
                min: self.min_col(),
                max: self.max_col(),
            });
        }

        let eps = self.epsilon();
        let mut entering = if self.is_basic(Variable::Strategy(label)) {
            Variable::Slack(label)
        } else {
            Variable::Strategy(label)
        };
        let mut pivots = 0;

        loop {
            if pivots >= self.max_pivots {
                return Err(LcpError::PivotLimit {
                    label,
                    limit: self.max_pivots,
                });
            }

            let leaving = self.owner_mut(entering).enter(entering, &eps)?;
            pivots += 1;
            trace!("pivot {}: {:?} in, {:?} out", pivots, entering, leaving);

            if leaving.label() == label {
                return Ok(pivots);
            }
            entering = leaving.complement();
        }
    }

    /// Snapshot of the basic strategy variables.
    pub fn get_bfs(&self) -> Bfs<T> {
        let mut bfs = Bfs::new();
        for label in self.min_col()..=self.max_col() {
            let var = Variable::Strategy(label);
            if self.is_basic(var) {
                bfs.define(label, self.value(var));
            }
        }
        bfs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn rat_matrix(rows: &[&[i64]]) -> Matrix<BigRational> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| rat(v, 1)).collect())
                .collect(),
        )
        .unwrap()
    }

    /// Matching pennies with payoffs shifted by +2.
    fn pennies() -> LHTableau<BigRational> {
        let a1 = rat_matrix(&[&[3, 1], &[1, 3]]);
        let a2 = rat_matrix(&[&[1, 3], &[3, 1]]);
        let ones = Vector::filled(2, rat(1, 1));
        LHTableau::new(&a1, &a2, &ones, &ones).unwrap()
    }

    #[test]
    fn test_variable_labels() {
        assert_eq!(Variable::Strategy(3).label(), 3);
        assert_eq!(Variable::Slack(3).complement(), Variable::Strategy(3));
        assert_eq!(Variable::Strategy(2).complement(), Variable::Slack(2));
    }

    #[test]
    fn test_initial_basis_is_artificial_equilibrium() {
        let t = pennies();
        assert_eq!(t.min_col(), 1);
        assert_eq!(t.max_col(), 4);
        assert!(t.get_bfs().is_empty());
        for label in 1..=4 {
            assert!(t.is_basic(Variable::Slack(label)));
            assert!(!t.is_basic(Variable::Strategy(label)));
        }
    }

    #[test]
    fn test_lemke_path_matching_pennies() {
        let mut t = pennies();
        let pivots = t.lemke_path(1).unwrap();
        assert_eq!(pivots, 4);

        let bfs = t.get_bfs();
        assert_eq!(bfs.basic_indices(), vec![1, 2, 3, 4]);
        for label in 1..=4 {
            assert_eq!(bfs.value(label), rat(1, 4));
        }
    }

    #[test]
    fn test_endpoint_is_completely_labeled() {
        let mut t = pennies();
        t.lemke_path(2).unwrap();
        for label in 1..=4 {
            let strategy = t.is_basic(Variable::Strategy(label));
            let slack = t.is_basic(Variable::Slack(label));
            assert!(strategy != slack, "label {} not complementary", label);
        }
    }

    #[test]
    fn test_path_back_to_origin() {
        let mut t = pennies();
        t.lemke_path(1).unwrap();
        t.lemke_path(1).unwrap();
        assert!(t.get_bfs().is_empty());
    }

    #[test]
    fn test_float_tableau_matches_rational() {
        let a1 = Matrix::from_rows(vec![vec![3.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let a2 = Matrix::from_rows(vec![vec![1.0, 3.0], vec![3.0, 1.0]]).unwrap();
        let ones = Vector::filled(2, 1.0);
        let mut t = LHTableau::new(&a1, &a2, &ones, &ones).unwrap();
        t.lemke_path(3).unwrap();
        let bfs = t.get_bfs();
        for label in 1..=4 {
            approx::assert_abs_diff_eq!(bfs.value(label), 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_label() {
        let mut t = pennies();
        assert!(matches!(
            t.lemke_path(0),
            Err(LcpError::InvalidLabel { label: 0, min: 1, max: 4 })
        ));
        assert!(matches!(t.lemke_path(5), Err(LcpError::InvalidLabel { .. })));
    }

    #[test]
    fn test_pivot_limit() {
        let mut t = pennies().with_max_pivots(2);
        assert!(matches!(
            t.lemke_path(1),
            Err(LcpError::PivotLimit { label: 1, limit: 2 })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a1 = rat_matrix(&[&[1, 2]]);
        let a2 = rat_matrix(&[&[1, 2]]);
        let err = LHTableau::new(
            &a1,
            &a2,
            &Vector::filled(1, rat(1, 1)),
            &Vector::filled(2, rat(1, 1)),
        )
        .unwrap_err();
        assert!(matches!(err, LcpError::DimensionMismatch { .. }));
    }
}
