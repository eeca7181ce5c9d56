//! Basic feasible solution snapshots.

use rustc_hash::FxHashMap;

use crate::lcp::scalar::Scalar;

/// Values of the strategy variables that are basic in a tableau.
///
/// Indices are pivot labels. Labels that are not defined are non-basic and
/// read as zero. Equality compares the set of basic labels and then each
/// value within [`Scalar::tolerance`], which makes a `Bfs` usable as the
/// visited key of the equilibrium search.
#[derive(Debug, Clone)]
pub struct Bfs<T> {
    values: FxHashMap<usize, T>,
}

impl<T: Scalar> Default for Bfs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Bfs<T> {
    /// Empty snapshot (nothing basic).
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }

    /// Record `value` for basic label `index`.
    pub fn define(&mut self, index: usize, value: T) {
        self.values.insert(index, value);
    }

    /// True if `index` is basic in this snapshot.
    pub fn is_defined(&self, index: usize) -> bool {
        self.values.contains_key(&index)
    }

    /// Value of a basic label.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(&index)
    }

    /// Value of `index`, zero if non-basic.
    pub fn value(&self, index: usize) -> T {
        self.values.get(&index).cloned().unwrap_or_else(T::zero)
    }

    /// Number of basic labels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no label is basic (the artificial equilibrium).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Basic labels in increasing order.
    pub fn basic_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.values.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Sum of the basic values whose label lies in `range`.
    pub fn sum_over(&self, range: std::ops::RangeInclusive<usize>) -> T {
        range
            .filter_map(|i| self.values.get(&i))
            .fold(T::zero(), |acc, v| acc + v.clone())
    }
}

impl<T: Scalar> PartialEq for Bfs<T> {
    fn eq(&self, other: &Self) -> bool {
        let eps = T::tolerance();
        self.values.len() == other.values.len()
            && self.values.iter().all(|(index, value)| {
                other
                    .values
                    .get(index)
                    .is_some_and(|v| value.approx_eq(v, &eps))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn bfs(entries: &[(usize, f64)]) -> Bfs<f64> {
        let mut b = Bfs::new();
        for &(i, v) in entries {
            b.define(i, v);
        }
        b
    }

    #[test]
    fn test_undefined_reads_zero() {
        let b = bfs(&[(1, 0.5), (3, 2.0)]);
        assert!(b.is_defined(1));
        assert!(!b.is_defined(2));
        assert_eq!(b.value(2), 0.0);
        assert_eq!(b.basic_indices(), vec![1, 3]);
        assert_eq!(b.sum_over(1..=2), 0.5);
    }

    #[test]
    fn test_equality_within_tolerance() {
        let a = bfs(&[(1, 0.5), (3, 2.0)]);
        let b = bfs(&[(3, 2.0 + 1e-12), (1, 0.5)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_basis_not_equal() {
        let a = bfs(&[(1, 0.5), (3, 2.0)]);
        let b = bfs(&[(1, 0.5), (4, 2.0)]);
        let c = bfs(&[(1, 0.5)]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(c, a);
        assert_eq!(Bfs::<f64>::new(), Bfs::new());
    }

    #[test]
    fn test_rational_equality_is_exact() {
        let mut a = Bfs::new();
        a.define(1, BigRational::new(BigInt::from(1), BigInt::from(3)));
        let mut b = Bfs::new();
        b.define(1, BigRational::new(BigInt::from(2), BigInt::from(6)));
        assert_eq!(a, b);

        let mut c = Bfs::new();
        c.define(1, BigRational::new(BigInt::from(1), BigInt::from(4)));
        assert_ne!(a, c);
    }
}
