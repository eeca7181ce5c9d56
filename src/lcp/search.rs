//! Multi-path equilibrium search.
//!
//! Starting from the artificial equilibrium, every label is dropped in turn
//! and the resulting Lemke path followed to its endpoint. Each new endpoint
//! is expanded the same way, except along the label that led to it. The
//! search is a depth-first walk over the graph whose nodes are basic
//! feasible solutions and whose edges are single Lemke paths, with the list
//! of retained solutions doubling as the visited set.
//!
//! For degenerate games this finds every equilibrium *accessible* by
//! chained paths from the origin, which is not necessarily all of them.
//!
//! The walk uses an explicit stack of frames rather than recursion, so an
//! unlimited depth cap cannot overflow the call stack. Frames are expanded
//! in exactly the order the recursive formulation would visit them.

use log::debug;

use crate::lcp::bfs::Bfs;
use crate::lcp::config::{LcpConfig, SolveStats};
use crate::lcp::error::LcpError;
use crate::lcp::scalar::Scalar;
use crate::lcp::tableau::LHTableau;

/// One edge followed by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    /// Label that produced the parent node (0 for the origin).
    pub arriving: usize,
    /// Label dropped to reach the child.
    pub label: usize,
    /// Depth of the child.
    pub depth: usize,
}

/// A node whose children are still being generated.
struct Frame<T> {
    tableau: LHTableau<T>,
    arriving: usize,
    depth: usize,
    next_label: usize,
}

/// Depth- and width-bounded search over Lemke path endpoints.
pub struct LemkeSearch<T> {
    stop_after: usize,
    max_depth: usize,
    solutions: Vec<Bfs<T>>,
    stats: SolveStats,
}

impl<T: Scalar> LemkeSearch<T> {
    /// Create an empty search bounded by `config`'s caps.
    pub fn new(config: &LcpConfig) -> Self {
        Self {
            stop_after: config.stop_after,
            max_depth: config.max_depth,
            solutions: Vec::new(),
            stats: SolveStats::new(),
        }
    }

    /// Record the tableau's current BFS.
    ///
    /// Returns `false` without recording if the solution cap has been
    /// exceeded or an equal BFS is already known.
    pub fn add_bfs(&mut self, tableau: &LHTableau<T>) -> bool {
        let bfs = tableau.get_bfs();

        if self.stop_after > 0 && self.solutions.len() > self.stop_after {
            self.stats.capped += 1;
            return false;
        }
        if self.solutions.contains(&bfs) {
            self.stats.duplicates += 1;
            return false;
        }

        debug!(
            "accepted BFS #{} with basic labels {:?}",
            self.solutions.len() + 1,
            bfs.basic_indices()
        );
        self.solutions.push(bfs);
        true
    }

    /// Classical Lemke-Howson: one path dropping label 1, then record its endpoint.
    pub fn single_path(&mut self, mut root: LHTableau<T>) -> Result<(), LcpError> {
        self.stats.nodes_visited += 1;
        self.stats.pivots += root.lemke_path(root.min_col())?;
        self.add_bfs(&root);
        Ok(())
    }

    /// Explore every endpoint reachable from `root`.
    pub fn run(&mut self, root: LHTableau<T>) -> Result<(), LcpError> {
        self.run_with_callback(root, |_| {})
    }

    /// Explore every endpoint reachable from `root`, reporting each edge.
    ///
    /// `callback` is invoked after each child path has been pivoted and
    /// before the child is entered.
    pub fn run_with_callback<F>(&mut self, root: LHTableau<T>, mut callback: F) -> Result<(), LcpError>
    where
        F: FnMut(&Expansion),
    {
        let mut stack: Vec<Frame<T>> = Vec::new();
        if let Some(frame) = self.enter(root, 0, 0) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            if frame.next_label > frame.tableau.max_col() || !self.below_cap() {
                stack.pop();
                continue;
            }

            let label = frame.next_label;
            frame.next_label += 1;
            if label == frame.arriving {
                continue;
            }

            let mut child = frame.tableau.clone();
            self.stats.pivots += child.lemke_path(label)?;

            let expansion = Expansion {
                arriving: frame.arriving,
                label,
                depth: frame.depth + 1,
            };
            debug!(
                "depth {}: dropped label {} (arrived via {})",
                expansion.depth, label, expansion.arriving
            );
            callback(&expansion);

            if let Some(next) = self.enter(child, label, expansion.depth) {
                stack.push(next);
            }
        }

        Ok(())
    }

    /// Node entry: depth cap, then dedup/solution cap.
    fn enter(&mut self, tableau: LHTableau<T>, arriving: usize, depth: usize) -> Option<Frame<T>> {
        self.stats.nodes_visited += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

        if self.max_depth != 0 && depth > self.max_depth {
            self.stats.depth_cutoffs += 1;
            return None;
        }
        if !self.add_bfs(&tableau) {
            return None;
        }

        Some(Frame {
            next_label: tableau.min_col(),
            tableau,
            arriving,
            depth,
        })
    }

    /// True while children may still be generated.
    ///
    /// The first retained solution is the origin, so it is not counted
    /// against the cap.
    fn below_cap(&self) -> bool {
        self.stop_after == 0 || self.solutions.len().saturating_sub(1) < self.stop_after
    }

    /// Retained solutions, in discovery order.
    pub fn solutions(&self) -> &[Bfs<T>] {
        &self.solutions
    }

    /// Consume the search, returning its solutions and statistics.
    pub fn finish(self) -> (Vec<Bfs<T>>, SolveStats) {
        (self.solutions, self.stats)
    }

    /// Statistics so far.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcp::linalg::{Matrix, Vector};

    fn tableau(a: &[Vec<f64>], b: &[Vec<f64>]) -> LHTableau<f64> {
        // Shift payoffs positive the same way the solver does.
        let min = a
            .iter()
            .chain(b.iter())
            .flatten()
            .fold(0.0f64, |m, &v| m.min(v));
        let shift = 1.0 - min;
        let a1 = Matrix::from_rows(
            a.iter()
                .map(|r| r.iter().map(|v| v + shift).collect())
                .collect(),
        )
        .unwrap();
        let a2 = Matrix::from_rows(
            b.iter()
                .map(|r| r.iter().map(|v| v + shift).collect())
                .collect(),
        )
        .unwrap()
        .transpose();
        LHTableau::new(
            &a1,
            &a2,
            &Vector::filled(a1.rows(), 1.0),
            &Vector::filled(a1.cols(), 1.0),
        )
        .unwrap()
    }

    fn battle_of_the_sexes() -> LHTableau<f64> {
        tableau(
            &[vec![2.0, 0.0], vec![0.0, 1.0]],
            &[vec![1.0, 0.0], vec![0.0, 2.0]],
        )
    }

    /// Straight recursive formulation, used as the ordering reference.
    fn recursive(
        stop_after: usize,
        max_depth: usize,
        arriving: usize,
        t: LHTableau<f64>,
        list: &mut Vec<Bfs<f64>>,
        depth: usize,
        trace: &mut Vec<Expansion>,
    ) {
        if max_depth != 0 && depth > max_depth {
            return;
        }
        let bfs = t.get_bfs();
        if (stop_after > 0 && list.len() > stop_after) || list.contains(&bfs) {
            return;
        }
        list.push(bfs);
        let mut i = t.min_col();
        while i <= t.max_col() && (stop_after == 0 || list.len() - 1 < stop_after) {
            if i != arriving {
                let mut child = t.clone();
                child.lemke_path(i).unwrap();
                trace.push(Expansion {
                    arriving,
                    label: i,
                    depth: depth + 1,
                });
                recursive(stop_after, max_depth, i, child, list, depth + 1, trace);
            }
            i += 1;
        }
    }

    #[test]
    fn test_finds_all_battle_of_the_sexes_endpoints() {
        let mut search = LemkeSearch::new(&LcpConfig::default());
        search.run(battle_of_the_sexes()).unwrap();

        // Origin plus three equilibria.
        assert_eq!(search.solutions().len(), 4);
        assert!(search.solutions()[0].is_empty());
        assert!(search.stats().duplicates > 0);
    }

    #[test]
    fn test_no_duplicate_solutions() {
        let mut search = LemkeSearch::new(&LcpConfig::default());
        search.run(battle_of_the_sexes()).unwrap();
        let solutions = search.solutions();
        for i in 0..solutions.len() {
            for j in i + 1..solutions.len() {
                assert_ne!(solutions[i], solutions[j]);
            }
        }
    }

    #[test]
    fn test_never_redrops_arriving_label() {
        let mut expansions = Vec::new();
        let mut search = LemkeSearch::new(&LcpConfig::default());
        search
            .run_with_callback(battle_of_the_sexes(), |e| expansions.push(*e))
            .unwrap();

        assert!(!expansions.is_empty());
        for e in &expansions {
            assert_ne!(e.label, e.arriving);
        }
    }

    #[test]
    fn test_matches_recursive_order() {
        for (stop_after, max_depth) in [(0, 0), (2, 0), (0, 1), (0, 2), (3, 2)] {
            let config = LcpConfig::new()
                .with_stop_after(stop_after)
                .with_max_depth(max_depth);

            let mut trace = Vec::new();
            let mut search = LemkeSearch::new(&config);
            search
                .run_with_callback(battle_of_the_sexes(), |e| trace.push(*e))
                .unwrap();

            let mut expected_trace = Vec::new();
            let mut expected = Vec::new();
            recursive(
                stop_after,
                max_depth,
                0,
                battle_of_the_sexes(),
                &mut expected,
                0,
                &mut expected_trace,
            );

            assert_eq!(trace, expected_trace, "caps ({}, {})", stop_after, max_depth);
            assert_eq!(search.solutions(), expected.as_slice());
        }
    }

    #[test]
    fn test_depth_cap() {
        let config = LcpConfig::new().with_max_depth(1);
        let mut search = LemkeSearch::new(&config);
        search.run(battle_of_the_sexes()).unwrap();
        assert!(search.stats().depth_cutoffs > 0);
        assert!(search.stats().max_depth_reached <= 2);
    }

    #[test]
    fn test_solution_cap() {
        let config = LcpConfig::new().with_stop_after(1);
        let mut search = LemkeSearch::new(&config);
        search.run(battle_of_the_sexes()).unwrap();
        // The origin plus at most one more before expansion stops.
        assert!(search.solutions().len() <= 2);
    }

    #[test]
    fn test_zero_game_terminates() {
        let zeros = vec![vec![0.0; 3]; 3];
        let mut search = LemkeSearch::new(&LcpConfig::default());
        search.run(tableau(&zeros, &zeros)).unwrap();
        assert!(search.solutions().len() >= 2);
    }

    #[test]
    fn test_single_path() {
        let mut search = LemkeSearch::new(&LcpConfig::single());
        search.single_path(battle_of_the_sexes()).unwrap();
        assert_eq!(search.solutions().len(), 1);
        assert_eq!(search.solutions()[0].basic_indices(), vec![1, 3]);
    }
}
