//! Mixed strategy profiles and their output formats.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::games::StrategySupport;
use crate::lcp::bfs::Bfs;
use crate::lcp::scalar::Scalar;

/// Per-player probability vectors over the strategies of a support.
///
/// Each player's probabilities sum to one; profiles that would not are never
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedStrategyProfile<T> {
    probabilities: Vec<Vec<T>>,
    strategies: Vec<Vec<usize>>,
}

impl<T: Scalar> MixedStrategyProfile<T> {
    /// Normalize a two-player BFS into a profile.
    ///
    /// Labels `1..=n1` carry player 1's weights and `n1+1..=n1+n2` player
    /// 2's. Returns `None` if either player's weights sum to zero.
    pub fn from_bfs(support: &StrategySupport<'_>, bfs: &Bfs<T>) -> Option<Self> {
        let mut probabilities = Vec::with_capacity(2);
        let mut offset = 0;

        for player in 0..2 {
            let n = support.num_strategies(player);
            let labels = offset + 1..=offset + n;
            let sum = bfs.sum_over(labels.clone());
            if sum.is_zero() {
                return None;
            }

            probabilities.push(
                labels
                    .map(|label| match bfs.get(label) {
                        Some(value) => value.clone() / sum.clone(),
                        None => T::zero(),
                    })
                    .collect(),
            );
            offset += n;
        }

        Some(Self {
            probabilities,
            strategies: (0..2).map(|p| support.strategies(p).to_vec()).collect(),
        })
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.probabilities.len()
    }

    /// Probabilities of `player`, in support order.
    pub fn player(&self, player: usize) -> &[T] {
        &self.probabilities[player]
    }

    /// Game strategy indices matching [`player`](Self::player).
    pub fn strategies(&self, player: usize) -> &[usize] {
        &self.strategies[player]
    }

    /// Total number of strategies across players.
    pub fn len(&self) -> usize {
        self.probabilities.iter().map(Vec::len).sum()
    }

    /// True if no strategy is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All probabilities, player by player in strategy order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.probabilities.iter().flatten()
    }

    /// Sum of each player's probabilities.
    pub fn sums(&self) -> Vec<T> {
        self.probabilities
            .iter()
            .map(|p| p.iter().fold(T::zero(), |acc, v| acc + v.clone()))
            .collect()
    }

    /// Render as `label,v1,v2,...`.
    pub fn to_csv_line(&self, label: &str, decimals: usize) -> String {
        let mut line = label.to_string();
        for value in self.iter() {
            line.push(',');
            line.push_str(&value.render(decimals));
        }
        line
    }

    /// Structured form for JSON reports.
    pub fn to_record(&self, support: &StrategySupport<'_>, decimals: usize) -> ProfileRecord {
        let game = support.game();
        let players = self
            .probabilities
            .iter()
            .zip(self.strategies.iter())
            .enumerate()
            .map(|(p, (probs, indices))| PlayerRecord {
                name: game.player(p).name.clone(),
                strategies: indices
                    .iter()
                    .map(|&s| game.player(p).strategies[s].clone())
                    .collect(),
                probabilities: probs.iter().map(Scalar::as_f64).collect(),
                display: probs.iter().map(|v| v.render(decimals)).collect(),
            })
            .collect();

        ProfileRecord { players }
    }
}

/// One player's part of a [`ProfileRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player name.
    pub name: String,
    /// Strategy names, in support order.
    pub strategies: Vec<String>,
    /// Probabilities as floating point.
    pub probabilities: Vec<f64>,
    /// Probabilities as rendered for display (exact for rationals).
    pub display: Vec<String>,
}

/// Serializable form of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Per-player strategy weights.
    pub players: Vec<PlayerRecord>,
}

/// Write one `label,v1,...` line per profile.
pub fn write_profiles<T: Scalar, W: Write>(
    writer: &mut W,
    label: &str,
    profiles: &[MixedStrategyProfile<T>],
    decimals: usize,
) -> io::Result<()> {
    for profile in profiles {
        writeln!(writer, "{}", profile.to_csv_line(label, decimals))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::classic;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_from_bfs_normalizes() {
        let game = classic::battle_of_the_sexes();
        let support = StrategySupport::full(&game);
        let mut bfs = Bfs::new();
        bfs.define(1, rat(2, 5));
        bfs.define(2, rat(1, 5));
        bfs.define(3, rat(1, 5));
        bfs.define(4, rat(2, 5));

        let profile = MixedStrategyProfile::from_bfs(&support, &bfs).unwrap();
        assert_eq!(profile.player(0), &[rat(2, 3), rat(1, 3)]);
        assert_eq!(profile.player(1), &[rat(1, 3), rat(2, 3)]);
        assert_eq!(profile.sums(), vec![rat(1, 1), rat(1, 1)]);
        assert_eq!(profile.len(), 4);
    }

    #[test]
    fn test_non_basic_strategies_are_zero() {
        let game = classic::battle_of_the_sexes();
        let support = StrategySupport::full(&game);
        let mut bfs = Bfs::new();
        bfs.define(1, 0.5);
        bfs.define(3, 1.0 / 3.0);

        let profile = MixedStrategyProfile::from_bfs(&support, &bfs).unwrap();
        assert_eq!(profile.player(0), &[1.0, 0.0]);
        assert_eq!(profile.player(1), &[1.0, 0.0]);
    }

    #[test]
    fn test_zero_sum_for_either_player_is_rejected() {
        let game = classic::matching_pennies();
        let support = StrategySupport::full(&game);

        assert!(MixedStrategyProfile::<f64>::from_bfs(&support, &Bfs::new()).is_none());

        let mut only_player_one = Bfs::new();
        only_player_one.define(1, 0.5);
        assert!(MixedStrategyProfile::from_bfs(&support, &only_player_one).is_none());

        let mut only_player_two = Bfs::new();
        only_player_two.define(4, 0.5);
        assert!(MixedStrategyProfile::from_bfs(&support, &only_player_two).is_none());

        let mut zero_weight = Bfs::new();
        zero_weight.define(1, 0.5);
        zero_weight.define(3, 0.0);
        assert!(MixedStrategyProfile::from_bfs(&support, &zero_weight).is_none());
    }

    #[test]
    fn test_csv_rendering() {
        let game = classic::matching_pennies();
        let support = StrategySupport::full(&game);
        let mut bfs = Bfs::new();
        for label in 1..=4 {
            bfs.define(label, rat(1, 4));
        }
        let exact = MixedStrategyProfile::from_bfs(&support, &bfs).unwrap();
        assert_eq!(exact.to_csv_line("NE", 4), "NE,1/2,1/2,1/2,1/2");

        let mut float_bfs = Bfs::new();
        for label in 1..=4 {
            float_bfs.define(label, 0.25);
        }
        let float = MixedStrategyProfile::from_bfs(&support, &float_bfs).unwrap();
        assert_eq!(float.to_csv_line("NE", 3), "NE,0.500,0.500,0.500,0.500");

        let mut out = Vec::new();
        write_profiles(&mut out, "NE", &[float.clone(), float], 1).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "NE,0.5,0.5,0.5,0.5\nNE,0.5,0.5,0.5,0.5\n");
    }

    #[test]
    fn test_record_uses_names() {
        let game = classic::prisoners_dilemma();
        let support = StrategySupport::full(&game);
        let mut bfs = Bfs::new();
        bfs.define(2, 0.5);
        bfs.define(4, 0.5);
        let record = MixedStrategyProfile::from_bfs(&support, &bfs)
            .unwrap()
            .to_record(&support, 2);

        assert_eq!(record.players[0].name, "Row");
        assert_eq!(record.players[1].strategies, vec!["Cooperate", "Defect"]);
        assert_eq!(record.players[1].probabilities, vec![0.0, 1.0]);
        assert_eq!(record.players[0].display, vec!["0.00", "1.00"]);
    }
}
