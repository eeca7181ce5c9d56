//! Restriction of a game to a subset of strategies per player.

use num_rational::BigRational;

use super::{GameError, StrategicGame};

/// An ordered per-player subset of a game's strategies.
///
/// Supports are immutable once built; [`StrategySupport::restrict`] returns
/// a new support.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySupport<'g> {
    game: &'g StrategicGame,
    strategies: Vec<Vec<usize>>,
}

impl<'g> StrategySupport<'g> {
    /// Support containing every strategy of every player.
    pub fn full(game: &'g StrategicGame) -> Self {
        Self {
            game,
            strategies: (0..game.num_players())
                .map(|p| (0..game.num_strategies(p)).collect())
                .collect(),
        }
    }

    /// Keep only `strategies` (game indices) for `player`.
    ///
    /// The indices are sorted and deduplicated so the support stays in game
    /// strategy order.
    pub fn restrict(&self, player: usize, strategies: &[usize]) -> Result<Self, GameError> {
        if player >= self.game.num_players() {
            return Err(GameError::InvalidSupport(format!(
                "player {} does not exist ({} players)",
                player,
                self.game.num_players()
            )));
        }
        if strategies.is_empty() {
            return Err(GameError::InvalidSupport(format!(
                "player {} must keep at least one strategy",
                player
            )));
        }
        if let Some(&s) = strategies
            .iter()
            .find(|&&s| s >= self.game.num_strategies(player))
        {
            return Err(GameError::InvalidSupport(format!(
                "player {} has no strategy {}",
                player, s
            )));
        }

        let mut kept = strategies.to_vec();
        kept.sort_unstable();
        kept.dedup();

        let mut restricted = self.clone();
        restricted.strategies[player] = kept;
        Ok(restricted)
    }

    /// The underlying game.
    pub fn game(&self) -> &'g StrategicGame {
        self.game
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.strategies.len()
    }

    /// Number of strategies `player` keeps.
    pub fn num_strategies(&self, player: usize) -> usize {
        self.strategies[player].len()
    }

    /// Total number of kept strategies across players.
    pub fn total_strategies(&self) -> usize {
        self.strategies.iter().map(Vec::len).sum()
    }

    /// Game index of the `j`-th kept strategy of `player`.
    pub fn strategy(&self, player: usize, j: usize) -> usize {
        self.strategies[player][j]
    }

    /// Kept strategies of `player`, as game indices.
    pub fn strategies(&self, player: usize) -> &[usize] {
        &self.strategies[player]
    }

    /// Payoff to `player` at a profile given in support indices.
    pub fn payoff(&self, player: usize, profile: &[usize]) -> &'g BigRational {
        let pure: Vec<usize> = profile
            .iter()
            .enumerate()
            .map(|(p, &j)| self.strategies[p][j])
            .collect();
        self.game.payoff(&pure, player)
    }
}
