//! N-player strategic-form games with exact payoffs.

use std::fs;
use std::path::Path;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{pow, Zero};
use serde::{Deserialize, Serialize};

use super::GameError;

/// A player and the names of their pure strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Pure strategy names, in strategy order.
    pub strategies: Vec<String>,
}

impl Player {
    /// Create a player with the given strategy names.
    pub fn new(name: &str, strategies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            strategies: strategies.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a player with strategies named `1..=count`.
    pub fn numbered(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            strategies: (1..=count).map(|i| i.to_string()).collect(),
        }
    }
}

/// A payoff as written in a game file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PayoffValue {
    Number(serde_json::Number),
    Text(String),
}

impl PayoffValue {
    fn to_rational(&self) -> Result<BigRational, GameError> {
        match self {
            PayoffValue::Number(n) => parse_payoff(&n.to_string()),
            PayoffValue::Text(s) => parse_payoff(s),
        }
    }
}

/// On-disk layout of a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameFile {
    #[serde(default)]
    title: String,
    players: Vec<Player>,
    payoffs: Vec<Vec<PayoffValue>>,
}

/// Parse a payoff written as an integer, a fraction (`"-2/3"`) or a decimal
/// (`"0.25"`, `"1e-2"`). Decimals convert exactly: `"0.1"` is `1/10`.
pub fn parse_payoff(text: &str) -> Result<BigRational, GameError> {
    let text = text.trim();
    let invalid = || GameError::Parse(format!("invalid payoff '{}'", text));

    if text.contains('/') {
        return text
            .parse::<BigRational>()
            .map_err(|e| GameError::Parse(format!("invalid payoff '{}': {}", text, e)));
    }

    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => {
            let exponent: i32 = text[pos + 1..].parse().map_err(|_| invalid())?;
            (&text[..pos], exponent)
        }
        None => (text, 0),
    };
    if exponent.unsigned_abs() > 1000 {
        return Err(invalid());
    }

    let (negative, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{}{}", whole, fraction);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut numer: BigInt = digits.parse().map_err(|_| invalid())?;
    if negative {
        numer = -numer;
    }
    let ten = BigInt::from(10);
    let mut denom: BigInt = pow(ten.clone(), fraction.len());
    if exponent >= 0 {
        numer *= pow(ten, exponent as usize);
    } else {
        denom *= pow(ten, exponent.unsigned_abs() as usize);
    }

    Ok(BigRational::new(numer, denom))
}

/// A game in strategic (normal) form.
///
/// Payoffs are stored exactly, one row per pure profile, in lexicographic
/// profile order with the first player's strategy varying slowest.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategicGame {
    title: String,
    players: Vec<Player>,
    payoffs: Vec<Vec<BigRational>>,
}

impl StrategicGame {
    /// Create a game, validating that the payoff table matches the players.
    pub fn new(
        title: &str,
        players: Vec<Player>,
        payoffs: Vec<Vec<BigRational>>,
    ) -> Result<Self, GameError> {
        let game = Self {
            title: title.to_string(),
            players,
            payoffs,
        };
        game.validate()?;
        Ok(game)
    }

    /// Create a two-player game from integer payoff matrices.
    ///
    /// `a[i][j]` and `b[i][j]` are the payoffs of the row and column player
    /// when row plays `i` and column plays `j`.
    pub fn bimatrix(title: &str, a: &[Vec<i64>], b: &[Vec<i64>]) -> Result<Self, GameError> {
        let n1 = a.len();
        let n2 = a.first().map_or(0, Vec::len);
        if b.len() != n1 || a.iter().chain(b.iter()).any(|row| row.len() != n2) {
            return Err(GameError::InvalidGame(
                "payoff matrices must both be rectangular and equally sized".to_string(),
            ));
        }

        let mut payoffs = Vec::with_capacity(n1 * n2);
        for i in 0..n1 {
            for j in 0..n2 {
                payoffs.push(vec![
                    BigRational::from_integer(BigInt::from(a[i][j])),
                    BigRational::from_integer(BigInt::from(b[i][j])),
                ]);
            }
        }

        Self::new(
            title,
            vec![Player::numbered("Player 1", n1), Player::numbered("Player 2", n2)],
            payoffs,
        )
    }

    /// Load a game from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GameError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a game from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let file: GameFile =
            serde_json::from_str(json).map_err(|e| GameError::Parse(e.to_string()))?;
        let payoffs = file
            .payoffs
            .iter()
            .map(|row| row.iter().map(PayoffValue::to_rational).collect())
            .collect::<Result<Vec<Vec<BigRational>>, GameError>>()?;
        Self::new(&file.title, file.players, payoffs)
    }

    /// Serialize to JSON, writing payoffs as exact strings.
    pub fn to_json_string(&self) -> Result<String, GameError> {
        let file = GameFile {
            title: self.title.clone(),
            players: self.players.clone(),
            payoffs: self
                .payoffs
                .iter()
                .map(|row| row.iter().map(|v| PayoffValue::Text(v.to_string())).collect())
                .collect(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| GameError::Parse(e.to_string()))
    }

    fn validate(&self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::InvalidGame("game has no players".to_string()));
        }
        if let Some(p) = self.players.iter().find(|p| p.strategies.is_empty()) {
            return Err(GameError::InvalidGame(format!(
                "player '{}' has no strategies",
                p.name
            )));
        }

        let profiles: usize = self.players.iter().map(|p| p.strategies.len()).product();
        if self.payoffs.len() != profiles {
            return Err(GameError::InvalidGame(format!(
                "expected {} payoff entries, found {}",
                profiles,
                self.payoffs.len()
            )));
        }
        if let Some(row) = self.payoffs.iter().find(|r| r.len() != self.players.len()) {
            return Err(GameError::InvalidGame(format!(
                "payoff entry has {} values for {} players",
                row.len(),
                self.players.len()
            )));
        }

        Ok(())
    }

    /// Title of the game.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// A player (0-indexed).
    pub fn player(&self, player: usize) -> &Player {
        &self.players[player]
    }

    /// All players.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of pure strategies of `player`.
    pub fn num_strategies(&self, player: usize) -> usize {
        self.players[player].strategies.len()
    }

    /// Payoff to `player` at a pure profile (one strategy index per player).
    pub fn payoff(&self, profile: &[usize], player: usize) -> &BigRational {
        debug_assert_eq!(profile.len(), self.players.len());
        let index = profile
            .iter()
            .zip(self.players.iter())
            .fold(0, |acc, (&s, p)| acc * p.strategies.len() + s);
        &self.payoffs[index][player]
    }

    /// True if every payoff of every player is zero.
    pub fn is_trivial(&self) -> bool {
        self.payoffs.iter().flatten().all(Zero::is_zero)
    }
}
