//! Reference games with known equilibria.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use rand::Rng;

use super::{Player, StrategicGame};

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "matching-pennies",
    "battle-of-the-sexes",
    "prisoners-dilemma",
    "zero",
    "three-player",
];

/// Matching pennies: unique equilibrium, both players mix 1/2-1/2.
pub fn matching_pennies() -> StrategicGame {
    two_by_two(
        "Matching Pennies",
        ["Heads", "Tails"],
        ["Heads", "Tails"],
        [[1, -1], [-1, 1]],
        [[-1, 1], [1, -1]],
    )
}

/// Battle of the sexes: two pure equilibria and one mixed (2/3, 1/3), (1/3, 2/3).
pub fn battle_of_the_sexes() -> StrategicGame {
    two_by_two(
        "Battle of the Sexes",
        ["Opera", "Football"],
        ["Opera", "Football"],
        [[2, 0], [0, 1]],
        [[1, 0], [0, 2]],
    )
}

/// Prisoner's dilemma: unique equilibrium (Defect, Defect).
pub fn prisoners_dilemma() -> StrategicGame {
    two_by_two(
        "Prisoner's Dilemma",
        ["Cooperate", "Defect"],
        ["Cooperate", "Defect"],
        [[3, 0], [5, 1]],
        [[3, 5], [0, 1]],
    )
}

/// Every payoff zero: maximally degenerate, every profile is an equilibrium.
///
/// # Panics
/// Panics if either dimension is zero.
pub fn zero_game(n1: usize, n2: usize) -> StrategicGame {
    let zeros = vec![vec![0; n2]; n1];
    StrategicGame::bimatrix("Zero", &zeros, &zeros)
        .expect("zero matrices are rectangular")
}

/// Three players with one strategy each and zero payoffs.
pub fn three_player_zero() -> StrategicGame {
    let players = vec![
        Player::numbered("Player 1", 1),
        Player::numbered("Player 2", 1),
        Player::numbered("Player 3", 1),
    ];
    StrategicGame::new("Three Player", players, vec![vec![BigRational::zero(); 3]])
        .expect("one profile with three payoffs")
}

/// Random bimatrix game with integer payoffs in `-10..=10`.
///
/// # Panics
/// Panics if either dimension is zero.
pub fn random_bimatrix<R: Rng>(n1: usize, n2: usize, rng: &mut R) -> StrategicGame {
    let mut draw = || -> Vec<Vec<i64>> {
        (0..n1)
            .map(|_| (0..n2).map(|_| rng.gen_range(-10..=10)).collect())
            .collect()
    };
    let a = draw();
    let b = draw();
    StrategicGame::bimatrix(&format!("Random {}x{}", n1, n2), &a, &b)
        .expect("generated matrices are rectangular")
}

/// Look up a reference game by name.
pub fn by_name(name: &str) -> Option<StrategicGame> {
    match name {
        "matching-pennies" => Some(matching_pennies()),
        "battle-of-the-sexes" => Some(battle_of_the_sexes()),
        "prisoners-dilemma" => Some(prisoners_dilemma()),
        "zero" => Some(zero_game(2, 2)),
        "three-player" => Some(three_player_zero()),
        _ => None,
    }
}

fn two_by_two(
    title: &str,
    row: [&str; 2],
    col: [&str; 2],
    a: [[i64; 2]; 2],
    b: [[i64; 2]; 2],
) -> StrategicGame {
    let payoffs = (0..2)
        .flat_map(|i| (0..2).map(move |j| vec![int(a[i][j]), int(b[i][j])]))
        .collect();
    StrategicGame::new(
        title,
        vec![Player::new("Row", &row), Player::new("Column", &col)],
        payoffs,
    )
    .expect("2x2 payoff table matches its players")
}

/// Integer payoff helper for tests and benches.
pub fn int(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}
