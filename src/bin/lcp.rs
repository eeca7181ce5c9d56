//! Lemke-Howson equilibrium finder.
//!
//! Usage:
//!   cargo run --release --bin lcp -- [OPTIONS] [GAMES]...
//!
//! Every equilibrium found is printed as `NE,p1,...,pn` with player 1's
//! probabilities first. Several game files are solved in parallel and
//! reported in the order given.
//!
//! Examples:
//!   lcp --demo battle-of-the-sexes --rational
//!   lcp --stop-after 1 --decimals 4 game.json
//!   lcp --restrict 0:0,2 --json --stats game.json

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};
use num_rational::BigRational;
use rayon::prelude::*;
use serde::Serialize;

use lemke_howson::games::{classic, GameError, StrategicGame, StrategySupport};
use lemke_howson::lcp::{
    write_profiles, LcpConfig, LcpError, LcpSolver, ProfileRecord, Scalar, SolveStats,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Nash equilibria of two-player games by Lemke-Howson pivoting", long_about = None)]
struct Args {
    /// Game files in JSON format
    games: Vec<PathBuf>,

    /// Built-in game to solve (repeatable)
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(classic::NAMES))]
    demo: Vec<String>,

    /// Configuration JSON file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many equilibria (0 = no limit, 1 = single path)
    #[arg(long)]
    stop_after: Option<usize>,

    /// Maximum Lemke path depth of the search (0 = no limit)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Pivot budget of a single Lemke path
    #[arg(long)]
    max_pivots: Option<usize>,

    /// Decimal places for floating point output
    #[arg(short, long)]
    decimals: Option<usize>,

    /// Pivot in exact rational arithmetic
    #[arg(short, long)]
    rational: bool,

    /// Restrict a player's strategies, as `player:i,j,...` (0-based, repeatable)
    #[arg(long, value_parser = parse_restriction)]
    restrict: Vec<Restriction>,

    /// Print JSON reports instead of CSV lines
    #[arg(long)]
    json: bool,

    /// Report search statistics
    #[arg(long)]
    stats: bool,
}

#[derive(Debug, Clone)]
struct Restriction {
    player: usize,
    strategies: Vec<usize>,
}

fn parse_restriction(text: &str) -> Result<Restriction, String> {
    let (player, list) = text
        .split_once(':')
        .ok_or_else(|| format!("expected player:i,j,... but got '{}'", text))?;
    let player = player
        .trim()
        .parse()
        .map_err(|e| format!("bad player index '{}': {}", player, e))?;
    let strategies = list
        .split(',')
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|e| format!("bad strategy index '{}': {}", s, e))
        })
        .collect::<Result<Vec<usize>, String>>()?;
    Ok(Restriction { player, strategies })
}

/// A game to solve, tagged with where it came from.
struct Input {
    name: String,
    game: Result<StrategicGame, GameError>,
}

#[derive(Serialize)]
struct GameReport {
    source: String,
    title: String,
    profiles: Vec<ProfileRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SolveStats>,
}

#[derive(Debug)]
enum RunError {
    Game(GameError),
    Lcp(LcpError),
    Output(String),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Game(e) => write!(f, "{}", e),
            Self::Lcp(e) => write!(f, "{}", e),
            Self::Output(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl From<GameError> for RunError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

impl From<LcpError> for RunError {
    fn from(e: LcpError) -> Self {
        Self::Lcp(e)
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
    debug!("Solver configuration: {:?}", config);

    let inputs: Vec<Input> = args
        .demo
        .iter()
        .map(|name| Input {
            name: name.clone(),
            game: classic::by_name(name)
                .ok_or_else(|| GameError::InvalidGame(format!("unknown demo '{}'", name))),
        })
        .chain(args.games.iter().map(|path| Input {
            name: path.display().to_string(),
            game: StrategicGame::from_json_file(path),
        }))
        .collect();

    if inputs.is_empty() {
        eprintln!("Error: no games given; pass JSON files or --demo <name>");
        process::exit(2);
    }

    let progress = if inputs.len() > 1 {
        let bar = ProgressBar::new(inputs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    // Solve in parallel; collect keeps input order
    let results: Vec<(String, Result<String, RunError>)> = inputs
        .par_iter()
        .map(|input| {
            let result = solve_input(input, &args, &config);
            progress.inc(1);
            progress.set_message(input.name.clone());
            (input.name.clone(), result)
        })
        .collect();
    progress.finish_and_clear();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;
    for (name, result) in results {
        match result {
            Ok(text) => {
                if let Err(e) = out.write_all(text.as_bytes()) {
                    error!("Failed to write output: {}", e);
                    process::exit(1);
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error in {}: {}", name, e);
            }
        }
    }

    if failures > 0 {
        process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<LcpConfig, String> {
    let mut config = match &args.config {
        Some(path) => LcpConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => LcpConfig::default(),
    };

    if let Some(stop_after) = args.stop_after {
        config = config.with_stop_after(stop_after);
    }
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    if let Some(max_pivots) = args.max_pivots {
        config = config.with_max_pivots(max_pivots);
    }
    if let Some(decimals) = args.decimals {
        config = config.with_decimals(decimals);
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn solve_input(input: &Input, args: &Args, config: &LcpConfig) -> Result<String, RunError> {
    let game = input.game.as_ref().map_err(|e| RunError::Game(e.clone()))?;

    let mut support = StrategySupport::full(game);
    for restriction in &args.restrict {
        support = support.restrict(restriction.player, &restriction.strategies)?;
    }

    if args.rational {
        report::<BigRational>(input, &support, args, config)
    } else {
        report::<f64>(input, &support, args, config)
    }
}

fn report<T: Scalar>(
    input: &Input,
    support: &StrategySupport<'_>,
    args: &Args,
    config: &LcpConfig,
) -> Result<String, RunError> {
    let mut solver = LcpSolver::<T>::new(config.clone());
    let profiles = solver.solve(support)?;
    let stats = solver.stats().clone();

    if args.json {
        let report = GameReport {
            source: input.name.clone(),
            title: support.game().title().to_string(),
            profiles: profiles
                .iter()
                .map(|p| p.to_record(support, config.decimals))
                .collect(),
            stats: args.stats.then_some(stats),
        };
        let mut text =
            serde_json::to_string_pretty(&report).map_err(|e| RunError::Output(e.to_string()))?;
        text.push('\n');
        return Ok(text);
    }

    let mut buffer = Vec::new();
    if args.games.len() + args.demo.len() > 1 {
        writeln!(buffer, "# {}", input.name).map_err(|e| RunError::Output(e.to_string()))?;
    }
    write_profiles(&mut buffer, "NE", &profiles, config.decimals)
        .map_err(|e| RunError::Output(e.to_string()))?;
    if args.stats {
        writeln!(
            buffer,
            "# nodes={} pivots={} duplicates={} capped={} depth_cutoffs={} max_depth={} candidates={} discarded={} elapsed={:.3}s",
            stats.nodes_visited,
            stats.pivots,
            stats.duplicates,
            stats.capped,
            stats.depth_cutoffs,
            stats.max_depth_reached,
            stats.candidates,
            stats.discarded,
            stats.elapsed_seconds
        )
        .map_err(|e| RunError::Output(e.to_string()))?;
    }

    String::from_utf8(buffer).map_err(|e| RunError::Output(e.to_string()))
}
