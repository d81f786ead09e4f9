use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use hive::rules::hive_is_connected;
use hive::{Game, GameState, GameStatus, Move, MoveError, Player, Rules};
use log::{debug, info};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Move generation benchmarks for the Hive rules engine",
    long_about = None
)]
struct Args {
    /// Number of worker threads (default: number of logical CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// Let tiles move before their owner's Queen is on the board
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    free_relocation: bool,

    /// Personal move by which the Queen must be placed
    #[arg(long, default_value_t = 4)]
    queen_deadline: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count move sequences from the opening position
    Perft {
        /// Deepest ply to count (every shallower depth is reported too)
        #[arg(long, default_value_t = 4)]
        depth: u32,
    },
    /// Play random games and check the one hive rule after every move
    Playout {
        /// Number of games
        #[arg(long, default_value_t = 1000)]
        games: u64,

        /// Seed of the first game; game i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Stop a game after this many moves
        #[arg(long, default_value_t = 300)]
        max_moves: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("failed to build the worker pool")?;
    let rules = Rules::default()
        .with_relocation_requires_queen(!args.free_relocation)
        .with_queen_deadline(args.queen_deadline);

    println!("{}", "Hive Rules Engine - Benchmark Tool".bold());
    println!("====================================");
    println!("Threads: {}", threads);
    println!("Relocation requires Queen: {}", rules.relocation_requires_queen);
    println!("Queen deadline: move {}", rules.queen_deadline);
    println!("------------------------------------");

    #[cfg(debug_assertions)]
    println!(
        "{}",
        "WARNING: Running in debug mode. Performance will be significantly lower.\n\
         Use --release for accurate benchmarks.\n"
            .yellow()
    );

    match args.command {
        Command::Perft { depth } => pool.install(|| run_perft(rules, depth)),
        Command::Playout {
            games,
            seed,
            max_moves,
        } => pool.install(|| run_playouts(rules, games, seed, max_moves)),
    }
}

/// Perft with the root moves split across the worker pool
fn parallel_perft(game: &Game, depth: u32) -> Result<u64, MoveError> {
    if depth <= 1 {
        return game.perft(depth);
    }
    let counts = game
        .get_possible_moves()
        .par_iter()
        .map(|mv| game.after(mv)?.perft(depth - 1))
        .collect::<Result<Vec<u64>, MoveError>>()?;
    Ok(counts.into_iter().sum())
}

fn run_perft(rules: Rules, depth: u32) -> Result<()> {
    info!("perft from the opening to depth {}", depth);
    let game = Game::with_rules(rules);

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = parallel_perft(&game, d)
            .with_context(|| format!("perft({}) hit a refused move", d))?;
        let elapsed = start.elapsed();
        println!(
            "{} {:>14} nodes  {:>8.3}s  {}",
            format!("perft({})", d).as_str().cyan(),
            nodes,
            elapsed.as_secs_f64(),
            rate(nodes, elapsed, "nodes/s").as_str().green()
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct PlayoutResult {
    moves: usize,
    passes: usize,
    status: GameStatus,
}

/// One random game, failing if a move splits the hive or an offered move is refused
fn playout(rules: Rules, seed: u64, max_moves: usize) -> Result<PlayoutResult> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut game = Game::with_rules(rules);
    let mut passes = 0;

    while game.history().len() < max_moves && !game.is_terminal() {
        let moves = game.get_possible_moves();
        if moves.is_empty() {
            bail!("seed {}: no moves offered on turn {}", seed, game.turn_state().turn());
        }
        let mv = moves[rng.random_range(0..moves.len())];
        game.apply(&mv)
            .with_context(|| format!("seed {}: offered move {} was refused", seed, mv))?;
        if mv == Move::Pass {
            passes += 1;
        }
        if !hive_is_connected(game.board()) {
            bail!("seed {}: the hive split after {}\n{}", seed, mv, game);
        }
    }

    let status = game.status();
    debug!("seed {}: {:?} after {} moves", seed, status, game.history().len());
    Ok(PlayoutResult {
        moves: game.history().len(),
        passes,
        status,
    })
}

fn run_playouts(rules: Rules, games: u64, seed: u64, max_moves: usize) -> Result<()> {
    info!("{} random games from seed {}, at most {} moves each", games, seed, max_moves);

    let start = Instant::now();
    let results = (0..games)
        .into_par_iter()
        .map(|i| playout(rules, seed.wrapping_add(i), max_moves))
        .collect::<Result<Vec<_>>>()?;
    let elapsed = start.elapsed();

    let total_moves: usize = results.iter().map(|r| r.moves).sum();
    let passes: usize = results.iter().map(|r| r.passes).sum();
    let count = |status: GameStatus| results.iter().filter(|r| r.status == status).count();

    println!("{}", "Playouts".bold());
    println!("  Games:        {}", results.len());
    println!("  White wins:   {}", count(GameStatus::Won(Player::White)));
    println!("  Black wins:   {}", count(GameStatus::Won(Player::Black)));
    println!("  Draws:        {}", count(GameStatus::Draw));
    println!("  Unfinished:   {}", count(GameStatus::InProgress));
    println!("  Moves:        {} ({} passes)", total_moves, passes);
    println!("  Time:         {:.3}s", elapsed.as_secs_f64());
    println!("  Throughput:   {}", rate(total_moves as u64, elapsed, "moves/s").as_str().green());
    println!("{}", "One hive rule held after every move".green().bold());
    Ok(())
}

fn rate(count: u64, elapsed: Duration, unit: &str) -> String {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        format!("{:.0} {}", count as f64 / secs, unit)
    } else {
        format!("- {}", unit)
    }
}
