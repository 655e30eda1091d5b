use anyhow::{Context, Result};
use clap::Parser;
use four_knights_solver::scenarios::{Scenario, DEFAULT_SEED};
use four_knights_solver::solver::{solve, Algorithm, SearchOutcome};
use four_knights_solver::utils::render_path;
use std::io::Write;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Run only the heuristic best-first search
    #[clap(short = 'a', long, conflicts_with = "bounded_only")]
    heuristic_only: bool,

    /// Run only the branch and bound search
    #[clap(short = 'b', long)]
    bounded_only: bool,

    /// Board size of the preset corner-swap puzzle (3, 4 or 5)
    #[clap(short, long, default_value_t = 3)]
    scenario: usize,

    /// Use a random scenario on an N x N board instead of a preset
    #[clap(short, long, value_name = "N")]
    random: Option<usize>,

    /// Seed for the random scenario
    #[clap(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Do not print the boards along each path
    #[clap(short, long)]
    quiet: bool,

    /// Log search progress
    #[clap(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level);
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn load_scenario(args: &Args) -> Result<Scenario> {
    match args.random {
        Some(size) => Scenario::random_with_seed(size, args.seed)
            .with_context(|| format!("Failed to build a random {}x{} scenario", size, size)),
        None => Scenario::preset(args.scenario)
            .with_context(|| format!("Failed to load preset {}", args.scenario)),
    }
}

fn run(algorithm: Algorithm, scenario: &Scenario, quiet: bool) -> SearchOutcome {
    let started = Instant::now();
    let outcome = solve(algorithm, &scenario.start, &scenario.goal);
    let elapsed = started.elapsed();

    match &outcome {
        SearchOutcome::Found(solution) => {
            println!(
                "{} Solution: ({} moves!) (Runtime: {:.5}s)",
                algorithm,
                solution.moves(),
                elapsed.as_secs_f64()
            );
            if !quiet {
                print!("{}", render_path(&solution.path));
            }
        }
        SearchOutcome::NoPath(_) => {
            println!("{}: no path found (Runtime: {:.5}s)", algorithm, elapsed.as_secs_f64());
        }
    }
    let stats = outcome.stats();
    log::info!(
        "{}: expanded {}, generated {}, closed {}, max open {}",
        algorithm,
        stats.expanded,
        stats.generated,
        stats.closed,
        stats.max_open
    );

    outcome
}

fn compare(best_first: &SearchOutcome, bounded: &SearchOutcome) {
    match (best_first.moves(), bounded.moves()) {
        (Some(a), Some(b)) if a > b => {
            println!("{} path wins by {} moves!", Algorithm::Bounded, a - b)
        }
        (Some(a), Some(b)) if a < b => {
            println!("{} path wins by {} moves!", Algorithm::BestFirst, b - a)
        }
        (Some(_), Some(_)) => println!("Equally optimal paths found by both algorithms!"),
        (None, None) => println!("Neither algorithm found a path."),
        (Some(_), None) => println!("Only {} found a path!", Algorithm::BestFirst),
        (None, Some(_)) => println!("Only {} found a path!", Algorithm::Bounded),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scenario = load_scenario(&args)?;
    println!("Start:\n{}", scenario.start);
    println!("Goal:\n{}", scenario.goal);

    if args.heuristic_only {
        run(Algorithm::BestFirst, &scenario, args.quiet);
    } else if args.bounded_only {
        run(Algorithm::Bounded, &scenario, args.quiet);
    } else {
        let best_first = run(Algorithm::BestFirst, &scenario, args.quiet);
        let bounded = run(Algorithm::Bounded, &scenario, args.quiet);
        compare(&best_first, &bounded);
    }

    Ok(())
}
