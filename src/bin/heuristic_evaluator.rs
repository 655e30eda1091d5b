use anyhow::{bail, Result};
use clap::Parser;
use four_knights_solver::engine::MIN_BOARD_SIZE;
use four_knights_solver::heuristics::validate_admissibility;
use four_knights_solver::scenarios::{Scenario, DEFAULT_SEED};
use four_knights_solver::solver::{solve_best_first, solve_bounded, SearchOutcome};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Checks the heuristic against exact knight distances", long_about = None)]
struct Args {
    /// Smallest board size to validate
    #[clap(long, default_value_t = MIN_BOARD_SIZE)]
    min_size: usize,

    /// Largest board size to validate
    #[clap(long, default_value_t = 6)]
    max_size: usize,

    /// Random scenarios to solve with both searches
    #[clap(long, default_value_t = 20)]
    scenarios: u64,

    /// Board size of the random scenarios
    #[clap(long, default_value_t = 3)]
    scenario_size: usize,
}

/// Moves by which the best-first path exceeds the branch and bound path,
/// if both searches found one and best-first's is longer.
fn excess_moves(best_first: &SearchOutcome, bounded: &SearchOutcome) -> Option<usize> {
    match (best_first.moves(), bounded.moves()) {
        (Some(a), Some(b)) if a > b => Some(a - b),
        _ => None,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("--- Distance estimate vs exact knight distance ---");
    let mut admissible = true;
    for size in args.min_size..=args.max_size {
        let report = validate_admissibility(size);
        println!(
            "Board {}x{}: {:<5} pairs checked, {:<5} exact, {:<3} unreachable, {} overestimates",
            size,
            size,
            report.pairs_checked,
            report.exact_matches,
            report.unreachable_pairs,
            report.overestimates.len()
        );
        for over in &report.overestimates {
            eprintln!(
                "  {} -> {}: estimate {} > exact {}",
                over.from, over.to, over.estimate, over.exact
            );
        }
        admissible &= report.is_admissible();
    }

    println!(
        "\n--- Best-first vs branch and bound on {} random {}x{} scenarios ---",
        args.scenarios, args.scenario_size, args.scenario_size
    );
    let mut longer = 0;
    for offset in 0..args.scenarios {
        let seed = DEFAULT_SEED + offset;
        let scenario = Scenario::random_with_seed(args.scenario_size, seed)?;
        let best_first = solve_best_first(&scenario.start, &scenario.goal);
        let bounded = solve_bounded(&scenario.start, &scenario.goal);

        let describe = |moves: Option<usize>| {
            moves.map_or("no path".to_string(), |m| m.to_string())
        };
        println!(
            "  Seed {:<8}: best-first {:<8} branch and bound {:<8} (expanded {} vs {})",
            seed,
            describe(best_first.moves()),
            describe(bounded.moves()),
            best_first.stats().expanded,
            bounded.stats().expanded
        );
        if let Some(extra) = excess_moves(&best_first, &bounded) {
            log::warn!("seed {}: best-first path is {} moves longer than optimal", seed, extra);
            longer += 1;
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Scenarios where best-first was beaten: {}", longer);
    if !admissible {
        bail!("the distance estimate overestimates on at least one board size");
    }
    Ok(())
}
