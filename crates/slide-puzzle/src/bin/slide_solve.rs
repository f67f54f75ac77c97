use std::collections::VecDeque;
use std::process;
use std::time::Instant;

use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use slide_puzzle::{Algorithm, Geometry, PuzzleError, Scrambler, State, Step};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve a sliding-tile puzzle", long_about = None)]
struct Args {
    #[clap(long, default_value_t = 3)]
    rows: usize,

    #[clap(long, default_value_t = 3)]
    columns: usize,

    /// Starting board, e.g. "012345687" or "1,0,3,2". Scrambled when absent.
    #[clap(long)]
    board: Option<String>,

    /// Goal board; the ordered board with the empty cell last by default.
    #[clap(long)]
    goal: Option<String>,

    /// Random slides played back from the goal when no board is given.
    #[clap(long, default_value_t = 20)]
    scramble: usize,

    /// Seed for the scrambler.
    #[clap(long)]
    seed: Option<u64>,

    /// Solver to run; every solver when absent.
    #[clap(long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Heuristic weight for A*.
    #[clap(long, default_value_t = 10)]
    weight: u32,

    /// Print a JSON report instead of text.
    #[clap(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    rows: usize,
    columns: usize,
    start: Vec<u8>,
    goal: Vec<u8>,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    algorithm: Algorithm,
    found: bool,
    visited: usize,
    elapsed_ms: f64,
    steps: Vec<Step>,
}

fn load(geometry: Geometry, text: &str) -> Result<State, PuzzleError> {
    Ok(State::parse(geometry, text)?)
}

fn run(args: Args) -> Result<(), PuzzleError> {
    let geometry = Geometry::new(args.rows, args.columns)?;
    let goal = match &args.goal {
        Some(text) => load(geometry, text)?,
        None => geometry.solved(),
    };
    let start = match &args.board {
        Some(text) => load(geometry, text)?,
        None => {
            let mut scrambler = match args.seed {
                Some(seed) => Scrambler::from_u64(seed),
                None => Scrambler::new(None),
            };
            info!("scramble seed {:02x?}", scrambler.seed);
            scrambler.walk_from(&goal, args.scramble)
        }
    };

    if !start.is_solvable_towards(&goal) {
        warn!("start board cannot reach the goal; searches will exhaust");
    }

    let algorithms = match args.algorithm {
        Some(one) => vec![one],
        None => Algorithm::ALL.to_vec(),
    };

    let mut runs = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let mut solver = algorithm.build(args.weight);
        let mut steps = VecDeque::new();
        let timer = Instant::now();
        let outcome = solver.get_steps(&mut steps, &start, &goal)?;
        let elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0;
        info!("{} took {:.3} ms", solver.name(), elapsed_ms);

        if outcome.found {
            let mut check = start.clone();
            check.replay(&steps)?;
            debug_assert_eq!(check, goal);
        }
        runs.push(Run {
            algorithm,
            found: outcome.found,
            visited: outcome.visited,
            elapsed_ms,
            steps: steps.into_iter().collect(),
        });
    }

    let report = Report {
        rows: geometry.rows(),
        columns: geometry.columns(),
        start: start.tiles().to_vec(),
        goal: goal.tiles().to_vec(),
        runs,
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("failed to encode report: {err}"),
        }
    } else {
        print_text(geometry, &start, &goal, &report);
    }
    Ok(())
}

fn print_text(geometry: Geometry, start: &State, goal: &State, report: &Report) {
    println!("start:\n{start}\n");
    println!("goal:\n{goal}\n");
    for run in &report.runs {
        println!(
            "{:?}: found={} visited={} steps={} time={:.3} ms",
            run.algorithm,
            run.found,
            run.visited,
            run.steps.len(),
            run.elapsed_ms
        );
    }

    let shortest = report
        .runs
        .iter()
        .filter(|run| run.found)
        .min_by_key(|run| run.steps.len());
    let Some(best) = shortest else {
        println!("\nno solution");
        return;
    };
    println!("\nmoves ({:?}):", best.algorithm);
    for (i, step) in best.steps.iter().enumerate() {
        let (fr, fc) = geometry.pair(step.from);
        let (tr, tc) = geometry.pair(step.to);
        println!("  {:>3}: empty ({fr}, {fc}) -> ({tr}, {tc})", i + 1);
    }
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("slide-solve: {err}");
        process::exit(1);
    }
}
