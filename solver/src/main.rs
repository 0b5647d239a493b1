// Flood-It solver
//
// Reads a puzzle from stdin: the row count n, column count m and palette size c,
// followed by the n*m tile colors (1..=c) in row-major order.
// Prints the number of moves, then the moves themselves.
//
// Usage:
//   solver [options] < puzzle.txt
//
// Options:
//   --config <path>            Path to Solver.toml (default: Solver.toml)
//   --seed <n>                 Override search.seed
//   --iterations <n>           Override search.iterations
//   --neighborhood <four|eight> Override board.neighborhood

use std::env;
use std::io::{self, Read};
use std::num::NonZero;
use std::process;

use anyhow::{anyhow, bail, ensure, Context, Result};
use floodit::builder::GridBuilder;
use floodit::{Board, Builder, Color, Neighborhood};
use log::info;

mod config;

use config::SolverConfig;

fn print_usage() {
    eprintln!("Flood-It Solver");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  solver [OPTIONS] < puzzle.txt");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>              Path to Solver.toml (default: Solver.toml)");
    eprintln!("  --seed <n>                   Seed of the search's random stream");
    eprintln!("  --iterations <n>             Number of search iterations (at least 1)");
    eprintln!("  --neighborhood <four|eight>  Whether diagonal tiles touch");
    eprintln!("  --help                       Show this help message");
    eprintln!();
    eprintln!("INPUT:");
    eprintln!("  n m c, then n rows of m colors between 1 and c, whitespace separated");
}

#[derive(Debug, Default)]
struct Options {
    config_path: Option<String>,
    seed: Option<u64>,
    iterations: Option<usize>,
    neighborhood: Option<String>,
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1)
            .ok_or_else(|| anyhow!("{} requires an argument", flag));

        match flag {
            "--config" => options.config_path = Some(value?.clone()),
            "--seed" => options.seed = Some(value?.parse().with_context(|| format!("invalid seed '{}'", args[i + 1]))?),
            "--iterations" => options.iterations = Some(value?.parse().with_context(|| format!("invalid iteration count '{}'", args[i + 1]))?),
            "--neighborhood" => options.neighborhood = Some(value?.clone()),
            _ => bail!("unknown option '{}'", flag),
        }
        i += 2;
    }

    Ok(options)
}

/// Parse `n m c` and the color grid, returning the palette size and the rows
fn parse_puzzle(input: &str) -> Result<(NonZero<Color>, Vec<Vec<Color>>)> {
    let mut tokens = input.split_whitespace()
        .map(|token| token.parse::<usize>().with_context(|| format!("expected a number, found '{}'", token)));
    let mut next = |what: &str| tokens.next()
        .unwrap_or_else(|| Err(anyhow!("input ended before {}", what)));

    let n = next("the row count")?;
    let m = next("the column count")?;
    let c = NonZero::new(next("the color count")?)
        .ok_or_else(|| anyhow!("the palette needs at least one color"))?;
    ensure!(n > 0 && m > 0, "the board must have at least one row and one column");

    let mut rows = Vec::with_capacity(n);
    for y in 0..n {
        let mut row = Vec::with_capacity(m);
        for _ in 0..m {
            row.push(next(&format!("the end of row {}", y))?);
        }
        rows.push(row);
    }

    Ok((c, rows))
}

fn run(args: &[String]) -> Result<()> {
    let options = parse_options(args)?;

    let mut config = match &options.config_path {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::load_or_default(),
    };
    if let Some(seed) = options.seed {
        config.search.seed = seed;
    }
    if let Some(iterations) = options.iterations {
        config.search.iterations = iterations;
    }
    if let Some(neighborhood) = options.neighborhood {
        config.board.neighborhood = neighborhood;
    }

    let search = config.search_config()?;
    let neighborhood: Neighborhood = config.neighborhood()?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input).context("failed to read puzzle from stdin")?;
    let (colors, rows) = parse_puzzle(&input)?;

    let graph = GridBuilder::from_rows(colors, &rows)
        .neighborhood(neighborhood)
        .build()
        .map_err(|reasons| anyhow!("invalid puzzle: {}", reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")))?;
    info!("{}x{} board with {} colors compressed into {} regions", rows.len(), rows[0].len(), colors, graph.region_count());

    let mut board = Board::from(graph);
    let moves = board.solve(&search);
    ensure!(board.floods(&moves), "search returned a sequence which does not flood the board");

    println!("{}", moves.len());
    println!("{}", moves.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "));

    Ok(())
}

fn main() {
    // Default to 'info' unless RUST_LOG says otherwise
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
