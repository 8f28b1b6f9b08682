//! Subcommand implementations.

use std::fmt;
use std::thread;
use std::time::Duration;

use mazewalk_core::{Maze, MazeError};
use mazewalk_search::{Algorithm, DiscoveryTree, SearchReport, compare, render, run_with};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::Serialize;

use crate::cli::{CompareArgs, RunArgs, TrialsArgs};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// The seed to use, drawing a fresh one when none was given.
fn pick_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(seed, "maze seed");
    seed
}

#[derive(Serialize)]
struct MazeInfo {
    rows: i32,
    cols: i32,
    density: f64,
    seed: u64,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    maze: &'a MazeInfo,
    report: &'a SearchReport,
}

/// `mazewalk run`
pub fn run(args: &RunArgs) -> CmdResult {
    let seed = pick_seed(args.output.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = Maze::generate(args.rows, args.cols, args.density, &mut rng)?;
    let mut tree = DiscoveryTree::new(maze.bounds());

    let delay = Duration::from_millis(args.delay);
    let report = run_with(
        args.algo,
        &maze,
        &mut tree,
        maze.start(),
        maze.target(),
        |search| {
            if args.display {
                println!("{}", render(search));
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
        },
    )?;

    if args.output.json {
        let info = MazeInfo {
            rows: args.rows,
            cols: args.cols,
            density: args.density,
            seed,
        };
        let out = RunOutput {
            maze: &info,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", run_summary(&report));
    }
    Ok(())
}

fn run_summary(report: &SearchReport) -> String {
    match report.path_length {
        Some(n) => format!("Path length = {n}"),
        None => "Path NOT found".to_string(),
    }
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    maze: &'a MazeInfo,
    reports: &'a [SearchReport],
}

/// `mazewalk compare`
pub fn compare_all(args: &CompareArgs) -> CmdResult {
    let seed = pick_seed(args.output.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = Maze::generate(args.rows, args.cols, args.density, &mut rng)?;
    let mut tree = DiscoveryTree::new(maze.bounds());
    let reports = compare(&maze, &mut tree, maze.start(), maze.target())?;

    let info = MazeInfo {
        rows: args.rows,
        cols: args.cols,
        density: args.density,
        seed,
    };
    if args.output.json {
        let out = CompareOutput {
            maze: &info,
            reports: &reports,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{maze}");
        print!(
            "{}",
            CompareTable {
                info: &info,
                reports: &reports,
            }
        );
    }
    Ok(())
}

/// Per-algorithm results for one maze.
struct CompareTable<'a> {
    info: &'a MazeInfo,
    reports: &'a [SearchReport],
}

impl fmt::Display for CompareTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info;
        writeln!(
            f,
            "{}x{} maze, density {}, seed {}",
            info.rows, info.cols, info.density, info.seed
        )?;
        writeln!(
            f,
            "{:<10}{:>8}{:>10}{:>10}{:>10}",
            "algorithm", "path", "explored", "expanded", "cost"
        )?;
        for r in self.reports {
            let path = r
                .path_length
                .map_or_else(|| "-".to_string(), |n| n.to_string());
            writeln!(
                f,
                "{:<10}{:>8}{:>10}{:>10}{:>10}",
                r.algorithm.name(),
                path,
                r.cells_explored,
                r.expanded,
                r.execution_cost
            )?;
        }
        Ok(())
    }
}

/// Running totals for one algorithm across many mazes.
#[derive(Debug, Clone, Serialize)]
struct TrialStats {
    algorithm: Algorithm,
    runs: usize,
    found: usize,
    success_rate: f64,
    mean_path_length: Option<f64>,
    mean_cells_explored: Option<f64>,
    mean_execution_cost: Option<f64>,
    #[serde(skip)]
    sums: [usize; 3],
}

impl TrialStats {
    fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            runs: 0,
            found: 0,
            success_rate: 0.0,
            mean_path_length: None,
            mean_cells_explored: None,
            mean_execution_cost: None,
            sums: [0; 3],
        }
    }

    fn record(&mut self, r: &SearchReport) {
        self.runs += 1;
        if let Some(len) = r.path_length {
            self.found += 1;
            self.sums[0] += len;
            self.sums[1] += r.cells_explored;
            self.sums[2] += r.execution_cost;
        }
        self.success_rate = self.found as f64 / self.runs as f64;
        let found = self.found;
        let mean = |sum: usize| (found > 0).then(|| sum as f64 / found as f64);
        self.mean_path_length = mean(self.sums[0]);
        self.mean_cells_explored = mean(self.sums[1]);
        self.mean_execution_cost = mean(self.sums[2]);
    }
}

#[derive(Serialize)]
struct TrialsOutput<'a> {
    maze: &'a MazeInfo,
    mazes: u32,
    skipped: u32,
    stats: &'a [TrialStats],
}

/// `mazewalk trials`
pub fn trials(args: &TrialsArgs) -> CmdResult {
    let seed = pick_seed(args.output.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stats = Algorithm::ALL.map(TrialStats::new);
    let mut skipped = 0;
    let mut tree = DiscoveryTree::new(mazewalk_core::Bounds::new(args.rows, args.cols));

    for i in 0..args.count {
        let maze = match Maze::generate(args.rows, args.cols, args.density, &mut rng) {
            Ok(maze) => maze,
            Err(e @ MazeError::NoPlacement { .. }) => {
                tracing::warn!(trial = i, "skipping maze: {e}");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        for report in compare(&maze, &mut tree, maze.start(), maze.target())? {
            if let Some(s) = stats.iter_mut().find(|s| s.algorithm == report.algorithm) {
                s.record(&report);
            }
        }
    }
    tracing::debug!(count = args.count, skipped, "trials done");

    let info = MazeInfo {
        rows: args.rows,
        cols: args.cols,
        density: args.density,
        seed,
    };
    if args.output.json {
        let out = TrialsOutput {
            maze: &info,
            mazes: args.count - skipped,
            skipped,
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!(
            "{}",
            TrialsTable {
                info: &info,
                mazes: args.count - skipped,
                stats: &stats,
            }
        );
    }
    Ok(())
}

/// Per-algorithm averages over a batch of mazes.
struct TrialsTable<'a> {
    info: &'a MazeInfo,
    mazes: u32,
    stats: &'a [TrialStats],
}

impl fmt::Display for TrialsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info;
        writeln!(
            f,
            "{} mazes of {}x{}, density {}, seed {}",
            self.mazes, info.rows, info.cols, info.density, info.seed
        )?;
        writeln!(
            f,
            "{:<10}{:>9}{:>10}{:>10}{:>10}",
            "algorithm", "success", "path", "explored", "cost"
        )?;
        let mean = |m: Option<f64>| m.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
        for st in self.stats {
            writeln!(
                f,
                "{:<10}{:>8.1}%{:>10}{:>10}{:>10}",
                st.algorithm.name(),
                st.success_rate * 100.0,
                mean(st.mean_path_length),
                mean(st.mean_cells_explored),
                mean(st.mean_execution_cost)
            )?;
        }
        Ok(())
    }
}
