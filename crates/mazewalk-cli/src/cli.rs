//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use mazewalk_search::Algorithm;

/// Explore DFS, BFS and A* on random mazes
#[derive(Parser, Debug)]
#[command(name = "mazewalk")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log search progress at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `trace` or `mazewalk_search=trace`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one maze and search it
    Run(RunArgs),
    /// Run every algorithm on the same maze
    Compare(CompareArgs),
    /// Repeat the comparison over many mazes and print averages
    Trials(TrialsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of rows
    #[arg(value_parser = clap::value_parser!(i32).range(1..))]
    pub rows: i32,

    /// Number of columns
    #[arg(value_parser = clap::value_parser!(i32).range(1..))]
    pub cols: i32,

    /// Obstacle probability per cell, between 0 and 1
    #[arg(value_parser = parse_density)]
    pub density: f64,

    /// Search algorithm: dfs, bfs, astar (or a*)
    #[arg(default_value = "bfs")]
    pub algo: Algorithm,

    /// Print the maze after every step
    #[arg(long)]
    pub display: bool,

    /// Pause between displayed steps, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub delay: u64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Number of rows
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(1..))]
    pub rows: i32,

    /// Number of columns
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(1..))]
    pub cols: i32,

    /// Obstacle probability per cell, between 0 and 1
    #[arg(long, default_value_t = 0.2, value_parser = parse_density)]
    pub density: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct TrialsArgs {
    /// Number of rows
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..))]
    pub rows: i32,

    /// Number of columns
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..))]
    pub cols: i32,

    /// Obstacle probability per cell, between 0 and 1
    #[arg(long, default_value_t = 0.3, value_parser = parse_density)]
    pub density: f64,

    /// Number of mazes to generate
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Seed for the maze generator; a random one is used (and logged) if absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("density must be between 0 and 1, got {d}"))
    }
}
