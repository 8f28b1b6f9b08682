//! Algorithm selection and run summaries.

use std::fmt;
use std::str::FromStr;

use mazewalk_core::Pos;

use crate::error::SearchError;
use crate::frontier::{AstarFrontier, Queue, Stack, Strategy};
use crate::search::{Search, SearchState};
use crate::traits::Walkable;
use crate::tree::DiscoveryTree;

/// The three search algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Dfs,
    Bfs,
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dfs, Algorithm::Bfs, Algorithm::Astar];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
            Self::Astar => "astar",
        }
    }

    /// A fresh, empty frontier for this algorithm.
    pub fn frontier(self) -> Strategy {
        match self {
            Self::Dfs => Stack::new().into(),
            Self::Bfs => Queue::new().into(),
            Self::Astar => AstarFrontier::new().into(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Algorithm::from_str`] for an unknown name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected dfs, bfs or astar)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Case-insensitive; `a*` is accepted for A*.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(Self::Dfs),
            "bfs" => Ok(Self::Bfs),
            "astar" | "a*" => Ok(Self::Astar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Outcome of one search, as printed by the command-line tool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub start: Pos,
    pub target: Pos,
    pub state: SearchState,
    /// Moves from start to target, when a path was found.
    pub path_length: Option<usize>,
    /// Cells with a discovery parent (the root included).
    pub cells_explored: usize,
    /// Cells taken out of the frontier.
    pub expanded: usize,
    /// Tree edges walked by the agent between expansions.
    pub execution_cost: usize,
}

impl SearchReport {
    /// Summarise a search that has already run.
    pub fn from_search<W: Walkable + ?Sized>(algorithm: Algorithm, search: &Search<'_, W>) -> Self {
        Self {
            algorithm,
            start: search.start().unwrap_or_default(),
            target: search.target().unwrap_or_default(),
            state: search.state(),
            path_length: search.path().map(|p| p.len()),
            cells_explored: search.tree().discovered_count(),
            expanded: search.expanded(),
            execution_cost: search.execution_cost(),
        }
    }

    pub fn found(&self) -> bool {
        self.state == SearchState::Found
    }
}

/// Run `algorithm` on `grid` from `start` to `target`, using `tree` for the
/// discovery links. The tree must be pristine.
pub fn run<W: Walkable + ?Sized>(
    algorithm: Algorithm,
    grid: &W,
    tree: &mut DiscoveryTree,
    start: Pos,
    target: Pos,
) -> Result<SearchReport, SearchError> {
    run_with(algorithm, grid, tree, start, target, |_| {})
}

/// Like [`run`], calling `on_step` after every frontier pop.
pub fn run_with<W: Walkable + ?Sized>(
    algorithm: Algorithm,
    grid: &W,
    tree: &mut DiscoveryTree,
    start: Pos,
    target: Pos,
    on_step: impl FnMut(&Search<'_, W>),
) -> Result<SearchReport, SearchError> {
    let mut search = Search::new(grid, tree, algorithm.frontier());
    search.search_with(start, target, on_step)?;
    Ok(SearchReport::from_search(algorithm, &search))
}

/// Run every algorithm on the same grid and endpoints, resetting `tree`
/// before each run.
pub fn compare<W: Walkable + ?Sized>(
    grid: &W,
    tree: &mut DiscoveryTree,
    start: Pos,
    target: Pos,
) -> Result<Vec<SearchReport>, SearchError> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            tree.reset();
            run(algorithm, grid, tree, start, target)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazewalk_core::Maze;

    #[test]
    fn parse_names() {
        assert_eq!("dfs".parse(), Ok(Algorithm::Dfs));
        assert_eq!("BFS".parse(), Ok(Algorithm::Bfs));
        assert_eq!("astar".parse(), Ok(Algorithm::Astar));
        assert_eq!("A*".parse(), Ok(Algorithm::Astar));
        assert_eq!(
            "dijkstra".parse::<Algorithm>(),
            Err(ParseAlgorithmError("dijkstra".into()))
        );
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse(), Ok(a));
        }
    }

    #[test]
    fn frontier_matches_algorithm() {
        assert!(matches!(Algorithm::Dfs.frontier(), Strategy::DepthFirst(_)));
        assert!(matches!(Algorithm::Bfs.frontier(), Strategy::BreadthFirst(_)));
        assert!(matches!(Algorithm::Astar.frontier(), Strategy::Astar(_)));
    }

    #[test]
    fn run_reports_counts() {
        let maze = Maze::open(5, 5, Pos::new(0, 0), Pos::new(4, 4)).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let report = run(Algorithm::Bfs, &maze, &mut tree, maze.start(), maze.target()).unwrap();
        assert!(report.found());
        assert_eq!(report.path_length, Some(8));
        assert_eq!(report.cells_explored, tree.discovered_count());
        assert!(report.expanded >= 8);
    }

    #[test]
    fn run_requires_pristine_tree() {
        let maze = Maze::open(3, 3, Pos::new(0, 0), Pos::new(2, 2)).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        run(Algorithm::Dfs, &maze, &mut tree, maze.start(), maze.target()).unwrap();
        assert!(matches!(
            run(Algorithm::Bfs, &maze, &mut tree, maze.start(), maze.target()),
            Err(SearchError::StaleTree { .. })
        ));
    }

    #[test]
    fn compare_resets_between_runs() {
        let maze = Maze::open(5, 5, Pos::new(0, 0), Pos::new(4, 4)).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let reports = compare(&maze, &mut tree, maze.start(), maze.target()).unwrap();
        let algos: Vec<_> = reports.iter().map(|r| r.algorithm).collect();
        assert_eq!(algos, Algorithm::ALL);
        assert_eq!(reports[1].path_length, Some(8));
        assert_eq!(reports[2].path_length, Some(8));
        assert!(reports[0].path_length >= Some(8));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn report_round_trip() {
        let report = SearchReport {
            algorithm: Algorithm::Astar,
            start: Pos::new(0, 0),
            target: Pos::new(4, 4),
            state: SearchState::Found,
            path_length: Some(8),
            cells_explored: 17,
            expanded: 9,
            execution_cost: 8,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""algorithm":"astar""#));
        assert!(json.contains(r#""state":"found""#));
        let back: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
