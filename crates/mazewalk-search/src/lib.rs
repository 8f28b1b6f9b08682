//! Search strategies for mazewalk grids.
//!
//! Depth-first search, breadth-first search and A* share one traversal
//! engine, [`Search`]; they differ only in the [`Frontier`] that decides
//! which discovered cell to expand next:
//!
//! | Algorithm | Frontier |
//! |---|---|
//! | DFS | [`Stack`] |
//! | BFS | [`Queue`] |
//! | A\* | [`AstarFrontier`], backed by the binary [`Heap`] |
//!
//! Discovery parents are stored in a [`DiscoveryTree`] kept beside the grid.
//! Besides path reconstruction, the tree gives the *execution cost* of a
//! search: the number of tree edges a walking agent crosses to get from one
//! expanded cell to the next.
//!
//! ```
//! use mazewalk_core::{Maze, Pos};
//! use mazewalk_search::{Algorithm, DiscoveryTree, run};
//!
//! let maze = Maze::open(5, 5, Pos::new(0, 0), Pos::new(4, 4)).unwrap();
//! let mut tree = DiscoveryTree::new(maze.bounds());
//! let report = run(Algorithm::Astar, &maze, &mut tree, maze.start(), maze.target()).unwrap();
//! assert_eq!(report.path_length, Some(8));
//! ```

mod algorithm;
mod error;
mod frontier;
mod heap;
mod render;
mod search;
mod traits;
mod tree;

pub use algorithm::{Algorithm, ParseAlgorithmError, SearchReport, compare, run, run_with};
pub use error::SearchError;
pub use frontier::{AstarFrontier, Frontier, Queue, Scored, Stack, Strategy};
pub use heap::{Heap, OrderFn};
pub use render::render;
pub use search::{Search, SearchState};
pub use traits::Walkable;
pub use tree::{Ancestors, DiscoveryTree, Link, Path};
