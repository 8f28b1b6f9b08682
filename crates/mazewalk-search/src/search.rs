//! The shared traversal engine.
//!
//! [`Search`] runs the same loop for every strategy: pull the next cell out
//! of the frontier, walk the agent there along discovery-tree edges, then
//! discover or relax each free neighbour. The loop stops as soon as the
//! target is discovered or the frontier runs dry.

use mazewalk_core::Pos;

use crate::error::SearchError;
use crate::frontier::{Frontier, Strategy};
use crate::traits::Walkable;
use crate::tree::{DiscoveryTree, Path};

/// Lifecycle of a [`Search`].
///
/// `Found` and `Exhausted` are final; [`Search::reset`] (together with
/// [`DiscoveryTree::reset`]) returns to `Idle`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchState {
    #[default]
    Idle,
    Running,
    Found,
    Exhausted,
}

impl SearchState {
    /// Whether the search has finished, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// One search over a grid, driven by frontier strategy `F`.
///
/// The grid is borrowed shared and the discovery tree exclusively, so a
/// tree can only back one in-flight search at a time.
pub struct Search<'a, W: Walkable + ?Sized, F: Frontier = Strategy> {
    grid: &'a W,
    tree: &'a mut DiscoveryTree,
    frontier: F,
    state: SearchState,
    start: Pos,
    target: Pos,
    current: Option<Pos>,
    agent: Option<Pos>,
    execution_cost: usize,
    expanded: usize,
    nbuf: Vec<Pos>,
}

impl<'a, W: Walkable + ?Sized, F: Frontier> Search<'a, W, F> {
    /// Create an idle search. `tree` must cover the same bounds as `grid`
    /// and be pristine by the time [`begin`](Self::begin) is called.
    pub fn new(grid: &'a W, tree: &'a mut DiscoveryTree, frontier: F) -> Self {
        Self {
            grid,
            tree,
            frontier,
            state: SearchState::Idle,
            start: Pos::ZERO,
            target: Pos::ZERO,
            current: None,
            agent: None,
            execution_cost: 0,
            expanded: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Run a full search from `start` to `target`.
    ///
    /// Returns the reconstructed path, or `None` if the target cannot be
    /// reached.
    pub fn search(&mut self, start: Pos, target: Pos) -> Result<Option<Path>, SearchError> {
        self.search_with(start, target, |_| {})
    }

    /// Like [`search`](Self::search), calling `on_step` after every
    /// frontier pop. The callback observes the search but cannot change
    /// its order.
    pub fn search_with(
        &mut self,
        start: Pos,
        target: Pos,
        mut on_step: impl FnMut(&Self),
    ) -> Result<Option<Path>, SearchError> {
        self.begin(start, target)?;
        while !self.state.is_terminal() {
            self.step();
            on_step(&*self);
        }
        Ok(self.path())
    }

    /// Seed the search: mark `start` as the root of the discovery tree and
    /// put it in the frontier.
    pub fn begin(&mut self, start: Pos, target: Pos) -> Result<SearchState, SearchError> {
        if self.state != SearchState::Idle {
            return Err(SearchError::NotIdle);
        }
        if self.tree.bounds() != self.grid.bounds() {
            return Err(SearchError::TreeMismatch);
        }
        if !self.tree.is_pristine() {
            return Err(SearchError::StaleTree {
                discovered: self.tree.discovered_count(),
            });
        }
        for p in [start, target] {
            if !self.grid.bounds().contains(p) {
                return Err(SearchError::OutOfBounds(p));
            }
            if self.grid.is_obstacle(p) {
                return Err(SearchError::Blocked(p));
            }
        }

        log::debug!("search {start} -> {target}");
        self.start = start;
        self.target = target;
        self.current = Some(start);
        self.agent = None;
        self.execution_cost = 0;
        self.expanded = 0;
        self.tree.set_root(start);
        self.frontier.reset(target);

        if start == target {
            self.state = SearchState::Found;
            return Ok(self.state);
        }
        self.frontier.insert(start, self.tree);
        self.state = SearchState::Running;
        Ok(self.state)
    }

    /// Expand one cell. Does nothing unless the search is running.
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Running {
            return self.state;
        }
        let Some(cur) = self.frontier.extract() else {
            self.finish(SearchState::Exhausted);
            return self.state;
        };
        self.current = Some(cur);
        self.expanded += 1;

        if let Some(walk) = self
            .agent
            .and_then(|prev| self.tree.rope_distance(prev, cur))
        {
            self.execution_cost += walk;
        }
        self.agent = Some(cur);

        let cur_depth = self.tree.depth(cur).unwrap_or_default();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors(cur, &mut nbuf);
        log::trace!(
            "expand {cur} at depth {cur_depth}, {} neighbours, frontier {}",
            nbuf.len(),
            self.frontier.len()
        );

        for &n in &nbuf {
            match self.tree.depth(n) {
                None => {
                    self.tree.set_parent(n, cur);
                    self.frontier.insert(n, self.tree);
                }
                Some(depth) if cur_depth + 1 < depth => {
                    log::trace!("relax {n}: depth {depth} -> {}", cur_depth + 1);
                    self.tree.set_parent(n, cur);
                    self.frontier.reprioritize(n, self.tree);
                }
                Some(_) => {}
            }
            if n == self.target {
                self.finish(SearchState::Found);
                break;
            }
        }
        self.nbuf = nbuf;

        if self.state == SearchState::Running && self.frontier.is_empty() {
            self.finish(SearchState::Exhausted);
        }
        self.state
    }

    /// Keep stepping until the search finishes.
    pub fn run(&mut self) -> Option<Path> {
        while self.state == SearchState::Running {
            self.step();
        }
        self.path()
    }

    fn finish(&mut self, state: SearchState) {
        self.state = state;
        log::debug!(
            "search {} -> {} {:?}: expanded {}, discovered {}, execution cost {}",
            self.start,
            self.target,
            state,
            self.expanded,
            self.tree.discovered_count(),
            self.execution_cost
        );
    }

    /// Return to `Idle`, forgetting endpoints, agent and counters and
    /// emptying the frontier. The discovery tree is left alone; reset it
    /// separately before searching again.
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
        self.start = Pos::ZERO;
        self.target = Pos::ZERO;
        self.current = None;
        self.agent = None;
        self.execution_cost = 0;
        self.expanded = 0;
        self.frontier.reset(Pos::ZERO);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Start cell, once the search has begun.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        (self.state != SearchState::Idle).then_some(self.start)
    }

    /// Target cell, once the search has begun.
    #[inline]
    pub fn target(&self) -> Option<Pos> {
        (self.state != SearchState::Idle).then_some(self.target)
    }

    /// The cell most recently taken from the frontier (the start before the
    /// first step).
    #[inline]
    pub fn current(&self) -> Option<Pos> {
        self.current
    }

    /// Where the walking agent stands: the last expanded cell.
    #[inline]
    pub fn agent(&self) -> Option<Pos> {
        self.agent
    }

    /// Total discovery-tree edges the agent has walked between expansions.
    #[inline]
    pub fn execution_cost(&self) -> usize {
        self.execution_cost
    }

    /// Number of cells taken from the frontier.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    #[inline]
    pub fn tree(&self) -> &DiscoveryTree {
        self.tree
    }

    #[inline]
    pub fn grid(&self) -> &W {
        self.grid
    }

    /// The path to the target, once the target has been discovered.
    pub fn path(&self) -> Option<Path> {
        if self.state != SearchState::Found {
            return None;
        }
        self.tree.traceback(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::{AstarFrontier, Queue, Stack};
    use mazewalk_core::Maze;

    const WALL: &str = "
        S.#..
        ..#..
        ..#.T
    ";

    const DETOUR: &str = "
        S...
        ###.
        T...
    ";

    #[test]
    fn bfs_straight_line() {
        let maze = Maze::open(1, 6, Pos::new(0, 0), Pos::new(0, 5)).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        let path = s.search(maze.start(), maze.target()).unwrap().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.cells().last(), Some(&Pos::new(0, 5)));
        assert_eq!(s.state(), SearchState::Found);
        // Agent walks one edge per expansion along a corridor.
        assert_eq!(s.expanded(), 5);
        assert_eq!(s.execution_cost(), 4);
    }

    #[test]
    fn walled_target_is_exhausted() {
        let maze = Maze::from_layout(WALL).unwrap();
        for strategy in [Strategy::from(Stack::new()), Queue::new().into(), AstarFrontier::new().into()] {
            let mut tree = DiscoveryTree::new(maze.bounds());
            let mut s = Search::new(&maze, &mut tree, strategy);
            assert_eq!(s.search(maze.start(), maze.target()), Ok(None));
            assert_eq!(s.state(), SearchState::Exhausted);
            assert_eq!(s.path(), None);
            assert_eq!(s.tree().discovered_count(), 6);
            assert_eq!(s.frontier_len(), 0);
        }
    }

    #[test]
    fn detour_path_is_connected() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        let path = s.search(maze.start(), maze.target()).unwrap().unwrap();
        assert_eq!(path.len(), 8);
        let mut prev = maze.start();
        for &p in &path {
            assert!(p.is_adjacent(prev));
            assert!(maze.is_free(p));
            assert_eq!(s.tree().parent(p), Some(prev));
            prev = p;
        }
        assert_eq!(prev, maze.target());
    }

    #[test]
    fn dfs_shorter_route_reparents() {
        let maze = Maze::from_layout(
            "
            #..
            T..
            #S.
            ",
        )
        .unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Stack::new());
        assert_eq!(s.begin(maze.start(), maze.target()), Ok(SearchState::Running));

        // The stack takes the long way round the open block first.
        for expected in [(2, 1), (2, 2), (1, 2), (0, 2), (0, 1)] {
            assert_eq!(s.step(), SearchState::Running);
            assert_eq!(s.current(), Some(Pos::new(expected.0, expected.1)));
        }
        assert_eq!(s.tree().parent(Pos::new(0, 1)), Some(Pos::new(0, 2)));
        assert_eq!(s.tree().depth(Pos::new(0, 1)), Some(4));
        assert_eq!(s.tree().depth(Pos::new(1, 2)), Some(2));

        assert_eq!(s.step(), SearchState::Found);
        assert_eq!(s.current(), Some(Pos::new(1, 1)));
        // (0,1) is two steps from the start through (1,1).
        assert_eq!(s.tree().parent(Pos::new(0, 1)), Some(Pos::new(1, 1)));
        assert_eq!(s.tree().depth(Pos::new(0, 1)), Some(2));
        // (1,2) would be no shorter through (1,1), so it keeps its parent.
        assert_eq!(s.tree().parent(Pos::new(1, 2)), Some(Pos::new(2, 2)));
        assert_eq!(s.tree().depth(Pos::new(1, 2)), Some(2));

        let path = s.path().unwrap();
        assert_eq!(path.cells(), &[Pos::new(1, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn astar_shorter_route_rekeys_frontier() {
        let maze = Maze::from_layout(
            "
            .....
            S#...
            ...#T
            ",
        )
        .unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, AstarFrontier::new());
        assert_eq!(s.begin(maze.start(), maze.target()), Ok(SearchState::Running));

        fn entries(s: &Search<'_, Maze, AstarFrontier>, p: Pos) -> Vec<usize> {
            s.frontier()
                .heap()
                .iter()
                .filter(|e| e.pos == p)
                .map(|e| e.f)
                .collect()
        }
        let corner = Pos::new(0, 2);

        for expected in [(1, 0), (2, 0), (2, 1), (2, 2), (0, 0), (1, 2)] {
            assert_eq!(s.step(), SearchState::Running);
            assert_eq!(s.current(), Some(Pos::new(expected.0, expected.1)));
        }
        // Reached from below, five steps out.
        assert_eq!(s.tree().parent(corner), Some(Pos::new(1, 2)));
        assert_eq!(s.tree().depth(corner), Some(5));
        assert_eq!(entries(&s, corner), [9]);

        assert_eq!(s.step(), SearchState::Running);
        assert_eq!(s.current(), Some(Pos::new(0, 1)));
        assert_eq!(s.tree().parent(corner), Some(Pos::new(0, 1)));
        assert_eq!(s.tree().depth(corner), Some(3));
        assert_eq!(entries(&s, corner), [7]);

        assert_eq!(s.run().map(|p| p.len()), Some(7));
        assert_eq!(s.state(), SearchState::Found);
    }

    #[test]
    fn stale_tree_is_rejected() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        Search::new(&maze, &mut tree, Stack::new())
            .search(maze.start(), maze.target())
            .unwrap();

        let mut again = Search::new(&maze, &mut tree, Stack::new());
        assert!(matches!(
            again.search(maze.start(), maze.target()),
            Err(SearchError::StaleTree { .. })
        ));

        tree.reset();
        let mut fresh = Search::new(&maze, &mut tree, Stack::new());
        assert!(fresh.search(maze.start(), maze.target()).unwrap().is_some());
    }

    #[test]
    fn begin_validates_endpoints() {
        let maze = Maze::from_layout(WALL).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        assert_eq!(
            s.begin(Pos::new(9, 9), maze.target()),
            Err(SearchError::OutOfBounds(Pos::new(9, 9)))
        );
        assert_eq!(
            s.begin(maze.start(), Pos::new(1, 2)),
            Err(SearchError::Blocked(Pos::new(1, 2)))
        );
        assert_eq!(s.state(), SearchState::Idle);
        assert!(s.tree().is_pristine());
    }

    #[test]
    fn begin_twice_is_rejected() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        assert_eq!(s.begin(maze.start(), maze.target()), Ok(SearchState::Running));
        assert_eq!(s.begin(maze.start(), maze.target()), Err(SearchError::NotIdle));
    }

    #[test]
    fn mismatched_tree_is_rejected() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(mazewalk_core::Bounds::new(2, 2));
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        assert_eq!(
            s.begin(maze.start(), maze.target()),
            Err(SearchError::TreeMismatch)
        );
    }

    #[test]
    fn start_equals_target_is_found_immediately() {
        let maze = Maze::open(3, 3, Pos::new(0, 0), Pos::new(2, 2)).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        let path = s.search(Pos::new(1, 1), Pos::new(1, 1)).unwrap().unwrap();
        assert!(path.is_empty());
        assert_eq!(s.expanded(), 0);
    }

    #[test]
    fn stepping_exposes_progress() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        assert_eq!(s.start(), None);
        s.begin(maze.start(), maze.target()).unwrap();
        assert_eq!(s.current(), Some(maze.start()));
        assert_eq!(s.frontier_len(), 1);

        assert_eq!(s.step(), SearchState::Running);
        assert_eq!(s.current(), Some(Pos::new(0, 0)));
        assert_eq!(s.agent(), Some(Pos::new(0, 0)));
        assert_eq!(s.execution_cost(), 0);
        assert!(s.tree().is_discovered(Pos::new(0, 1)));

        assert_eq!(s.step(), SearchState::Running);
        assert_eq!(s.current(), Some(Pos::new(0, 1)));
        assert_eq!(s.execution_cost(), 1);

        let path = s.run().unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(s.step(), SearchState::Found);
    }

    #[test]
    fn on_step_sees_every_pop() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Stack::new());
        let mut seen = Vec::new();
        s.search_with(maze.start(), maze.target(), |s| seen.push(s.current()))
            .unwrap();
        assert_eq!(seen.len(), s.expanded());
        assert!(seen.iter().all(Option::is_some));
    }

    #[test]
    fn reset_returns_to_idle() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, AstarFrontier::new());
        s.search(maze.start(), maze.target()).unwrap();
        s.reset();
        assert_eq!(s.state(), SearchState::Idle);
        assert_eq!(s.target(), None);
        assert_eq!(s.execution_cost(), 0);
        assert_eq!(s.frontier_len(), 0);
        // The tree still needs its own reset.
        assert!(!s.tree().is_pristine());
    }
}
