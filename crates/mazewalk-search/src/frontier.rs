//! Frontier strategies.
//!
//! The traversal engine is the same for every algorithm; only the order in
//! which discovered cells are handed back differs. [`Stack`] gives
//! depth-first search, [`Queue`] breadth-first search and [`AstarFrontier`]
//! A*.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use mazewalk_core::Pos;

use crate::heap::{Heap, OrderFn};
use crate::tree::DiscoveryTree;

/// Container of discovered-but-unexpanded cells.
pub trait Frontier {
    /// Empty the frontier before a new search towards `goal`.
    fn reset(&mut self, goal: Pos);

    /// Add a newly discovered cell. `tree` already holds its parent link.
    fn insert(&mut self, p: Pos, tree: &DiscoveryTree);

    /// Remove the next cell to expand, or `None` when empty.
    fn extract(&mut self) -> Option<Pos>;

    /// `p` was re-parented onto a shorter path; reorder it if the strategy
    /// cares. Cells no longer in the frontier are ignored.
    fn reprioritize(&mut self, p: Pos, tree: &DiscoveryTree);

    /// Number of cells waiting.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Stack (DFS)
// ---------------------------------------------------------------------------

/// Last in, first out.
#[derive(Debug, Default, Clone)]
pub struct Stack {
    cells: Vec<Pos>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Stack {
    fn reset(&mut self, _goal: Pos) {
        self.cells.clear();
    }

    fn insert(&mut self, p: Pos, _tree: &DiscoveryTree) {
        self.cells.push(p);
    }

    fn extract(&mut self) -> Option<Pos> {
        self.cells.pop()
    }

    fn reprioritize(&mut self, _p: Pos, _tree: &DiscoveryTree) {}

    fn len(&self) -> usize {
        self.cells.len()
    }
}

// ---------------------------------------------------------------------------
// Queue (BFS)
// ---------------------------------------------------------------------------

/// First in, first out.
#[derive(Debug, Default, Clone)]
pub struct Queue {
    cells: VecDeque<Pos>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Queue {
    fn reset(&mut self, _goal: Pos) {
        self.cells.clear();
    }

    fn insert(&mut self, p: Pos, _tree: &DiscoveryTree) {
        self.cells.push_back(p);
    }

    fn extract(&mut self) -> Option<Pos> {
        self.cells.pop_front()
    }

    fn reprioritize(&mut self, _p: Pos, _tree: &DiscoveryTree) {}

    fn len(&self) -> usize {
        self.cells.len()
    }
}

// ---------------------------------------------------------------------------
// A*
// ---------------------------------------------------------------------------

/// A frontier cell with its `f = g + h` score.
///
/// Two entries are equal when they name the same cell, whatever their
/// scores, so [`Heap::update_priority`] can find the stale entry.
#[derive(Copy, Clone, Debug)]
pub struct Scored {
    pub pos: Pos,
    pub f: usize,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Scored {}

impl fmt::Display for Scored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} f={}", self.pos, self.f)
    }
}

fn by_score(a: &Scored, b: &Scored) -> Ordering {
    a.f.cmp(&b.f)
}

/// Lowest `f` first, where `g` is the cell's depth in the discovery tree
/// and `h` its Manhattan distance to the goal.
///
/// Scores are taken when a cell is inserted or reprioritized. A cell whose
/// ancestor is later re-parented keeps its old score until it is
/// reprioritized itself.
#[derive(Debug, Clone)]
pub struct AstarFrontier {
    heap: Heap<Scored>,
    goal: Pos,
}

impl Default for AstarFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl AstarFrontier {
    pub fn new() -> Self {
        Self {
            heap: Heap::with_comparator(by_score as OrderFn<Scored>),
            goal: Pos::ZERO,
        }
    }

    /// The goal used for the heuristic.
    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// The waiting entries, in heap order.
    pub fn heap(&self) -> &Heap<Scored> {
        &self.heap
    }

    fn score(&self, p: Pos, tree: &DiscoveryTree) -> Scored {
        let g = tree.depth(p).unwrap_or(0);
        let h = p.manhattan(self.goal) as usize;
        Scored { pos: p, f: g + h }
    }
}

impl Frontier for AstarFrontier {
    fn reset(&mut self, goal: Pos) {
        self.heap.clear();
        self.goal = goal;
    }

    fn insert(&mut self, p: Pos, tree: &DiscoveryTree) {
        let entry = self.score(p, tree);
        self.heap.offer(entry);
    }

    fn extract(&mut self) -> Option<Pos> {
        self.heap.poll().map(|s| s.pos)
    }

    fn reprioritize(&mut self, p: Pos, tree: &DiscoveryTree) {
        let entry = self.score(p, tree);
        self.heap.update_priority(entry);
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Any of the three frontiers, chosen at run time.
#[derive(Debug, Clone)]
pub enum Strategy {
    DepthFirst(Stack),
    BreadthFirst(Queue),
    Astar(AstarFrontier),
}

impl From<Stack> for Strategy {
    fn from(s: Stack) -> Self {
        Self::DepthFirst(s)
    }
}

impl From<Queue> for Strategy {
    fn from(q: Queue) -> Self {
        Self::BreadthFirst(q)
    }
}

impl From<AstarFrontier> for Strategy {
    fn from(a: AstarFrontier) -> Self {
        Self::Astar(a)
    }
}

impl Frontier for Strategy {
    fn reset(&mut self, goal: Pos) {
        match self {
            Self::DepthFirst(f) => f.reset(goal),
            Self::BreadthFirst(f) => f.reset(goal),
            Self::Astar(f) => f.reset(goal),
        }
    }

    fn insert(&mut self, p: Pos, tree: &DiscoveryTree) {
        match self {
            Self::DepthFirst(f) => f.insert(p, tree),
            Self::BreadthFirst(f) => f.insert(p, tree),
            Self::Astar(f) => f.insert(p, tree),
        }
    }

    fn extract(&mut self) -> Option<Pos> {
        match self {
            Self::DepthFirst(f) => f.extract(),
            Self::BreadthFirst(f) => f.extract(),
            Self::Astar(f) => f.extract(),
        }
    }

    fn reprioritize(&mut self, p: Pos, tree: &DiscoveryTree) {
        match self {
            Self::DepthFirst(f) => f.reprioritize(p, tree),
            Self::BreadthFirst(f) => f.reprioritize(p, tree),
            Self::Astar(f) => f.reprioritize(p, tree),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::DepthFirst(f) => f.len(),
            Self::BreadthFirst(f) => f.len(),
            Self::Astar(f) => f.len(),
        }
    }
}
