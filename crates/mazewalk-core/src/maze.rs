//! The obstacle grid searched by every strategy.
//!
//! A [`Maze`] stores one obstacle flag per cell in row-major order plus the
//! fixed start and target cells. Obstacles never change after
//! construction. Per-search state (discovery parents) is kept outside the
//! maze so the same maze can be searched repeatedly.

use std::fmt;

use crate::error::MazeError;
use crate::geom::{Bounds, Pos};

/// A rectangular maze of free and obstacle cells with a start and a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    bounds: Bounds,
    blocked: Vec<bool>,
    start: Pos,
    target: Pos,
}

impl Maze {
    /// Build a maze from explicit row-major obstacle flags.
    ///
    /// `blocked` must hold exactly `rows * cols` entries. Start and target
    /// must be distinct, in bounds and free.
    pub fn with_endpoints(
        rows: i32,
        cols: i32,
        blocked: Vec<bool>,
        start: Pos,
        target: Pos,
    ) -> Result<Self, MazeError> {
        if rows < 1 || cols < 1 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let bounds = Bounds::new(rows, cols);
        if blocked.len() != bounds.len() {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let maze = Self {
            bounds,
            blocked,
            start,
            target,
        };
        for p in [start, target] {
            if !maze.is_free(p) {
                return Err(MazeError::BadEndpoint(p));
            }
        }
        if start == target {
            return Err(MazeError::SameEndpoints(start));
        }
        Ok(maze)
    }

    /// Build an obstacle-free maze.
    pub fn open(rows: i32, cols: i32, start: Pos, target: Pos) -> Result<Self, MazeError> {
        let len = Bounds::new(rows, cols).len();
        Self::with_endpoints(rows, cols, vec![false; len], start, target)
    }

    /// The rectangle covered by the maze.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn target(&self) -> Pos {
        self.target
    }

    /// Whether `p` is an obstacle. Positions outside the maze are not
    /// obstacles, they simply do not exist; see [`Maze::is_free`].
    #[inline]
    pub fn is_obstacle(&self, p: Pos) -> bool {
        self.bounds.index(p).is_some_and(|i| self.blocked[i])
    }

    /// Whether `p` is inside the maze and not an obstacle.
    #[inline]
    pub fn is_free(&self, p: Pos) -> bool {
        self.bounds.index(p).is_some_and(|i| !self.blocked[i])
    }

    /// Append the in-bounds free neighbours of `p` into `buf`, in
    /// [`Pos::STEPS`] order. The caller clears `buf` before calling.
    pub fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_free(n)));
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Iterate over the free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.bounds.iter().filter(|&p| self.is_free(p))
    }
}

impl fmt::Display for Maze {
    /// Bordered ASCII form: `X` for obstacles, blank for free cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.cols() as usize + 3);
        writeln!(f, "{rule}")?;
        for row in 0..self.rows() {
            f.write_str("| ")?;
            for col in 0..self.cols() {
                let ch = if self.is_obstacle(Pos::new(row, col)) {
                    'X'
                } else {
                    ' '
                };
                write!(f, "{ch}")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{rule}")
    }
}
