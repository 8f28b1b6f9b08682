//! Geometry primitives: [`Pos`] and [`Bounds`].
//!
//! Mazes are addressed by `(row, col)` with row 0 at the top. A [`Bounds`]
//! is always anchored at the origin, so a position is in range iff both of
//! its coordinates are non-negative and below the maze dimensions.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell position in a maze.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Orthogonal steps in expansion order: up, down, right, left.
    pub const STEPS: [Pos; 4] = [
        Pos::new(-1, 0),
        Pos::new(1, 0),
        Pos::new(0, 1),
        Pos::new(0, -1),
    ];

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in [`Pos::STEPS`] order.
    ///
    /// Neighbours may lie outside any particular maze.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        Self::STEPS.map(|d| self + d)
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Pos) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The half-open rectangle `[0, rows) × [0, cols)` covered by a maze.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    /// Create new bounds. Negative dimensions are clamped to zero.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds cover no cell at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `p` is inside the bounds.
    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Row-major flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Inverse of [`Bounds::index`]. `idx` must be below [`Bounds::len`].
    #[inline]
    pub fn pos(self, idx: usize) -> Pos {
        let cols = self.cols as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every position.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Pos;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the positions in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Pos> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let p = self.bounds.pos(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bounds.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_arithmetic() {
        let a = Pos::new(2, 3);
        let b = Pos::new(1, 5);
        assert_eq!(a + b, Pos::new(3, 8));
        assert_eq!(a - b, Pos::new(1, -2));
        assert_eq!(a.shift(-2, 1), Pos::new(0, 4));
    }

    #[test]
    fn neighbors_follow_step_order() {
        let n = Pos::new(4, 4).neighbors_4();
        assert_eq!(
            n,
            [
                Pos::new(3, 4),
                Pos::new(5, 4),
                Pos::new(4, 5),
                Pos::new(4, 3),
            ]
        );
        assert!(n.iter().all(|&q| q.is_adjacent(Pos::new(4, 4))));
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Pos::new(0, 0);
        let b = Pos::new(4, 3);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn bounds_contains_and_index() {
        let b = Bounds::new(3, 4);
        assert_eq!(b.len(), 12);
        assert!(b.contains(Pos::new(2, 3)));
        assert!(!b.contains(Pos::new(3, 0)));
        assert!(!b.contains(Pos::new(0, -1)));
        assert_eq!(b.index(Pos::new(1, 2)), Some(6));
        assert_eq!(b.pos(6), Pos::new(1, 2));
        assert_eq!(b.index(Pos::new(0, 4)), None);
    }

    #[test]
    fn bounds_iter_is_row_major() {
        let b = Bounds::new(2, 3);
        let it = b.iter();
        assert_eq!(it.len(), 6);
        let all: Vec<_> = it.collect();
        assert_eq!(all[0], Pos::new(0, 0));
        assert_eq!(all[2], Pos::new(0, 2));
        assert_eq!(all[3], Pos::new(1, 0));
        assert_eq!(all[5], Pos::new(1, 2));
    }

    #[test]
    fn negative_bounds_are_empty() {
        let b = Bounds::new(-2, 5);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pos_round_trip() {
        let p = Pos::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"row":3,"col":7}"#);
        let back: Pos = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
