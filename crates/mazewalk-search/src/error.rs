use std::fmt;

use mazewalk_core::Pos;

/// Errors raised when a search cannot start.
///
/// An unreachable target is not an error: the search simply ends in
/// [`SearchState::Exhausted`](crate::SearchState::Exhausted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The discovery tree still holds links from an earlier search.
    /// Call [`DiscoveryTree::reset`](crate::DiscoveryTree::reset) first.
    StaleTree { discovered: usize },
    /// `begin` was called on a search that has already started.
    NotIdle,
    /// An endpoint lies outside the maze.
    OutOfBounds(Pos),
    /// An endpoint is an obstacle.
    Blocked(Pos),
    /// The discovery tree and the maze cover different rectangles.
    TreeMismatch,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleTree { discovered } => write!(
                f,
                "discovery tree holds {discovered} cells from a previous search; reset it first"
            ),
            Self::NotIdle => write!(f, "search already started; reset it first"),
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the maze"),
            Self::Blocked(p) => write!(f, "endpoint {p} is an obstacle"),
            Self::TreeMismatch => write!(f, "discovery tree does not match the maze bounds"),
        }
    }
}

impl std::error::Error for SearchError {}
