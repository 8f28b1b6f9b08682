use std::fmt;

use crate::geom::Pos;

/// Errors that can occur when building a [`Maze`](crate::Maze).
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// Rows or columns below one.
    InvalidDimensions { rows: i32, cols: i32 },
    /// Obstacle density outside `[0, 1]` (or NaN).
    InvalidDensity(f64),
    /// No free start/target pair satisfies the placement rules.
    NoPlacement { rows: i32, cols: i32, density: f64 },
    /// A start or target is out of bounds or sits on an obstacle.
    BadEndpoint(Pos),
    /// Start and target are the same cell.
    SameEndpoints(Pos),
    /// Layout lines have different widths.
    InconsistentWidth { line: usize, expected: usize, found: usize },
    /// A layout character outside `#.ST`.
    InvalidChar { ch: char, pos: Pos },
    /// The layout has no `S` or no `T`.
    MissingEndpoint(char),
    /// The layout has more than one `S` or `T`.
    DuplicateEndpoint { ch: char, pos: Pos },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "maze dimensions must be positive, got {rows}x{cols}")
            }
            Self::InvalidDensity(d) => {
                write!(f, "obstacle density must be within [0, 1], got {d}")
            }
            Self::NoPlacement {
                rows,
                cols,
                density,
            } => write!(
                f,
                "no free start/target pair at least {} apart in a {rows}x{cols} maze with density {density}",
                rows / 2
            ),
            Self::BadEndpoint(p) => write!(f, "endpoint {p} is out of bounds or blocked"),
            Self::SameEndpoints(p) => write!(f, "start and target are both {p}"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingEndpoint(ch) => write!(f, "layout has no \u{201c}{ch}\u{201d} cell"),
            Self::DuplicateEndpoint { ch, pos } => {
                write!(f, "layout has a second \u{201c}{ch}\u{201d} cell at {pos}")
            }
        }
    }
}

impl std::error::Error for MazeError {}
