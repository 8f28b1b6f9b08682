//! Mazes written out as text.
//!
//! One line per row: `#` is an obstacle, `.` a free cell, `S` the start and
//! `T` the target. Surrounding whitespace is trimmed from the whole string
//! and from each line, so layouts can be indented inside Rust source.

use crate::error::MazeError;
use crate::geom::Pos;
use crate::maze::Maze;

impl Maze {
    /// Parse a maze from its text layout.
    pub fn from_layout(s: &str) -> Result<Self, MazeError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: lines.len() as i32,
                cols: 0,
            });
        }

        let mut blocked = Vec::with_capacity(lines.len() * width);
        let mut start = None;
        let mut target = None;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::InconsistentWidth {
                    line: row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                match ch {
                    '#' => blocked.push(true),
                    '.' => blocked.push(false),
                    'S' | 'T' => {
                        let slot = if ch == 'S' { &mut start } else { &mut target };
                        if slot.is_some() {
                            return Err(MazeError::DuplicateEndpoint { ch, pos });
                        }
                        *slot = Some(pos);
                        blocked.push(false);
                    }
                    _ => return Err(MazeError::InvalidChar { ch, pos }),
                }
            }
        }

        let start = start.ok_or(MazeError::MissingEndpoint('S'))?;
        let target = target.ok_or(MazeError::MissingEndpoint('T'))?;
        Self::with_endpoints(lines.len() as i32, width as i32, blocked, start, target)
    }

    /// Write the maze back out in the layout format accepted by
    /// [`Maze::from_layout`].
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.bounds().len() + self.rows() as usize);
        for row in 0..self.rows() {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.cols() {
                let p = Pos::new(row, col);
                out.push(if p == self.start() {
                    'S'
                } else if p == self.target() {
                    'T'
                } else if self.is_obstacle(p) {
                    '#'
                } else {
                    '.'
                });
            }
        }
        out
    }
}
