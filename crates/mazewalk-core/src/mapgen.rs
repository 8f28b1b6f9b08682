//! Random maze generation.
//!
//! Every cell independently becomes an obstacle with probability `density`.
//! A free start cell is then drawn uniformly, and a free target is drawn
//! uniformly among the free cells that are distinct from the start and at
//! least `rows / 2` away from it in Manhattan distance.

use rand::{Rng, RngExt};

use crate::error::MazeError;
use crate::geom::{Bounds, Pos};
use crate::maze::Maze;

/// How many start cells are tried before giving up on placement.
const MAX_START_DRAWS: usize = 64;

impl Maze {
    /// Generate a random maze using `rng`.
    ///
    /// Pass a seeded generator (e.g. `StdRng::seed_from_u64`) for
    /// reproducible mazes.
    pub fn generate(
        rows: i32,
        cols: i32,
        density: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, MazeError> {
        if rows < 1 || cols < 1 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(MazeError::InvalidDensity(density));
        }

        let bounds = Bounds::new(rows, cols);
        let blocked: Vec<bool> = (0..bounds.len())
            .map(|_| rng.random::<f64>() < density)
            .collect();
        let free: Vec<Pos> = bounds
            .iter()
            .filter(|&p| bounds.index(p).is_some_and(|i| !blocked[i]))
            .collect();

        let (start, target) = place_endpoints(&free, rows / 2, rng).ok_or(
            MazeError::NoPlacement {
                rows,
                cols,
                density,
            },
        )?;

        log::debug!(
            "generated {bounds} maze: {} free cells, start {start}, target {target}",
            free.len()
        );
        Self::with_endpoints(rows, cols, blocked, start, target)
    }
}

/// Draw a start from `free`, then a target among the cells at least
/// `min_dist` away. Retries with a fresh start when the first one has no
/// eligible target.
fn place_endpoints(free: &[Pos], min_dist: i32, rng: &mut impl Rng) -> Option<(Pos, Pos)> {
    if free.len() < 2 {
        return None;
    }
    let mut candidates = Vec::with_capacity(free.len());
    for _ in 0..MAX_START_DRAWS {
        let start = free[rng.random_range(0..free.len())];
        candidates.clear();
        candidates.extend(
            free.iter()
                .copied()
                .filter(|&p| p != start && p.manhattan(start) >= min_dist),
        );
        if !candidates.is_empty() {
            let target = candidates[rng.random_range(0..candidates.len())];
            return Some((start, target));
        }
    }
    None
}
