use mazewalk_core::{Bounds, Maze, Pos};

/// The grid capability a search needs: bounds, obstacle classification
/// and neighbour enumeration.
pub trait Walkable {
    /// The rectangle of valid positions.
    fn bounds(&self) -> Bounds;

    /// Whether `p` is an obstacle.
    fn is_obstacle(&self, p: Pos) -> bool;

    /// Append the in-bounds, non-obstacle neighbours of `p` into `buf`.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        let bounds = self.bounds();
        buf.extend(
            p.neighbors_4()
                .into_iter()
                .filter(|&n| bounds.contains(n) && !self.is_obstacle(n)),
        );
    }

    /// Whether `p` is in bounds and not an obstacle.
    fn is_free(&self, p: Pos) -> bool {
        self.bounds().contains(p) && !self.is_obstacle(p)
    }
}

impl Walkable for Maze {
    fn bounds(&self) -> Bounds {
        Maze::bounds(self)
    }

    fn is_obstacle(&self, p: Pos) -> bool {
        Maze::is_obstacle(self, p)
    }

    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        Maze::neighbors(self, p, buf);
    }

    fn is_free(&self, p: Pos) -> bool {
        Maze::is_free(self, p)
    }
}
