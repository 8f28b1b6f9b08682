//! Plain-text picture of a search in progress.

use mazewalk_core::Pos;

use crate::frontier::Frontier;
use crate::search::Search;
use crate::traits::Walkable;

/// Draw `search` one character per cell, one line per row:
///
/// - `#` obstacle
/// - `S` start, `T` target
/// - `@` the cell being expanded
/// - `*` the reconstructed path, once found
/// - `o` discovered
/// - `.` undiscovered
///
/// Before the search begins only obstacles and free cells are shown.
pub fn render<W: Walkable + ?Sized, F: Frontier>(search: &Search<'_, W, F>) -> String {
    let grid = search.grid();
    let tree = search.tree();
    let bounds = grid.bounds();
    let path = search.path();
    let (start, target) = (search.start(), search.target());
    let current = start.and(search.current());

    let mut out = String::with_capacity(bounds.len() + bounds.rows as usize);
    for row in 0..bounds.rows {
        for col in 0..bounds.cols {
            let p = Pos::new(row, col);
            let ch = if grid.is_obstacle(p) {
                '#'
            } else if Some(p) == start {
                'S'
            } else if Some(p) == target {
                'T'
            } else if Some(p) == current {
                '@'
            } else if path.as_ref().is_some_and(|path| path.contains(p)) {
                '*'
            } else if tree.is_discovered(p) {
                'o'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::Queue;
    use crate::tree::DiscoveryTree;
    use mazewalk_core::Maze;

    const DETOUR: &str = "
        S...
        ###.
        T...
    ";

    #[test]
    fn idle_shows_only_walls() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let s = Search::new(&maze, &mut tree, Queue::new());
        assert_eq!(render(&s), "....\n###.\n....\n");
    }

    #[test]
    fn mid_search() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        s.begin(maze.start(), maze.target()).unwrap();
        s.step();
        s.step();
        // (0,1) is being expanded and has just discovered (0,2).
        assert_eq!(render(&s), "S@o.\n###.\nT...\n");
    }

    #[test]
    fn found_marks_path() {
        let maze = Maze::from_layout(DETOUR).unwrap();
        let mut tree = DiscoveryTree::new(maze.bounds());
        let mut s = Search::new(&maze, &mut tree, Queue::new());
        s.search(maze.start(), maze.target()).unwrap();
        // The last expanded cell (2,1) sits on the path and shows as `@`.
        assert_eq!(render(&s), "S***\n###*\nT@**\n");
    }
}
