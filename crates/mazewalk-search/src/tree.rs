//! The discovery tree built up by a search.
//!
//! Every cell a search reaches records the cell whose expansion revealed
//! it. Those parent links form a tree rooted at the start cell, which the
//! engine uses to reconstruct paths, to compute A*'s `g` (depth) and to
//! measure how far a walking agent has to travel between two expansions.
//!
//! The tree lives beside the maze rather than inside it, one [`Link`] per
//! cell, and must be [`reset`](DiscoveryTree::reset) before the maze is
//! searched again.

use std::collections::HashMap;

use mazewalk_core::{Bounds, Pos};

/// Discovery state of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Link {
    /// Not reached yet.
    #[default]
    Undiscovered,
    /// The start cell of the search.
    Root,
    /// Reached by expanding the given cell.
    Parent(Pos),
}

/// Per-cell discovery parents for one maze.
#[derive(Clone, Debug)]
pub struct DiscoveryTree {
    bounds: Bounds,
    links: Vec<Link>,
    root: Option<Pos>,
    discovered: usize,
}

impl DiscoveryTree {
    /// An empty tree covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            links: vec![Link::Undiscovered; bounds.len()],
            root: None,
            discovered: 0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Forget every link so the maze can be searched again.
    pub fn reset(&mut self) {
        self.links.fill(Link::Undiscovered);
        self.root = None;
        self.discovered = 0;
    }

    /// Whether no cell has been discovered since construction or the last
    /// [`reset`](Self::reset).
    #[inline]
    pub fn is_pristine(&self) -> bool {
        self.discovered == 0
    }

    /// Number of discovered cells, root included.
    #[inline]
    pub fn discovered_count(&self) -> usize {
        self.discovered
    }

    /// The root, if one has been marked.
    #[inline]
    pub fn root(&self) -> Option<Pos> {
        self.root
    }

    /// Link of `p`. Out-of-bounds positions are undiscovered.
    #[inline]
    pub fn link(&self, p: Pos) -> Link {
        self.bounds
            .index(p)
            .map_or(Link::Undiscovered, |i| self.links[i])
    }

    #[inline]
    pub fn is_discovered(&self, p: Pos) -> bool {
        self.link(p) != Link::Undiscovered
    }

    /// Discovery parent of `p`; `None` for the root and undiscovered cells.
    #[inline]
    pub fn parent(&self, p: Pos) -> Option<Pos> {
        match self.link(p) {
            Link::Parent(q) => Some(q),
            Link::Root | Link::Undiscovered => None,
        }
    }

    /// Mark `p` as the root. Returns `false` if `p` is out of bounds.
    pub(crate) fn set_root(&mut self, p: Pos) -> bool {
        if !self.write(p, Link::Root) {
            return false;
        }
        self.root = Some(p);
        true
    }

    /// Record `parent` as the discovery parent of `child`, replacing any
    /// earlier parent. Returns `false` if `child` is out of bounds.
    pub(crate) fn set_parent(&mut self, child: Pos, parent: Pos) -> bool {
        self.write(child, Link::Parent(parent))
    }

    fn write(&mut self, p: Pos, link: Link) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        if self.links[i] == Link::Undiscovered {
            self.discovered += 1;
        }
        self.links[i] = link;
        true
    }

    /// `p` followed by each of its ancestors up to and including the root.
    /// Empty if `p` is undiscovered.
    pub fn ancestors(&self, p: Pos) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.is_discovered(p).then_some(p),
            budget: self.links.len(),
        }
    }

    /// Number of edges between `p` and the root, or `None` if `p` is
    /// undiscovered.
    pub fn depth(&self, p: Pos) -> Option<usize> {
        self.ancestors(p).count().checked_sub(1)
    }

    /// The path from the root to `p`, root excluded and `p` included,
    /// ordered from the root side. `None` if `p` is undiscovered.
    pub fn traceback(&self, p: Pos) -> Option<Path> {
        if !self.is_discovered(p) {
            return None;
        }
        let mut cells: Vec<Pos> = self
            .ancestors(p)
            .take_while(|&q| self.link(q) != Link::Root)
            .collect();
        cells.reverse();
        Some(Path(cells))
    }

    /// Number of tree edges between `from` and `to` through their lowest
    /// common ancestor.
    ///
    /// `None` if either cell is undiscovered or they share no ancestor.
    pub fn rope_distance(&self, from: Pos, to: Pos) -> Option<usize> {
        let up_from: HashMap<Pos, usize> = self
            .ancestors(from)
            .enumerate()
            .map(|(steps, q)| (q, steps))
            .collect();
        self.ancestors(to)
            .enumerate()
            .find_map(|(steps, q)| up_from.get(&q).map(|&other| other + steps))
    }

    /// Every `(child, parent)` edge, in row-major order of the child.
    pub fn edges(&self) -> impl Iterator<Item = (Pos, Pos)> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter_map(|(i, link)| match *link {
                Link::Parent(parent) => Some((self.bounds.pos(i), parent)),
                Link::Root | Link::Undiscovered => None,
            })
    }
}

/// Iterator returned by [`DiscoveryTree::ancestors`].
///
/// Stops after as many steps as the tree has cells, so a corrupted link
/// chain cannot loop forever.
pub struct Ancestors<'a> {
    tree: &'a DiscoveryTree,
    next: Option<Pos>,
    budget: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let cur = self.next?;
        if self.budget == 0 {
            self.next = None;
            return None;
        }
        self.budget -= 1;
        self.next = self.tree.parent(cur);
        Some(cur)
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A reconstructed path: every cell after the start, up to the target.
///
/// [`Path::len`] is therefore the number of moves from start to target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<Pos>);

impl Path {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[Pos] {
        &self.0
    }

    /// Whether `p` lies on the path.
    pub fn contains(&self, p: Pos) -> bool {
        self.0.contains(&p)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pos> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Pos> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Pos;
    type IntoIter = std::slice::Iter<'a, Pos>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
