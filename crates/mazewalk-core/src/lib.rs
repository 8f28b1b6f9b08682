//! **mazewalk-core**: maze grids for the mazewalk search explorer.
//!
//! This crate provides the grid every search strategy runs over:
//! [`Pos`]/[`Bounds`] geometry, the obstacle [`Maze`] with its fixed start
//! and target, seeded random generation ([`Maze::generate`]) and a small
//! text layout format ([`Maze::from_layout`]) for hand-written mazes.

pub mod error;
pub mod geom;
pub mod layout;
pub mod mapgen;
pub mod maze;

pub use error::MazeError;
pub use geom::{Bounds, Pos};
pub use maze::Maze;
