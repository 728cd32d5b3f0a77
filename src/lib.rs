#![warn(missing_docs)]

//! # `starb`
//!
//! Parser, serializer, and immutable board model for [Star Battle](https://en.wikipedia.org/wiki/Star_Battle_(puzzle)) puzzles:
//! an n×n grid divided into n edge-contiguous regions, solved by placing exactly two stars in every
//! row, column, and region with no two stars touching, even diagonally.
//!
//! Puzzles travel as text. A `#`-comment prologue may precede a `{rows}x{columns}` size line, which is
//! followed by one line per region: the region's starred cells, a `|`, then its empty cells, each cell
//! a one-based `row,column` pair:
//!
//! ```text
//! 3x3
//! 1,3 | 1,1 1,2 2,1 2,2 2,3 3,1 3,2 3,3
//! ```
//!
//! [`parse`] turns text into a [`ParseTree`], [`extract`] walks the tree into a [`PuzzleInfo`], and
//! [`to_text`] is the exact inverse, emitting a canonical form so that equal values print identically.
//! [`Puzzle`] wraps the extracted representation into an immutable value type: build one with
//! [`Puzzle::solved_from_str`] or [`Puzzle::blank_from_str`], query it with [`get`](Puzzle::get),
//! and "edit" it with [`with_cell`](Puzzle::with_cell), which returns a new puzzle. Every
//! construction re-checks that the regions partition the grid and that each is edge-contiguous.
//!
//! Solved-ness comes in two flavors: [`Puzzle::is_solved`] compares against the solution snapshot
//! carried from parse time, while [`rules`] evaluates a board against the game's constraints with
//! no snapshot at all.
//!
//! The core is pure and synchronous; nothing here touches files or sockets. Hosts that do (a server
//! handing out puzzle text, a renderer painting cells) consume the exported surface, or the
//! `wasm`-feature bindings from a browser.

pub use board::{OutOfBounds, Puzzle, PuzzleError};
pub use cell::Cell;
pub use extract::{extract, PuzzleInfo, StructuralError};
pub use grammar::{parse, CoordNode, ParseTree, RegionLineNode, SizeNode, SyntaxError};
pub use location::{Coord, Dimension, Location};
pub use region::RegionId;
pub use serialize::to_text;
pub use validate::{check_contiguity, ContiguityError};

pub(crate) mod board;
mod tests;
pub(crate) mod cell;
pub(crate) mod extract;
pub(crate) mod grammar;
pub(crate) mod location;
pub(crate) mod region;
pub mod rules;
pub(crate) mod serialize;
pub mod shape;
pub(crate) mod validate;
#[cfg(feature = "wasm")]
pub mod wasm;
