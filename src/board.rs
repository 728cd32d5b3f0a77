use std::fmt::{Display, Formatter};
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};
use thiserror::Error;

use crate::cell::Cell;
use crate::extract::{extract, PuzzleInfo, StructuralError};
use crate::grammar::{parse, SyntaxError};
use crate::location::{Dimension, Location};
use crate::region::RegionId;
use crate::serialize;
use crate::validate::{check_contiguity, ContiguityError};

/// A [`Puzzle`] operation was asked about a cell outside the board.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("location {location:?} is outside the {rows}x{columns} board")]
pub struct OutOfBounds {
    /// The offending zero-based location.
    pub location: Location,
    /// Row count of the board.
    pub rows: Dimension,
    /// Column count of the board.
    pub columns: Dimension,
}

/// Reasons puzzle construction from text fails.
///
/// Construction is atomic: any of these means no puzzle was produced.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PuzzleError {
    /// The text does not match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The text is grammatical but its coordinates do not partition the grid.
    #[error(transparent)]
    Structure(#[from] StructuralError),
    /// A region of the partition is not edge-contiguous.
    #[error(transparent)]
    Contiguity(#[from] ContiguityError),
}

/// An immutable Star Battle puzzle: a grid of cells partitioned into
/// edge-contiguous regions, carrying a live board and a solution snapshot.
///
/// A puzzle comes into existence only through [`solved_from_str`](Self::solved_from_str),
/// [`blank_from_str`](Self::blank_from_str), or [`with_cell`](Self::with_cell);
/// every construction path re-checks the partition and contiguity invariants,
/// so a half-built puzzle can never be observed. "Mutation" produces a new
/// value and leaves the receiver untouched, so shared instances need no
/// locking.
#[derive(Clone, Debug)]
pub struct Puzzle {
    // rows, columns
    dims: (Dimension, Dimension),
    board: Array2<Cell>,
    regions: Array2<RegionId>,
    solution: Array2<Cell>,
}

impl Puzzle {
    /// Parse a solved puzzle: the live board and the solution snapshot both
    /// take the text's star placements.
    pub fn solved_from_str(text: &str) -> Result<Self, PuzzleError> {
        let info = extract(&parse(text)?)?;
        Self::from_info(info, false)
    }

    /// Parse a blank puzzle: the live board starts all-empty while the
    /// solution snapshot takes the text's star placements.
    pub fn blank_from_str(text: &str) -> Result<Self, PuzzleError> {
        let info = extract(&parse(text)?)?;
        Self::from_info(info, true)
    }

    fn from_info(info: PuzzleInfo, blank: bool) -> Result<Self, PuzzleError> {
        check_contiguity(&info)?;

        let shape = (info.rows, info.columns);
        let board = match blank {
            true => Array2::from_shape_simple_fn(shape, Cell::default),
            false => grid(shape, info.board.clone()),
        };

        Ok(Self {
            dims: shape,
            board,
            regions: grid(shape, info.regions),
            solution: grid(shape, info.board),
        })
    }

    /// Row count of the board.
    pub fn rows(&self) -> Dimension {
        self.dims.0
    }

    /// Column count of the board.
    pub fn columns(&self) -> Dimension {
        self.dims.1
    }

    /// The marker at `location`.
    pub fn get(&self, location: Location) -> Result<Cell, OutOfBounds> {
        self.board.get(location.as_index())
            .copied()
            .ok_or(self.out_of_bounds(location))
    }

    /// The region id of the cell at `location`.
    pub fn region_at(&self, location: Location) -> Result<RegionId, OutOfBounds> {
        self.regions.get(location.as_index())
            .copied()
            .ok_or(self.out_of_bounds(location))
    }

    /// A new puzzle with exactly the cell at `location` replaced by `cell`.
    ///
    /// The receiver is never altered; regions and the solution snapshot
    /// carry over unchanged.
    pub fn with_cell(&self, location: Location, cell: Cell) -> Result<Self, OutOfBounds> {
        if !location.in_bounds(self.dims) {
            return Err(self.out_of_bounds(location));
        }

        let mut board = self.board.clone();
        board.index_mut(location.as_index()).assign_elem(cell);
        Ok(Self {
            dims: self.dims,
            board,
            regions: self.regions.clone(),
            solution: self.solution.clone(),
        })
    }

    /// Whether the live board equals the carried solution snapshot,
    /// element-wise.
    ///
    /// This is the answer-key notion of solved; for the constraint-based
    /// notion independent of any snapshot, see [`rules::violations`](crate::rules::violations).
    pub fn is_solved(&self) -> bool {
        self.board == self.solution
    }

    /// The number of stars currently on the live board.
    pub fn star_count(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_star()).count()
    }

    pub(crate) fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub(crate) fn regions(&self) -> &Array2<RegionId> {
        &self.regions
    }

    pub(crate) fn to_info(&self) -> PuzzleInfo {
        PuzzleInfo {
            rows: self.dims.0,
            columns: self.dims.1,
            board: self.board.iter().copied().collect(),
            regions: self.regions.iter().copied().collect(),
        }
    }

    fn out_of_bounds(&self, location: Location) -> OutOfBounds {
        OutOfBounds { location, rows: self.dims.0, columns: self.dims.1 }
    }
}

fn grid<T>(shape: (Dimension, Dimension), cells: Vec<T>) -> Array2<T> {
    // extract() guarantees the length matches the dimensions
    Array2::from_shape_vec(shape, cells).unwrap()
}

/// Structural equality: dimensions, regions, and live board. The solution
/// snapshot is deliberately not compared.
impl PartialEq for Puzzle {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.regions == other.regions && self.board == other.board
    }
}

impl Eq for Puzzle {}

/// The canonical text form of the live board, as produced by [`serialize::to_text`](crate::to_text).
impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serialize::to_text(&self.to_info()))
    }
}
