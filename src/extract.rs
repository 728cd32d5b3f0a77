use log::debug;
use thiserror::Error;

use crate::cell::Cell;
use crate::grammar::ParseTree;
use crate::location::Dimension;
use crate::region::RegionId;

/// The structured intermediate representation of a puzzle text: dimensions,
/// one marker per cell, and one region id per cell, both in row-major order.
///
/// `board.len() == regions.len() == rows * columns` always holds for values
/// produced by [`extract`]; region ids form a gapless range starting at 0.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PuzzleInfo {
    /// Number of rows.
    pub rows: Dimension,
    /// Number of columns.
    pub columns: Dimension,
    /// Marker per cell, row-major.
    pub board: Vec<Cell>,
    /// Region id per cell, row-major.
    pub regions: Vec<RegionId>,
}

impl PuzzleInfo {
    /// The number of distinct regions.
    pub fn region_count(&self) -> usize {
        self.regions.iter().copied().max().map_or(0, |max| max + 1)
    }
}

/// Reasons a grammatically valid text fails the partition contract.
///
/// Coordinates in these errors are one-based, as written in the source text.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StructuralError {
    /// A coordinate names a cell outside the declared grid. One-based
    /// coordinates start at 1, so a 0 component also lands here.
    #[error("coordinate {row},{column} is outside the {rows}x{columns} grid (region line {region})")]
    CoordinateOutOfRange {
        /// One-based row as written.
        row: usize,
        /// One-based column as written.
        column: usize,
        /// Declared row count.
        rows: Dimension,
        /// Declared column count.
        columns: Dimension,
        /// Zero-based ordinal of the offending region line.
        region: RegionId,
    },
    /// Two region lines (or one line twice) claim the same cell.
    #[error("cell {row},{column} is claimed by both region {first} and region {second}")]
    DuplicateCell {
        /// One-based row as written.
        row: usize,
        /// One-based column as written.
        column: usize,
        /// Region that claimed the cell first.
        first: RegionId,
        /// Region that claimed the cell again.
        second: RegionId,
    },
    /// A region line names no cells at all, leaving its id without a region.
    #[error("region line {region} names no cells")]
    EmptyRegionLine {
        /// Zero-based ordinal of the offending region line.
        region: RegionId,
    },
    /// A cell of the grid is named by no region line, so the lines do not
    /// partition the grid.
    #[error("cell {row},{column} belongs to no region")]
    UnassignedCell {
        /// One-based row of the orphaned cell.
        row: usize,
        /// One-based column of the orphaned cell.
        column: usize,
    },
}

/// Walk a [`ParseTree`] into a [`PuzzleInfo`].
///
/// Region ids are the zero-based ordinals of the region lines in source
/// order. This is the single place one-based text coordinates become
/// zero-based row-major indices.
///
/// A `0x0` tree with no region lines extracts to empty arrays; that is a
/// valid puzzle, not an error.
pub fn extract(tree: &ParseTree) -> Result<PuzzleInfo, StructuralError> {
    let (rows, columns) = (tree.size.rows, tree.size.columns);
    let mut regions: Vec<Option<RegionId>> = vec![None; rows * columns];
    let mut board = vec![Cell::Empty; rows * columns];

    for (region, line) in tree.region_lines.iter().enumerate() {
        if line.stars.is_empty() && line.empties.is_empty() {
            return Err(StructuralError::EmptyRegionLine { region });
        }

        let stars = line.stars.iter().map(|coord| (coord, Cell::Star));
        let empties = line.empties.iter().map(|coord| (coord, Cell::Empty));
        for (coord, cell) in stars.chain(empties) {
            if coord.row == 0 || coord.row > rows || coord.column == 0 || coord.column > columns {
                return Err(StructuralError::CoordinateOutOfRange {
                    row: coord.row,
                    column: coord.column,
                    rows,
                    columns,
                    region,
                });
            }

            let index = (coord.row - 1) * columns + (coord.column - 1);
            if let Some(first) = regions[index] {
                return Err(StructuralError::DuplicateCell {
                    row: coord.row,
                    column: coord.column,
                    first,
                    second: region,
                });
            }
            regions[index] = Some(region);
            if cell == Cell::Star {
                board[index] = Cell::Star;
            }
        }
    }

    let regions = regions.into_iter()
        .enumerate()
        .map(|(index, region)| region.ok_or(StructuralError::UnassignedCell {
            row: index / columns + 1,
            column: index % columns + 1,
        }))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("extracted {}x{} grid with {} regions", rows, columns, tree.region_lines.len());
    Ok(PuzzleInfo { rows, columns, board, regions })
}
