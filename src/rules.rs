//! The constraint-based reading of "solved", independent of any answer key.
//!
//! [`Puzzle::is_solved`](crate::Puzzle::is_solved) compares the live board
//! against the carried solution snapshot. The checks here instead evaluate
//! the board directly against the game's rules: exactly
//! [`STARS_PER_GROUP`] stars in every row, column, and region, and no two
//! stars sharing an edge or a corner. The two contracts agree on a
//! well-posed puzzle's unique solution but are distinct operations.

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::board::Puzzle;
use crate::location::{Coord, Location};
use crate::region::RegionId;
use crate::shape::{BoardShape, KingStep, Step};

/// Stars required in every row, column, and region.
pub const STARS_PER_GROUP: usize = 2;

/// One way a board falls short of the rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleViolation {
    /// A row carries a star count other than [`STARS_PER_GROUP`].
    RowCount {
        /// Zero-based row.
        row: Coord,
        /// Stars found in the row.
        stars: usize,
    },
    /// A column carries a star count other than [`STARS_PER_GROUP`].
    ColumnCount {
        /// Zero-based column.
        column: Coord,
        /// Stars found in the column.
        stars: usize,
    },
    /// A region carries a star count other than [`STARS_PER_GROUP`].
    RegionCount {
        /// The region id.
        region: RegionId,
        /// Stars found in the region.
        stars: usize,
    },
    /// Two stars share an edge or a corner.
    AdjacentStars {
        /// The offending pair of cells.
        cells: UnorderedPair<Location>,
    },
}

/// Every way the live board currently falls short of the rules, in a fixed
/// order: row counts, column counts, region counts, then adjacent pairs in
/// row-major order of their first cell.
///
/// The solution snapshot is never consulted. An empty result means the
/// board is a valid solution in its own right.
pub fn violations(puzzle: &Puzzle) -> Vec<RuleViolation> {
    let board = puzzle.board();
    let mut found = Vec::new();

    for (row, lane) in board.rows().into_iter().enumerate() {
        let stars = lane.iter().filter(|cell| cell.is_star()).count();
        if stars != STARS_PER_GROUP {
            found.push(RuleViolation::RowCount { row, stars });
        }
    }

    for (column, lane) in board.columns().into_iter().enumerate() {
        let stars = lane.iter().filter(|cell| cell.is_star()).count();
        if stars != STARS_PER_GROUP {
            found.push(RuleViolation::ColumnCount { column, stars });
        }
    }

    let regions = puzzle.regions();
    let mut stars_per_region = vec![0usize; regions.iter().copied().max().map_or(0, |max| max + 1)];
    for (index, cell) in board.indexed_iter() {
        if cell.is_star() {
            stars_per_region[regions[index]] += 1;
        }
    }
    found.extend(stars_per_region.into_iter()
        .enumerate()
        .filter(|(_, stars)| *stars != STARS_PER_GROUP)
        .map(|(region, stars)| RuleViolation::RegionCount { region, stars }));

    let dims = (puzzle.rows(), puzzle.columns());
    let star_locations = board.indexed_iter()
        .filter(|(_, cell)| cell.is_star())
        .map(|(index, _)| Location::from(index))
        .collect_vec();
    for location in star_locations {
        for (direction, neighbor) in KingStep::neighbors_of(location) {
            // each unordered pair is seen from both ends; report it from its forward side only
            if direction.ensure_forward() != direction {
                continue;
            }
            if neighbor.in_bounds(dims) && puzzle.get(neighbor).is_ok_and(|cell| cell.is_star()) {
                found.push(RuleViolation::AdjacentStars { cells: UnorderedPair::from((location, neighbor)) });
            }
        }
    }

    found
}

/// Whether the live board satisfies every rule, i.e. [`violations`] finds
/// nothing.
pub fn satisfies_rules(puzzle: &Puzzle) -> bool {
    violations(puzzle).is_empty()
}
