use ndarray::Ix;

/// A row or column coordinate.
pub type Coord = usize;
/// A row or column count. Zero is legal; the text format admits `0x0` boards.
pub type Dimension = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, column)` on a board, zero-based. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    pub(crate) fn in_bounds(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0 && self.1 < dims.1
    }

    pub(crate) fn linear(&self, columns: Dimension) -> usize {
        self.0 * columns + self.1
    }

    pub(crate) fn from_linear(index: usize, columns: Dimension) -> Self {
        Self(index / columns, index % columns)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}
