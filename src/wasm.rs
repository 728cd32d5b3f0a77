//! Bindings for browser hosts.
//!
//! The rendering and transport layers that consume these live outside the
//! crate; this surface is just what they need: parse, inspect a cell,
//! toggle a star, check solved state, and emit canonical text.

use js_sys::Uint32Array;
use wasm_bindgen::prelude::*;

use crate::board::Puzzle;
use crate::cell::Cell;
use crate::location::Location;
use crate::rules;

/// A [`Puzzle`](crate::Puzzle) handle for JavaScript callers.
///
/// Like the underlying value type, a handle is immutable: toggling a star
/// yields a fresh handle.
#[wasm_bindgen(js_name = Puzzle)]
pub struct JsPuzzle {
    inner: Puzzle,
}

#[wasm_bindgen(js_class = Puzzle)]
impl JsPuzzle {
    /// Parse a solved puzzle from text.
    #[wasm_bindgen(js_name = parseSolved)]
    pub fn parse_solved(text: &str) -> Result<JsPuzzle, JsError> {
        Ok(Self { inner: Puzzle::solved_from_str(text)? })
    }

    /// Parse a blank puzzle from text; the stars in the text become the
    /// solution snapshot.
    #[wasm_bindgen(js_name = parseBlank)]
    pub fn parse_blank(text: &str) -> Result<JsPuzzle, JsError> {
        Ok(Self { inner: Puzzle::blank_from_str(text)? })
    }

    /// Row count of the board.
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    /// Column count of the board.
    pub fn columns(&self) -> usize {
        self.inner.columns()
    }

    /// Whether the cell at zero-based `(row, column)` holds a star.
    #[wasm_bindgen(js_name = hasStar)]
    pub fn has_star(&self, row: usize, column: usize) -> Result<bool, JsError> {
        Ok(self.inner.get(Location(row, column))?.is_star())
    }

    /// The region id of the cell at zero-based `(row, column)`.
    #[wasm_bindgen(js_name = regionAt)]
    pub fn region_at(&self, row: usize, column: usize) -> Result<usize, JsError> {
        Ok(self.inner.region_at(Location(row, column))?)
    }

    /// A new handle with the star at zero-based `(row, column)` toggled,
    /// as a click in the rendering layer does.
    #[wasm_bindgen(js_name = toggleStar)]
    pub fn toggle_star(&self, row: usize, column: usize) -> Result<JsPuzzle, JsError> {
        let location = Location(row, column);
        let next = match self.inner.get(location)? {
            Cell::Star => Cell::Empty,
            Cell::Empty => Cell::Star,
        };
        Ok(Self { inner: self.inner.with_cell(location, next)? })
    }

    /// Whether the live board equals the carried solution snapshot.
    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.inner.is_solved()
    }

    /// Whether the live board satisfies the game's rules outright, with no
    /// reference to the snapshot.
    #[wasm_bindgen(js_name = satisfiesRules)]
    pub fn satisfies_rules(&self) -> bool {
        rules::satisfies_rules(&self.inner)
    }

    /// The region id of every cell in row-major order.
    #[wasm_bindgen(js_name = regionMap)]
    pub fn region_map(&self) -> Uint32Array {
        let ids = self.inner.regions().iter().map(|region| *region as u32).collect::<Vec<_>>();
        Uint32Array::from(&ids[..])
    }

    /// The canonical text form of the live board.
    #[wasm_bindgen(js_name = toText)]
    pub fn to_text(&self) -> String {
        self.inner.to_string()
    }
}
