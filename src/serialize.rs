use itertools::Itertools;

use crate::extract::PuzzleInfo;

/// Render a [`PuzzleInfo`] as canonical puzzle text, the exact inverse of
/// parsing: `extract(&parse(&to_text(info))?)? == *info` for any
/// structurally valid `info`.
///
/// The form is canonical: region lines are emitted in ascending region-id
/// order and coordinates within each side of a line in ascending row-major
/// order, so two structurally equal values serialize to byte-identical
/// text. Comments are never emitted.
pub fn to_text(info: &PuzzleInfo) -> String {
    let mut lines: Vec<(Vec<String>, Vec<String>)> = vec![Default::default(); info.region_count()];

    // walking the board in linear order sorts each side of every line
    for (index, cell) in info.board.iter().enumerate() {
        let coord = format!("{},{}", index / info.columns + 1, index % info.columns + 1);
        let (stars, empties) = &mut lines[info.regions[index]];
        match cell.is_star() {
            true => stars.push(coord),
            false => empties.push(coord),
        }
    }

    // reserve for the size line plus roughly one "r,c " per cell
    let mut out = String::with_capacity(8 + info.board.len() * 6);
    out.push_str(&format!("{}x{}\n", info.rows, info.columns));
    for (stars, empties) in lines {
        out.push_str(&format!("{} | {}\n", stars.iter().join(" "), empties.iter().join(" ")));
    }

    out
}
