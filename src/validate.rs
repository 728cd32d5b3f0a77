use log::trace;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use thiserror::Error;

use crate::extract::PuzzleInfo;
use crate::location::Location;
use crate::region::RegionId;
use crate::shape::{SquareStep, Step};

/// A region whose cells do not form one edge-connected component.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("region {region} splits into disconnected pieces ({reached} of {cells} cells reachable)")]
pub struct ContiguityError {
    /// The offending region id.
    pub region: RegionId,
    /// Cells reachable from the region's first cell.
    pub reached: usize,
    /// Total cells bearing the region id.
    pub cells: usize,
}

/// Confirm every region of `info` is edge-contiguous.
///
/// Builds an undirected graph over the grid with edges only between
/// edge-adjacent cells of the same region, then walks each region
/// breadth-first from its first cell; the walk must reach the whole region.
/// Cost is linear in the cell count.
///
/// `info` must already satisfy the partition contract upheld by
/// [`extract`](crate::extract): every region id below
/// [`region_count`](PuzzleInfo::region_count) owns at least one cell.
pub fn check_contiguity(info: &PuzzleInfo) -> Result<(), ContiguityError> {
    let dims = (info.rows, info.columns);
    let mut graph: UnGraphMap<Location, ()> = UnGraphMap::with_capacity(
        info.board.len(),
        // a complete grid has this many edges, and region borders only remove some
        info.rows * info.columns.saturating_sub(1) + info.columns * info.rows.saturating_sub(1),
    );

    let mut seeds: Vec<Option<Location>> = vec![None; info.region_count()];
    let mut cells_per_region = vec![0usize; info.region_count()];

    for (index, region) in info.regions.iter().enumerate() {
        let location = Location::from_linear(index, info.columns);
        graph.add_node(location);
        seeds[*region].get_or_insert(location);
        cells_per_region[*region] += 1;

        // forward directions only; each adjacent pair is considered once
        for direction in SquareStep::FORWARD_VARIANTS {
            let neighbor = direction.attempt_from(location);
            if neighbor.in_bounds(dims) && info.regions[neighbor.linear(info.columns)] == *region {
                graph.add_edge(location, neighbor, ());
            }
        }
    }

    for (region, seed) in seeds.iter().enumerate() {
        // extract() leaves no region line without cells
        let seed = seed.expect("every region id has at least one cell");

        let mut reached = 0;
        let mut bfs = Bfs::new(&graph, seed);
        while bfs.next(&graph).is_some() {
            reached += 1;
        }

        trace!("region {}: reached {} of {} cells", region, reached, cells_per_region[region]);
        if reached != cells_per_region[region] {
            return Err(ContiguityError { region, reached, cells: cells_per_region[region] });
        }
    }

    Ok(())
}
