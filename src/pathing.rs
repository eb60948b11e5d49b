use std::collections::hash_map::Entry;

use itertools::Itertools;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cells::{Direction, GridCoordinate};
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};

/// Depth first search for the route from `start` to `end` along the maze's passages.
///
/// Scratch flags are reset first. Directions are tried in `Direction::ALL` order, so the search is
/// deterministic. Every cell on the returned route, `start` and `end` included, is left with
/// `is_on_solution_path()` set and each cell entered records `arrived_from`.
///
/// Returns `None` when either coordinate is off the grid or when no route exists, which only
/// happens on a grid that is not a perfect maze. No cell is left marked in that case.
pub fn find_path(grid: &mut Grid, start: GridCoordinate, end: GridCoordinate) -> Option<Vec<Direction>> {
    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(end) {
        return None;
    }
    grid.reset_flags();

    let mut path: Vec<Direction> = Vec::new();
    let mut current = start;

    loop {
        if current == end {
            grid.cell_mut(current).on_solution_path = true;
            debug!(%start, %end, length = path.len(), "path found");
            return Some(path);
        }

        grid.cell_mut(current).visited = true;
        let next = Direction::ALL
            .iter()
            .cloned()
            .filter_map(|dir| grid[current].linked_neighbour(dir).map(|neighbour| (dir, neighbour)))
            .find(|&(_, neighbour)| !grid[neighbour].is_visited());

        match next {
            Some((dir, neighbour)) => {
                grid.cell_mut(current).on_solution_path = true;
                grid.cell_mut(neighbour).arrived_from = Some(dir.opposite());
                path.push(dir);
                current = neighbour;
            }
            None => {
                // dead end
                grid.cell_mut(current).on_solution_path = false;
                let back = path.pop().and_then(|dir| grid.neighbour_at_direction(current, dir.opposite()));
                match back {
                    Some(previous) => {
                        trace!(from = %current, to = %previous, "backtrack");
                        current = previous;
                    }
                    None => {
                        debug!(%start, %end, "no path");
                        return None;
                    }
                }
            }
        }
    }
}

/// Walk `path` from `start` through open passages only.
///
/// Returns where the walk ends, or `None` if a step hits a wall or leaves the grid.
pub fn follow_path(grid: &Grid, start: GridCoordinate, path: &[Direction]) -> Option<GridCoordinate> {
    if !grid.is_valid_coordinate(start) {
        return None;
    }
    path.iter()
        .try_fold(start, |coord, &dir| grid[coord].linked_neighbour(dir))
}

/// Breadth first flood fill: the number of steps from a start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn for_grid(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max: u32 = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every passage is one step, so the first time a cell is reached is via a shortest route
        // and the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                max = max.max(distance_to_cell);

                for link_coordinate in grid[*cell_coord].links() {
                    if let Entry::Vacant(entry) = distances.entry(link_coordinate) {
                        let _ = entry.insert(distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at `max()` steps from the start, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, &distance)| distance == furthest_distance)
            .map(|(&coord, _)| coord)
            .sorted()
            .collect()
    }
}
