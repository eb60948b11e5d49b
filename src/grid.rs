use std::error::Error;
use std::fmt;
use std::ops::Index;

use petgraph::{algo, Graph, Undirected};
use rand::Rng;
use smallvec::SmallVec;
use tracing::{error, warn};

use crate::cells::{Cell, CoordinateSmallVec, Direction, DirectionSmallVec, GridCoordinate};
use crate::generators::{self, Algorithm};
use crate::grid_iterators::{BatchIter, CellIter};
use crate::pathing;
use crate::units::{ColumnsCount, RowsCount};

pub const MAX_GRID_ROWS: usize = 500;
pub const MAX_GRID_COLUMNS: usize = 500;

type CoordinatePairs = SmallVec<[(GridCoordinate, GridCoordinate); 2]>;

/// A rectangular maze: the grid exclusively owns its cells, stored row-major.
#[derive(Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    rows_count: usize,
    columns_count: usize,
    algorithm: Option<Algorithm>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            CellLinkError::InvalidGridCoordinate => "cell coordinate is outside the grid",
            CellLinkError::SelfLink => "a cell cannot be linked to itself",
            CellLinkError::NotAdjacent => "cells are not orthogonally adjacent",
        };
        f.write_str(msg)
    }
}

impl Error for CellLinkError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, links: {:?}, algorithm: {:?}",
               self.rows_count,
               self.columns_count,
               self.links_count(),
               self.algorithm)
    }
}

impl Index<GridCoordinate> for Grid {
    type Output = Cell;

    /// Panics if the coordinate is outside the grid.
    fn index(&self, coord: GridCoordinate) -> &Cell {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => &self.cells[index],
            None => panic!("{} is outside a {}x{} grid", coord, self.rows_count, self.columns_count),
        }
    }
}

fn clamp_dimension(name: &str, requested: usize, max: usize) -> usize {
    let clamped = requested.max(1).min(max);
    if clamped != requested {
        warn!(requested, clamped, "grid {} outside 1..={}, clamping", name, max);
    }
    clamped
}

impl Grid {
    /// A grid with every cell walled off from its neighbours.
    ///
    /// Each dimension is clamped into `1..=500`.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Grid {
        let RowsCount(rows_requested) = rows;
        let ColumnsCount(columns_requested) = columns;
        let rows_count = clamp_dimension("rows", rows_requested, MAX_GRID_ROWS);
        let columns_count = clamp_dimension("columns", columns_requested, MAX_GRID_COLUMNS);

        let cells = CellIter::new(rows_count, columns_count)
            .map(Cell::new)
            .collect();

        Grid {
            cells,
            rows_count,
            columns_count,
            algorithm: None,
        }
    }

    /// Build a grid and carve a perfect maze into it with `algorithm`.
    pub fn generate<R: Rng + ?Sized>(rows: RowsCount,
                                     columns: ColumnsCount,
                                     algorithm: Algorithm,
                                     rng: &mut R)
                                     -> Grid {
        let mut grid = Grid::new(rows, columns);
        generators::generate(&mut grid, algorithm, rng);
        grid
    }

    /// Build a grid and carve a maze with the algorithm called `algorithm_name`.
    ///
    /// An unrecognised name is logged and leaves every cell disconnected; `algorithm()` is then `None`.
    pub fn construct<R: Rng + ?Sized>(rows: RowsCount,
                                      columns: ColumnsCount,
                                      algorithm_name: &str,
                                      rng: &mut R)
                                      -> Grid {
        match algorithm_name.parse::<Algorithm>() {
            Ok(algorithm) => Grid::generate(rows, columns, algorithm, rng),
            Err(e) => {
                error!("{}, leaving the grid disconnected", e);
                Grid::new(rows, columns)
            }
        }
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows_count
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns_count
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The algorithm that carved this grid, if any ran.
    #[inline]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    #[inline]
    pub(crate) fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
    }

    /// Number of passages, counting each symmetric link pair once.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows_count && coord.col < self.columns_count
    }

    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns_count + coord.col)
        } else {
            None
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid_coordinate_to_index(GridCoordinate::new(row, col))
            .map(|index| &self.cells[index])
    }

    /// Panics if the coordinate is outside the grid.
    pub(crate) fn cell_mut(&mut self, coord: GridCoordinate) -> &mut Cell {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => &mut self.cells[index],
            None => panic!("{} is outside a {}x{} grid", coord, self.rows_count, self.columns_count),
        }
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridCoordinate {
        self.cells[rng.gen_range(0..self.cells.len())].coordinate()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.rows_count, self.columns_count)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::new(self.rows_count, self.columns_count)
    }

    /// Every passage once, as (cell, cell to its right or below).
    pub fn iter_links(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + '_ {
        self.cells.iter().flat_map(|cell| {
            [Direction::Right, Direction::Down]
                .iter()
                .filter_map(move |&dir| cell.linked_neighbour(dir))
                .map(move |neighbour| (cell.coordinate(), neighbour))
                .collect::<CoordinatePairs>()
        })
    }

    /// The in-bounds cell one step from `coord`, regardless of any passage between them.
    pub fn neighbour_at_direction(&self, coord: GridCoordinate, dir: Direction) -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(dir).filter(|&neighbour| self.is_valid_coordinate(neighbour))
    }

    /// Directions that stay inside the grid, in `Direction::ALL` order.
    pub fn neighbour_directions(&self, coord: GridCoordinate) -> DirectionSmallVec {
        self.neighbour_directions_where(coord, |_| true)
    }

    pub fn unvisited_neighbours(&self, coord: GridCoordinate) -> DirectionSmallVec {
        self.neighbour_directions_where(coord, |cell| !cell.is_visited())
    }

    pub fn visited_neighbours(&self, coord: GridCoordinate) -> DirectionSmallVec {
        self.neighbour_directions_where(coord, Cell::is_visited)
    }

    fn neighbour_directions_where<F>(&self, coord: GridCoordinate, pred: F) -> DirectionSmallVec
        where F: Fn(&Cell) -> bool
    {
        Direction::ALL
            .iter()
            .cloned()
            .filter(|&dir| {
                self.neighbour_at_direction(coord, dir)
                    .map_or(false, |neighbour| pred(&self[neighbour]))
            })
            .collect()
    }

    /// Uniformly random in-bounds step away from `coord`.
    pub(crate) fn random_neighbour<R: Rng + ?Sized>(&self,
                                                    coord: GridCoordinate,
                                                    rng: &mut R)
                                                    -> Option<(Direction, GridCoordinate)> {
        let dirs = self.neighbour_directions(coord);
        if dirs.is_empty() {
            return None;
        }
        let dir = dirs[rng.gen_range(0..dirs.len())];
        self.neighbour_at_direction(coord, dir).map(|neighbour| (dir, neighbour))
    }

    /// Open the passage from `coord` towards `dir`, setting both halves of the link.
    ///
    /// Returns false, changing nothing, when `dir` leads off the grid.
    pub fn connect(&mut self, coord: GridCoordinate, dir: Direction) -> bool {
        self.carve(coord, dir).is_some()
    }

    /// `connect` that hands back the cell the new passage leads to.
    pub(crate) fn carve(&mut self, coord: GridCoordinate, dir: Direction) -> Option<GridCoordinate> {
        let neighbour = self.neighbour_at_direction(coord, dir)?;
        self.cell_mut(coord).set_link(dir, neighbour);
        self.cell_mut(neighbour).set_link(dir.opposite(), coord);
        Some(neighbour)
    }

    /// Link two cells that are exactly one orthogonal step apart.
    ///
    /// Returns the direction from `a` to `b` on success.
    pub fn link(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<Direction, CellLinkError> {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        let dir = a.direction_to(b).ok_or(CellLinkError::NotAdjacent)?;
        let _ = self.carve(a, dir);
        Ok(dir)
    }

    /// False for coordinates outside the grid.
    pub fn is_connected(&self, coord: GridCoordinate, dir: Direction) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.cells[index].is_connected(dir))
    }

    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        a.direction_to(b).map_or(false, |dir| self.is_connected(a, dir))
    }

    /// Cells joined to `coord` by a passage.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_to_index(coord).map(|index| self.cells[index].links())
    }

    /// Clear the scratch flags of every cell. Passages are untouched.
    pub fn reset_flags(&mut self) {
        for cell in &mut self.cells {
            cell.reset_flags();
        }
    }

    /// Solve the maze between two cells, marking the route's cells as on the solution path.
    ///
    /// See `pathing::find_path`.
    pub fn find_path(&mut self, start: GridCoordinate, end: GridCoordinate) -> Option<Vec<Direction>> {
        pathing::find_path(self, start, end)
    }

    /// The passages as an undirected graph. Node `i` is the cell at row-major index `i`.
    pub fn as_graph(&self) -> Graph<GridCoordinate, (), Undirected> {
        let mut graph = Graph::with_capacity(self.size(), self.size().saturating_sub(1));
        let nodes: Vec<_> = self.iter().map(|coord| graph.add_node(coord)).collect();

        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(nodes[a_index], nodes[b_index], ());
            }
        }
        graph
    }

    /// True when the passages form a spanning tree: one component and `size - 1` edges.
    pub fn is_perfect_maze(&self) -> bool {
        self.links_count() == self.size() - 1 && algo::connected_components(&self.as_graph()) == 1
    }
}
