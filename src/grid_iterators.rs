use std::fmt;

use crate::cells::GridCoordinate;

/// Row-major walk over every coordinate of a rows x columns grid.
#[derive(Clone)]
pub struct CellIter {
    columns_count: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(rows_count: usize, columns_count: usize) -> CellIter {
        CellIter {
            columns_count,
            current_cell_number: 0,
            cells_count: rows_count * columns_count,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::new(self.current_cell_number / self.columns_count,
                                            self.current_cell_number % self.columns_count);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// Yields one `Vec` of coordinates per grid row, top row first.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    rows_count: usize,
    columns_count: usize,
    current_row: usize,
}

impl BatchIter {
    pub(crate) fn new(rows_count: usize, columns_count: usize) -> BatchIter {
        BatchIter {
            rows_count,
            columns_count,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for BatchIter {}
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows_count {
            let row = self.current_row;
            let coords = (0..self.columns_count)
                .map(|col| GridCoordinate::new(row, col))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_count - self.current_row;
        (remaining, Some(remaining))
    }
}
