use std::fmt;

use crate::cells::{Cell, Direction, GridCoordinate};
use crate::grid::Grid;
use crate::pathing::Distances;

/// Supplies the three glyphs drawn inside each cell by `render_box_drawing`.
pub trait GridDisplay {
    fn render_cell_body(&self, cell: &Cell) -> String;
}

/// Marks cells flagged as on the solution path by the last `Grid::find_path`.
#[derive(Debug, Copy, Clone, Default)]
pub struct SolutionPathDisplay;

impl GridDisplay for SolutionPathDisplay {
    fn render_cell_body(&self, cell: &Cell) -> String {
        if cell.is_on_solution_path() {
            String::from(" * ")
        } else {
            String::from("   ")
        }
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, cell: &Cell) -> String {
        match self.distance_from_start_to(cell.coordinate()) {
            // centre align, padding 3, lowercase hexadecimal
            Some(d) => format!("{:^3x}", d),
            None => String::from("   "),
        }
    }
}

/// One character per wall: `_` floors and `|` sides, two columns per cell.
///
/// The entrance above the top left cell and the exit below the bottom right cell are left open.
pub fn render_compact(grid: &Grid) -> String {
    let rows_count = grid.num_rows();
    let columns_count = grid.num_columns();
    let exit = GridCoordinate::new(rows_count - 1, columns_count - 1);

    let mut output = String::with_capacity((rows_count + 1) * (2 * columns_count + 2));
    output.push_str("  ");
    for _ in 1..columns_count {
        output.push_str(" _");
    }
    output.push('\n');

    for row in grid.iter_row() {
        output.push('|');
        for coord in row {
            let floor_open = coord == exit || grid.is_connected(coord, Direction::Down);
            output.push(if floor_open { ' ' } else { '_' });
            output.push(if grid.is_connected(coord, Direction::Right) { ' ' } else { '|' });
        }
        output.push('\n');
    }
    output
}

/// Box drawing rendering, three characters wide per cell, with cell bodies from `display`.
///
/// Walls are drawn on a lattice of corners; each corner glyph joins whichever of its four wall
/// segments exist. The entrance and exit are open as in `render_compact`.
pub fn render_box_drawing(grid: &Grid, display: Option<&dyn GridDisplay>) -> String {
    const WALL_LR_3: &str = "───";
    const WALL_UD: &str = "│";
    const OPEN_3: &str = "   ";

    let rows_count = grid.num_rows();
    let columns_count = grid.num_columns();

    // The wall along the top of lattice row `i` for column `j`, `i` in 0..=rows.
    let floor_wall = |i: usize, j: usize| {
        if i == 0 {
            j != 0
        } else if i == rows_count {
            j != columns_count - 1
        } else {
            !grid.is_connected(GridCoordinate::new(i - 1, j), Direction::Down)
        }
    };
    // The wall to the left of column `j` in row `r`, `j` in 0..=columns.
    let side_wall = |r: usize, j: usize| {
        j == 0 || j == columns_count ||
        !grid.is_connected(GridCoordinate::new(r, j - 1), Direction::Right)
    };
    let corner = |i: usize, j: usize| {
        let left = j > 0 && floor_wall(i, j - 1);
        let right = j < columns_count && floor_wall(i, j);
        let up = i > 0 && side_wall(i - 1, j);
        let down = i < rows_count && side_wall(i, j);
        corner_glyph(left, right, up, down)
    };

    let mut output = String::new();
    for i in 0..=rows_count {
        for j in 0..=columns_count {
            output.push_str(corner(i, j));
            if j < columns_count {
                output.push_str(if floor_wall(i, j) { WALL_LR_3 } else { OPEN_3 });
            }
        }
        output.push('\n');

        if i == rows_count {
            break;
        }
        for j in 0..=columns_count {
            output.push_str(if side_wall(i, j) { WALL_UD } else { " " });
            if j < columns_count {
                let cell = &grid[GridCoordinate::new(i, j)];
                match display {
                    Some(displayer) => output.push_str(&displayer.render_cell_body(cell)),
                    None => output.push_str(OPEN_3),
                }
            }
        }
        output.push('\n');
    }
    output
}

fn corner_glyph(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (false, false, false, false) => " ",
        (true, false, false, false) => "╴",
        (false, true, false, false) => "╶",
        (false, false, true, false) => "╵",
        (false, false, false, true) => "╷",
        (true, true, false, false) => "─",
        (false, false, true, true) => "│",
        (true, false, false, true) => "┐",
        (false, true, true, false) => "└",
        (true, false, true, false) => "┘",
        (false, true, false, true) => "┌",
        (true, true, true, false) => "┴",
        (true, true, false, true) => "┬",
        (false, true, true, true) => "├",
        (true, false, true, true) => "┤",
        (true, true, true, true) => "┼",
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&render_box_drawing(self, None))
    }
}
