use docopt::Docopt;
use serde_derive::Deserialize;
use perfect_mazes::{
    cells::GridCoordinate,
    generators::Algorithm,
    grid::Grid,
    grid_displays::{render_box_drawing, render_compact, SolutionPathDisplay},
    pathing::Distances,
    units::{ColumnsCount, RowsCount},
    utils,
};
use std::io::{self, prelude::*};
use tracing::{info, Level};

const USAGE: &str = "Perfect mazes

Usage:
    mazes_driver [options] [<rows> <columns>]
    mazes_driver --list-algorithms
    mazes_driver (-h | --help)

Options:
    -h --help               Show this screen.
    -a --algorithm=<name>   Maze generation algorithm, see --list-algorithms [default: rb].
    -l --large              Draw with box drawing characters, three characters per cell.
    -s --solve              Draw the route from the top left to the bottom right cell. Implies --large.
    --show-distances        Label each cell with its distance from the top left cell. Implies --large.
    -q --quiet              Do not draw the maze.
    -d --debug              Log what each algorithm does.
    -D --trace              Log every step of every algorithm.
    --seed=<n>              Seed the random source to repeat a maze.
    --stats                 Print passage, dead end and route length counts.
    --list-algorithms       List the maze generation algorithm names.
";
const DEFAULT_ROWS: usize = 10;
const DEFAULT_COLUMNS: usize = 10;

#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_rows: Option<usize>,
    arg_columns: Option<usize>,
    flag_algorithm: String,
    flag_large: bool,
    flag_solve: bool,
    flag_show_distances: bool,
    flag_quiet: bool,
    flag_debug: bool,
    flag_trace: bool,
    flag_seed: Option<u64>,
    flag_stats: bool,
    flag_list_algorithms: bool,
}

// Error, ErrorKind, ResultExt and Result for the driver.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            Algorithm(::perfect_mazes::generators::UnknownAlgorithm);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    init_logging(&args);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.flag_list_algorithms {
        write_algorithm_list(&mut out).chain_err(|| "Failed to list the algorithms")?;
        return Ok(());
    }

    let algorithm: Algorithm = args.flag_algorithm.parse()?;
    let rows = args.arg_rows.unwrap_or(DEFAULT_ROWS);
    let columns = args.arg_columns.unwrap_or(DEFAULT_COLUMNS);

    let mut rng = utils::seeded_rng(args.flag_seed);
    let mut maze_grid = Grid::generate(RowsCount(rows), ColumnsCount(columns), algorithm, &mut rng);
    info!(?maze_grid, "maze ready");

    let entrance = GridCoordinate::new(0, 0);
    let exit = GridCoordinate::new(maze_grid.num_rows() - 1, maze_grid.num_columns() - 1);

    let solution_length = if args.flag_solve || args.flag_stats {
        let path = maze_grid.find_path(entrance, exit)
            .ok_or("The maze has no route from the entrance to the exit")?;
        Some(path.len())
    } else {
        None
    };

    if !args.flag_quiet {
        let drawing = if args.flag_show_distances {
            let distances = Distances::for_grid(&maze_grid, entrance)
                .ok_or("Invalid start coordinate from which to show distances.")?;
            render_box_drawing(&maze_grid, Some(&distances))
        } else if args.flag_solve {
            render_box_drawing(&maze_grid, Some(&SolutionPathDisplay))
        } else if args.flag_large {
            maze_grid.to_string()
        } else {
            render_compact(&maze_grid)
        };
        out.write_all(drawing.as_bytes()).chain_err(|| "Failed to write the maze")?;
    }

    if let Some(length) = solution_length.filter(|_| args.flag_stats) {
        write_stats(&mut out, &maze_grid, length).chain_err(|| "Failed to write the maze statistics")?;
    }

    Ok(())
}

fn init_logging(args: &MazeArgs) {
    let level = if args.flag_trace {
        Level::TRACE
    } else if args.flag_debug {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn write_algorithm_list<W: Write>(out: &mut W) -> io::Result<()> {
    for algorithm in Algorithm::ALL.iter() {
        writeln!(out, "{:<24}{}", algorithm.name(), algorithm.aliases().join(", "))?;
    }
    Ok(())
}

fn write_stats<W: Write>(out: &mut W, maze_grid: &Grid, solution_length: usize) -> io::Result<()> {
    let dead_ends = maze_grid
        .iter()
        .filter(|&coord| maze_grid[coord].connections_count() == 1)
        .count();

    writeln!(out, "algorithm:        {}",
             maze_grid.algorithm().map_or("none", Algorithm::name))?;
    writeln!(out, "size:             {} x {}", maze_grid.num_rows(), maze_grid.num_columns())?;
    writeln!(out, "passages:         {}", maze_grid.links_count())?;
    writeln!(out, "dead ends:        {}", dead_ends)?;
    writeln!(out, "solution length:  {}", solution_length)?;

    if let Some(distances) = Distances::for_grid(maze_grid, GridCoordinate::new(0, 0)) {
        let furthest = distances.furthest_points_on_grid();
        let furthest_text = furthest.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        writeln!(out, "furthest cells:   {} at distance {}", furthest_text, distances.max())?;
    }
    Ok(())
}
