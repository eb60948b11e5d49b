use std::error::Error;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::cells::{Direction, GridCoordinate};
use crate::disjoint_sets::RowSets;
use crate::grid::Grid;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Algorithm {
    RecursiveBacktracker,
    Eller,
    AldousBroder,
    Wilson,
    BinaryTree,
    Prim,
    Sidewinder,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [Algorithm::RecursiveBacktracker,
                                     Algorithm::Eller,
                                     Algorithm::AldousBroder,
                                     Algorithm::Wilson,
                                     Algorithm::BinaryTree,
                                     Algorithm::Prim,
                                     Algorithm::Sidewinder];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::RecursiveBacktracker => "recursive-backtracking",
            Algorithm::Eller => "eller",
            Algorithm::AldousBroder => "aldous-broder",
            Algorithm::Wilson => "wilson",
            Algorithm::BinaryTree => "binary-tree",
            Algorithm::Prim => "prim",
            Algorithm::Sidewinder => "sidewinder",
        }
    }

    /// Every accepted spelling, compared after lowercasing and dropping separators.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Algorithm::RecursiveBacktracker => &["rb", "recursivebacktracking", "recursivebacktracker"],
            Algorithm::Eller => &["e", "eller", "ellers"],
            Algorithm::AldousBroder => &["ab", "aldousbroder", "aldousbroders"],
            Algorithm::Wilson => &["w", "wilson", "wilsons"],
            Algorithm::BinaryTree => &["bt", "binarytree"],
            Algorithm::Prim => &["p", "prim", "prims"],
            Algorithm::Sidewinder => &["s", "sidewinder"],
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown maze generation algorithm '{}'", self.0)
    }
}

impl Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Algorithm, UnknownAlgorithm> {
        let normalised: String = s.chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '\''))
            .flat_map(char::to_lowercase)
            .collect();

        Algorithm::ALL
            .iter()
            .cloned()
            .find(|algorithm| algorithm.aliases().contains(&normalised.as_str()))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Carve a perfect maze into `grid` using `algorithm`, starting anywhere the algorithm likes.
///
/// The grid is expected to have no passages yet. Its scratch flags are reset first.
pub fn generate<R: Rng + ?Sized>(grid: &mut Grid, algorithm: Algorithm, rng: &mut R) {
    debug!(%algorithm, rows = grid.num_rows(), columns = grid.num_columns(), "generating maze");

    match algorithm {
        Algorithm::RecursiveBacktracker => recursive_backtracker(grid, None, rng),
        Algorithm::Eller => eller(grid, rng),
        Algorithm::AldousBroder => aldous_broder(grid, None, rng),
        Algorithm::Wilson => wilson(grid, rng),
        Algorithm::BinaryTree => binary_tree(grid, rng),
        Algorithm::Prim => prim(grid, None, rng),
        Algorithm::Sidewinder => sidewinder(grid, rng),
    }
    grid.set_algorithm(algorithm);

    debug!(%algorithm, links = grid.links_count(), "maze generated");
}

fn start_cell<R: Rng + ?Sized>(grid: &Grid, start: Option<GridCoordinate>, rng: &mut R) -> GridCoordinate {
    match start {
        Some(coord) if grid.is_valid_coordinate(coord) => coord,
        Some(coord) => {
            warn!(%coord, "start cell outside the grid, picking one at random");
            grid.random_cell(rng)
        }
        None => grid.random_cell(rng),
    }
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A random walk that only ever steps into unvisited cells. When it gets boxed in it retreats
/// along its own trail until some cell has an unvisited neighbour again. The trail is an explicit
/// stack, so huge grids cannot blow the call stack.
/// Long twisty corridors with few dead ends.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut Grid,
                                              start: Option<GridCoordinate>,
                                              rng: &mut R) {
    grid.reset_flags();
    let start = start_cell(grid, start, rng);
    grid.cell_mut(start).visited = true;

    let mut trail = vec![start];
    let mut steps = 0;

    while let Some(&current) = trail.last() {
        steps += 1;
        let options = grid.unvisited_neighbours(current);

        match options.choose(rng).and_then(|&dir| grid.carve(current, dir).map(|next| (dir, next))) {
            Some((dir, next)) => {
                trace!(from = %current, to = %next, "carve");
                let next_cell = grid.cell_mut(next);
                next_cell.visited = true;
                next_cell.arrived_from = Some(dir.opposite());
                trail.push(next);
            }
            None => {
                trace!(at = %current, "backtrack");
                let _ = trail.pop();
            }
        }
    }

    debug!(steps, "recursive backtracker finished");
}

/// Apply Eller's maze generation algorithm to a grid.
///
/// Works a row at a time, remembering only which cells of the current row are already joined.
/// Neighbours in different sets are joined at random, then every set sends at least one passage
/// down into the next row. The last row joins everything still apart.
pub fn eller<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    grid.reset_flags();
    let rows_count = grid.num_rows();
    let columns_count = grid.num_columns();
    let mut sets = RowSets::new(columns_count);
    let mut steps = 0;

    for row in 0..rows_count {
        let is_last_row = row + 1 == rows_count;

        for col in 0..columns_count - 1 {
            steps += 1;
            if sets.same_set(col, col + 1) {
                continue;
            }
            if is_last_row || rng.gen_bool(0.5) {
                grid.connect(GridCoordinate::new(row, col), Direction::Right);
                sets.merge(col, col + 1);
                trace!(row, col, "join right");
            }
        }

        if is_last_row {
            break;
        }

        // Each set must reach the next row. Members that do not go down leave their set, so
        // once only one member remains it is forced down.
        for col in 0..columns_count {
            steps += 1;
            if sets.is_singleton(col) || rng.gen_bool(0.5) {
                grid.connect(GridCoordinate::new(row, col), Direction::Down);
                trace!(row, col, "join down");
            } else {
                sets.isolate(col);
            }
        }
    }

    debug!(steps, sets = sets.sets_count(), "eller finished");
}

/// Apply the Aldous-Broder maze generation algorithm to a grid.
///
/// Wander about completely at random, carving a passage whenever the walk enters a cell for the
/// first time. Every possible maze is equally likely but the walk wastes a lot of steps finding the
/// last few unvisited cells.
pub fn aldous_broder<R: Rng + ?Sized>(grid: &mut Grid, start: Option<GridCoordinate>, rng: &mut R) {
    grid.reset_flags();
    let mut current = start_cell(grid, start, rng);
    grid.cell_mut(current).visited = true;

    let mut unvisited_count = grid.size() - 1;
    let mut steps = 0;

    while unvisited_count > 0 {
        let (dir, next) = match grid.random_neighbour(current, rng) {
            Some(step) => step,
            None => break,
        };
        steps += 1;

        if !grid[next].is_visited() {
            grid.connect(current, dir);
            grid.cell_mut(next).visited = true;
            unvisited_count -= 1;
            trace!(from = %current, to = %next, "carve");
        }
        current = next;
    }

    debug!(steps, "aldous-broder finished");
}

/// Apply Wilson's maze generation algorithm to a grid.
///
/// Loop erased random walks: from a cell outside the maze walk randomly until hitting the maze,
/// remembering only the last direction taken out of each cell. Following those directions from
/// the walk's start gives a loop free path, which is carved and added to the maze.
/// Uniform like Aldous-Broder but usually much quicker once the maze has some size.
pub fn wilson<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    grid.reset_flags();

    let mut cells: Vec<GridCoordinate> = grid.iter().collect();
    cells.shuffle(rng);
    let mut cells = cells.into_iter();
    if let Some(first) = cells.next() {
        grid.cell_mut(first).visited = true;
    }
    let mut steps = 0;

    for walk_start in cells {
        if grid[walk_start].is_visited() {
            continue;
        }

        let mut current = walk_start;
        while !grid[current].is_visited() {
            let (dir, next) = match grid.random_neighbour(current, rng) {
                Some(step) => step,
                None => break,
            };
            grid.cell_mut(current).depart_direction = Some(dir);
            current = next;
            steps += 1;
        }

        let mut current = walk_start;
        while !grid[current].is_visited() {
            grid.cell_mut(current).visited = true;
            let depart = grid[current].depart_direction();
            match depart.and_then(|dir| grid.carve(current, dir)) {
                Some(next) => {
                    trace!(from = %current, to = %next, "carve");
                    current = next;
                }
                None => break,
            }
        }
    }

    debug!(steps, "wilson finished");
}

/// Apply the binary tree maze generation algorithm to a grid.
///
/// Each cell carves either up or left. The top row can only go left and the first column can
/// only go up, which leaves two unbroken corridors along those edges.
pub fn binary_tree<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    grid.reset_flags();

    for coord in grid.iter() {
        let dir = match (coord.row, coord.col) {
            (0, 0) => continue,
            (0, _) => Direction::Left,
            (_, 0) => Direction::Up,
            _ => {
                if rng.gen_bool(0.5) {
                    Direction::Up
                } else {
                    Direction::Left
                }
            }
        };
        grid.connect(coord, dir);
        trace!(%coord, %dir, "carve");
    }

    debug!(cells = grid.size(), "binary tree finished");
}

/// Apply Prim's maze generation algorithm to a grid.
///
/// Grows the maze outwards from one cell. The frontier holds every cell next to the maze but not
/// yet in it; each step pulls a random frontier cell into the maze through a random passage.
/// Lots of short dead ends.
pub fn prim<R: Rng + ?Sized>(grid: &mut Grid, start: Option<GridCoordinate>, rng: &mut R) {
    grid.reset_flags();
    let start = start_cell(grid, start, rng);
    grid.cell_mut(start).visited = true;

    let mut frontier = vec![];
    extend_frontier(grid, start, &mut frontier);
    let mut steps = 0;

    while !frontier.is_empty() {
        let cell = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        grid.cell_mut(cell).visited = true;

        let into_maze = grid.visited_neighbours(cell);
        if let Some(&dir) = into_maze.choose(rng) {
            grid.connect(cell, dir);
            trace!(%cell, %dir, "carve");
        }

        extend_frontier(grid, cell, &mut frontier);
        steps += 1;
    }

    debug!(steps, "prim finished");
}

fn extend_frontier(grid: &mut Grid, coord: GridCoordinate, frontier: &mut Vec<GridCoordinate>) {
    for dir in grid.unvisited_neighbours(coord) {
        if let Some(neighbour) = grid.neighbour_at_direction(coord, dir) {
            let neighbour_cell = grid.cell_mut(neighbour);
            if !neighbour_cell.frontier_marked {
                neighbour_cell.frontier_marked = true;
                frontier.push(neighbour);
            }
        }
    }
}

/// Apply the sidewinder maze generation algorithm to a grid.
///
/// The top row is one long corridor. Every other row is split into runs: a coin flip either
/// extends the run to the right or closes it, carving up from one random member of the run.
/// Like binary tree there is a bias towards the top, but passages mix better.
pub fn sidewinder<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    grid.reset_flags();
    let columns_count = grid.num_columns();

    for row in grid.iter_row() {
        let mut run = Vec::with_capacity(columns_count);

        for coord in row {
            let at_row_end = coord.col + 1 == columns_count;

            if coord.row == 0 {
                if !at_row_end {
                    grid.connect(coord, Direction::Right);
                }
                continue;
            }

            run.push(coord);
            if !at_row_end && rng.gen_bool(0.5) {
                grid.connect(coord, Direction::Right);
            } else {
                if let Some(&run_member) = run.choose(rng) {
                    grid.connect(run_member, Direction::Up);
                    trace!(%run_member, run_length = run.len(), "close run");
                }
                run.clear();
            }
        }
    }

    debug!(cells = grid.size(), "sidewinder finished");
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn empty_grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns))
    }

    fn seeded_grid(rows: usize, columns: usize, algorithm: Algorithm, seed: u64) -> Grid {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        Grid::generate(RowsCount(rows), ColumnsCount(columns), algorithm, &mut rng)
    }

    fn links_are_symmetric(g: &Grid) -> bool {
        g.iter().all(|coord| {
            Direction::ALL.iter().all(|&dir| {
                match g.neighbour_at_direction(coord, dir) {
                    Some(neighbour) => {
                        g.is_connected(coord, dir) == g.is_connected(neighbour, dir.opposite())
                    }
                    None => !g.is_connected(coord, dir),
                }
            })
        })
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("rb".parse(), Ok(Algorithm::RecursiveBacktracker));
        assert_eq!("recursive-backtracking".parse(), Ok(Algorithm::RecursiveBacktracker));
        assert_eq!("Ellers".parse(), Ok(Algorithm::Eller));
        assert_eq!("Aldous-Broder".parse(), Ok(Algorithm::AldousBroder));
        assert_eq!("ab".parse(), Ok(Algorithm::AldousBroder));
        assert_eq!("wilson's".parse(), Ok(Algorithm::Wilson));
        assert_eq!("binary_tree".parse(), Ok(Algorithm::BinaryTree));
        assert_eq!("p".parse(), Ok(Algorithm::Prim));
        assert_eq!("s".parse(), Ok(Algorithm::Sidewinder));

        assert_eq!("hunt-and-kill".parse::<Algorithm>(),
                   Err(UnknownAlgorithm(String::from("hunt-and-kill"))));
        assert!("".parse::<Algorithm>().is_err());

        for &algorithm in Algorithm::ALL.iter() {
            assert_eq!(algorithm.to_string().parse(), Ok(algorithm));
        }
    }

    #[test]
    fn every_algorithm_makes_a_spanning_tree() {
        let dimensions = [(1, 1), (1, 2), (2, 1), (1, 9), (9, 1), (2, 2), (3, 3), (5, 8), (8, 5),
                          (16, 16), (7, 31)];
        for &algorithm in Algorithm::ALL.iter() {
            for &(rows, columns) in dimensions.iter() {
                for seed in 0..5 {
                    let g = seeded_grid(rows, columns, algorithm, seed);
                    assert_eq!(g.links_count(), rows * columns - 1,
                               "{} on {}x{} seed {}", algorithm, rows, columns, seed);
                    assert!(g.is_perfect_maze(), "{} on {}x{} seed {}", algorithm, rows, columns, seed);
                    assert!(links_are_symmetric(&g));
                    assert_eq!(g.algorithm(), Some(algorithm));
                }
            }
        }
    }

    #[test]
    fn spanning_tree_property() {
        fn p(algorithm_index: u8, rows: u8, columns: u8, seed: u64) -> TestResult {
            let algorithm = Algorithm::ALL[algorithm_index as usize % Algorithm::ALL.len()];
            let (rows, columns) = (1 + rows as usize % 20, 1 + columns as usize % 20);
            let g = seeded_grid(rows, columns, algorithm, seed);
            TestResult::from_bool(g.is_perfect_maze() && links_are_symmetric(&g))
        }
        quickcheck(p as fn(u8, u8, u8, u64) -> TestResult);
    }

    #[test]
    fn single_row_is_one_corridor() {
        for &algorithm in Algorithm::ALL.iter() {
            let g = seeded_grid(1, 12, algorithm, 99);
            assert_eq!(g.links_count(), 11);
            for col in 0..11 {
                assert!(g.is_connected(GridCoordinate::new(0, col), Direction::Right), "{}", algorithm);
            }
            assert!(g.iter_links().all(|(a, b)| a.row == 0 && b.row == 0));
        }
    }

    #[test]
    fn single_column_is_one_corridor() {
        for &algorithm in Algorithm::ALL.iter() {
            let g = seeded_grid(12, 1, algorithm, 99);
            assert_eq!(g.links_count(), 11);
            for row in 0..11 {
                assert!(g.is_connected(GridCoordinate::new(row, 0), Direction::Down), "{}", algorithm);
            }
        }
    }

    #[test]
    fn recursive_backtracker_golden_3x3() {
        // StepRng(0, 0) always picks the first option: right, then down when right is exhausted.
        let mut g = empty_grid(3, 3);
        let mut rng = StepRng::new(0, 0);
        recursive_backtracker(&mut g, Some(GridCoordinate::new(0, 0)), &mut rng);

        let gc = |row, col| GridCoordinate::new(row, col);
        let mut links: Vec<_> = g.iter_links().collect();
        links.sort();
        assert_eq!(links,
                   vec![(gc(0, 0), gc(0, 1)),
                        (gc(0, 1), gc(0, 2)),
                        (gc(0, 2), gc(1, 2)),
                        (gc(1, 0), gc(1, 1)),
                        (gc(1, 0), gc(2, 0)),
                        (gc(1, 1), gc(1, 2)),
                        (gc(2, 0), gc(2, 1)),
                        (gc(2, 1), gc(2, 2))]);

        assert_eq!(g[gc(1, 1)].arrived_from(), Some(Direction::Right));
        assert_eq!(g[gc(2, 0)].arrived_from(), Some(Direction::Up));
        assert_eq!(g[gc(0, 0)].arrived_from(), None);
    }

    #[test]
    fn same_seed_same_maze() {
        for &algorithm in Algorithm::ALL.iter() {
            let a = seeded_grid(10, 12, algorithm, 2024);
            let b = seeded_grid(10, 12, algorithm, 2024);
            assert_eq!(a.iter_links().collect::<Vec<_>>(), b.iter_links().collect::<Vec<_>>());
        }
    }

    #[test]
    fn binary_tree_shape() {
        let g = seeded_grid(9, 7, Algorithm::BinaryTree, 5);
        let origin = GridCoordinate::new(0, 0);
        assert!(!g.is_connected(origin, Direction::Up));
        assert!(!g.is_connected(origin, Direction::Left));

        for coord in g.iter().filter(|&c| c != origin) {
            let up = g.is_connected(coord, Direction::Up);
            let left = g.is_connected(coord, Direction::Left);
            assert!(up ^ left, "{} must carve exactly one of up or left", coord);
            if coord.row == 0 {
                assert!(left);
            }
            if coord.col == 0 {
                assert!(up);
            }
        }
    }

    #[test]
    fn sidewinder_top_row_is_open() {
        for seed in 0..10 {
            let g = seeded_grid(6, 9, Algorithm::Sidewinder, seed);
            for col in 0..8 {
                assert!(g.is_connected(GridCoordinate::new(0, col), Direction::Right));
            }
            // every later run closes upwards exactly once
            for row in 1..6 {
                let ups = (0..9)
                    .filter(|&col| g.is_connected(GridCoordinate::new(row, col), Direction::Up))
                    .count();
                let rights = (0..8)
                    .filter(|&col| g.is_connected(GridCoordinate::new(row, col), Direction::Right))
                    .count();
                assert_eq!(ups + rights, 9);
            }
        }
    }

    #[test]
    fn eller_last_row_is_fully_joined() {
        // gen_bool(0.5) is always true here: the first row joins fully and every cell goes down.
        let mut g = empty_grid(4, 5);
        eller(&mut g, &mut StepRng::new(0, 0));
        assert!(g.is_perfect_maze());
        for col in 0..4 {
            assert!(g.is_connected(GridCoordinate::new(0, col), Direction::Right));
        }
    }

    #[test]
    fn algorithms_visit_every_cell() {
        let mut rng = XorShiftRng::seed_from_u64(11);
        let mut g = empty_grid(7, 6);
        prim(&mut g, Some(GridCoordinate::new(3, 3)), &mut rng);
        assert!(g.is_perfect_maze());
        assert!(g.iter().all(|coord| g[coord].is_visited() && (g[coord].is_frontier_marked() ||
                                                               coord == GridCoordinate::new(3, 3))));

        let mut g = empty_grid(7, 6);
        wilson(&mut g, &mut rng);
        assert!(g.iter().all(|coord| g[coord].is_visited()));

        let mut g = empty_grid(7, 6);
        aldous_broder(&mut g, Some(GridCoordinate::new(6, 5)), &mut rng);
        assert!(g.iter().all(|coord| g[coord].is_visited()));
    }

    #[test]
    fn invalid_start_falls_back_to_a_random_cell() {
        let mut rng = XorShiftRng::seed_from_u64(8);
        let mut g = empty_grid(4, 4);
        recursive_backtracker(&mut g, Some(GridCoordinate::new(40, 40)), &mut rng);
        assert!(g.is_perfect_maze());
    }
}
