use smallvec::SmallVec;
use std::fmt;

pub type DirectionSmallVec = SmallVec<[Direction; 4]>;
pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// The four ways out of a square cell. Row 0 is the top of the grid, so `Up` decreases the row.
///
/// The declaration order is the priority order used wherever directions are scanned in turn.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Up, Direction::Left, Direction::Down];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, col: usize) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    /// The coordinate one step away in `dir`, or `None` when that would leave the first row or column.
    /// Whether the result fits inside a particular grid is the grid's business.
    pub fn offset(self, dir: Direction) -> Option<GridCoordinate> {
        let GridCoordinate { row, col } = self;
        match dir {
            Direction::Right => Some(GridCoordinate::new(row, col + 1)),
            Direction::Up if row > 0 => Some(GridCoordinate::new(row - 1, col)),
            Direction::Left if col > 0 => Some(GridCoordinate::new(row, col - 1)),
            Direction::Down => Some(GridCoordinate::new(row + 1, col)),
            _ => None,
        }
    }

    /// Direction leading from `self` to `other` when they are orthogonally adjacent.
    pub fn direction_to(self, other: GridCoordinate) -> Option<Direction> {
        Direction::ALL
            .iter()
            .cloned()
            .find(|&dir| self.offset(dir) == Some(other))
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One position in a maze grid.
///
/// The links are permanent once set. Everything else is scratch state owned by whichever
/// generator or solver is currently running over the grid and is cleared by `Grid::reset_flags`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: GridCoordinate,
    links: [Option<GridCoordinate>; 4],
    pub(crate) visited: bool,
    pub(crate) frontier_marked: bool,
    pub(crate) on_solution_path: bool,
    pub(crate) arrived_from: Option<Direction>,
    pub(crate) depart_direction: Option<Direction>,
}

impl Cell {
    pub(crate) fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            links: [None; 4],
            visited: false,
            frontier_marked: false,
            on_solution_path: false,
            arrived_from: None,
            depart_direction: None,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.coord.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.coord.col
    }

    #[inline]
    pub fn is_connected(&self, dir: Direction) -> bool {
        self.links[dir.index()].is_some()
    }

    #[inline]
    pub fn linked_neighbour(&self, dir: Direction) -> Option<GridCoordinate> {
        self.links[dir.index()]
    }

    /// Coordinates of the cells reachable in one step, in direction priority order.
    pub fn links(&self) -> CoordinateSmallVec {
        self.links.iter().filter_map(|link| *link).collect()
    }

    pub fn connections_count(&self) -> usize {
        self.links.iter().filter(|link| link.is_some()).count()
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn is_frontier_marked(&self) -> bool {
        self.frontier_marked
    }

    #[inline]
    pub fn is_on_solution_path(&self) -> bool {
        self.on_solution_path
    }

    #[inline]
    pub fn arrived_from(&self) -> Option<Direction> {
        self.arrived_from
    }

    #[inline]
    pub fn depart_direction(&self) -> Option<Direction> {
        self.depart_direction
    }

    pub(crate) fn set_link(&mut self, dir: Direction, to: GridCoordinate) {
        self.links[dir.index()] = Some(to);
    }

    pub(crate) fn reset_flags(&mut self) {
        self.visited = false;
        self.frontier_marked = false;
        self.on_solution_path = false;
        self.arrived_from = None;
        self.depart_direction = None;
    }
}
