//! **perfect_mazes** generates perfect mazes on a rectangular grid, solves them and renders them as text.
//!
//! A perfect maze is a spanning tree over the grid's cells: every cell is reachable and there is
//! exactly one route between any two cells. Seven interchangeable generators are provided in
//! `generators`, each drawing randomness from a caller supplied `rand::Rng`.

pub mod cells;
pub mod disjoint_sets;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod units;
pub mod utils;
