use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use perfect_mazes::cells::GridCoordinate;
use perfect_mazes::generators::Algorithm;
use perfect_mazes::grid::Grid;
use perfect_mazes::pathing::Distances;
use perfect_mazes::units::{ColumnsCount, RowsCount};
use perfect_mazes::utils;

fn large_maze() -> Grid {
    let mut rng = utils::seeded_rng(Some(350));
    Grid::generate(RowsCount(350), ColumnsCount(350), Algorithm::RecursiveBacktracker, &mut rng)
}

fn bench_find_path(c: &mut Criterion) {
    c.bench_function("find_path", |b| {
        let mut g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let end_coord = GridCoordinate::new(0, 0);
        b.iter(|| g.find_path(start_coord, end_coord))
    });
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        b.iter(|| Distances::for_grid(&g, start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let distances = Distances::for_grid(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

criterion_group!(benches,
    bench_find_path,
    bench_distances,
    bench_furthest_points
);
criterion_main!(benches);
