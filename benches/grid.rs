use criterion::{criterion_group, criterion_main, Criterion};
use perfect_mazes::{
    cells::{Direction, GridCoordinate},
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};

fn bench_new_grid_11(c: &mut Criterion) {
    c.bench_function("new_grid_11", |b| b.iter(|| Grid::new(RowsCount(11), ColumnsCount(11))));
}

fn bench_new_grid_128(c: &mut Criterion) {
    c.bench_function("new_grid_128", |b| b.iter(|| Grid::new(RowsCount(128), ColumnsCount(128))));
}

fn bench_new_grid_500(c: &mut Criterion) {
    c.bench_function("new_grid_500", |b| b.iter(|| Grid::new(RowsCount(500), ColumnsCount(500))));
}

fn bench_neighbour_directions(c: &mut Criterion) {
    let g = Grid::new(RowsCount(128), ColumnsCount(128));
    c.bench_function("neighbour_directions_128", move |b| {
        b.iter(|| g.iter().map(|coord| g.neighbour_directions(coord).len()).sum::<usize>())
    });
}

fn bench_connect_rows(c: &mut Criterion) {
    c.bench_function("connect_rows_128", |b| {
        b.iter(|| {
            let mut g = Grid::new(RowsCount(128), ColumnsCount(128));
            for coord in g.iter() {
                g.connect(coord, Direction::Right);
            }
            g
        })
    });
}

fn bench_reset_flags(c: &mut Criterion) {
    let mut g = Grid::new(RowsCount(500), ColumnsCount(500));
    g.connect(GridCoordinate::new(0, 0), Direction::Down);
    c.bench_function("reset_flags_500", move |b| b.iter(|| g.reset_flags()));
}

criterion_group!(
    benches,
    bench_new_grid_11,
    bench_new_grid_128,
    bench_new_grid_500,
    bench_neighbour_directions,
    bench_connect_rows,
    bench_reset_flags
);
criterion_main!(benches);
