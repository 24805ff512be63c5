use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ramen_rush::core::{EngineConfig, GameState, Grid, MatchResolver, SimpleRng};
use ramen_rush::types::Ingredient;

const POOL: [Ingredient; 4] = [
    Ingredient::Ramen,
    Ingredient::Chashu,
    Ingredient::SoftBoiledEgg,
    Ingredient::GreenOnions,
];

fn filled_grid(seed: u32) -> (Grid, SimpleRng) {
    let mut rng = SimpleRng::new(seed);
    let mut grid = Grid::new(4);
    grid.fill_all(&POOL, &mut rng);
    grid.initialize_preview_queues(&POOL, 4, &mut rng);
    (grid, rng)
}

fn bench_board_scan(c: &mut Criterion) {
    let (grid, _) = filled_grid(12345);

    c.bench_function("find_all_matches_4x4", |b| {
        b.iter(|| black_box(grid.find_all_matches(black_box(4))))
    });
}

fn bench_gravity(c: &mut Criterion) {
    let (grid, rng) = filled_grid(12345);

    c.bench_function("clear_row_and_refill", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            let mut rng = rng.clone();
            for pos in grid.row_positions(1) {
                grid.clear_cell(pos);
            }
            black_box(grid.apply_gravity(&POOL, &mut rng));
        })
    });
}

fn bench_cascades(c: &mut Criterion) {
    let (grid, rng) = filled_grid(777);
    let resolver = MatchResolver::default();

    c.bench_function("resolve_cascades", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            let mut rng = rng.clone();
            for pos in grid.column_positions(0) {
                grid.set_ingredient(Ingredient::Ramen, pos);
            }
            black_box(resolver.resolve_cascades(&mut grid, &POOL, &mut rng));
        })
    });
}

fn bench_select_turn(c: &mut Criterion) {
    let mut state = GameState::new(EngineConfig::default().with_seed(12345));
    state.start();

    c.bench_function("select_cursor_line", |b| {
        b.iter(|| {
            black_box(state.select_cursor_line());
            state.clear_selection();
        })
    });
}

criterion_group!(
    benches,
    bench_board_scan,
    bench_gravity,
    bench_cascades,
    bench_select_turn
);
criterion_main!(benches);
