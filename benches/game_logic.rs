use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match3::core::{find_clusters, find_moves, resolve_all, generate, GameState, Grid, SimpleRng};
use tui_match3::types::{GameConfig, TilePos};

fn playable_grid(columns: u8, rows: u8, seed: u32) -> (Grid, SimpleRng) {
    let mut rng = SimpleRng::new(seed);
    let mut grid = Grid::new(columns, rows);
    generate(&mut grid, &mut rng, 4, 10_000).expect("playable board");
    (grid, rng)
}

fn bench_find_clusters(c: &mut Criterion) {
    let (grid, _) = playable_grid(8, 8, 12345);

    c.bench_function("find_clusters_8x8", |b| {
        b.iter(|| find_clusters(black_box(&grid)))
    });
}

fn bench_find_moves(c: &mut Criterion) {
    let (mut grid, _) = playable_grid(8, 8, 12345);

    c.bench_function("find_moves_8x8", |b| {
        b.iter(|| find_moves(black_box(&mut grid)))
    });
}

fn bench_resolve_random_board(c: &mut Criterion) {
    c.bench_function("resolve_random_8x8", |b| {
        let mut rng = SimpleRng::new(777);
        let mut grid = Grid::new(8, 8);
        b.iter(|| {
            for column in 0..8 {
                for row in 0..8 {
                    grid.set(TilePos::new(column, row), Some(rng.next_token(4)))
                        .unwrap();
                }
            }
            resolve_all(&mut grid, &mut rng, 4)
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
    state.set_assist(true);

    c.bench_function("assist_game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
            if state.game_over() {
                state.new_game().unwrap();
            }
        })
    });
}

fn bench_request_swap(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default(), 999).unwrap();
    let a = TilePos::new(0, 0);
    let b_pos = TilePos::new(2, 0); // never adjacent: exercises the reject path

    c.bench_function("request_swap_rejected", |b| {
        b.iter(|| state.request_swap(black_box(a), black_box(b_pos)))
    });
}

criterion_group!(
    benches,
    bench_find_clusters,
    bench_find_moves,
    bench_resolve_random_board,
    bench_tick,
    bench_request_swap
);
criterion_main!(benches);
