//! Match resolver tests - candidate priority, replenishment and cascades

use ramen_rush::core::{calculate_score, Grid, MatchResolver, OrderBook, SequenceRng, SimpleRng};
use ramen_rush::types::{Demand, Ingredient, Position};

use Ingredient::*;

fn p(row: i8, column: i8) -> Position {
    Position::new(row, column)
}

/// Row 0 under test, rows below chosen so no cascade can form
fn board_with_top_row(top: [Ingredient; 4]) -> Grid {
    Grid::from_rows(&[
        top.iter().copied().map(Some).collect(),
        vec![Some(Nori), Some(Udon), Some(Soba), Some(Chashu)],
        vec![Some(Udon), Some(Soba), Some(Chashu), Some(Nori)],
        vec![Some(Soba), Some(Chashu), Some(Nori), Some(Udon)],
    ])
}

fn two_ramen_demands() -> OrderBook {
    let mut orders = OrderBook::default();
    orders.add_demand(Demand::new(Ramen, 1));
    orders.add_demand(Demand::new(Ramen, 2));
    orders
}

#[test]
fn test_cursor_run_wins_over_earlier_match() {
    let mut grid = board_with_top_row([Ramen, Tofu, Ramen, Ramen]);
    let mut orders = two_ramen_demands();
    let mut rng = SimpleRng::new(3);
    let line = grid.row_positions(0);

    let result = MatchResolver::default()
        .resolve(&mut grid, &mut orders, &[Ramen, Tofu], &line, p(0, 3), &mut rng)
        .expect("cursor run should match");

    assert_eq!(result.cleared, vec![p(0, 2), p(0, 3)]);
    assert_eq!(result.fulfilled, Demand::new(Ramen, 2));
    assert!(result.cascades.is_empty());
    // (ramen, 1) untouched, one fresh demand appended
    assert_eq!(orders.len(), 2);
    assert_eq!(orders.demands()[0], Demand::new(Ramen, 1));
}

#[test]
fn test_cursor_on_single_picks_single() {
    let mut grid = board_with_top_row([Ramen, Tofu, Ramen, Ramen]);
    let mut orders = two_ramen_demands();
    let mut rng = SimpleRng::new(3);
    let line = grid.row_positions(0);

    let result = MatchResolver::default()
        .resolve(&mut grid, &mut orders, &[Ramen, Tofu], &line, p(0, 0), &mut rng)
        .expect("single ramen should match");

    assert_eq!(result.cleared, vec![p(0, 0)]);
    assert_eq!(result.fulfilled, Demand::new(Ramen, 1));
}

#[test]
fn test_falls_back_to_line_order() {
    // Cursor sits on tofu, which nobody ordered
    let mut grid = board_with_top_row([Ramen, Tofu, Ramen, Ramen]);
    let mut orders = OrderBook::default();
    orders.add_demand(Demand::new(Ramen, 2));
    let mut rng = SimpleRng::new(3);
    let line = grid.row_positions(0);

    let result = MatchResolver::default()
        .resolve(&mut grid, &mut orders, &[Ramen], &line, p(0, 1), &mut rng)
        .expect("ramen pair should match");
    assert_eq!(result.cleared, vec![p(0, 2), p(0, 3)]);
}

#[test]
fn test_no_match_is_a_no_op() {
    let mut grid = board_with_top_row([Ramen, Ramen, Ramen, Tofu]);
    let mut orders = two_ramen_demands();
    let grid_before = grid.clone();
    let orders_before = orders.clone();
    let mut rng = SimpleRng::new(3);
    let line = grid.row_positions(0);

    // Three ramen in a row satisfy neither x1 nor x2
    let result = MatchResolver::default().resolve(
        &mut grid,
        &mut orders,
        &[Ramen],
        &line,
        p(0, 0),
        &mut rng,
    );

    assert!(result.is_none());
    assert_eq!(grid, grid_before);
    assert_eq!(orders, orders_before);
}

#[test]
fn test_player_clear_triggers_cascade() {
    let mut grid = Grid::from_rows(&[
        vec![Some(Tofu), Some(Nori), Some(Udon), Some(Ramen)],
        vec![Some(Ramen), Some(Ramen), Some(Ramen), Some(Chashu)],
        vec![Some(Udon), Some(Soba), Some(Tofu), Some(Nori)],
        vec![Some(Soba), Some(Tofu), Some(Nori), Some(Udon)],
    ]);
    let mut orders = OrderBook::default();
    orders.add_demand(Demand::new(Chashu, 1));
    // Alternating refills: bento, sushi, bento, ...
    let pool = [BentoBox, SushiPlate];
    let mut rng = SequenceRng::new(vec![0, 1, 0, 1, 0, 1, 0]);
    let line = grid.column_positions(3);

    let result = MatchResolver::default()
        .resolve(&mut grid, &mut orders, &pool, &line, p(1, 3), &mut rng)
        .expect("chashu x1 should match");

    assert_eq!(result.cleared, vec![p(1, 3)]);
    // New token into (0, 3) and ramen sliding into (1, 3)
    assert_eq!(result.initial_drops.len(), 2);

    // Ramen completes row 1 and clears on its own
    assert_eq!(result.cascades.len(), 1);
    let round = &result.cascades[0];
    assert_eq!(round.runs.len(), 1);
    assert_eq!(round.runs[0].ingredient, Ramen);
    assert_eq!(round.runs[0].positions, grid.row_positions(1));
    assert_eq!(round.drops.len(), 4 + 4);

    assert_eq!(result.total_stars(), 1);
    let score = calculate_score(&result);
    assert_eq!(score.stars, 1);
    assert_eq!(score.tiles_cleared, 1 + 4);

    assert!(grid.is_full());
    assert!(grid.find_all_matches(4).is_empty());
}

#[test]
fn test_resolution_is_deterministic() {
    let run = |seed: u32| {
        let mut rng = SimpleRng::new(seed);
        let pool = [Ramen, Chashu, SoftBoiledEgg, GreenOnions];
        let mut grid = Grid::new(4);
        grid.fill_all(&pool, &mut rng);
        grid.initialize_preview_queues(&pool, 4, &mut rng);
        let mut orders = OrderBook::default();
        orders.generate_demands(&pool, 4, &mut rng);

        let resolver = MatchResolver::default();
        let mut outcomes = Vec::new();
        for row in 0..4 {
            let line = grid.row_positions(row);
            outcomes.push(resolver.resolve(
                &mut grid,
                &mut orders,
                &pool,
                &line,
                p(row as i8, 0),
                &mut rng,
            ));
        }
        (grid, outcomes)
    };

    assert_eq!(run(77), run(77));
}
