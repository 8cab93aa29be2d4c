mod common;

use cavern_core::{Border, Cell, GridState, Rule, SeedPolicy, SimError, SimulationEngine};
use common::EngineBuilder;

#[test]
fn test_empty_grid_border_counts() {
    let grid = GridState::filled(7, 4, Cell::Empty).unwrap();
    for row in 0..4 {
        for col in 0..7 {
            let on_row_edge = row == 0 || row == 3;
            let on_col_edge = col == 0 || col == 6;
            let expected = match (on_row_edge, on_col_edge) {
                (true, true) => 5,
                (true, false) | (false, true) => 3,
                (false, false) => 0,
            };
            assert_eq!(
                grid.neighbor_occupied_count(row, col),
                expected,
                "cell ({row}, {col})"
            );
        }
    }
}

#[test]
fn test_thin_grids_do_not_panic() {
    let row = GridState::filled(9, 1, Cell::Empty).unwrap();
    assert_eq!(row.neighbor_occupied_count(0, 0), 7);
    assert_eq!(row.neighbor_occupied_count(0, 4), 6);

    let column = GridState::filled(1, 9, Cell::Empty).unwrap();
    assert_eq!(column.neighbor_occupied_count(8, 0), 7);

    let mut engine = EngineBuilder::new().with_size(1, 1).build();
    engine.step();
    assert_eq!(engine.current_generation(), 1);
}

#[test]
fn test_cave_ring_fills_center() {
    let mut engine = EngineBuilder::new().with_pattern("###\n#.#\n###").build();
    let report = engine.step();
    assert_eq!(engine.occupied_count(), 9);
    assert!(report.changed);
    assert_eq!(engine.snapshot().get(1, 1), Some(Cell::Occupied));
}

#[test]
fn test_closed_border_walls_off_caves() {
    // A grid with no walls at all grows a wall ring under the cave rule.
    let mut engine = EngineBuilder::new()
        .with_size(10, 10)
        .with_fill_probability(0.0)
        .build();
    assert_eq!(engine.occupied_count(), 0);
    engine.step();
    let snap = engine.snapshot();
    // Corners see 5 off-grid walls and are born; plain edges see 3 and are not.
    assert_eq!(snap.get(0, 0), Some(Cell::Occupied));
    assert_eq!(snap.get(9, 9), Some(Cell::Occupied));
    assert_eq!(snap.get(0, 5), Some(Cell::Empty));
    assert_eq!(snap.get(5, 5), Some(Cell::Empty));
}

#[test]
fn test_open_border_cave_erodes_edges() {
    let mut engine = EngineBuilder::new()
        .with_size(6, 6)
        .with_fill_probability(1.0)
        .with_rule(Rule::cave().with_border(Border::Open))
        .build();
    engine.step();
    // Corners keep only 3 real neighbors, below the survival threshold.
    assert_eq!(engine.snapshot().get(0, 0), Some(Cell::Empty));
    assert_eq!(engine.snapshot().get(2, 2), Some(Cell::Occupied));
}

#[test]
fn test_dimension_limits() {
    let policy = SeedPolicy::seeded(1);
    assert!(SimulationEngine::new(500, 500, Rule::cave(), policy).is_ok());
    for (w, h) in [(0, 1), (1, 0), (501, 10), (10, 501)] {
        assert!(matches!(
            SimulationEngine::new(w, h, Rule::cave(), policy),
            Err(SimError::InvalidDimensions { .. })
        ));
    }
}

#[test]
fn test_stale_snapshot_stays_readable() {
    let mut engine = EngineBuilder::new().with_seed(8).build();
    let before = engine.snapshot();
    engine.step_n(3);
    engine.reset().unwrap();
    assert_eq!(before.width(), 32);
    assert_eq!(before.cells().len(), 32 * 32);
    let _ = before.occupied_count();
}

#[test]
fn test_out_of_bounds_access_is_reported() {
    let mut grid = GridState::filled(3, 3, Cell::Empty).unwrap();
    assert_eq!(
        grid.get(3, 1),
        Err(SimError::OutOfBounds {
            row: 3,
            col: 1,
            width: 3,
            height: 3
        })
    );
    assert!(grid.set(1, 3, Cell::Occupied).is_err());
    assert_eq!(grid.occupied_count(), 0);
}
