use maze_runner_core::{
    BranchTuning, Difficulty, Dimensions, GenerationEvent, Position, PruningTuning, START,
};
use maze_runner_system_carver::Carver;
use maze_runner_system_pruning::{DeadEndPruner, PruneSummary};
use maze_runner_world::{navigation::DistanceField, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Corridor along row 1 plus a detached two-cell stub at (5, 5)-(5, 6).
fn grid_with_stub() -> Grid {
    let mut grid = Grid::new(Dimensions::new(11, 11)).expect("valid dimensions");
    for column in 1..=9 {
        grid.open(Position::new(1, column));
    }
    grid.open(Position::new(5, 5));
    grid.open(Position::new(5, 6));
    grid
}

fn never_extend() -> DeadEndPruner {
    DeadEndPruner::new(PruningTuning {
        extension_chance: 0.0,
        ..PruningTuning::default()
    })
}

#[test]
fn corridor_ends_next_to_junctions_are_kept() {
    let grid = grid_with_stub();
    assert!(!DeadEndPruner::is_prunable(&grid, Position::new(1, 1), &[]));
    assert!(!DeadEndPruner::is_prunable(&grid, Position::new(1, 9), &[]));
    assert!(DeadEndPruner::is_prunable(&grid, Position::new(5, 5), &[]));
    assert!(!DeadEndPruner::is_prunable(
        &grid,
        Position::new(5, 5),
        &[Position::new(5, 5)]
    ));
}

#[test]
fn stub_is_removed_until_fixed_point() {
    let mut grid = grid_with_stub();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    let summary = never_extend().prune(&mut grid, &[START], &mut rng, &mut events);

    assert_eq!(
        summary,
        PruneSummary {
            passes: 2,
            removed: 1,
            extended: 0,
        }
    );
    assert_eq!(
        events,
        vec![GenerationEvent::DeadEndRemoved {
            cell: Position::new(5, 5)
        }]
    );
    assert!(grid.is_wall(Position::new(5, 5)));
    assert!(grid.is_path(Position::new(1, 1)), "corridor untouched");
}

#[test]
fn certain_extension_lengthens_stub() {
    let mut grid = grid_with_stub();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let pruner = DeadEndPruner::new(PruningTuning {
        extension_chance: 1.0,
        continue_chance: 0.0,
    });

    let summary = pruner.prune(&mut grid, &[START], &mut rng, &mut events);

    assert_eq!(summary.extended, 1);
    assert_eq!(summary.removed, 0);
    assert_eq!(
        events,
        vec![GenerationEvent::DeadEndExtended {
            cell: Position::new(5, 5),
            length: 1,
        }]
    );
    assert!(grid.is_path(Position::new(5, 4)));
}

#[test]
fn blocked_extension_falls_back_to_removal() {
    let mut grid = grid_with_stub();
    grid.open(Position::new(4, 4));
    grid.open(Position::new(3, 4));
    grid.open(Position::new(2, 4));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let pruner = DeadEndPruner::new(PruningTuning {
        extension_chance: 1.0,
        continue_chance: 0.0,
    });

    let summary = pruner.prune(&mut grid, &[START], &mut rng, &mut events);

    assert!(events.contains(&GenerationEvent::DeadEndRemoved {
        cell: Position::new(5, 5)
    }));
    assert!(summary.removed >= 1);
    assert!(grid.is_wall(Position::new(5, 5)));
}

#[test]
fn protected_cells_survive() {
    let mut grid = grid_with_stub();
    let snapshot = grid.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    let summary = never_extend().prune(
        &mut grid,
        &[Position::new(5, 5), Position::new(5, 6)],
        &mut rng,
        &mut events,
    );

    assert!(!summary.changed());
    assert_eq!(summary.passes, 1);
    assert_eq!(grid, snapshot);
}

#[test]
fn second_run_on_enriched_maze_is_a_no_op() {
    for seed in 0..30 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(Difficulty::Hard.dimensions()).expect("valid dimensions");
        let mut events = Vec::new();
        let path_cells = Carver::new().carve(&mut grid, START, &mut rng, &mut events);
        let _ = maze_runner_system_branches::BranchInjector::new(BranchTuning {
            density: 0.1,
            ..BranchTuning::default()
        })
        .inject(&mut grid, &path_cells, &mut rng, &mut events);

        let pruner = DeadEndPruner::default();
        let _ = pruner.prune(&mut grid, &[START], &mut rng, &mut events);
        let settled = grid.clone();

        let mut more_events = Vec::new();
        let second = pruner.prune(&mut grid, &[START], &mut rng, &mut more_events);

        assert!(!second.changed(), "seed {seed}: pruning was not at a fixed point");
        assert!(more_events.is_empty());
        assert_eq!(grid, settled);

        let field = DistanceField::from_source(&grid, START);
        assert_eq!(
            field.reachable_count(),
            grid.open_cell_count(),
            "seed {seed}: pruning detached a corridor"
        );
    }
}
