use maze_runner_core::{Difficulty, GenerationEvent, GoalStrategy, GoalTuning, Position, START};
use maze_runner_system_carver::Carver;
use maze_runner_system_goal::GoalPlacement;
use maze_runner_world::{navigation::DistanceField, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn carved(difficulty: Difficulty, seed: u64) -> (Grid, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::new(difficulty.dimensions()).expect("valid dimensions");
    let mut events = Vec::new();
    let _ = Carver::new().carve(&mut grid, START, &mut rng, &mut events);
    (grid, rng)
}

#[test]
fn heavy_sampling_finds_the_far_corner() {
    let (grid, mut rng) = carved(Difficulty::Extreme, 21);
    let placement = GoalPlacement::new(GoalTuning {
        strategy: GoalStrategy::Sampled,
        samples: 10_000,
    });
    let mut events = Vec::new();

    let goal = placement.place(&grid, START, &mut rng, &mut events);

    assert_eq!(goal, Some(Position::new(29, 29)));
    assert_eq!(
        events,
        vec![GenerationEvent::GoalPlaced {
            goal: Position::new(29, 29),
            distance: 56,
        }]
    );
}

#[test]
fn default_sampling_lands_on_open_cells() {
    for difficulty in Difficulty::ALL {
        for seed in 0..10 {
            let (grid, mut rng) = carved(difficulty, seed);
            let mut events = Vec::new();
            let goal = GoalPlacement::default()
                .place(&grid, START, &mut rng, &mut events)
                .expect("a carved maze always has open cells to sample");

            assert!(grid.is_path(goal), "{difficulty} seed {seed}: goal on wall");
            assert!(goal.manhattan_distance(START) > 0);
        }
    }
}

#[test]
fn farthest_strategy_maximises_walking_distance() {
    let (grid, mut rng) = carved(Difficulty::Hard, 8);
    let placement = GoalPlacement::new(GoalTuning {
        strategy: GoalStrategy::Farthest,
        samples: 0,
    });
    let mut events = Vec::new();

    let goal = placement
        .place(&grid, START, &mut rng, &mut events)
        .expect("carved maze has a farthest cell");

    let field = DistanceField::from_source(&grid, START);
    let (_, longest) = field.farthest().expect("start is open");
    assert_eq!(field.distance(goal), Some(longest));
}
