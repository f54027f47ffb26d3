//! Helpers for deterministic regression tests.

use health_boost_core::{BonusRule, Position, WorldKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const DEFAULT_SEED: u64 = 42;

/// Coordinates stay inside the vanilla world border.
pub const WORLD_BORDER: f64 = 29_999_984.0;

pub fn sample_positions(seed: u64, count: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let world = match rng.gen_range(0..3) {
                0 => WorldKind::Normal,
                1 => WorldKind::Nether,
                _ => WorldKind::Other,
            };
            let x = rng.gen_range(-WORLD_BORDER..=WORLD_BORDER);
            let z = rng.gen_range(-WORLD_BORDER..=WORLD_BORDER);
            Position::new(world, x, z)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LadderEntry {
    pub world: WorldKind,
    pub x: i64,
    pub z: i64,
    pub steps: u32,
    pub bonus: f64,
}

/// Bonus at a fixed set of landmark coordinates.
pub fn bonus_ladder(rule: &BonusRule) -> Vec<LadderEntry> {
    const LANDMARKS: [(WorldKind, i64, i64); 9] = [
        (WorldKind::Normal, 0, 0),
        (WorldKind::Normal, 4999, 0),
        (WorldKind::Normal, 5000, 0),
        (WorldKind::Normal, 3000, 3000),
        (WorldKind::Normal, -12_500, 2_500),
        (WorldKind::Nether, 624, 0),
        (WorldKind::Nether, 625, 0),
        (WorldKind::Nether, -1_250, 1_250),
        (WorldKind::Other, 100_000, 100_000),
    ];
    LANDMARKS
        .iter()
        .map(|&(world, x, z)| {
            let position = Position::new(world, x as f64, z as f64);
            LadderEntry {
                world,
                x,
                z,
                steps: rule.steps(&position),
                bonus: rule.compute(&position),
            }
        })
        .collect()
}
