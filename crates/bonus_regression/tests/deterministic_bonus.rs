use bonus_regression::{sample_positions, DEFAULT_SEED};
use health_boost_core::{compute, Position, WorldKind};

#[test]
fn sampling_is_seeded() {
    let baseline = sample_positions(DEFAULT_SEED, 32);
    let repeat = sample_positions(DEFAULT_SEED, 32);
    assert_eq!(baseline, repeat, "same seed should match");

    let different = sample_positions(7, 32);
    assert_ne!(baseline, different, "different seeds should diverge");
}

#[test]
fn bonus_is_a_non_negative_multiple_of_two() {
    for position in sample_positions(DEFAULT_SEED, 1_000) {
        let bonus = compute(&position);
        assert!(bonus >= 0.0, "{position:?} -> {bonus}");
        assert_eq!(0.0, bonus % 2.0, "{position:?} -> {bonus}");
        assert_eq!(bonus, compute(&position), "compute must be deterministic");
    }
}

#[test]
fn nether_matches_scaled_overworld() {
    for position in sample_positions(DEFAULT_SEED, 1_000) {
        let nether = Position::new(WorldKind::Nether, position.x, position.z);
        let overworld = Position::new(WorldKind::Normal, position.x * 8.0, position.z * 8.0);
        assert_eq!(compute(&overworld), compute(&nether));
    }
}

#[test]
fn other_worlds_are_always_zero() {
    for position in sample_positions(DEFAULT_SEED, 1_000) {
        let other = Position::new(WorldKind::Other, position.x, position.z);
        assert_eq!(0.0, compute(&other));
    }
}

#[test]
fn bonus_never_shrinks_moving_outwards() {
    for position in sample_positions(DEFAULT_SEED, 1_000) {
        let further = Position::new(position.world, position.x * 1.5, position.z * 1.5);
        assert!(compute(&further) >= compute(&position));
    }
}
