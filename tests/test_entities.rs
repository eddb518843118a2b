use astro_dodge::compute::{init_state, start_new_game, update};
use astro_dodge::config::GameConfig;
use astro_dodge::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Phase::Playing, Phase::Playing);
    assert_ne!(Phase::Playing, Phase::GameOver);
    assert_eq!(InputIntent::MoveLeft, InputIntent::MoveLeft);
    assert_ne!(InputIntent::MoveLeft, InputIntent::MoveRight);
    assert_ne!(InputIntent::Confirm, InputIntent::None);

    // Clone must produce an equal value
    let phase = Phase::StartMenu;
    assert_eq!(phase.clone(), Phase::StartMenu);

    let v = Velocity { x: 1.0, y: 2.0 };
    let copied = v; // Copy semantics
    assert_eq!(v, copied);
}

#[test]
fn game_world_clone_is_independent() {
    let mut rng = StdRng::seed_from_u64(42);
    let menu = update(&init_state(GameConfig::default()).unwrap(), 0.0, &mut rng);
    let original = start_new_game(&menu, &mut rng);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.ship_offset = 99.0;
    cloned.goodies_collected = 999;
    cloned.asteroids.push(Asteroid {
        x: 5.0,
        y: 5.0,
        speed: Velocity { x: 0.0, y: 250.0 },
        scale: 1.0,
        variant: 0,
    });
    cloned.star_layers[0][0].y = 12345.0;

    assert_eq!(original.ship_offset, 0.0);
    assert_eq!(original.goodies_collected, 0);
    assert!(original.asteroids.is_empty());
    assert_ne!(original.star_layers[0][0].y, 12345.0);
}

#[test]
fn high_score_pair_compares_as_a_unit() {
    let a = HighScore { meters: 10.0, goodies: 3 };
    let b = HighScore { meters: 10.0, goodies: 3 };
    let c = HighScore { meters: 10.0, goodies: 4 };
    assert_eq!(a, b);
    assert_ne!(a, c);
}
