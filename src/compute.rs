/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameWorld` (and, where needed, an RNG handle) and returns a brand-new
/// `GameWorld`.  Side effects are limited to the injected RNG, so a seeded
/// generator makes every run fully deterministic.

use rand::Rng;

use crate::config::{ConfigError, GameConfig};
use crate::entities::{
    Asteroid, GameWorld, Goodie, HighScore, InputIntent, Phase, Star, Velocity,
};

// ── Session constants ────────────────────────────────────────────────────────

pub const STARTING_LIVES: u32 = 3;
/// Distance gained per playing tick.  Deliberately a constant, independent
/// of both the frame delta and the speed boost.
pub const METERS_PER_TICK: f64 = 1.0 / 3.0;
/// New falling entities start this far above the visible area so they
/// enter the screen smoothly.
pub const SPAWN_Y: f64 = -50.0;
/// An out-of-bounds faller below this line is gone for good; above it, it
/// is still inside the top entry band and keeps moving.
const DESPAWN_Y: f64 = 80.0;
/// Length of the cosmetic crash window, in ticks.
pub const CRASH_FRAMES: u32 = 300;
pub const ASTEROID_VARIANTS: usize = 7;

// ── Ship geometry ────────────────────────────────────────────────────────────

/// Horizontal movement per input intent, before the boost multiplier.
pub const SHIP_MOVE_STEP: f64 = 4.0;
/// Fixed inward step applied instead of movement while the ship is past a
/// world edge.
pub const SHIP_CORRECTION_STEP: f64 = 10.0;
/// Sprite width; also the span used by the goodie overlap test.
pub const SHIP_WIDTH: f64 = 105.0;

// Sprite anchor (top-left corner) relative to the world.
const SHIP_HOME_OFFSET_X: f64 = 60.0;
const SHIP_TOP_OFFSET_Y: f64 = 200.0;

// Edge probes for the position-correction rule.
const SHIP_PROBE_OFFSET_X: f64 = 10.0;
const SHIP_PROBE_OFFSET_Y: f64 = 150.0;
const SHIP_PROBE_HALF_WIDTH: f64 = 50.0;

// ── Hit-box geometry ─────────────────────────────────────────────────────────

/// Unscaled asteroid bounding-box edge; multiplied by the per-asteroid scale.
const ASTEROID_SIZE: f64 = 90.0;
/// Goodies have a fixed box, narrower than the ship.
const GOODIE_SIZE: f64 = 90.0;
// The asteroid test shrinks the ship hit-box inward so grazing contact
// doesn't count.
const HIT_MARGIN_X: f64 = 25.0;
const HIT_MARGIN_Y: f64 = 30.0;
/// Horizontal span of the shrunken asteroid hit-box.
const ASTEROID_HIT_SPAN: f64 = 60.0;
/// Vertical band an asteroid's lower edge must cross to touch the ship body.
const ASTEROID_HIT_BAND: f64 = 140.0;
const GOODIE_HIT_BAND: f64 = 160.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the transient not-started world for a validated configuration.
/// The first `update` call brings up the starfield and enters the menu.
pub fn init_state(config: GameConfig) -> Result<GameWorld, ConfigError> {
    config.validate()?;
    Ok(GameWorld {
        phase: Phase::NotStarted,
        lives: STARTING_LIVES,
        meters: 0.0,
        goodies_collected: 0,
        speed_boost: 1.0,
        high_score: HighScore {
            meters: 0.0,
            goodies: 0,
        },
        ship_offset: 0.0,
        crash: false,
        crash_frames: 0,
        button_hover: false,
        star_layers: Vec::new(),
        asteroids: Vec::new(),
        goodies: Vec::new(),
        frame: 0,
        config,
    })
}

/// Starfield layers, farthest first: layer index `i` scales the star count
/// up and radius/speed down, so distant stars are many, small and slow.
fn init_star_layers(config: &GameConfig, rng: &mut impl Rng) -> Vec<Vec<Star>> {
    let mut layers = Vec::with_capacity(config.star_layers as usize);
    for i in (1..=config.star_layers).rev() {
        let depth = i as f64;
        let count = (config.stars_per_layer * i) as usize;
        let mut stars = Vec::with_capacity(count);
        for _ in 0..count {
            stars.push(Star {
                x: random_column(config, rng),
                y: rng.gen_range(0..config.height as u32) as f64,
                radius: (config.base_star_radius / depth * 100.0).round() / 100.0,
                speed: Velocity {
                    x: (config.base_star_speed.x / depth * 100.0).round() / 20.0,
                    y: (config.base_star_speed.y / depth * 100.0).round() / 20.0,
                },
            });
        }
        layers.push(stars);
    }
    layers
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Route one normalized input intent into the state machine.  Movement only
/// applies while playing; confirm only starts a game from a menu screen.
pub fn apply_input(state: &GameWorld, intent: InputIntent, rng: &mut impl Rng) -> GameWorld {
    match (intent, &state.phase) {
        (InputIntent::MoveLeft, Phase::Playing) => move_ship_left(state),
        (InputIntent::MoveRight, Phase::Playing) => move_ship_right(state),
        (InputIntent::Confirm, Phase::StartMenu | Phase::GameOver) => start_new_game(state, rng),
        _ => state.clone(),
    }
}

pub fn move_ship_left(state: &GameWorld) -> GameWorld {
    shift_ship(state, -1.0)
}

pub fn move_ship_right(state: &GameWorld) -> GameWorld {
    shift_ship(state, 1.0)
}

fn shift_ship(state: &GameWorld, direction: f64) -> GameWorld {
    let ship_offset = if ship_past_edge(&state.config, state.ship_offset) {
        // Past either edge: step back toward the center; the requested
        // direction is ignored until the ship is back in bounds.
        if state.ship_offset > 0.0 {
            state.ship_offset - SHIP_CORRECTION_STEP
        } else {
            state.ship_offset + SHIP_CORRECTION_STEP
        }
    } else {
        // Input sensitivity scales with the same boost as entity speeds.
        state.ship_offset + direction * SHIP_MOVE_STEP * state.speed_boost
    };
    GameWorld {
        ship_offset,
        ..state.clone()
    }
}

fn ship_past_edge(config: &GameConfig, offset: f64) -> bool {
    let center = config.width / 2.0 - SHIP_PROBE_OFFSET_X + offset;
    let probe_y = config.height - SHIP_PROBE_OFFSET_Y;
    !in_bounds(config, center + SHIP_PROBE_HALF_WIDTH, probe_y)
        || !in_bounds(config, center - SHIP_PROBE_HALF_WIDTH, probe_y)
}

/// Record whether the pointer currently sits on the visible menu button.
/// Pure renderer hint; no gameplay effect.
pub fn set_button_hover(state: &GameWorld, hover: bool) -> GameWorld {
    GameWorld {
        button_hover: hover,
        ..state.clone()
    }
}

/// Reset everything for a fresh run.  The finished run's distance is folded
/// into the high score first, so the pair survives across sessions.
pub fn start_new_game(state: &GameWorld, rng: &mut impl Rng) -> GameWorld {
    let high_score = if state.meters > state.high_score.meters {
        HighScore {
            meters: state.meters,
            goodies: state.goodies_collected,
        }
    } else {
        state.high_score.clone()
    };

    GameWorld {
        phase: Phase::Playing,
        lives: STARTING_LIVES,
        meters: 0.0,
        goodies_collected: 0,
        speed_boost: 1.0,
        high_score,
        ship_offset: 0.0,
        crash: false,
        crash_frames: 0,
        star_layers: init_star_layers(&state.config, rng),
        asteroids: Vec::new(),
        goodies: Vec::new(),
        frame: 0,
        ..state.clone()
    }
}

/// Session-control hook for an external timer: ends the current run
/// immediately.  No-op outside of play.
pub fn force_end(state: &GameWorld) -> GameWorld {
    match state.phase {
        Phase::Playing => GameWorld {
            phase: Phase::GameOver,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ───────────────────────────

/// Advance the simulation by one frame.  `delta` is wall-clock seconds since
/// the previous frame; non-finite or negative values are clamped to zero so
/// a meaningless delta can never corrupt entity positions.
pub fn update(state: &GameWorld, delta: f64, rng: &mut impl Rng) -> GameWorld {
    let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

    match state.phase {
        // First tick ever: bring up the starfield and land in the menu.
        Phase::NotStarted => GameWorld {
            phase: Phase::StartMenu,
            star_layers: init_star_layers(&state.config, rng),
            ..state.clone()
        },
        // Menus keep the starfield scrolling behind them; nothing else runs.
        Phase::StartMenu | Phase::GameOver => GameWorld {
            star_layers: advance_stars(state, delta, rng),
            ..state.clone()
        },
        Phase::Playing => playing_tick(state, delta, rng),
    }
}

fn playing_tick(state: &GameWorld, delta: f64, rng: &mut impl Rng) -> GameWorld {
    let config = &state.config;
    let frame = state.frame + 1;
    let meters = state.meters + METERS_PER_TICK;

    let star_layers = advance_stars(state, delta, rng);

    // ── 1. Spawn — at most one new entity per kind per tick ─────────────────
    let mut asteroids = state.asteroids.clone();
    if rng.gen::<f64>() < config.asteroid_prob {
        asteroids.push(spawn_asteroid(config, rng));
    }
    let mut goodies = state.goodies.clone();
    if rng.gen::<f64>() < config.goodie_prob {
        goodies.push(spawn_goodie(config, rng));
    }

    // ── 2. Kinematics ────────────────────────────────────────────────────────
    let asteroids: Vec<Asteroid> = asteroids
        .into_iter()
        .filter_map(|a| {
            advance_falling(config, a.x, a.y, a.speed, delta, state.speed_boost)
                .map(|(x, y)| Asteroid { x, y, ..a })
        })
        .collect();
    let goodies: Vec<Goodie> = goodies
        .into_iter()
        .filter_map(|g| {
            advance_falling(config, g.x, g.y, g.speed, delta, state.speed_boost)
                .map(|(x, y)| Goodie { x, y, ..g })
        })
        .collect();

    // ── 3. Collision: asteroids ──────────────────────────────────────────────
    // At most one life lost per tick: the first overlapping asteroid (list
    // order) is removed, later overlaps survive the tick.
    let mut asteroids = asteroids;
    let crashed = match asteroids
        .iter()
        .position(|a| asteroid_hits_ship(config, state.ship_offset, a))
    {
        Some(hit) => {
            asteroids.remove(hit);
            true
        }
        None => false,
    };

    // ── 4. Collision: goodies (skipped entirely on a crash tick) ─────────────
    let mut collected: u32 = 0;
    let goodies: Vec<Goodie> = if crashed {
        goodies
    } else {
        goodies
            .into_iter()
            .filter(|g| {
                if goodie_hits_ship(config, state.ship_offset, g) {
                    collected += 1;
                    false
                } else {
                    true
                }
            })
            .collect()
    };

    // ── 5. Lives, crash window, phase ────────────────────────────────────────
    let lives = if crashed {
        state.lives.saturating_sub(1)
    } else {
        state.lives
    };
    let phase = if lives == 0 {
        Phase::GameOver
    } else {
        Phase::Playing
    };

    let (crash, crash_frames) = if crashed {
        (true, 1)
    } else if state.crash {
        let ticks = state.crash_frames + 1;
        if ticks >= CRASH_FRAMES {
            (false, 0)
        } else {
            (true, ticks)
        }
    } else {
        (false, 0)
    };

    // ── 6. Speed ramp ────────────────────────────────────────────────────────
    // A crash resets the boost before the per-tick ramp is applied.
    let speed_boost = if crashed { 1.0 } else { state.speed_boost } * config.speed_gain;

    GameWorld {
        phase,
        lives,
        meters,
        goodies_collected: state.goodies_collected + collected,
        speed_boost,
        star_layers,
        asteroids,
        goodies,
        crash,
        crash_frames,
        frame,
        ..state.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

fn spawn_asteroid(config: &GameConfig, rng: &mut impl Rng) -> Asteroid {
    Asteroid {
        x: random_column(config, rng),
        y: SPAWN_Y,
        speed: config.asteroid_speed,
        scale: rng.gen_range(0.75..1.25),
        variant: rng.gen_range(0..ASTEROID_VARIANTS),
    }
}

fn spawn_goodie(config: &GameConfig, rng: &mut impl Rng) -> Goodie {
    Goodie {
        x: random_column(config, rng),
        y: SPAWN_Y,
        speed: config.goodie_speed,
    }
}

/// Random integer horizontal position in [0, width).
fn random_column(config: &GameConfig, rng: &mut impl Rng) -> f64 {
    rng.gen_range(0..config.width as u32) as f64
}

// ── Kinematics ───────────────────────────────────────────────────────────────

fn in_bounds(config: &GameConfig, x: f64, y: f64) -> bool {
    x > 0.0 && x < config.width && y > 0.0 && y < config.height
}

/// Advance one falling entity; `None` once it is out of bounds below the
/// top entry band.  An entity that left through the bottom last tick is
/// therefore removed on this one — a one-tick grace window that lets it
/// clear the screen before disappearing.
fn advance_falling(
    config: &GameConfig,
    x: f64,
    y: f64,
    speed: Velocity,
    delta: f64,
    boost: f64,
) -> Option<(f64, f64)> {
    if !in_bounds(config, x, y) && y > DESPAWN_Y {
        return None;
    }
    Some((x + speed.x * delta * boost, y + speed.y * delta * boost))
}

/// Stars wrap instead of despawning: out of bounds means a fresh random
/// column at the top.  The population never changes.
fn advance_stars(state: &GameWorld, delta: f64, rng: &mut impl Rng) -> Vec<Vec<Star>> {
    let config = &state.config;
    state
        .star_layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|star| {
                    if in_bounds(config, star.x, star.y) {
                        Star {
                            x: star.x + star.speed.x * delta * state.speed_boost,
                            y: star.y + star.speed.y * delta * state.speed_boost,
                            ..star.clone()
                        }
                    } else {
                        Star {
                            x: random_column(config, rng),
                            y: 1.0,
                            ..star.clone()
                        }
                    }
                })
                .collect()
        })
        .collect()
}

// ── Collision detector ───────────────────────────────────────────────────────

/// World x of the ship sprite's top-left corner for a given offset.
pub fn ship_anchor_x(config: &GameConfig, offset: f64) -> f64 {
    config.width / 2.0 - SHIP_HOME_OFFSET_X + offset
}

/// World y of the ship sprite's top edge; the ship never moves vertically.
pub fn ship_anchor_y(config: &GameConfig) -> f64 {
    config.height - SHIP_TOP_OFFSET_Y
}

fn asteroid_hits_ship(config: &GameConfig, offset: f64, asteroid: &Asteroid) -> bool {
    // Hit-box inset from the sprite by the tolerance margin.
    let x = ship_anchor_x(config, offset) + HIT_MARGIN_X;
    let y = ship_anchor_y(config) + HIT_MARGIN_Y;
    let size = ASTEROID_SIZE * asteroid.scale;

    // The asteroid's lower edge must cross the band covering the ship body.
    let in_band = asteroid.y + size > y && asteroid.y + size < y + ASTEROID_HIT_BAND;
    if !in_band {
        return false;
    }

    // Hit-box left edge inside the asteroid's span, or the asteroid crossing
    // the hit-box's right edge.
    (x > asteroid.x && asteroid.x + size > x)
        || (x + ASTEROID_HIT_SPAN < asteroid.x + size && asteroid.x < x + ASTEROID_HIT_SPAN)
}

fn goodie_hits_ship(config: &GameConfig, offset: f64, goodie: &Goodie) -> bool {
    let x = ship_anchor_x(config, offset);
    let y = ship_anchor_y(config);

    let in_band = goodie.y + GOODIE_SIZE > y && goodie.y + GOODIE_SIZE < y + GOODIE_HIT_BAND;
    if !in_band {
        return false;
    }

    // Two-sided span overlap, plus an explicit containment arm: a goodie is
    // narrower than the ship and can sit wholly inside its span, which the
    // two-sided test alone misses.
    (x > goodie.x && goodie.x + GOODIE_SIZE > x)
        || (x + SHIP_WIDTH < goodie.x + GOODIE_SIZE && goodie.x < x + SHIP_WIDTH)
        || (x + SHIP_WIDTH > goodie.x + GOODIE_SIZE && goodie.x > x)
}
