/// All game entity types — pure data, no logic.

use crate::config::GameConfig;

/// Coarse game state; `NotStarted` exists only until the first tick
/// brings up the starfield and lands in the start menu.
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    NotStarted,
    StartMenu,
    Playing,
    GameOver,
}

/// Normalized control signal produced by the input adapter.  The core
/// never sees raw device events, only these intents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputIntent {
    MoveLeft,
    MoveRight,
    /// Start or restart a game from a menu screen.
    Confirm,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    /// Pixels per second, scaled by the global speed boost when applied.
    pub x: f64,
    pub y: f64,
}

// ── Starfield ─────────────────────────────────────────────────────────────────

/// One background star.  Stars live in layers; a star's radius and speed
/// encode its layer's depth, which is all the renderer needs for parallax.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed: Velocity,
}

// ── Falling entities ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub x: f64,
    pub y: f64,
    pub speed: Velocity,
    /// Uniform in [0.75, 1.25); scales both the sprite and the hit-box.
    pub scale: f64,
    /// Sprite index resolved by the renderer; no gameplay effect.
    pub variant: usize,
}

/// Collectable with a fixed size and no hazard.
#[derive(Clone, Debug, PartialEq)]
pub struct Goodie {
    pub x: f64,
    pub y: f64,
    pub speed: Velocity,
}

// ── Session bookkeeping ───────────────────────────────────────────────────────

/// Best distance so far, paired with the goodie count of that same run.
/// The pair only changes together, and only when the distance is beaten.
#[derive(Clone, Debug, PartialEq)]
pub struct HighScore {
    pub meters: f64,
    pub goodies: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.  Lives for the whole
/// process: `start_new_game` resets the per-session fields but the struct
/// itself (and with it the high score) is never rebuilt.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub phase: Phase,
    pub lives: u32,
    /// Distance traveled this session, in meters.  A fixed per-tick counter.
    pub meters: f64,
    pub goodies_collected: u32,
    /// Global multiplier on all velocities and input sensitivity; ≥ 1.0,
    /// ramps up every playing tick and only resets on a crash.
    pub speed_boost: f64,
    pub high_score: HighScore,
    /// Horizontal offset of the ship from its centered home position.
    pub ship_offset: f64,
    /// Crash window: cosmetic flag + frame counter driving the hurt sprite.
    pub crash: bool,
    pub crash_frames: u32,
    /// Renderer hint: whether the pointer is over the visible menu button.
    pub button_hover: bool,
    /// Parallax layers, farthest first.  Fixed population for the session.
    pub star_layers: Vec<Vec<Star>>,
    pub asteroids: Vec<Asteroid>,
    pub goodies: Vec<Goodie>,
    /// Ticks spent playing this session; collaborators derive play time
    /// from it.
    pub frame: u64,
    /// The configuration this world was built with, threaded through every
    /// computation instead of living in globals.
    pub config: GameConfig,
}
