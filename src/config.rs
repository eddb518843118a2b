/// World configuration — every tunable the simulation reads, validated
/// once at construction so degenerate values cannot reach the update loop.

use thiserror::Error;

use crate::entities::Velocity;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Visible world size in pixels.
    pub width: f64,
    pub height: f64,
    /// Per-tick spawn probability for each falling kind.  1.0 forces a
    /// spawn every tick, which tests rely on.
    pub asteroid_prob: f64,
    pub goodie_prob: f64,
    /// Base velocities before the speed boost is applied.
    pub asteroid_speed: Velocity,
    pub goodie_speed: Velocity,
    /// Multiplied onto the speed boost every playing tick; must be ≥ 1.0
    /// so the boost never decays outside a crash reset.
    pub speed_gain: f64,
    /// Starfield shape: layer `i` (1 = nearest) holds `stars_per_layer · i`
    /// stars with radius and speed scaled down by `i`.
    pub star_layers: u32,
    pub stars_per_layer: u32,
    pub base_star_radius: f64,
    pub base_star_speed: Velocity,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 768.0,
            asteroid_prob: 0.01,
            goodie_prob: 0.005,
            asteroid_speed: Velocity { x: 0.0, y: 250.0 },
            goodie_speed: Velocity { x: 0.0, y: 250.0 },
            speed_gain: 1.0002,
            star_layers: 10,
            stars_per_layer: 14,
            base_star_radius: 1.8,
            base_star_speed: Velocity { x: 0.0, y: 100.0 },
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world dimensions must be at least 1x1 pixels and finite, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("{kind} spawn probability must lie in [0.0, 1.0], got {value}")]
    InvalidProbability { kind: &'static str, value: f64 },

    #[error("speed gain must be at least 1.0, got {0}")]
    SpeedGainBelowOne(f64),

    #[error("starfield needs at least one layer with at least one star")]
    EmptyStarfield,

    #[error("base star radius must be positive, got {0}")]
    InvalidStarRadius(f64),
}

impl GameConfig {
    /// Fail-fast validation, run by `compute::init_state` before a world
    /// is ever built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width < 1.0
            || self.height < 1.0
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        for (kind, value) in [
            ("asteroid", self.asteroid_prob),
            ("goodie", self.goodie_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { kind, value });
            }
        }
        if !(self.speed_gain >= 1.0) {
            return Err(ConfigError::SpeedGainBelowOne(self.speed_gain));
        }
        if self.star_layers == 0 || self.stars_per_layer == 0 {
            return Err(ConfigError::EmptyStarfield);
        }
        if !(self.base_star_radius > 0.0) {
            return Err(ConfigError::InvalidStarRadius(self.base_star_radius));
        }
        Ok(())
    }
}
