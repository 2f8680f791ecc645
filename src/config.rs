//! Simulation configuration.
//!
//! A [`SimulationConfig`] is read once at startup and never mutated afterwards.
//! Every component that needs it takes a shared reference at construction and
//! copies out the values it uses.
//!
//! Configurations serialize to JSON. Every field has a default, so a file only
//! needs to list the values it changes:
//!
//! ```json
//! {
//!     "window_size": [800, 600],
//!     "gravity": [0.0, -0.001],
//!     "randomness": false
//! }
//! ```

use crate::coords::{check_normalized_size, CoordMapper};
use crate::error::{ConfigError, EruptionError};
use glam::{DVec2, UVec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 8-bit RGB color.
pub type Rgb = [u8; 3];

/// Largest supported rounding precision; beyond this `f64` has no digits left.
pub const MAX_ROUNDING_DIGITS: u32 = 15;

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Display surface size in pixels.
    pub window_size: UVec2,
    /// Planet width/height in normalized units.
    pub planet_size: DVec2,
    pub planet_color: Rgb,
    pub background_color: Rgb,
    /// Particle width/height in normalized units.
    pub particle_size: DVec2,
    pub particle_color: Rgb,
    /// Acceleration applied to every particle each frame (units / frame²).
    pub gravity: DVec2,
    /// Base launch speed (units / frame).
    pub default_velocity: f64,
    /// Randomize launch speed and angle.
    pub randomness: bool,
    /// Maximum deviation from `default_velocity` when randomized.
    pub velocity_spread: f64,
    /// Maximum deviation from vertical in degrees when randomized.
    pub angle_spread: f64,
    /// Frames between spawn events inside an eruption.
    pub frequency: i64,
    /// Frames an eruption stays active.
    pub duration: i64,
    /// Frames between eruptions.
    pub downtime: i64,
    /// Particles created per spawn event.
    pub concurrent_expulsions: u32,
    /// Decimal places kept after each kinematic update. `None` keeps full precision.
    pub rounding_digits: Option<u32>,
    /// Seed for the spawn RNG. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Target frame rate of the host loop.
    pub fps: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            window_size: UVec2::new(1280, 760),
            planet_size: DVec2::new(0.8, 0.2),
            planet_color: [0, 255, 0],
            background_color: [160, 32, 240],
            particle_size: DVec2::new(0.01, 0.01),
            particle_color: [255, 0, 0],
            gravity: DVec2::new(0.0, -0.0005),
            default_velocity: 0.02,
            randomness: true,
            velocity_spread: 0.004,
            angle_spread: 12.0,
            frequency: 2,
            duration: 20,
            downtime: 60,
            concurrent_expulsions: 3,
            rounding_digits: Some(7),
            seed: None,
            fps: 60,
        }
    }
}

impl SimulationConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Coordinate mapper for the configured surface.
    pub fn mapper(&self) -> Result<CoordMapper, EruptionError> {
        CoordMapper::new(self.window_size.x, self.window_size.y)
    }

    /// Check every value the simulation depends on.
    pub fn validate(&self) -> Result<(), EruptionError> {
        self.mapper()?;
        check_normalized_size(self.planet_size)?;
        check_normalized_size(self.particle_size)?;

        if !self.gravity.is_finite() {
            return Err(invalid("gravity must be finite"));
        }
        if !self.default_velocity.is_finite() {
            return Err(invalid("default_velocity must be finite"));
        }
        if !(self.velocity_spread.is_finite() && self.velocity_spread >= 0.0) {
            return Err(invalid("velocity_spread must be finite and non-negative"));
        }
        if !(self.angle_spread.is_finite() && self.angle_spread >= 0.0) {
            return Err(invalid("angle_spread must be finite and non-negative"));
        }
        if self.randomness && self.angle_spread >= 90.0 {
            return Err(EruptionError::UnsupportedAngle(self.angle_spread));
        }
        if self.frequency <= 0 {
            return Err(invalid("frequency must be positive"));
        }
        if self.duration < 0 || self.downtime < 0 {
            return Err(invalid("duration and downtime must not be negative"));
        }
        if self.concurrent_expulsions == 0 {
            return Err(invalid("concurrent_expulsions must be positive"));
        }
        if self.rounding_digits.is_some_and(|d| d > MAX_ROUNDING_DIGITS) {
            return Err(invalid("rounding_digits must be at most 15"));
        }
        if self.fps == 0 {
            return Err(invalid("fps must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> EruptionError {
    EruptionError::InvalidConfiguration(msg.to_string())
}
