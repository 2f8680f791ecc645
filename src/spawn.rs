//! Launch velocities for newly erupted particles.
//!
//! Every particle leaves the [`VENT`]. Its initial velocity is either fixed
//! (straight up at the configured speed) or drawn from a spread around that
//! speed and around vertical, depending on the [`SpawnKind`].

use crate::config::SimulationConfig;
use crate::error::EruptionError;
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Spawn position of every particle: bottom-center of normalized space.
pub const VENT: DVec2 = DVec2::new(0.5, 0.0);

/// How initial velocities are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnKind {
    /// Every particle launches with the same velocity.
    Fixed(DVec2),
    /// Speed and angle are sampled uniformly around straight up.
    Randomized {
        /// Base speed in units per frame.
        speed: f64,
        /// Maximum deviation from `speed`.
        speed_spread: f64,
        /// Maximum deviation from vertical, in degrees. Below 90.
        angle_spread: f64,
    },
}

impl SpawnKind {
    /// Straight-up launch at `speed`.
    pub fn vertical(speed: f64) -> Result<Self, EruptionError> {
        Self::fixed(DVec2::new(0.0, speed))
    }

    /// Every particle launches with exactly `velocity`.
    pub fn fixed(velocity: DVec2) -> Result<Self, EruptionError> {
        let kind = SpawnKind::Fixed(velocity);
        kind.validate()?;
        Ok(kind)
    }

    /// Randomized launch, rejecting a non-finite speed and spreads the velocity
    /// decomposition cannot handle.
    pub fn randomized(speed: f64, speed_spread: f64, angle_spread: f64) -> Result<Self, EruptionError> {
        check_randomized(speed, speed_spread, angle_spread)?;
        Ok(SpawnKind::Randomized {
            speed,
            speed_spread,
            angle_spread: angle_spread.abs(),
        })
    }

    /// Check that every launch this kind can produce is finite.
    ///
    /// The variants are public, so kinds built directly are checked again
    /// wherever a sampler is handed to a controller.
    pub fn validate(&self) -> Result<(), EruptionError> {
        match *self {
            SpawnKind::Fixed(velocity) => {
                if velocity.is_finite() {
                    Ok(())
                } else {
                    Err(EruptionError::InvalidConfiguration(format!(
                        "launch velocity ({}, {}) must be finite",
                        velocity.x, velocity.y
                    )))
                }
            }
            SpawnKind::Randomized {
                speed,
                speed_spread,
                angle_spread,
            } => check_randomized(speed, speed_spread, angle_spread),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, EruptionError> {
        if config.randomness {
            Self::randomized(config.default_velocity, config.velocity_spread, config.angle_spread)
        } else {
            Self::vertical(config.default_velocity)
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, SpawnKind::Randomized { .. })
    }
}

fn check_randomized(speed: f64, speed_spread: f64, angle_spread: f64) -> Result<(), EruptionError> {
    if !speed.is_finite() {
        return Err(EruptionError::InvalidConfiguration(format!(
            "launch speed {} must be finite",
            speed
        )));
    }
    if !(speed_spread.is_finite() && speed_spread >= 0.0) {
        return Err(EruptionError::InvalidConfiguration(format!(
            "speed spread {} must be finite and non-negative",
            speed_spread
        )));
    }
    if !angle_spread.is_finite() || angle_spread.abs() >= 90.0 {
        return Err(EruptionError::UnsupportedAngle(angle_spread));
    }
    Ok(())
}

/// Resolves a [`SpawnKind`] into concrete velocities.
#[derive(Debug, Clone)]
pub struct VelocitySampler {
    kind: SpawnKind,
    rng: SmallRng,
}

impl VelocitySampler {
    /// Create a sampler. With no seed the RNG is seeded from the clock, so
    /// runs differ from each other.
    pub fn new(kind: SpawnKind, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        Self {
            kind,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn kind(&self) -> SpawnKind {
        self.kind
    }

    /// Draw one launch velocity.
    pub fn sample(&mut self) -> DVec2 {
        match self.kind {
            SpawnKind::Fixed(velocity) => velocity,
            SpawnKind::Randomized {
                speed,
                speed_spread,
                angle_spread,
            } => {
                let speed = speed + self.symmetric(speed_spread);
                let angle = self.symmetric(angle_spread);
                decompose(speed, angle)
            }
        }
    }

    /// Uniform sample in `[-spread, spread]`; exactly zero for a zero spread.
    fn symmetric(&mut self, spread: f64) -> f64 {
        if spread > 0.0 {
            self.rng.gen_range(-spread..=spread)
        } else {
            0.0
        }
    }
}

/// Split a launch speed tilted `angle_deg` away from vertical into x/y parts.
///
/// Valid for `|angle_deg| < 90`; the vertical part is always non-negative.
pub fn decompose(speed: f64, angle_deg: f64) -> DVec2 {
    let vx = speed * angle_deg.to_radians().sin();
    let vy = (speed * speed - vx * vx).max(0.0).sqrt();
    DVec2::new(vx, vy)
}
