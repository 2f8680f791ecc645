//! Single projectile state and its per-frame kinematics.
//!
//! A particle moves in normalized space and caches its pixel box so renderers
//! can draw it without touching the coordinate mapper again. The box is
//! refreshed whenever the position or size changes.
//!
//! Kinematic updates are applied in a fixed order each frame: velocity first
//! (from the shared gravity vector), then position.

use crate::config::{Rgb, SimulationConfig, MAX_ROUNDING_DIGITS};
use crate::coords::{check_normalized_size, vec2_from_slice, CoordMapper, PixelRect};
use crate::error::EruptionError;
use glam::{DVec2, I64Vec2};

/// Decimal rounding applied after each kinematic update.
///
/// Keeps floating-point drift from accumulating into visible jitter on long
/// flights. The digit count is a tuning knob, not part of the physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rounding {
    scale: Option<f64>,
}

impl Rounding {
    /// Keep full `f64` precision.
    pub const NONE: Rounding = Rounding { scale: None };

    /// Round to `digits` decimal places.
    ///
    /// Past [`MAX_ROUNDING_DIGITS`] the scale stops fitting the `f64`
    /// mantissa and overflows to infinity, which would turn every rounded
    /// value into NaN.
    pub fn digits(digits: u32) -> Result<Self, EruptionError> {
        if digits > MAX_ROUNDING_DIGITS {
            return Err(EruptionError::InvalidConfiguration(format!(
                "rounding to {} digits exceeds the maximum of {}",
                digits, MAX_ROUNDING_DIGITS
            )));
        }
        Ok(Self {
            scale: Some(10f64.powi(digits as i32)),
        })
    }

    pub fn from_digits(digits: Option<u32>) -> Result<Self, EruptionError> {
        digits.map_or(Ok(Self::NONE), Self::digits)
    }

    #[inline]
    pub fn apply(&self, v: DVec2) -> DVec2 {
        match self.scale {
            Some(scale) => (v * scale).round() / scale,
            None => v,
        }
    }
}

/// Everything a spawned particle shares with its siblings.
///
/// Validated once when the controller is built so that spawning itself
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleTemplate {
    mapper: CoordMapper,
    size: DVec2,
    size_px: I64Vec2,
    color: Rgb,
    rounding: Rounding,
}

impl ParticleTemplate {
    pub fn new(
        mapper: CoordMapper,
        size: DVec2,
        color: Rgb,
        rounding: Rounding,
    ) -> Result<Self, EruptionError> {
        let size_px = mapper.to_px_size(size)?;
        Ok(Self {
            mapper,
            size,
            size_px,
            color,
            rounding,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, EruptionError> {
        Self::new(
            config.mapper()?,
            config.particle_size,
            config.particle_color,
            Rounding::from_digits(config.rounding_digits)?,
        )
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Create a particle at `position` moving with `velocity`.
    pub fn spawn(&self, position: DVec2, velocity: DVec2) -> Particle {
        Particle {
            position,
            velocity,
            size: self.size,
            size_px: self.size_px,
            color: self.color,
            rect: self.mapper.rect(position, self.size_px),
            mapper: self.mapper,
            rounding: self.rounding,
        }
    }
}

/// A single particle in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    size: DVec2,
    size_px: I64Vec2,
    color: Rgb,
    rect: PixelRect,
    mapper: CoordMapper,
    rounding: Rounding,
}

impl Particle {
    /// Create a standalone particle, validating every input.
    pub fn new(
        mapper: CoordMapper,
        position: DVec2,
        velocity: DVec2,
        size: DVec2,
        color: Rgb,
        rounding: Rounding,
    ) -> Result<Self, EruptionError> {
        check_finite("position", position)?;
        check_finite("velocity", velocity)?;
        let template = ParticleTemplate::new(mapper, size, color, rounding)?;
        Ok(template.spawn(position, velocity))
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Normalized width/height.
    #[inline]
    pub fn size(&self) -> DVec2 {
        self.size
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Pixel bounding box centered on the current position.
    #[inline]
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    pub fn set_position(&mut self, position: DVec2) -> Result<(), EruptionError> {
        check_finite("position", position)?;
        self.position = position;
        self.refresh_rect();
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: DVec2) -> Result<(), EruptionError> {
        check_finite("velocity", velocity)?;
        self.velocity = velocity;
        Ok(())
    }

    /// Assign a position from an externally supplied pair.
    pub fn try_set_position(&mut self, values: &[f64]) -> Result<(), EruptionError> {
        self.set_position(assignment("position", values)?)
    }

    /// Assign a velocity from an externally supplied pair.
    pub fn try_set_velocity(&mut self, values: &[f64]) -> Result<(), EruptionError> {
        self.set_velocity(assignment("velocity", values)?)
    }

    /// Resize the particle. Each component must lie within `[0, 1]`.
    pub fn set_size(&mut self, size: DVec2) -> Result<(), EruptionError> {
        self.size_px = self.mapper.to_px_size(size)?;
        self.size = size;
        self.refresh_rect();
        Ok(())
    }

    /// Add one frame of acceleration to the velocity.
    pub fn update_velocity(&mut self, acceleration: DVec2) {
        self.velocity = self.rounding.apply(self.velocity + acceleration);
    }

    /// Advance the position by one frame of velocity.
    pub fn update_position(&mut self) {
        self.position = self.rounding.apply(self.position + self.velocity);
        self.refresh_rect();
    }

    fn refresh_rect(&mut self) {
        self.rect = self.mapper.rect(self.position, self.size_px);
    }
}

fn check_finite(what: &str, v: DVec2) -> Result<(), EruptionError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(EruptionError::InvalidConfiguration(format!(
            "{} ({}, {}) must be finite",
            what, v.x, v.y
        )))
    }
}

fn assignment(what: &str, values: &[f64]) -> Result<DVec2, EruptionError> {
    vec2_from_slice(values).map_err(|_| {
        EruptionError::InvalidConfiguration(format!(
            "{} needs exactly 2 components, got {}",
            what,
            values.len()
        ))
    })
}
