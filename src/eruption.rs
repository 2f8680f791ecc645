//! The eruption controller: a frame-counted cycle of active eruptions and
//! cooldowns that spawns, moves and culls particles.
//!
//! # Cycle
//!
//! The whole cycle is driven by one signed counter, `phase_timer`:
//!
//! | Timer | Phase | Per step |
//! |-------|-------|----------|
//! | `0 <= t < duration` | active | maybe spawn, then `t += 1` |
//! | `t >= duration` | cooldown (eruption just ended) | `t = -1` |
//! | `-downtime <= t < 0` | cooldown | `t -= 1` |
//! | `t < -downtime` | cooldown → active | `t = 0` |
//!
//! Inside an eruption exactly one spawn event happens per `frequency` frames,
//! on the first frame of each window (`frequency = 2` spawns at 0, 2, 4, ...).
//!
//! Nothing outside the counter can pause, extend or cancel an eruption.

use crate::config::SimulationConfig;
use crate::coords::Bounds;
use crate::error::EruptionError;
use crate::particle::{Particle, ParticleTemplate};
use crate::spawn::{SpawnKind, VelocitySampler, VENT};
use crate::Eruptor;
use glam::DVec2;
use log::{debug, info};

/// Which half of the cycle the controller is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EruptionPhase {
    Active,
    Cooldown,
}

/// Frame counts that shape the eruption cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Frames between spawn events inside an eruption. Positive.
    pub frequency: i64,
    /// Frames an eruption stays active.
    pub duration: i64,
    /// Frames between eruptions.
    pub downtime: i64,
}

impl Cadence {
    pub fn new(frequency: i64, duration: i64, downtime: i64) -> Result<Self, EruptionError> {
        if frequency <= 0 {
            return Err(EruptionError::InvalidConfiguration(format!(
                "frequency must be positive, got {}",
                frequency
            )));
        }
        if duration < 0 || downtime < 0 {
            return Err(EruptionError::InvalidConfiguration(format!(
                "duration ({}) and downtime ({}) must not be negative",
                duration, downtime
            )));
        }
        Ok(Self {
            frequency,
            duration,
            downtime,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, EruptionError> {
        Self::new(config.frequency, config.duration, config.downtime)
    }

    /// Frames in one full eruption plus cooldown, including both transition frames.
    pub fn cycle_len(&self) -> i64 {
        self.duration + self.downtime + 2
    }
}

/// Owns the live particle set and decides when to add to it.
#[derive(Debug, Clone)]
pub struct EruptionController {
    phase_timer: i64,
    last_spawn_tick: Option<i64>,
    cadence: Cadence,
    expulsions: u32,
    gravity: DVec2,
    bounds: Bounds,
    template: ParticleTemplate,
    sampler: VelocitySampler,
    particles: Vec<Particle>,
    spawn_events: u64,
}

impl EruptionController {
    /// Build a controller from a validated configuration.
    pub fn new(config: &SimulationConfig) -> Result<Self, EruptionError> {
        config.validate()?;
        let controller = Self::with_parts(
            Cadence::from_config(config)?,
            config.concurrent_expulsions,
            config.gravity,
            ParticleTemplate::from_config(config)?,
            VelocitySampler::new(SpawnKind::from_config(config)?, config.seed),
        )?;
        debug!(
            "eruption controller ready: {:?}, {} particles per spawn, {:?}",
            controller.cadence,
            controller.expulsions,
            controller.sampler.kind()
        );
        Ok(controller)
    }

    /// Assemble a controller from individually built parts.
    ///
    /// The controller starts in cooldown, one frame past its boundary.
    pub fn with_parts(
        cadence: Cadence,
        expulsions: u32,
        gravity: DVec2,
        template: ParticleTemplate,
        sampler: VelocitySampler,
    ) -> Result<Self, EruptionError> {
        if expulsions == 0 {
            return Err(EruptionError::InvalidConfiguration(
                "concurrent_expulsions must be positive".into(),
            ));
        }
        if !gravity.is_finite() {
            return Err(EruptionError::InvalidConfiguration(
                "gravity must be finite".into(),
            ));
        }
        sampler.kind().validate()?;
        Ok(Self {
            phase_timer: -1,
            last_spawn_tick: None,
            cadence,
            expulsions,
            gravity,
            bounds: Bounds::UNIT,
            template,
            sampler,
            particles: Vec::new(),
            spawn_events: 0,
        })
    }

    /// Active exactly on the frames that can spawn. The frame that closes an
    /// eruption already reports cooldown.
    pub fn phase(&self) -> EruptionPhase {
        if (0..self.cadence.duration).contains(&self.phase_timer) {
            EruptionPhase::Active
        } else {
            EruptionPhase::Cooldown
        }
    }

    #[inline]
    pub fn phase_timer(&self) -> i64 {
        self.phase_timer
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Spawn events since construction.
    pub fn spawn_events(&self) -> u64 {
        self.spawn_events
    }

    /// One spawn event: `concurrent_expulsions` particles leave the vent.
    ///
    /// Returns the number of particles created.
    pub fn spawn_batch(&mut self) -> usize {
        let count = self.expulsions as usize;
        self.particles.reserve(count);
        for _ in 0..count {
            let velocity = self.sampler.sample();
            self.particles.push(self.template.spawn(VENT, velocity));
        }
        self.spawn_events += 1;
        count
    }
}

impl Eruptor for EruptionController {
    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn gravity(&self) -> DVec2 {
        self.gravity
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn update_velocities(&mut self) {
        let gravity = self.gravity;
        for particle in &mut self.particles {
            particle.update_velocity(gravity);
        }
    }

    fn update_positions(&mut self) {
        for particle in &mut self.particles {
            particle.update_position();
        }
    }

    fn cull(&mut self) -> usize {
        let before = self.particles.len();
        let bounds = self.bounds;
        self.particles.retain(|p| !bounds.is_outside(p.position()));
        before - self.particles.len()
    }

    fn step(&mut self) -> usize {
        let Cadence {
            frequency,
            duration,
            downtime,
        } = self.cadence;
        let t = self.phase_timer;

        if (0..duration).contains(&t) {
            let tick = t.div_euclid(frequency);
            let spawned = if self.last_spawn_tick != Some(tick) {
                self.last_spawn_tick = Some(tick);
                self.spawn_batch()
            } else {
                0
            };
            self.phase_timer += 1;
            spawned
        } else if t >= duration {
            info!(
                "eruption ended: {} live particles, {} spawn events so far",
                self.particles.len(),
                self.spawn_events
            );
            self.phase_timer = -1;
            0
        } else if t >= -downtime {
            self.phase_timer -= 1;
            0
        } else {
            info!("eruption started");
            self.phase_timer = 0;
            self.last_spawn_tick = None;
            0
        }
    }
}
