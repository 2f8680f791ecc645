//! # Volcano - a periodically erupting particle fountain
//!
//! A 2D particle simulation of a volcano on a flat planet. The volcano spends
//! most of its time cooling down, then erupts for a fixed number of frames,
//! throwing batches of particles out of a vent at the bottom-center of the
//! scene. Gravity pulls them back down and anything that leaves through the
//! floor or the side walls is removed.
//!
//! ## Quick Start
//!
//! ```ignore
//! use volcano::prelude::*;
//!
//! let config = SimulationConfig::default();
//! let mut driver = FrameDriver::from_config(&config)?;
//! let mut canvas = Canvas::new(config.window_size);
//!
//! for _ in 0..600 {
//!     driver.advance();
//! }
//! canvas.draw(driver.planet());
//! canvas.save_png("frame.png")?;
//! ```
//!
//! ## Core Concepts
//!
//! ### Normalized space
//!
//! The simulation runs in the unit square with `(0, 0)` at the bottom-left.
//! A [`CoordMapper`] turns normalized points and sizes into pixels for one
//! surface size, flipping the vertical axis for points only.
//!
//! ### The eruption cycle
//!
//! [`EruptionController`] is a frame-counted state machine. Each call to
//! [`Eruptor::step`] advances it by one frame:
//!
//! ```text
//!  cooldown (downtime frames) ──▶ eruption (duration frames) ──▶ cooldown ...
//!                                  spawn every `frequency` frames
//! ```
//!
//! ### Frame order
//!
//! [`FrameDriver::advance`] always runs cull, step, velocity update and
//! position update, in that order. Rendering reads the result afterwards
//! through [`Planet::sprites`].
//!
//! ## Feature Overview
//!
//! | Feature | Adds |
//! |---------|------|
//! | *(none)* | simulation core, software [`Canvas`], PNG snapshots |
//! | `window` | interactive `winit` window drawn with `wgpu` |

pub mod config;
pub mod coords;
pub mod driver;
pub mod error;
pub mod eruption;
pub mod particle;
pub mod planet;
pub mod render;
pub mod spawn;
pub mod time;

#[cfg(feature = "window")]
mod gpu;
#[cfg(feature = "window")]
pub mod input;
#[cfg(feature = "window")]
pub mod window;

pub use config::{Rgb, SimulationConfig};
pub use coords::{Bounds, CoordMapper, PixelRect};
pub use driver::{FrameDriver, FrameStats};
pub use error::{ConfigError, EruptionError, RenderError};
pub use eruption::{Cadence, EruptionController, EruptionPhase};
pub use glam::{DVec2, I64Vec2, UVec2};
pub use particle::{Particle, ParticleTemplate, Rounding};
pub use planet::{Planet, Sprite};
pub use render::{Canvas, FrameRecorder};
pub use spawn::{SpawnKind, VelocitySampler, VENT};
pub use time::FrameClock;

#[cfg(feature = "window")]
pub use error::WindowError;

/// Something that owns a particle population and evolves it frame by frame.
///
/// [`EruptionController`] is the implementation used by the binary. A
/// [`Planet`] and a [`FrameDriver`] work with any implementor, which keeps
/// scene composition and frame ordering testable on their own.
///
/// The per-frame calls are made by [`FrameDriver::advance`] in this order:
/// [`cull`](Eruptor::cull), [`step`](Eruptor::step),
/// [`update_velocities`](Eruptor::update_velocities),
/// [`update_positions`](Eruptor::update_positions).
pub trait Eruptor {
    /// Live particles, in spawn order.
    fn particles(&self) -> &[Particle];

    /// Per-frame acceleration applied to every particle.
    fn gravity(&self) -> DVec2;

    /// Region outside which particles are culled.
    fn bounds(&self) -> Bounds {
        Bounds::UNIT
    }

    /// Add one frame of gravity to every velocity.
    fn update_velocities(&mut self);

    /// Move every particle by its velocity.
    fn update_positions(&mut self);

    /// Remove particles outside [`bounds`](Eruptor::bounds). Returns how many
    /// were removed.
    fn cull(&mut self) -> usize;

    /// Advance the eruption cycle one frame. Returns how many particles were
    /// spawned.
    fn step(&mut self) -> usize;
}

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use volcano::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SimulationConfig;
    pub use crate::coords::CoordMapper;
    pub use crate::driver::{FrameDriver, FrameStats};
    pub use crate::error::EruptionError;
    pub use crate::eruption::{EruptionController, EruptionPhase};
    pub use crate::planet::Planet;
    pub use crate::render::Canvas;
    pub use crate::time::FrameClock;
    pub use crate::Eruptor;
    pub use crate::{DVec2, UVec2};
}
