//! Scene composition: background, planet and the erupting particles.
//!
//! The planet never draws anything itself. It turns the current simulation
//! state into a list of pixel-space [`Sprite`]s in paint order, which a host
//! renderer fills in on top of the background color.

use crate::config::{Rgb, SimulationConfig};
use crate::coords::{Bounds, CoordMapper, PixelRect};
use crate::error::EruptionError;
use crate::Eruptor;
use glam::DVec2;

/// A filled rectangle to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub rect: PixelRect,
    pub color: Rgb,
}

/// A planet with an eruptor on its surface.
#[derive(Debug, Clone)]
pub struct Planet<E: Eruptor> {
    eruptor: E,
    mapper: CoordMapper,
    planet_size: DVec2,
    planet_rect: PixelRect,
    planet_color: Rgb,
    background: Rgb,
}

impl<E: Eruptor> Planet<E> {
    pub fn new(eruptor: E, config: &SimulationConfig) -> Result<Self, EruptionError> {
        let mapper = config.mapper()?;
        let planet_rect = planet_rect(&mapper, config.planet_size)?;
        Ok(Self {
            eruptor,
            mapper,
            planet_size: config.planet_size,
            planet_rect,
            planet_color: config.planet_color,
            background: config.background_color,
        })
    }

    pub fn eruptor(&self) -> &E {
        &self.eruptor
    }

    pub fn eruptor_mut(&mut self) -> &mut E {
        &mut self.eruptor
    }

    pub fn mapper(&self) -> CoordMapper {
        self.mapper
    }

    /// Normalized width/height of the planet.
    pub fn planet_size(&self) -> DVec2 {
        self.planet_size
    }

    /// Pixel rectangle of the planet body.
    pub fn planet_rect(&self) -> PixelRect {
        self.planet_rect
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Region outside which particles are culled.
    pub fn bounds(&self) -> Bounds {
        self.eruptor.bounds()
    }

    /// Everything to paint over the background, back to front: the planet,
    /// then each particle.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        let planet = Sprite {
            rect: self.planet_rect,
            color: self.planet_color,
        };
        std::iter::once(planet).chain(self.eruptor.particles().iter().map(|p| Sprite {
            rect: p.rect(),
            color: p.color(),
        }))
    }

    pub fn draw_list(&self) -> Vec<Sprite> {
        self.sprites().collect()
    }
}

/// The planet sits on the bottom edge, centered horizontally.
fn planet_rect(mapper: &CoordMapper, size: DVec2) -> Result<PixelRect, EruptionError> {
    let size_px = mapper.to_px_size(size)?;
    let top_left = mapper.to_px_point(DVec2::new(0.5 - size.x / 2.0, size.y));
    Ok(PixelRect::new(top_left.x, top_left.y, size_px.x, size_px.y))
}
