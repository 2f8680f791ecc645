//! Per-frame orchestration.
//!
//! Each frame runs the core operations in one fixed order:
//!
//! 1. cull particles that left the bounds
//! 2. step the eruption cycle (may spawn)
//! 3. apply gravity to every velocity
//! 4. move every particle
//!
//! The host then renders [`FrameDriver::planet`] and presents the result.

use crate::config::SimulationConfig;
use crate::eruption::EruptionController;
use crate::error::EruptionError;
use crate::planet::Planet;
use crate::Eruptor;
use log::debug;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Index of the frame just simulated, starting at 1.
    pub frame: u64,
    pub culled: usize,
    pub spawned: usize,
    /// Particles alive after the frame.
    pub live: usize,
}

/// Advances a planet's simulation one frame at a time.
#[derive(Debug, Clone)]
pub struct FrameDriver<E: Eruptor> {
    planet: Planet<E>,
    frame: u64,
}

impl FrameDriver<EruptionController> {
    /// Build the standard scene from a configuration.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, EruptionError> {
        let controller = EruptionController::new(config)?;
        Ok(Self::new(Planet::new(controller, config)?))
    }
}

impl<E: Eruptor> FrameDriver<E> {
    pub fn new(planet: Planet<E>) -> Self {
        Self { planet, frame: 0 }
    }

    /// Simulate one frame.
    pub fn advance(&mut self) -> FrameStats {
        let eruptor = self.planet.eruptor_mut();
        let culled = eruptor.cull();
        let spawned = eruptor.step();
        eruptor.update_velocities();
        eruptor.update_positions();
        self.frame += 1;

        let stats = FrameStats {
            frame: self.frame,
            culled,
            spawned,
            live: eruptor.particles().len(),
        };
        debug!(
            "frame {}: culled {}, spawned {}, live {}",
            stats.frame, stats.culled, stats.spawned, stats.live
        );
        stats
    }

    /// Simulate `frames` frames and return the totals.
    pub fn run(&mut self, frames: u64) -> FrameStats {
        let mut total = FrameStats::default();
        for _ in 0..frames {
            let stats = self.advance();
            total.culled += stats.culled;
            total.spawned += stats.spawned;
            total.frame = stats.frame;
            total.live = stats.live;
        }
        total
    }

    /// Frames simulated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn planet(&self) -> &Planet<E> {
        &self.planet
    }

    pub fn planet_mut(&mut self) -> &mut Planet<E> {
        &mut self.planet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use glam::DVec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct OrderRecorder {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Eruptor for OrderRecorder {
        fn particles(&self) -> &[Particle] {
            &[]
        }

        fn gravity(&self) -> DVec2 {
            DVec2::ZERO
        }

        fn update_velocities(&mut self) {
            self.log.borrow_mut().push("velocities");
        }

        fn update_positions(&mut self) {
            self.log.borrow_mut().push("positions");
        }

        fn cull(&mut self) -> usize {
            self.log.borrow_mut().push("cull");
            2
        }

        fn step(&mut self) -> usize {
            self.log.borrow_mut().push("step");
            1
        }
    }

    #[test]
    fn test_fixed_operation_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let planet = Planet::new(OrderRecorder { log: log.clone() }, &SimulationConfig::default()).unwrap();
        let mut driver = FrameDriver::new(planet);

        let stats = driver.advance();
        assert_eq!(*log.borrow(), vec!["cull", "step", "velocities", "positions"]);
        assert_eq!(stats, FrameStats { frame: 1, culled: 2, spawned: 1, live: 0 });
    }

    #[test]
    fn test_run_accumulates() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let planet = Planet::new(OrderRecorder { log }, &SimulationConfig::default()).unwrap();
        let mut driver = FrameDriver::new(planet);
        let total = driver.run(5);
        assert_eq!(total.frame, 5);
        assert_eq!(total.culled, 10);
        assert_eq!(total.spawned, 5);
        assert_eq!(driver.frame(), 5);
    }

    #[test]
    fn test_from_config_starts_empty() {
        let driver = FrameDriver::from_config(&SimulationConfig::default()).unwrap();
        assert_eq!(driver.frame(), 0);
        assert!(driver.planet().eruptor().particles().is_empty());
    }
}
