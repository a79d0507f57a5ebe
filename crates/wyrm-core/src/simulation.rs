use glam::{Vec2, Vec4};
use tracing::debug;

use crate::chain::Chain;
use crate::config::{CreatureConfig, SurfaceMode};
use crate::draw::DrawCommand;
use crate::particles::{Emission, ParticleSystem};
use crate::pointer::{InputEvent, PointerTracker};
use crate::random::RandomSource;
use crate::render::{self, Scene};
use crate::Result;

/// Counters for one call to [`Simulation::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub spawned: Emission,
    pub expired: usize,
    pub live_particles: usize,
}

/// One creature and everything it needs between frames.
pub struct Simulation {
    config: CreatureConfig,
    cycle: Vec<Vec4>,
    pointer: PointerTracker,
    chain: Chain,
    particles: Option<ParticleSystem>,
    clock: f64,
    frame: u64,
}

impl Simulation {
    /// Builds a creature on a surface of `size` pixels. Fixed-size configs
    /// ignore `size` and use their own dimensions.
    pub fn new(config: CreatureConfig, size: Vec2) -> Result<Self> {
        config.validate()?;
        let cycle = config.palette.resolve()?;
        let bounds = match config.surface {
            SurfaceMode::Fixed { width, height } => Vec2::new(width, height),
            SurfaceMode::Viewport => size,
        };
        let pointer = PointerTracker::new(bounds);
        let chain = Chain::new(
            config.segments,
            pointer.position(),
            config.head_smoothing,
            config.follow,
            config.order,
        );
        let particles = config.particles.clone().map(ParticleSystem::new);
        debug!(
            name = %config.name,
            segments = config.segments,
            width = bounds.x,
            height = bounds.y,
            particles = particles.is_some(),
            "simulation created"
        );
        Ok(Self {
            config,
            cycle,
            pointer,
            chain,
            particles,
            clock: 0.0,
            frame: 0,
        })
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.pointer.handle(event);
    }

    /// Follows a host resize. Fixed surfaces keep their size, and empty
    /// sizes (a minimized window) are ignored.
    pub fn resize(&mut self, size: Vec2) {
        if matches!(self.config.surface, SurfaceMode::Fixed { .. })
            || !(size.x > 0.0 && size.y > 0.0)
            || size == self.size()
        {
            return;
        }
        debug!(width = size.x, height = size.y, "surface resized");
        self.pointer.resize(size);
    }

    /// Advances one frame. `dt` is the frame interval in seconds; motion is
    /// per-frame, `dt` only drives the particle clock.
    pub fn step<R: RandomSource + ?Sized>(&mut self, dt: f32, rng: &mut R) -> FrameReport {
        self.clock += f64::from(dt.max(0.0));
        self.frame += 1;

        self.chain.advance(self.pointer.position());
        let speed = self.pointer.sample_velocity().length();

        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };
        if let Some(particles) = self.particles.as_mut() {
            report.spawned = particles.emit(
                self.chain.tail(),
                speed,
                self.pointer.is_active(),
                self.clock,
                rng,
            );
            report.expired = particles.update(self.clock);
            report.live_particles = particles.len();
        }
        report
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            points: self.chain.points(),
            particles: self.particles.as_ref().map(|p| p.particles()).unwrap_or(&[]),
            palette: &self.config.palette,
            cycle: &self.cycle,
            flourish: self.config.flourish,
            pressed: self.pointer.is_active(),
            size: self.size(),
            time: self.clock,
        }
    }

    pub fn render(&self) -> Vec<DrawCommand> {
        render::render(&self.scene())
    }

    pub fn config(&self) -> &CreatureConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn particles(&self) -> Option<&ParticleSystem> {
        self.particles.as_ref()
    }

    pub fn size(&self) -> Vec2 {
        self.pointer.bounds()
    }

    /// Seconds of simulated time. Kept in `f64` so long sessions keep
    /// ticking.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fixed_surface_ignores_host_size() {
        let mut sim = Simulation::new(Preset::Frost.config(), Vec2::new(10.0, 10.0)).unwrap();
        assert_eq!(sim.size(), Vec2::new(900.0, 600.0));
        sim.resize(Vec2::new(300.0, 300.0));
        assert_eq!(sim.size(), Vec2::new(900.0, 600.0));
    }

    #[test]
    fn viewport_surface_follows_resizes() {
        let mut sim = Simulation::new(Preset::Glow.config(), Vec2::new(1280.0, 720.0)).unwrap();
        assert_eq!(sim.pointer().position(), Vec2::new(640.0, 360.0));
        sim.resize(Vec2::new(400.0, 300.0));
        assert_eq!(sim.size(), Vec2::new(400.0, 300.0));
        assert_eq!(sim.pointer().position(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn minimized_window_keeps_last_surface() {
        let mut sim = Simulation::new(Preset::Cloud.config(), Vec2::new(800.0, 600.0)).unwrap();
        sim.handle_input(InputEvent::PointerMove(Some(Vec2::new(500.0, 400.0))));
        sim.resize(Vec2::ZERO);
        sim.resize(Vec2::new(0.0, 300.0));
        sim.resize(Vec2::new(f32::NAN, 300.0));
        assert_eq!(sim.size(), Vec2::new(800.0, 600.0));
        assert_eq!(sim.pointer().position(), Vec2::new(500.0, 400.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = Preset::Glow.config();
        config.segments = 0;
        assert!(Simulation::new(config, Vec2::ONE).is_err());
    }

    #[test]
    fn step_advances_clock_and_frame() {
        let mut sim = Simulation::new(Preset::Cloud.config(), Vec2::new(800.0, 600.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let report = sim.step(0.25, &mut rng);
        sim.step(-1.0, &mut rng);
        assert_eq!(report.frame, 1);
        assert_eq!(sim.frame(), 2);
        assert_eq!(sim.clock(), 0.25);
        assert_eq!(report.live_particles, 0);
        assert!(sim.particles().is_none());
    }

    #[test]
    fn scene_reflects_press_state() {
        let mut sim = Simulation::new(Preset::Frost.config(), Vec2::ZERO).unwrap();
        assert!(!sim.scene().pressed);
        sim.handle_input(InputEvent::PointerDown);
        assert!(sim.scene().pressed);
        assert_eq!(sim.scene().points.len(), 34);
    }
}
