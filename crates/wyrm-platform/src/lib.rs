//! Host seams so `wyrm-core` stays windowing-agnostic.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;
use wyrm_core::{DrawCommand, FrameReport, InputEvent, RandomSource, Simulation};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Longest frame interval fed to the simulation, seconds. Longer gaps
/// (a hidden window, a debugger pause) are treated as this.
pub const MAX_FRAME_DT: f32 = 0.1;
/// Interval assumed for the very first tick.
pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A 2D surface that executes draw commands.
pub trait Canvas {
    fn size(&self) -> SurfaceSize;
    fn begin_frame(&mut self) -> Result<()> {
        Ok(())
    }
    fn draw(&mut self, command: &DrawCommand) -> Result<()>;
    fn end_frame(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Source of pointer and touch events, drained once per frame.
pub trait InputSource {
    fn drain(&mut self, sink: &mut dyn FnMut(InputEvent));
}

/// Runs the per-frame loop body: input, step, render, submit.
pub struct FrameDriver<R> {
    simulation: Simulation,
    rng: R,
    last_time: Option<f64>,
}

impl<R: RandomSource> FrameDriver<R> {
    pub fn new(simulation: Simulation, rng: R) -> Self {
        Self {
            simulation,
            rng,
            last_time: None,
        }
    }

    /// One frame at host time `now` (seconds, monotonic).
    pub fn tick(
        &mut self,
        now: f64,
        input: &mut dyn InputSource,
        canvas: &mut dyn Canvas,
    ) -> Result<FrameReport> {
        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
            None => NOMINAL_FRAME_DT,
        };
        self.last_time = Some(now);

        self.simulation.resize(canvas.size().as_vec2());
        let simulation = &mut self.simulation;
        input.drain(&mut |event| simulation.handle_input(event));

        let report = self.simulation.step(dt, &mut self.rng);
        let commands = self.simulation.render();
        canvas.begin_frame()?;
        for command in &commands {
            canvas.draw(command)?;
        }
        canvas.end_frame()?;
        trace!(
            frame = report.frame,
            dt,
            commands = commands.len(),
            particles = report.live_particles,
            "frame submitted"
        );
        Ok(report)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }
}

/// Canvas that keeps the last frame's commands; for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub size: Option<SurfaceSize>,
    pub frames: usize,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> SurfaceSize {
        self.size.unwrap_or(SurfaceSize::new(0.0, 0.0))
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.commands.clear();
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        self.commands.push(command.clone());
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}
