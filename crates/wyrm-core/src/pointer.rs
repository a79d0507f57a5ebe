use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Host input, already translated into surface-local pixels.
///
/// Coordinates are optional because hosts may report events without one
/// (a touch-move with no touches left, for example); those fall back to the
/// last known position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMove(Option<Vec2>),
    PointerDown,
    PointerUp,
    PointerLeave,
    TouchStart(Option<Vec2>),
    TouchMove(Option<Vec2>),
    TouchEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    position: Vec2,
    last_sample: Option<Vec2>,
    velocity: Vec2,
    active: bool,
    bounds: Vec2,
}

impl PointerTracker {
    /// Starts centred on a surface of `bounds` pixels.
    pub fn new(bounds: Vec2) -> Self {
        Self {
            position: bounds * 0.5,
            last_sample: None,
            velocity: Vec2::ZERO,
            active: false,
            bounds,
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove(at) | InputEvent::TouchMove(at) => self.move_to(at),
            InputEvent::TouchStart(at) => {
                self.move_to(at);
                self.active = true;
            }
            InputEvent::PointerDown => self.active = true,
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                self.active = false
            }
        }
    }

    fn move_to(&mut self, at: Option<Vec2>) {
        let target = at.unwrap_or(self.position);
        self.position = self.clamp(target);
    }

    fn clamp(&self, point: Vec2) -> Vec2 {
        // NaN coordinates would poison the whole chain.
        if !point.is_finite() {
            return self.position;
        }
        point.clamp(Vec2::ZERO, self.bounds)
    }

    /// Per-frame velocity: displacement since the previous sample.
    pub fn sample_velocity(&mut self) -> Vec2 {
        self.velocity = self.position - self.last_sample.unwrap_or(self.position);
        self.last_sample = Some(self.position);
        self.velocity
    }

    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds.max(Vec2::ZERO);
        self.position = self.position.clamp(Vec2::ZERO, self.bounds);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }
}
