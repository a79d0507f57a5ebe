//! Chain-follow body: each point lags behind the one in front of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{FollowOrder, FollowProfile};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPoint {
    pub pos: Vec2,
    /// Direction from this point toward the one it follows, in radians.
    pub angle: f32,
}

/// Moves `current` a fraction `alpha` of the way toward `target`.
#[inline]
pub fn approach(current: Vec2, target: Vec2, alpha: f32) -> Vec2 {
    current + (target - current) * alpha
}

#[derive(Debug, Clone)]
pub struct Chain {
    points: Vec<BodyPoint>,
    head_smoothing: f32,
    profile: FollowProfile,
    order: FollowOrder,
}

impl Chain {
    /// All points start stacked on `origin` and unfurl over the first frames.
    pub fn new(
        len: usize,
        origin: Vec2,
        head_smoothing: f32,
        profile: FollowProfile,
        order: FollowOrder,
    ) -> Self {
        Self {
            points: vec![BodyPoint { pos: origin, angle: 0.0 }; len],
            head_smoothing,
            profile,
            order,
        }
    }

    pub fn advance(&mut self, pointer: Vec2) {
        match self.order {
            FollowOrder::HeadFirst => {
                self.move_head(pointer);
                for index in 1..self.points.len() {
                    self.follow(index);
                }
            }
            FollowOrder::TailFirst => {
                for index in (1..self.points.len()).rev() {
                    self.follow(index);
                }
                self.move_head(pointer);
            }
        }
    }

    fn move_head(&mut self, pointer: Vec2) {
        if let Some(head) = self.points.first_mut() {
            head.pos = approach(head.pos, pointer, self.head_smoothing);
        }
    }

    fn follow(&mut self, index: usize) {
        let target = self.target(index);
        let alpha = self.profile.alpha(index);
        let point = &mut self.points[index];
        point.pos = approach(point.pos, target, alpha);
        let to_target = target - point.pos;
        point.angle = to_target.y.atan2(to_target.x);
    }

    /// Where follower `index` is heading this frame.
    pub fn target(&self, index: usize) -> Vec2 {
        self.points[index - 1].pos + self.profile.offset(index, self.points.len())
    }

    pub fn points(&self) -> &[BodyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn head(&self) -> Vec2 {
        self.points[0].pos
    }

    pub fn tail(&self) -> Vec2 {
        self.points[self.points.len() - 1].pos
    }

    /// Point `index`, clamped to the tail for short chains.
    pub fn at(&self, index: usize) -> BodyPoint {
        self.points[index.min(self.points.len() - 1)]
    }
}
