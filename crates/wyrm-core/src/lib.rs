//! Wyrm core engine: platform-agnostic chain-follow creature, particles, presets
//! and draw-command generation.

pub mod chain;
pub mod color;
pub mod config;
pub mod draw;
mod error;
pub mod particles;
pub mod pointer;
pub mod random;
pub mod render;
mod simulation;

pub use chain::{BodyPoint, Chain};
pub use config::{CreatureConfig, Flourish, FollowOrder, FollowProfile, Preset, SurfaceMode};
pub use draw::DrawCommand;
pub use error::{Error, Result};
pub use particles::{Particle, ParticleKind, ParticleSystem};
pub use pointer::{InputEvent, PointerTracker};
pub use random::RandomSource;
pub use simulation::{FrameReport, Simulation};
