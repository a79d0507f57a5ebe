//! Scene -> draw commands. Nothing here keeps state between frames.

mod cloud;
mod frost;
mod glow;

use glam::{Affine2, Vec2, Vec4};

use crate::chain::BodyPoint;
use crate::color;
use crate::config::{Flourish, Palette};
use crate::draw::{stop, Blend, ColorStop, DrawCommand, Shape};
use crate::particles::{Particle, ParticleKind};

/// Everything a frame needs to be drawn.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub points: &'a [BodyPoint],
    pub particles: &'a [Particle],
    pub palette: &'a Palette,
    /// Resolved colours for [`Palette::Cycle`]; empty for hue ramps.
    pub cycle: &'a [Vec4],
    pub flourish: Flourish,
    pub pressed: bool,
    pub size: Vec2,
    /// Animation clock, seconds.
    pub time: f64,
}

impl Scene<'_> {
    /// Point `index`, clamped to the tail. Scenes always carry at least
    /// two points.
    fn point(&self, index: usize) -> Vec2 {
        self.points[index.min(self.points.len() - 1)].pos
    }

    fn head(&self) -> Vec2 {
        self.point(0)
    }

    fn tail(&self) -> Vec2 {
        self.point(self.points.len() - 1)
    }

    /// Head-local frame whose -y axis points at the neck, so horns drawn
    /// "up" sweep back along the body.
    fn head_transform(&self) -> Affine2 {
        let head = self.head();
        let to_neck = self.point(1) - head;
        let angle = to_neck.y.atan2(to_neck.x);
        Affine2::from_angle_translation(angle + std::f32::consts::FRAC_PI_2, head)
    }

    fn tone(&self, index: usize) -> Tone {
        match self.palette {
            Palette::HueRamp {
                hue_start,
                hue_step,
                saturation,
                lightness_start,
                lightness_step,
            } => Tone::Hsl {
                hue: hue_start + index as f32 * hue_step,
                saturation: *saturation,
                lightness: lightness_start + index as f32 * lightness_step,
            },
            Palette::Cycle { .. } if !self.cycle.is_empty() => {
                Tone::Flat(self.cycle[index % self.cycle.len()])
            }
            Palette::Cycle { .. } => Tone::Flat(color::WHITE),
        }
    }
}

/// Colour of one body segment.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Tone {
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
    Flat(Vec4),
}

impl Tone {
    fn base(&self, alpha: f32) -> Vec4 {
        match *self {
            Tone::Hsl {
                hue,
                saturation,
                lightness,
            } => color::hsla(hue, saturation, lightness, alpha),
            Tone::Flat(c) => color::with_alpha(c, alpha),
        }
    }

    /// Highlight -> body -> rim stops for a shaded sphere.
    fn sphere_stops(&self) -> Vec<ColorStop> {
        match *self {
            Tone::Hsl {
                hue,
                saturation,
                lightness,
            } => vec![
                stop(0.0, color::hsla(hue, saturation, (lightness + 16.0).min(85.0), 0.95)),
                stop(0.6, color::hsla(hue, saturation - 7.0, (lightness - 6.0).max(38.0), 0.95)),
                stop(1.0, color::hsla(hue - 6.0, saturation - 10.0, (lightness - 18.0).max(18.0), 0.9)),
            ],
            Tone::Flat(c) => {
                let shade = |k: f32, a: f32| {
                    let rgb = (c.truncate() * k).min(glam::Vec3::ONE);
                    rgb.extend(a)
                };
                vec![stop(0.0, shade(1.3, 0.95)), stop(0.6, shade(1.0, 0.95)), stop(1.0, shade(0.55, 0.9))]
            }
        }
    }
}

/// Renders one frame.
pub fn render(scene: &Scene<'_>) -> Vec<DrawCommand> {
    let mut out = vec![DrawCommand::Clear];
    if scene.points.len() < 2 {
        return out;
    }
    match scene.flourish {
        Flourish::Wings => frost::draw(scene, &mut out),
        Flourish::Glow => glow::draw(scene, &mut out),
        Flourish::Clouds => cloud::draw(scene, &mut out),
    }
    out
}

/// Flame particles are additive blobs that swell as they fade; ice particles
/// are small screen-blended squares.
fn draw_particles(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    for particle in scene.particles {
        let life = particle.life_ratio(scene.time);
        let alpha = life.max(0.02);
        let command = match particle.kind {
            ParticleKind::Flame => DrawCommand::solid(
                Shape::circle(particle.pos, particle.size * (1.0 + (1.0 - life) * 0.8)),
                particle.color,
            )
            .blended(Blend::Lighter, alpha),
            ParticleKind::Ice => DrawCommand::solid(
                Shape::Rect {
                    min: particle.pos - Vec2::splat(particle.size * 0.5),
                    size: Vec2::splat(particle.size),
                },
                particle.color,
            )
            .blended(Blend::Screen, alpha),
        };
        out.push(command);
    }
}
