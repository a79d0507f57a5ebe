//! Creature configuration and the three built-in presets.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::random::RandomSource;
use crate::{Error, Result};

/// Closed-open sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.range(self.min, self.max)
    }

    fn check(&self, what: &str) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(Error::Invalid(format!(
                "{what} range [{}, {}) is not ordered",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// How each follower chases its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FollowProfile {
    Constant {
        alpha: f32,
    },
    /// Smoothing grows with the index so the tail keeps up.
    Tightening {
        base: f32,
        per_index: f32,
    },
    /// Each follower aims at its predecessor shifted along a sine/cosine
    /// backbone, giving a standing wave along the body.
    Undulating {
        alpha: f32,
        amplitude: f32,
        freq_x: f32,
        freq_y: f32,
        y_scale: f32,
    },
}

impl FollowProfile {
    pub fn alpha(&self, index: usize) -> f32 {
        match *self {
            FollowProfile::Constant { alpha } => alpha,
            FollowProfile::Tightening { base, per_index } => base + index as f32 * per_index,
            FollowProfile::Undulating { alpha, .. } => alpha,
        }
    }

    pub fn offset(&self, index: usize, len: usize) -> Vec2 {
        match *self {
            FollowProfile::Undulating {
                amplitude,
                freq_x,
                freq_y,
                y_scale,
                ..
            } => {
                let t = index as f32 / len as f32;
                Vec2::new(
                    (t * freq_x).sin() * amplitude,
                    (t * freq_y).cos() * amplitude * y_scale,
                )
            }
            _ => Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowOrder {
    /// Head moves first; every follower chases its freshly moved predecessor.
    HeadFirst,
    /// Followers move tail to neck against last frame's positions, then the head.
    TailFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Palette {
    /// Hue and lightness shift linearly with the segment index.
    HueRamp {
        hue_start: f32,
        hue_step: f32,
        saturation: f32,
        lightness_start: f32,
        lightness_step: f32,
    },
    /// Segments cycle through `#rrggbb` colours.
    Cycle { colors: Vec<String> },
}

impl Palette {
    /// Resolves a colour cycle; hue ramps resolve to an empty list.
    pub fn resolve(&self) -> Result<Vec<glam::Vec4>> {
        match self {
            Palette::HueRamp { .. } => Ok(Vec::new()),
            Palette::Cycle { colors } => {
                if colors.is_empty() {
                    return Err(Error::Invalid("colour cycle is empty".into()));
                }
                colors.iter().map(|c| color::parse_hex(c)).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flourish {
    /// Flapping wings, horned head, tail flame, particles and vignette.
    Wings,
    /// Plain glowing body and head.
    Glow,
    /// Clouds under the head, whiskers and a curled tail.
    Clouds,
}

/// Spawn ranges and per-frame physics for one particle type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionProfile {
    pub velocity_x: Span,
    pub velocity_y: Span,
    /// Seconds.
    pub lifetime: Span,
    pub size: Span,
    pub hue: Span,
    pub saturation: f32,
    pub lightness: Span,
    /// Added to `vel.y` every frame.
    pub gravity: f32,
    /// Subtracted from `vel.y` scaled by the remaining-life ratio.
    pub fade: f32,
    /// Multiplier applied to `vel.x` every frame.
    pub damping_x: f32,
}

impl EmissionProfile {
    pub fn ice() -> Self {
        Self {
            velocity_x: Span::new(-0.6, 0.6),
            velocity_y: Span::new(-1.6, -0.2),
            lifetime: Span::new(0.6, 1.2),
            size: Span::new(1.2, 3.6),
            hue: Span::new(180.0, 200.0),
            saturation: 90.0,
            lightness: Span::new(60.0, 80.0),
            gravity: -0.01,
            fade: 0.0,
            damping_x: 0.995,
        }
    }

    pub fn flame() -> Self {
        Self {
            velocity_x: Span::new(-1.6, 1.6),
            velocity_y: Span::new(-3.0, -1.0),
            lifetime: Span::new(0.3, 0.7),
            size: Span::new(3.0, 7.0),
            hue: Span::new(10.0, 40.0),
            saturation: 90.0,
            lightness: Span::new(55.0, 65.0),
            gravity: 0.06,
            fade: 0.02,
            damping_x: 0.995,
        }
    }

    fn check(&self, what: &str) -> Result<()> {
        self.velocity_x.check(what)?;
        self.velocity_y.check(what)?;
        self.lifetime.check(what)?;
        self.size.check(what)?;
        self.hue.check(what)?;
        self.lightness.check(what)?;
        if self.lifetime.min <= 0.0 {
            return Err(Error::Invalid(format!("{what} lifetime must be positive")));
        }
        check_finite(what, "saturation", self.saturation)?;
        check_finite(what, "gravity", self.gravity)?;
        check_finite(what, "fade", self.fade)?;
        if !(self.damping_x > 0.0 && self.damping_x <= 1.0) {
            return Err(Error::Invalid(format!("{what} damping must be in (0, 1]")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub max_particles: usize,
    /// Pointer speed (px/frame) to spawn-rate factor.
    pub speed_gain: f32,
    pub rate_min: f32,
    pub rate_max: f32,
    /// Ice spawns when `u < ice_chance * rate`.
    pub ice_chance: f32,
    /// Flame spawns when pressed and `u < flame_chance`.
    pub flame_chance: f32,
    pub ice: EmissionProfile,
    pub flame: EmissionProfile,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 700,
            speed_gain: 0.6,
            rate_min: 0.2,
            rate_max: 3.5,
            ice_chance: 0.6,
            flame_chance: 0.8,
            ice: EmissionProfile::ice(),
            flame: EmissionProfile::flame(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceMode {
    Fixed { width: f32, height: f32 },
    /// Fills the window and follows resizes.
    Viewport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureConfig {
    pub name: String,
    pub segments: usize,
    pub head_smoothing: f32,
    pub follow: FollowProfile,
    pub order: FollowOrder,
    pub palette: Palette,
    pub flourish: Flourish,
    #[serde(default)]
    pub particles: Option<ParticleConfig>,
    pub surface: SurfaceMode,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Preset::Frost.config()
    }
}

impl CreatureConfig {
    pub fn preset(name: &str) -> Result<Self> {
        Ok(name.parse::<Preset>()?.config())
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments < 2 {
            return Err(Error::Invalid(format!(
                "a creature needs at least 2 segments, got {}",
                self.segments
            )));
        }
        check_fraction("head smoothing", self.head_smoothing)?;
        for index in 1..self.segments {
            check_fraction("follower smoothing", self.follow.alpha(index))?;
        }
        self.palette.resolve()?;
        if let SurfaceMode::Fixed { width, height } = self.surface {
            if !(width > 0.0 && height > 0.0) {
                return Err(Error::Invalid(format!("surface {width}x{height} is empty")));
            }
        }
        if let Some(particles) = &self.particles {
            if particles.max_particles == 0 {
                return Err(Error::Invalid("particle cap must be at least 1".into()));
            }
            check_finite("particles", "speed gain", particles.speed_gain)?;
            check_finite("particles", "rate floor", particles.rate_min)?;
            check_finite("particles", "rate ceiling", particles.rate_max)?;
            check_finite("particles", "ice chance", particles.ice_chance)?;
            check_finite("particles", "flame chance", particles.flame_chance)?;
            if !(particles.rate_min <= particles.rate_max) {
                return Err(Error::Invalid("spawn rate floor exceeds its ceiling".into()));
            }
            particles.ice.check("ice")?;
            particles.flame.check("flame")?;
        }
        Ok(())
    }
}

/// Smoothing fractions: a value of 1 would snap instead of ease.
fn check_fraction(what: &str, value: f32) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::Invalid(format!("{what} {value} is outside (0, 1)")))
    }
}

fn check_finite(what: &str, field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Invalid(format!("{what} {field} must be finite, got {value}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Ice dragon: 34 segments, wings, flame and ice particles.
    Frost,
    /// Minimal glowing serpent.
    Glow,
    /// Cloud dragon with an undulating backbone.
    Cloud,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Frost, Preset::Glow, Preset::Cloud];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Frost => "frost",
            Preset::Glow => "glow",
            Preset::Cloud => "cloud",
        }
    }

    pub fn config(&self) -> CreatureConfig {
        match self {
            Preset::Frost => CreatureConfig {
                name: "Frost".into(),
                segments: 34,
                head_smoothing: 0.9,
                follow: FollowProfile::Tightening {
                    base: 0.24,
                    per_index: 0.003,
                },
                order: FollowOrder::HeadFirst,
                palette: Palette::HueRamp {
                    hue_start: 188.0,
                    hue_step: -2.4,
                    saturation: 95.0,
                    lightness_start: 60.0,
                    lightness_step: -0.5,
                },
                flourish: Flourish::Wings,
                particles: Some(ParticleConfig::default()),
                surface: SurfaceMode::Fixed {
                    width: 900.0,
                    height: 600.0,
                },
            },
            Preset::Glow => CreatureConfig {
                name: "Glow".into(),
                segments: 24,
                head_smoothing: 0.26,
                follow: FollowProfile::Constant { alpha: 0.3 },
                order: FollowOrder::HeadFirst,
                palette: Palette::HueRamp {
                    hue_start: 268.0,
                    hue_step: 3.5,
                    saturation: 90.0,
                    lightness_start: 64.0,
                    lightness_step: -0.6,
                },
                flourish: Flourish::Glow,
                particles: None,
                surface: SurfaceMode::Viewport,
            },
            Preset::Cloud => CreatureConfig {
                name: "Cloud".into(),
                segments: 30,
                head_smoothing: 0.38,
                follow: FollowProfile::Undulating {
                    alpha: 0.28,
                    amplitude: 26.0,
                    freq_x: 6.5,
                    freq_y: 5.7,
                    y_scale: 0.6,
                },
                order: FollowOrder::TailFirst,
                palette: Palette::Cycle {
                    colors: [
                        "#23aecd", "#ee3467", "#f7db4e", "#4ff4ed", "#4157a3", "#c586e7", "#dfb344",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                },
                flourish: Flourish::Clouds,
                particles: None,
                surface: SurfaceMode::Viewport,
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}
