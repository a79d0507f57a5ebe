//! Short-lived ice and flame particles shed from the tail.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color;
use crate::config::{EmissionProfile, ParticleConfig};
use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Ice,
    Flame,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Simulation time at spawn, seconds.
    pub born: f64,
    /// Seconds, always positive.
    pub lifetime: f32,
    pub size: f32,
    pub color: Vec4,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn age(&self, now: f64) -> f64 {
        now - self.born
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) >= f64::from(self.lifetime)
    }

    /// `1 - age / lifetime`, clamped to `[0, 1]`.
    pub fn life_ratio(&self, now: f64) -> f32 {
        (1.0 - self.age(now) / f64::from(self.lifetime)).clamp(0.0, 1.0) as f32
    }
}

/// What a single call to [`ParticleSystem::emit`] produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emission {
    pub ice: usize,
    pub flame: usize,
}

impl Emission {
    pub fn total(&self) -> usize {
        self.ice + self.flame
    }
}

pub struct ParticleSystem {
    config: ParticleConfig,
    // Insertion order is spawn order, so the front holds the oldest.
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            particles: Vec::with_capacity(config.max_particles),
            config,
        }
    }

    /// Spawn rate factor for a tail moving at `speed` px/frame.
    pub fn spawn_rate(&self, speed: f32) -> f32 {
        (speed * self.config.speed_gain).clamp(self.config.rate_min, self.config.rate_max)
    }

    /// Rolls the per-frame spawn chances at the tail.
    pub fn emit<R: RandomSource + ?Sized>(
        &mut self,
        tail: Vec2,
        speed: f32,
        pressed: bool,
        now: f64,
        rng: &mut R,
    ) -> Emission {
        let mut emission = Emission::default();
        let rate = self.spawn_rate(speed);
        if rng.next_unit() < self.config.ice_chance * rate {
            self.spawn(ParticleKind::Ice, tail, now, rng);
            emission.ice += 1;
        }
        if pressed && rng.next_unit() < self.config.flame_chance {
            self.spawn(ParticleKind::Flame, tail, now, rng);
            emission.flame += 1;
        }
        emission
    }

    pub fn spawn<R: RandomSource + ?Sized>(
        &mut self,
        kind: ParticleKind,
        at: Vec2,
        now: f64,
        rng: &mut R,
    ) {
        let profile = self.profile(kind);
        let particle = Particle {
            pos: at,
            vel: Vec2::new(profile.velocity_x.sample(rng), profile.velocity_y.sample(rng)),
            born: now,
            lifetime: profile.lifetime.sample(rng).max(f32::EPSILON),
            size: profile.size.sample(rng),
            color: color::hsl(
                profile.hue.sample(rng),
                profile.saturation,
                profile.lightness.sample(rng),
            ),
            kind,
        };
        self.particles.push(particle);
        self.trim();
    }

    fn trim(&mut self) {
        let cap = self.config.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            trace!(excess, cap, "trimming oldest particles");
            self.particles.drain(..excess);
        }
    }

    fn profile(&self, kind: ParticleKind) -> &EmissionProfile {
        match kind {
            ParticleKind::Ice => &self.config.ice,
            ParticleKind::Flame => &self.config.flame,
        }
    }

    /// Drops expired particles and advances the rest by one frame.
    /// Returns how many expired.
    pub fn update(&mut self, now: f64) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired(now));
        let expired = before - self.particles.len();

        let (ice, flame) = (&self.config.ice, &self.config.flame);
        for particle in &mut self.particles {
            let profile = match particle.kind {
                ParticleKind::Ice => ice,
                ParticleKind::Flame => flame,
            };
            let life = particle.life_ratio(now);
            particle.pos += particle.vel;
            particle.vel.y += profile.gravity - life * profile.fade;
            particle.vel.x *= profile.damping_x;
        }
        expired
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity_limit(&self) -> usize {
        self.config.max_particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed list of unit values, cycling.
    struct Scripted {
        values: Vec<f32>,
        next: usize,
    }

    impl Scripted {
        fn new(values: &[f32]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f32 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }
    }

    fn system() -> ParticleSystem {
        ParticleSystem::new(ParticleConfig::default())
    }

    #[test]
    fn spawn_rate_is_banded() {
        let sys = system();
        assert_eq!(sys.spawn_rate(0.0), 0.2);
        assert!((sys.spawn_rate(2.0) - 1.2).abs() < 1e-6);
        assert_eq!(sys.spawn_rate(100.0), 3.5);
    }

    #[test]
    fn spawned_properties_stay_in_ranges() {
        let mut sys = system();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            sys.spawn(ParticleKind::Ice, Vec2::ZERO, 0.0, &mut rng);
            sys.spawn(ParticleKind::Flame, Vec2::ZERO, 0.0, &mut rng);
        }
        for p in sys.particles() {
            assert!(p.lifetime > 0.0);
            match p.kind {
                ParticleKind::Ice => {
                    assert!((0.6..=1.2).contains(&p.lifetime));
                    assert!((1.2..=3.6).contains(&p.size));
                    assert!((-1.6..=-0.2).contains(&p.vel.y));
                    // cool: blue channel dominates red
                    assert!(p.color.z > p.color.x);
                }
                ParticleKind::Flame => {
                    assert!((0.3..=0.7).contains(&p.lifetime));
                    assert!((3.0..=7.0).contains(&p.size));
                    assert!((-3.0..=-1.0).contains(&p.vel.y));
                    assert!(p.color.x > p.color.z);
                }
            }
        }
    }

    #[test]
    fn idle_pointer_still_sheds_some_ice() {
        let mut sys = system();
        // 0.1 < 0.6 * 0.2
        let mut rng = Scripted::new(&[0.1, 0.5]);
        let emission = sys.emit(Vec2::ZERO, 0.0, false, 0.0, &mut rng);
        assert_eq!(emission, Emission { ice: 1, flame: 0 });

        let mut rng = Scripted::new(&[0.2]);
        let emission = sys.emit(Vec2::ZERO, 0.0, false, 0.0, &mut rng);
        assert_eq!(emission.total(), 0);
    }

    #[test]
    fn flame_only_while_pressed() {
        let mut sys = system();
        let mut rng = Scripted::new(&[0.99, 0.5]);
        let emission = sys.emit(Vec2::ZERO, 0.0, true, 0.0, &mut rng);
        assert_eq!(emission, Emission { ice: 0, flame: 1 });
        assert_eq!(sys.particles()[0].kind, ParticleKind::Flame);

        let mut rng = Scripted::new(&[0.99]);
        let emission = sys.emit(Vec2::ZERO, 0.0, false, 0.0, &mut rng);
        assert_eq!(emission.total(), 0);
    }

    #[test]
    fn cap_trims_oldest_first() {
        let mut sys = ParticleSystem::new(ParticleConfig {
            max_particles: 5,
            ..ParticleConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..8 {
            sys.spawn(ParticleKind::Ice, Vec2::ZERO, f64::from(i), &mut rng);
            assert!(sys.len() <= 5);
        }
        let births: Vec<f64> = sys.particles().iter().map(|p| p.born).collect();
        assert_eq!(births, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn default_cap_is_seven_hundred() {
        let mut sys = system();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            sys.emit(Vec2::ZERO, 50.0, true, 0.0, &mut rng);
            assert!(sys.len() <= 700);
        }
        assert_eq!(sys.len(), 700);
        assert_eq!(sys.capacity_limit(), 700);
    }

    #[test]
    fn ice_drifts_up_and_flame_sinks() {
        let mut sys = system();
        let mut rng = Scripted::new(&[0.5]);
        sys.spawn(ParticleKind::Ice, Vec2::ZERO, 0.0, &mut rng);
        sys.spawn(ParticleKind::Flame, Vec2::ZERO, 0.0, &mut rng);
        let before: Vec<Vec2> = sys.particles().iter().map(|p| p.vel).collect();
        sys.update(0.0);
        let ice = sys.particles()[0];
        let flame = sys.particles()[1];
        assert!((ice.vel.y - (before[0].y - 0.01)).abs() < 1e-6);
        // full life: 0.06 - 1.0 * 0.02
        assert!((flame.vel.y - (before[1].y + 0.04)).abs() < 1e-6);
        assert_eq!(ice.pos, before[0]);
    }

    #[test]
    fn horizontal_velocity_is_damped() {
        let mut sys = system();
        let mut rng = Scripted::new(&[0.9]);
        sys.spawn(ParticleKind::Flame, Vec2::ZERO, 0.0, &mut rng);
        let vx = sys.particles()[0].vel.x;
        sys.update(0.01);
        assert!((sys.particles()[0].vel.x - vx * 0.995).abs() < 1e-6);
        assert!(sys.particles()[0].vel.x.abs() < vx.abs());
    }

    #[test]
    fn expiry_happens_within_one_frame() {
        let mut sys = system();
        let mut rng = Scripted::new(&[0.0]);
        // lifetime = 0.3, the flame minimum
        sys.spawn(ParticleKind::Flame, Vec2::ZERO, 0.0, &mut rng);
        let lifetime = sys.particles()[0].lifetime;
        let dt = 0.016;
        let mut now = 0.0;
        loop {
            now += dt;
            let alive_before = sys.particles().first().copied();
            let expired = sys.update(now);
            if expired == 1 {
                let p = alive_before.unwrap();
                assert!(p.age(now) >= f64::from(lifetime));
                assert!(p.age(now) < f64::from(lifetime) + dt);
                break;
            }
            assert!(sys.particles()[0].age(now) < f64::from(lifetime));
        }
        assert!(sys.is_empty());
    }

    #[test]
    fn life_ratio_falls_to_zero_at_expiry() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            born: 1.0,
            lifetime: 0.5,
            size: 1.0,
            color: Vec4::ONE,
            kind: ParticleKind::Ice,
        };
        let mut last = p.life_ratio(1.0);
        assert_eq!(last, 1.0);
        for step in 1..=10 {
            let ratio = p.life_ratio(1.0 + f64::from(step) * 0.05);
            assert!(ratio < last);
            if step < 10 {
                assert!(ratio > 0.0);
            }
            last = ratio;
        }
        assert_eq!(p.life_ratio(1.5), 0.0);
        assert_eq!(p.life_ratio(2.0), 0.0);
        assert!(p.is_expired(1.5));
    }
}
