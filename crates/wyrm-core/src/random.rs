//! Injected randomness for particle spawning.

/// Uniform source of values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[min, max)`.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }
}

impl<R: rand::RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        rand::Rng::random::<f32>(self)
    }
}
