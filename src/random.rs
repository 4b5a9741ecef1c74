use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

pub fn seeded(seed: Option<u64>) -> RngSource<StdRng> {
    match seed {
        Some(seed) => RngSource::new(StdRng::seed_from_u64(seed)),
        None => RngSource::new(StdRng::from_entropy()),
    }
}

#[cfg(test)]
pub mod testing {
    use super::RandomSource;

    /// Replays a fixed list of draws, cycling when exhausted.
    pub struct Scripted {
        values: Vec<f64>,
        pos: usize,
    }

    impl Scripted {
        pub fn new(values: &[f64]) -> Self {
            assert!(!values.is_empty());
            Self {
                values: values.to_vec(),
                pos: 0,
            }
        }

        pub fn constant(value: f64) -> Self {
            Self::new(&[value])
        }

        pub fn consumed(&self) -> usize {
            self.pos
        }
    }

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            let value = self.values[self.pos % self.values.len()];
            self.pos += 1;
            value
        }
    }
}
