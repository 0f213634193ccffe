use rand::{Rng, RngCore};

/// Where every roll in the game comes from.
///
/// Anything implementing `rand::RngCore` is a source, so production code hands
/// in a seeded `ChaCha8Rng`. Tests that need exact rolls use [`ScriptedSource`].
pub trait RandomSource {
    /// Uniform draw from `[0, 1)`.
    fn unit(&mut self) -> f64;

    fn range(&mut self, min: f64, max: f64) -> f64 {
        self.unit() * (max - min) + min
    }

    /// Bernoulli trial that succeeds when the draw falls below `rate`, so a
    /// rate of 0 never succeeds and a rate of 1 always does.
    fn chance(&mut self, rate: f64) -> bool {
        self.unit() < rate
    }

    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl<R: RngCore> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.gen()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        Self { draws, cursor: 0 }
    }

    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn unit(&mut self) -> f64 {
        let draw = self.draws[self.cursor];
        self.cursor = (self.cursor + 1) % self.draws.len();
        draw
    }
}
