use crate::game::error::{GameError, GameResult};
use crate::game::random::RandomSource;
use rand_chacha::ChaCha8Rng;

/// Catch probability reaches 1 after two minutes of mission time.
pub const DEFAULT_SLOPE_PER_MS: f64 = 1.0 / 120_000.0;
pub const DEFAULT_GRACE_CHECKS: u32 = 3;

/// The enemy's odds of having found the probe, as a function of mission time.
pub trait Counterdefense {
    fn has_caught(&mut self, elapsed_ms: f64) -> bool;
}

/// Catch probability grows linearly with elapsed time, except that the first
/// few checks of a mission never catch anyone.
#[derive(Clone, Debug)]
pub struct LinearCounterdefense<R = ChaCha8Rng> {
    slope: f64,
    grace_left: u32,
    rng: R,
}

impl<R: RandomSource> LinearCounterdefense<R> {
    pub fn new(rng: R) -> Self {
        Self {
            slope: DEFAULT_SLOPE_PER_MS,
            grace_left: DEFAULT_GRACE_CHECKS,
            rng,
        }
    }

    pub fn with_params(slope: f64, grace_checks: u32, rng: R) -> GameResult<Self> {
        if !(slope >= 0.0 && slope.is_finite()) {
            return Err(GameError::InvalidSlope { value: slope });
        }
        Ok(Self {
            slope,
            grace_left: grace_checks,
            rng,
        })
    }

    pub fn grace_left(&self) -> u32 {
        self.grace_left
    }

    pub fn threshold(&self, elapsed_ms: f64) -> f64 {
        (self.slope * elapsed_ms).clamp(0.0, 1.0)
    }
}

impl<R: RandomSource> Counterdefense for LinearCounterdefense<R> {
    fn has_caught(&mut self, elapsed_ms: f64) -> bool {
        if self.grace_left > 0 {
            self.grace_left -= 1;
            return false;
        }
        let threshold = self.threshold(elapsed_ms);
        let draw = self.rng.unit();
        log::debug!("counterdefense roll {draw:.3} vs {threshold:.3} at {elapsed_ms}ms");
        draw <= threshold
    }
}
