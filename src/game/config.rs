use crate::game::counterdefense::{DEFAULT_GRACE_CHECKS, DEFAULT_SLOPE_PER_MS};
use crate::game::error::{check_radius, check_rate, GameError, GameResult};
use crate::game::generator::DEFAULT_PRECISION;
use crate::game::session::{SessionParams, DEFAULT_DIST_FAILURE_RATE};
use crate::geo::EARTH_RADIUS_KM;
use serde::Deserialize;

/// How often the counterdefense gets a look at the probe.
pub const DEFAULT_CHECK_PERIOD_MS: f64 = 13_000.0;

/// One base per letter of the alphabet, so every base gets a letter label.
pub const MAX_BASES: usize = 26;

/// Tunables for a single mission. The page may pass any subset as JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub base_count: usize,
    pub radar_corrector_rate: f64,
    pub counter_attacker_rate: f64,
    pub planet_radius_km: f64,
    pub dist_failure_rate: f64,
    pub counterdefense_slope: f64,
    pub grace_checks: u32,
    pub check_period_ms: f64,
    pub coordinate_precision: u32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            base_count: 10,
            radar_corrector_rate: 0.4,
            counter_attacker_rate: 0.3,
            planet_radius_km: EARTH_RADIUS_KM,
            dist_failure_rate: DEFAULT_DIST_FAILURE_RATE,
            counterdefense_slope: DEFAULT_SLOPE_PER_MS,
            grace_checks: DEFAULT_GRACE_CHECKS,
            check_period_ms: DEFAULT_CHECK_PERIOD_MS,
            coordinate_precision: DEFAULT_PRECISION,
        }
    }
}

impl MissionConfig {
    pub fn from_json(json: &str) -> GameResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.base_count == 0 {
            return Err(GameError::NotEnoughBases {
                required: 1,
                got: 0,
            });
        }
        if self.base_count > MAX_BASES {
            return Err(GameError::Config(format!(
                "base_count must be at most {MAX_BASES} (got {})",
                self.base_count
            )));
        }
        check_rate("radar_corrector_rate", self.radar_corrector_rate)?;
        check_rate("counter_attacker_rate", self.counter_attacker_rate)?;
        check_rate("dist_failure_rate", self.dist_failure_rate)?;
        check_radius(self.planet_radius_km)?;
        if !(self.counterdefense_slope >= 0.0 && self.counterdefense_slope.is_finite()) {
            return Err(GameError::InvalidSlope {
                value: self.counterdefense_slope,
            });
        }
        if !(self.check_period_ms > 0.0 && self.check_period_ms.is_finite()) {
            return Err(GameError::Config(format!(
                "check_period_ms must be positive (got {})",
                self.check_period_ms
            )));
        }
        Ok(())
    }

    pub fn session_params(&self) -> SessionParams {
        SessionParams {
            planet_radius: self.planet_radius_km,
            dist_failure_rate: self.dist_failure_rate,
            coordinate_precision: self.coordinate_precision,
        }
    }
}
