use crate::game::error::{check_radius, check_rate, GameError, GameResult};
use crate::game::generator::{CoordinateGenerator, DEFAULT_PRECISION};
use crate::game::location::SignificantLocation;
use crate::game::random::RandomSource;
use crate::geo::{Coordinate, EARTH_RADIUS_KM};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

pub const DEFAULT_DIST_FAILURE_RATE: f64 = 0.5;

/// Planet size, the distance computer's failure rate, and the precision of
/// the probe's random starting point.
///
/// The first two are difficulty knobs: a bigger planet is harder to search,
/// and a flakier distance computer makes each reading less useful.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionParams {
    pub planet_radius: f64,
    pub dist_failure_rate: f64,
    pub coordinate_precision: u32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            planet_radius: EARTH_RADIUS_KM,
            dist_failure_rate: DEFAULT_DIST_FAILURE_RATE,
            coordinate_precision: DEFAULT_PRECISION,
        }
    }
}

impl SessionParams {
    pub fn validate(&self) -> GameResult<()> {
        check_radius(self.planet_radius)?;
        check_rate("dist_failure_rate", self.dist_failure_rate)?;
        CoordinateGenerator::new(self.coordinate_precision)?;
        Ok(())
    }
}

/// One mission's worth of geography: where the probe is, where the bases are,
/// and what the probe's distance computer reports about them.
pub struct GameSession<R = ChaCha8Rng> {
    player_location: Coordinate,
    bases: Vec<SignificantLocation>,
    goal: Option<usize>,
    planet_radius: f64,
    planet_circumference: f64,
    dist_failure_rate: f64,
    radar_fixed: bool,
    rng: R,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(bases: Vec<SignificantLocation>, rng: R) -> GameResult<Self> {
        Self::with_params(bases, SessionParams::default(), rng)
    }

    /// Starts the probe somewhere random, independent of where the bases are.
    pub fn with_params(
        bases: Vec<SignificantLocation>,
        params: SessionParams,
        mut rng: R,
    ) -> GameResult<Self> {
        require_bases(&bases, 1)?;
        params.validate()?;
        let start = CoordinateGenerator::new(params.coordinate_precision)?.generate(&mut rng);
        Ok(Self::assemble(bases, params, start, None, rng))
    }

    /// Starts the probe on one base and marks a different one as the goal.
    pub fn with_goal(
        bases: Vec<SignificantLocation>,
        params: SessionParams,
        mut rng: R,
    ) -> GameResult<Self> {
        require_bases(&bases, 2)?;
        params.validate()?;

        let start_index = rng.index(bases.len());
        // Pick among the remaining bases and skip over the start.
        let mut goal_index = rng.index(bases.len() - 1);
        if goal_index >= start_index {
            goal_index += 1;
        }
        let start = *bases[start_index].location();
        log::debug!("goal session: start base {start_index}, goal base {goal_index}");
        Ok(Self::assemble(bases, params, start, Some(goal_index), rng))
    }

    fn assemble(
        bases: Vec<SignificantLocation>,
        params: SessionParams,
        start: Coordinate,
        goal: Option<usize>,
        rng: R,
    ) -> Self {
        Self {
            player_location: start,
            bases,
            goal,
            planet_radius: params.planet_radius,
            planet_circumference: 2.0 * PI * params.planet_radius,
            dist_failure_rate: params.dist_failure_rate,
            radar_fixed: false,
            rng,
        }
    }

    pub fn current_player_location(&self) -> &Coordinate {
        &self.player_location
    }

    pub fn set_current_player_location(&mut self, coord: Coordinate) {
        self.player_location = coord;
    }

    pub fn planet_radius(&self) -> f64 {
        self.planet_radius
    }

    pub fn planet_circumference(&self) -> f64 {
        self.planet_circumference
    }

    pub fn dist_failure_rate(&self) -> f64 {
        self.dist_failure_rate
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    pub fn bases(&self) -> &[SignificantLocation] {
        &self.bases
    }

    pub fn base(&self, index: usize) -> GameResult<&SignificantLocation> {
        self.bases.get(index).ok_or(GameError::BaseIndexOutOfRange {
            index,
            count: self.bases.len(),
        })
    }

    pub fn set_base_revealed(&mut self, index: usize, revealed: bool) -> GameResult<()> {
        let count = self.bases.len();
        let base = self
            .bases
            .get_mut(index)
            .ok_or(GameError::BaseIndexOutOfRange { index, count })?;
        base.set_revealed(revealed);
        Ok(())
    }

    pub fn all_revealed(&self) -> bool {
        self.bases.iter().all(SignificantLocation::is_revealed)
    }

    pub fn base_at_player(&self) -> Option<usize> {
        self.bases
            .iter()
            .position(|base| base.is_at(&self.player_location))
    }

    pub fn is_radar_fixed(&self) -> bool {
        self.radar_fixed
    }

    /// Permanently turns off the distance computer's failures.
    pub fn fix_radar(&mut self) {
        if !self.radar_fixed {
            log::info!("radar fixed");
        }
        self.radar_fixed = true;
    }

    pub fn goal_index(&self) -> Option<usize> {
        self.goal
    }

    /// What the distance computer says about every base, in base order.
    ///
    /// Until the radar is fixed, each reading is independently at risk of
    /// being the major arc (the long way round) instead of the true distance.
    /// Every call rolls again.
    pub fn compute_distances_from_bases(&mut self) -> Vec<f64> {
        let mut distances = Vec::with_capacity(self.bases.len());
        for i in 0..self.bases.len() {
            let true_distance = self
                .player_location
                .distance_to(self.bases[i].location(), self.planet_radius);
            distances.push(self.noisy(true_distance));
        }
        distances
    }

    pub fn compute_distance_from_goal(&mut self) -> GameResult<f64> {
        let goal = self.goal.ok_or(GameError::NoGoal)?;
        let true_distance = self
            .player_location
            .distance_to(self.bases[goal].location(), self.planet_radius);
        Ok(self.noisy(true_distance))
    }

    fn noisy(&mut self, true_distance: f64) -> f64 {
        if !self.radar_fixed && self.rng.chance(self.dist_failure_rate) {
            self.planet_circumference - true_distance
        } else {
            true_distance
        }
    }
}

fn require_bases(bases: &[SignificantLocation], required: usize) -> GameResult<()> {
    if bases.len() < required {
        return Err(GameError::NotEnoughBases {
            required,
            got: bases.len(),
        });
    }
    Ok(())
}
