use crate::game::error::{check_rate, GameError, GameResult};
use crate::game::location::SignificantLocation;
use crate::game::random::RandomSource;
use crate::geo::Coordinate;

pub const DEFAULT_PRECISION: u32 = 7;
const MAX_PRECISION: u32 = 12;

/// Draws coordinates rounded to a fixed number of decimal digits.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateGenerator {
    precision_factor: f64,
}

impl CoordinateGenerator {
    pub fn new(precision: u32) -> GameResult<Self> {
        if precision == 0 || precision > MAX_PRECISION {
            return Err(GameError::InvalidPrecision { value: precision });
        }
        Ok(Self {
            precision_factor: 10f64.powi(precision as i32),
        })
    }

    fn random_axis<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        let span = 180.0 * self.precision_factor;
        rng.range(-span, span).round() / self.precision_factor
    }

    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Coordinate {
        let longitude = self.random_axis(rng);
        // Latitude is a second longitude-style draw folded into [-90, 90].
        let latitude = self.random_axis(rng) / 2.0;
        Coordinate::new(longitude, latitude)
    }
}

impl Default for CoordinateGenerator {
    fn default() -> Self {
        Self {
            precision_factor: 10f64.powi(DEFAULT_PRECISION as i32),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LocationGenerator {
    coordinates: CoordinateGenerator,
    radar_corrector_rate: f64,
    counter_attacker_rate: f64,
}

impl LocationGenerator {
    pub fn new(radar_corrector_rate: f64, counter_attacker_rate: f64) -> GameResult<Self> {
        Ok(Self {
            coordinates: CoordinateGenerator::default(),
            radar_corrector_rate: check_rate("radar_corrector_rate", radar_corrector_rate)?,
            counter_attacker_rate: check_rate("counter_attacker_rate", counter_attacker_rate)?,
        })
    }

    pub fn with_coordinates(mut self, coordinates: CoordinateGenerator) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> GameResult<Vec<SignificantLocation>> {
        if count == 0 {
            return Err(GameError::NotEnoughBases {
                required: 1,
                got: 0,
            });
        }

        let mut locations = Vec::new();
        for _ in 0..count {
            let location = self.coordinates.generate(rng);
            let corrects_radar = rng.chance(self.radar_corrector_rate);
            let counter_attacks = rng.chance(self.counter_attacker_rate);
            locations.push(SignificantLocation::new(
                location,
                corrects_radar,
                counter_attacks,
            ));
        }
        log::debug!(
            "generated {} bases ({} radar correctors)",
            count,
            locations.iter().filter(|l| l.corrects_radar()).count()
        );
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn coordinates_stay_in_range() {
        let gen = CoordinateGenerator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..2000 {
            let c = gen.generate(&mut rng);
            assert!((-180.0..=180.0).contains(&c.longitude), "{c}");
            assert!((-90.0..=90.0).contains(&c.latitude), "{c}");
        }
    }

    #[test]
    fn coordinates_are_rounded_to_precision() {
        let gen = CoordinateGenerator::new(2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..100 {
            let c = gen.generate(&mut rng);
            let scaled = c.longitude * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6, "{c}");
        }
    }

    #[test]
    fn extremes_map_to_range_ends() {
        let gen = CoordinateGenerator::default();
        let mut low = ScriptedSource::constant(0.0);
        let c = gen.generate(&mut low);
        assert_eq!(c.longitude, -180.0);
        assert_eq!(c.latitude, -90.0);

        let mut mid = ScriptedSource::constant(0.5);
        let c = gen.generate(&mut mid);
        assert_eq!(c.longitude, 0.0);
        assert_eq!(c.latitude, 0.0);
    }

    #[test]
    fn rejects_bad_precision() {
        assert!(CoordinateGenerator::new(0).is_err());
        assert!(CoordinateGenerator::new(13).is_err());
        assert!(CoordinateGenerator::new(7).is_ok());
    }

    #[test]
    fn same_seed_same_locations() {
        let gen = LocationGenerator::new(0.4, 0.3).unwrap();
        let a = gen.generate(10, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = gen.generate(10, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(a.len(), 10);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(x.location().approx_eq(y.location()));
            assert_eq!(x.corrects_radar(), y.corrects_radar());
            assert_eq!(x.counter_attacks(), y.counter_attacks());
            assert!(!x.is_revealed());
        }
    }

    #[test]
    fn feature_rates_at_the_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let always = LocationGenerator::new(1.0, 1.0).unwrap();
        assert!(always
            .generate(50, &mut rng)
            .unwrap()
            .iter()
            .all(|l| l.corrects_radar() && l.counter_attacks()));

        let never = LocationGenerator::new(0.0, 0.0).unwrap();
        let mut src = ScriptedSource::constant(0.0);
        assert!(never
            .generate(20, &mut src)
            .unwrap()
            .iter()
            .all(|l| !l.corrects_radar() && !l.counter_attacks()));
    }

    #[test]
    fn rejects_zero_count_and_bad_rates() {
        let gen = LocationGenerator::new(0.4, 0.3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            gen.generate(0, &mut rng).unwrap_err(),
            GameError::NotEnoughBases {
                required: 1,
                got: 0
            }
        );
        assert!(LocationGenerator::new(1.2, 0.3).is_err());
        assert!(LocationGenerator::new(0.4, -0.1).is_err());
    }
}
