use crate::game::config::MissionConfig;
use crate::game::counterdefense::{Counterdefense, LinearCounterdefense};
use crate::game::error::{GameError, GameResult};
use crate::game::generator::{CoordinateGenerator, LocationGenerator};
use crate::game::session::GameSession;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MissionStatus {
    Active,
    Won,
    Caught,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbeState {
    Steady,
    InTransit { destination: usize, arrives_at_ms: f64 },
}

/// Things the page should react to after a call to [`Mission::advance`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum MissionEvent {
    ProbeArrived { base: usize },
    RadarFixed { base: usize },
    Warning { elapsed_ms: f64 },
    Caught { elapsed_ms: f64 },
    Won,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaseReading {
    pub label: String,
    pub distance_km: f64,
    pub revealed: bool,
    pub at_player: bool,
}

pub fn base_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => format!("#{}", index + 1),
    }
}

/// Everything a mission does between frames, minus the drawing.
///
/// The page owns the clock: every call takes the elapsed mission time in
/// milliseconds, which must not go backwards.
pub struct Mission {
    config: MissionConfig,
    session: GameSession,
    counterdefense: Box<dyn Counterdefense>,
    status: MissionStatus,
    probe: ProbeState,
    last_check_ms: f64,
    known_distances: Vec<f64>,
}

impl Mission {
    pub fn new(config: MissionConfig, seed: u64) -> GameResult<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let locations =
            LocationGenerator::new(config.radar_corrector_rate, config.counter_attacker_rate)?
                .with_coordinates(CoordinateGenerator::new(config.coordinate_precision)?);
        let bases = locations.generate(config.base_count, &mut rng)?;
        let session = GameSession::with_params(
            bases,
            config.session_params(),
            ChaCha8Rng::seed_from_u64(rng.next_u64()),
        )?;
        let counterdefense = LinearCounterdefense::with_params(
            config.counterdefense_slope,
            config.grace_checks,
            ChaCha8Rng::seed_from_u64(rng.next_u64()),
        )?;

        log::info!(
            "mission started: seed {}, {} bases, probe at {}",
            seed,
            session.base_count(),
            session.current_player_location()
        );
        Ok(Self::from_parts(config, session, Box::new(counterdefense)))
    }

    /// Wires a mission around an existing session, e.g. one built from fixed bases.
    pub fn from_parts(
        config: MissionConfig,
        session: GameSession,
        counterdefense: Box<dyn Counterdefense>,
    ) -> Self {
        Self {
            config,
            session,
            counterdefense,
            status: MissionStatus::Active,
            probe: ProbeState::Steady,
            last_check_ms: 0.0,
            known_distances: Vec::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn probe(&self) -> ProbeState {
        self.probe
    }

    pub fn radar_label(&self) -> &'static str {
        if self.session.is_radar_fixed() {
            "FIXED"
        } else {
            "UNRELIABLE"
        }
    }

    pub fn probe_label(&self) -> String {
        match self.probe {
            ProbeState::Steady => "STEADY".to_string(),
            ProbeState::InTransit { destination, .. } => {
                format!("IN TRANSIT TO {}", base_label(destination))
            }
        }
    }

    /// Polls the distance computer and remembers what it said.
    pub fn readings(&mut self) -> Vec<BaseReading> {
        self.known_distances = self.session.compute_distances_from_bases();
        let player = *self.session.current_player_location();
        self.session
            .bases()
            .iter()
            .zip(self.known_distances.iter())
            .enumerate()
            .map(|(i, (base, distance))| BaseReading {
                label: base_label(i),
                distance_km: *distance,
                revealed: base.is_revealed(),
                at_player: base.is_at(&player),
            })
            .collect()
    }

    /// Sends the probe towards a base. The trip takes one millisecond per
    /// kilometre of the last reading for that base, so a bad reading costs time.
    pub fn dispatch_probe(&mut self, index: usize, now_ms: f64) -> GameResult<f64> {
        if self.status != MissionStatus::Active {
            return Err(GameError::MissionOver);
        }
        if matches!(self.probe, ProbeState::InTransit { .. }) {
            return Err(GameError::ProbeInTransit);
        }
        self.session.base(index)?;
        if self.known_distances.is_empty() {
            self.readings();
        }

        let travel_ms = self.known_distances[index].floor();
        let arrives_at_ms = now_ms + travel_ms;
        self.probe = ProbeState::InTransit {
            destination: index,
            arrives_at_ms,
        };
        log::info!(
            "probe dispatched to {} ({} ms)",
            base_label(index),
            travel_ms
        );
        Ok(arrives_at_ms)
    }

    pub fn advance(&mut self, now_ms: f64) -> GameResult<Vec<MissionEvent>> {
        let mut events = Vec::new();
        if self.status != MissionStatus::Active {
            return Ok(events);
        }

        if let ProbeState::InTransit {
            destination,
            arrives_at_ms,
        } = self.probe
        {
            if now_ms >= arrives_at_ms {
                self.arrive(destination, &mut events)?;
            }
        }

        if self.status == MissionStatus::Active
            && now_ms - self.last_check_ms > self.config.check_period_ms
        {
            self.last_check_ms = now_ms;
            if self.counterdefense.has_caught(now_ms) {
                log::warn!("probe caught at {now_ms} ms");
                self.status = MissionStatus::Caught;
                events.push(MissionEvent::Caught { elapsed_ms: now_ms });
            } else {
                events.push(MissionEvent::Warning { elapsed_ms: now_ms });
            }
        }

        Ok(events)
    }

    fn arrive(&mut self, index: usize, events: &mut Vec<MissionEvent>) -> GameResult<()> {
        let base = self.session.base(index)?;
        let location = *base.location();
        let corrects_radar = base.corrects_radar();

        self.session.set_current_player_location(location);
        self.session.set_base_revealed(index, true)?;
        self.probe = ProbeState::Steady;
        // Old readings were taken from somewhere else.
        self.known_distances.clear();
        events.push(MissionEvent::ProbeArrived { base: index });
        log::info!("probe reached {}", base_label(index));

        if corrects_radar && !self.session.is_radar_fixed() {
            self.session.fix_radar();
            events.push(MissionEvent::RadarFixed { base: index });
        }
        if self.session.all_revealed() {
            log::info!("all bases struck");
            self.status = MissionStatus::Won;
            events.push(MissionEvent::Won);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::location::SignificantLocation;
    use crate::game::random::ScriptedSource;
    use crate::game::session::SessionParams;
    use crate::geo::Coordinate;

    struct Never;
    impl Counterdefense for Never {
        fn has_caught(&mut self, _elapsed_ms: f64) -> bool {
            false
        }
    }

    // Keeps the counterdefense out of the way of travel tests.
    fn quiet_config() -> MissionConfig {
        MissionConfig {
            check_period_ms: 1e12,
            ..MissionConfig::default()
        }
    }

    fn two_base_mission(corrects_radar: bool) -> Mission {
        two_base_mission_with(corrects_radar, quiet_config())
    }

    fn two_base_mission_with(corrects_radar: bool, config: MissionConfig) -> Mission {
        let bases = vec![
            SignificantLocation::new(Coordinate::new(10.0, 0.0), corrects_radar, false),
            SignificantLocation::new(Coordinate::new(20.0, 0.0), false, false),
        ];
        let params = SessionParams {
            dist_failure_rate: 0.5,
            ..SessionParams::default()
        };
        let mut session =
            GameSession::with_params(bases, params, ChaCha8Rng::seed_from_u64(4)).unwrap();
        session.set_current_player_location(Coordinate::new(0.0, 0.0));
        Mission::from_parts(config, session, Box::new(Never))
    }

    #[test]
    fn labels_run_through_the_alphabet() {
        assert_eq!(base_label(0), "A");
        assert_eq!(base_label(9), "J");
        assert_eq!(base_label(25), "Z");
        assert_eq!(base_label(26), "#27");
    }

    #[test]
    fn seeded_missions_are_reproducible() {
        let mut a = Mission::new(MissionConfig::default(), 99).unwrap();
        let mut b = Mission::new(MissionConfig::default(), 99).unwrap();
        assert_eq!(a.session().base_count(), 10);
        assert!(a
            .session()
            .current_player_location()
            .approx_eq(b.session().current_player_location()));
        assert_eq!(a.readings(), b.readings());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = MissionConfig {
            coordinate_precision: 0,
            ..MissionConfig::default()
        };
        assert!(matches!(
            Mission::new(config, 1),
            Err(GameError::InvalidPrecision { value: 0 })
        ));
    }

    #[test]
    fn probe_travels_then_arrives() {
        let mut mission = two_base_mission(false);
        let readings = mission.readings();
        assert_eq!(readings[0].label, "A");
        assert!(!readings[0].at_player);

        let arrival = mission.dispatch_probe(0, 1_000.0).unwrap();
        assert_eq!(arrival, 1_000.0 + readings[0].distance_km.floor());
        assert_eq!(mission.probe_label(), "IN TRANSIT TO A");
        assert_eq!(mission.dispatch_probe(1, 1_001.0), Err(GameError::ProbeInTransit));

        assert!(mission.advance(arrival - 1.0).unwrap().is_empty());
        let events = mission.advance(arrival).unwrap();
        assert_eq!(events, vec![MissionEvent::ProbeArrived { base: 0 }]);
        assert_eq!(mission.probe(), ProbeState::Steady);
        assert!(mission.session().base(0).unwrap().is_revealed());
        assert_eq!(mission.session().base_at_player(), Some(0));
        assert!(mission.readings()[0].at_player);
    }

    #[test]
    fn dispatch_polls_when_nothing_is_known() {
        let mut mission = two_base_mission(false);
        let arrival = mission.dispatch_probe(1, 0.0).unwrap();
        let truth = Coordinate::new(0.0, 0.0)
            .distance_to(&Coordinate::new(20.0, 0.0), mission.session().planet_radius());
        let long_way = mission.session().planet_circumference() - truth;
        assert!(arrival == truth.floor() || arrival == long_way.floor());
    }

    #[test]
    fn dispatch_checks_the_index() {
        let mut mission = two_base_mission(false);
        assert_eq!(
            mission.dispatch_probe(5, 0.0),
            Err(GameError::BaseIndexOutOfRange { index: 5, count: 2 })
        );
        assert_eq!(mission.probe(), ProbeState::Steady);
    }

    #[test]
    fn radar_corrector_fixes_radar_on_arrival() {
        let mut mission = two_base_mission(true);
        assert_eq!(mission.radar_label(), "UNRELIABLE");
        let arrival = mission.dispatch_probe(0, 0.0).unwrap();
        let events = mission.advance(arrival).unwrap();
        assert_eq!(
            events,
            vec![
                MissionEvent::ProbeArrived { base: 0 },
                MissionEvent::RadarFixed { base: 0 }
            ]
        );
        assert_eq!(mission.radar_label(), "FIXED");

        // From here on every reading is the true distance.
        let here = *mission.session().current_player_location();
        let truth = here.distance_to(&Coordinate::new(20.0, 0.0), mission.session().planet_radius());
        for _ in 0..10 {
            assert_eq!(mission.readings()[1].distance_km, truth);
        }
    }

    #[test]
    fn striking_every_base_wins() {
        let mut mission = two_base_mission(false);
        let t = mission.dispatch_probe(0, 0.0).unwrap();
        mission.advance(t).unwrap();
        let t = mission.dispatch_probe(1, t).unwrap();
        let events = mission.advance(t).unwrap();
        assert!(events.contains(&MissionEvent::Won));
        assert_eq!(mission.status(), MissionStatus::Won);
        assert_eq!(mission.dispatch_probe(0, t), Err(GameError::MissionOver));
        assert!(mission.advance(t + 100_000.0).unwrap().is_empty());
    }

    #[test]
    fn counterdefense_runs_once_per_period() {
        let mut mission = two_base_mission_with(false, MissionConfig::default());
        assert!(mission.advance(13_000.0).unwrap().is_empty());
        assert_eq!(
            mission.advance(13_001.0).unwrap(),
            vec![MissionEvent::Warning { elapsed_ms: 13_001.0 }]
        );
        assert!(mission.advance(20_000.0).unwrap().is_empty());
        assert_eq!(
            mission.advance(26_002.0).unwrap(),
            vec![MissionEvent::Warning { elapsed_ms: 26_002.0 }]
        );
    }

    #[test]
    fn caught_is_game_over() {
        let bases = vec![SignificantLocation::new(Coordinate::new(45.0, 45.0), false, false)];
        let session = GameSession::new(bases, ChaCha8Rng::seed_from_u64(8)).unwrap();
        let counterdefense =
            LinearCounterdefense::with_params(1.0, 1, ScriptedSource::constant(0.0)).unwrap();
        let mut mission =
            Mission::from_parts(MissionConfig::default(), session, Box::new(counterdefense));

        // First check falls inside the grace window.
        assert_eq!(
            mission.advance(14_000.0).unwrap(),
            vec![MissionEvent::Warning { elapsed_ms: 14_000.0 }]
        );
        assert_eq!(
            mission.advance(28_000.0).unwrap(),
            vec![MissionEvent::Caught { elapsed_ms: 28_000.0 }]
        );
        assert_eq!(mission.status(), MissionStatus::Caught);
        assert_eq!(mission.dispatch_probe(0, 28_000.0), Err(GameError::MissionOver));
        assert!(mission.advance(60_000.0).unwrap().is_empty());
    }
}
