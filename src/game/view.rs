use crate::game::error::GameError;
use crate::game::mission::{base_label, Mission, MissionStatus, ProbeState};
use crate::geo::{project_to_screen, Coordinate, ScreenPoint};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorView {
    error: String,
}

#[derive(Serialize)]
pub struct DispatchView {
    pub arrives_at_ms: f64,
}

#[derive(Serialize)]
struct ProbeView {
    label: String,
    destination: Option<usize>,
    arrives_at_ms: Option<f64>,
}

#[derive(Serialize)]
struct MarkerView {
    label: String,
    screen: ScreenPoint,
}

#[derive(Serialize)]
pub struct MissionView {
    status: MissionStatus,
    radar: &'static str,
    probe: ProbeView,
    player: Coordinate,
    player_screen: ScreenPoint,
    // Only bases the probe has reached get drawn.
    revealed: Vec<MarkerView>,
}

impl MissionView {
    pub fn new(mission: &Mission, center_x: f64, center_y: f64) -> Self {
        let session = mission.session();
        let radius = session.planet_radius();
        let player = *session.current_player_location();

        let (destination, arrives_at_ms) = match mission.probe() {
            ProbeState::Steady => (None, None),
            ProbeState::InTransit {
                destination,
                arrives_at_ms,
            } => (Some(destination), Some(arrives_at_ms)),
        };

        let revealed = session
            .bases()
            .iter()
            .enumerate()
            .filter(|(_, base)| base.is_revealed())
            .map(|(i, base)| MarkerView {
                label: base_label(i),
                screen: project_to_screen(base.location(), radius, center_x, center_y),
            })
            .collect();

        Self {
            status: mission.status(),
            radar: mission.radar_label(),
            probe: ProbeView {
                label: mission.probe_label(),
                destination,
                arrives_at_ms,
            },
            player,
            player_screen: project_to_screen(&player, radius, center_x, center_y),
            revealed,
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn error_json(err: &GameError) -> String {
    log::warn!("{err}");
    to_json(&ErrorView {
        error: err.to_string(),
    })
}
