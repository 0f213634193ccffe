use wasm_bindgen::prelude::*;

pub mod game;
pub mod geo;

use game::mission::Mission;
use game::view::{error_json, to_json, DispatchView, MissionView};
use game::MissionConfig;

#[wasm_bindgen]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    install_logger();
}

#[cfg(target_arch = "wasm32")]
fn install_logger() {
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install_logger() {}

/// One mission, owned by the page. Drop it and build a new one to restart.
#[wasm_bindgen]
pub struct MissionHandle {
    mission: Mission,
}

#[wasm_bindgen]
impl MissionHandle {
    /// `config_json` may be empty or any subset of the mission config fields.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: u64) -> Result<MissionHandle, String> {
        let config = MissionConfig::from_json(config_json).map_err(|e| e.to_string())?;
        let mission = Mission::new(config, seed).map_err(|e| e.to_string())?;
        Ok(Self { mission })
    }

    pub fn base_count(&self) -> usize {
        self.mission.session().base_count()
    }

    pub fn readings_json(&mut self) -> String {
        to_json(&self.mission.readings())
    }

    /// Returns `{"arrives_at_ms": ..}` or an error object.
    pub fn dispatch(&mut self, index: usize, now_ms: f64) -> String {
        match self.mission.dispatch_probe(index, now_ms) {
            Ok(arrives_at_ms) => to_json(&DispatchView { arrives_at_ms }),
            Err(e) => error_json(&e),
        }
    }

    pub fn advance_json(&mut self, now_ms: f64) -> String {
        match self.mission.advance(now_ms) {
            Ok(events) => to_json(&events),
            Err(e) => error_json(&e),
        }
    }

    pub fn snapshot_json(&self, center_x: f64, center_y: f64) -> String {
        to_json(&MissionView::new(&self.mission, center_x, center_y))
    }
}
