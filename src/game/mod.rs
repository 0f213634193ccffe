pub mod config;
pub mod counterdefense;
pub mod error;
pub mod generator;
pub mod location;
pub mod mission;
pub mod random;
pub mod session;
pub mod view;

pub use config::MissionConfig;
pub use counterdefense::{Counterdefense, LinearCounterdefense};
pub use error::{GameError, GameResult};
pub use generator::{CoordinateGenerator, LocationGenerator};
pub use location::SignificantLocation;
pub use mission::{Mission, MissionEvent, MissionStatus};
pub use random::RandomSource;
#[cfg(test)]
pub use random::ScriptedSource;
pub use session::{GameSession, SessionParams};
