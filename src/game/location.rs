use crate::geo::Coordinate;
use serde::Serialize;

/// A base hidden somewhere on the planet.
///
/// `counter_attacks` is carried along with the base but no rule reads it yet.
#[derive(Clone, Debug, Serialize)]
pub struct SignificantLocation {
    location: Coordinate,
    corrects_radar: bool,
    counter_attacks: bool,
    revealed: bool,
}

impl SignificantLocation {
    pub fn new(location: Coordinate, corrects_radar: bool, counter_attacks: bool) -> Self {
        Self {
            location,
            corrects_radar,
            counter_attacks,
            revealed: false,
        }
    }

    pub fn location(&self) -> &Coordinate {
        &self.location
    }

    pub fn corrects_radar(&self) -> bool {
        self.corrects_radar
    }

    pub fn counter_attacks(&self) -> bool {
        self.counter_attacks
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    // Revealing is one-way; asking to hide a revealed base does nothing.
    pub(crate) fn set_revealed(&mut self, revealed: bool) {
        self.revealed |= revealed;
    }

    pub fn is_at(&self, coord: &Coordinate) -> bool {
        self.location.approx_eq(coord)
    }
}
