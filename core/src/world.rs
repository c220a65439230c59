//! The complete simulation state handed between ticks.

use crate::{
    country::Country,
    parameters::GlobalParameters,
    types::Tick,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldState {
    /// Order is fixed at seed time and never changes.
    pub countries:    Vec<Country>,
    pub parameters:   GlobalParameters,
    pub current_time: Tick,
    pub is_running:   bool,
}

impl WorldState {
    /// A stopped world at tick 0.
    pub fn new(countries: Vec<Country>, parameters: GlobalParameters) -> Self {
        Self {
            countries,
            parameters,
            current_time: 0,
            is_running: false,
        }
    }

    pub fn country(&self, id: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.id() == id)
    }

    pub fn total_gdp(&self) -> f64 {
        self.countries.iter().map(|c| c.gdp).sum()
    }

    /// Largest absolute GDP move of the last tick, never below 1.
    /// Used to normalize change bars.
    pub fn max_abs_gdp_change(&self) -> f64 {
        self.countries
            .iter()
            .map(|c| c.gdp_change.abs())
            .fold(1.0, f64::max)
    }
}
