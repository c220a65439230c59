//! Read-only view of the world handed to the rendering layer.
//!
//! A snapshot is captured after every tick. It carries the raw country
//! state plus the derived values the globe and details panel draw:
//! resolved trade arcs, change bars and growth percentages.
//! Edges whose counterparty does not resolve are dropped here.

use crate::{
    clock::SimSpeed,
    country::{Coordinates, Country, TradeEdge},
    parameters::GlobalParameters,
    types::{CountryId, Tick},
    world::WorldState,
};
use serde::{Deserialize, Serialize};

/// Tariff percent at which an arc becomes fully opaque.
pub const ARC_OPAQUE_TARIFF: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryView {
    pub id:             CountryId,
    pub name:           String,
    pub gdp:            f64,
    pub previous_gdp:   f64,
    pub gdp_change:     f64,
    pub gdp_trillions:  f64,
    pub growth_percent: f64,
    pub growing:        bool,
    /// `|gdp_change|` relative to the largest move this tick, in [0, 1].
    pub change_bar:     f64,
    pub population:     f64,
    pub coordinates:    Coordinates,
    pub trade_partners: Vec<TradeEdge>,
}

impl CountryView {
    fn from_country(country: &Country, max_abs_change: f64) -> Self {
        Self {
            id:             country.id().to_string(),
            name:           country.name.clone(),
            gdp:            country.gdp,
            previous_gdp:   country.previous_gdp,
            gdp_change:     country.gdp_change,
            gdp_trillions:  country.gdp / 1000.0,
            growth_percent: country.growth_percent(),
            growing:        country.is_growing(),
            change_bar:     (country.gdp_change.abs() / max_abs_change).min(1.0),
            population:     country.population,
            coordinates:    country.coordinates,
            trade_partners: country.trade_partners.clone(),
        }
    }
}

/// One drawable connection between two resolved countries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeArc {
    pub from_id:     CountryId,
    pub to_id:       CountryId,
    pub start:       Coordinates,
    pub end:         Coordinates,
    pub tariff_rate: f64,
    /// `tariff_rate / 20`, clamped to [0, 1].
    pub opacity:     f64,
    /// `log10(import + export) / 2`, never negative.
    pub width:       f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub tick:       Tick,
    pub is_running: bool,
    pub speed:      SimSpeed,
    pub parameters: GlobalParameters,
    pub total_gdp:  f64,
    pub countries:  Vec<CountryView>,
    pub arcs:       Vec<TradeArc>,
}

impl WorldSnapshot {
    pub fn capture(state: &WorldState, speed: SimSpeed) -> Self {
        let max_abs_change = state.max_abs_gdp_change();
        Self {
            tick:       state.current_time,
            is_running: state.is_running,
            speed,
            parameters: state.parameters,
            total_gdp:  state.total_gdp(),
            countries:  state
                .countries
                .iter()
                .map(|c| CountryView::from_country(c, max_abs_change))
                .collect(),
            arcs:       resolve_arcs(state),
        }
    }

    pub fn country(&self, id: &str) -> Option<&CountryView> {
        self.countries.iter().find(|c| c.id == id)
    }
}

/// Resolve every edge against the country list. Unresolved edges are
/// skipped; they are not an error.
pub fn resolve_arcs(state: &WorldState) -> Vec<TradeArc> {
    let mut arcs = Vec::new();
    for country in &state.countries {
        for edge in &country.trade_partners {
            let Some(partner) = state.country(&edge.counterparty_id) else {
                log::debug!(
                    "dropping arc {} -> {}: counterparty not found",
                    country.id(),
                    edge.counterparty_id
                );
                continue;
            };
            arcs.push(TradeArc {
                from_id:     country.id().to_string(),
                to_id:       partner.id().to_string(),
                start:       country.coordinates,
                end:         partner.coordinates,
                tariff_rate: edge.tariff_rate,
                opacity:     arc_opacity(edge.tariff_rate),
                width:       arc_width(edge.total_volume()),
            });
        }
    }
    arcs
}

pub fn arc_opacity(tariff_rate: f64) -> f64 {
    (tariff_rate / ARC_OPAQUE_TARIFF).clamp(0.0, 1.0)
}

pub fn arc_width(volume: f64) -> f64 {
    if volume > 1.0 { volume.log10() / 2.0 } else { 0.0 }
}
