//! Countries and their directed trade edges.

use crate::types::CountryId;
use serde::{Deserialize, Serialize};

/// Presentation-only location. The engine never reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A directed trade relationship owned by the exporting/importing country.
/// The counterpart is not required to carry a mirrored edge, and
/// `counterparty_id` is not required to resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeEdge {
    pub counterparty_id: CountryId,
    pub import_volume:   f64,
    pub export_volume:   f64,
    /// Percent. Only consumed by the render snapshot (arc opacity).
    pub tariff_rate:     f64,
}

impl TradeEdge {
    pub fn total_volume(&self) -> f64 {
        self.import_volume + self.export_volume
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    id:                 CountryId,
    pub name:           String,
    /// Current GDP, billions.
    pub gdp:            f64,
    /// GDP before the last tick.
    pub previous_gdp:   f64,
    /// `gdp - previous_gdp`.
    pub gdp_change:     f64,
    /// Millions.
    pub population:     f64,
    pub coordinates:    Coordinates,
    pub trade_partners: Vec<TradeEdge>,
}

impl Country {
    /// A freshly seeded country: `previous_gdp == gdp`, no change yet.
    pub fn new(
        id: impl Into<CountryId>,
        name: impl Into<String>,
        gdp: f64,
        population: f64,
        coordinates: Coordinates,
        trade_partners: Vec<TradeEdge>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gdp,
            previous_gdp: gdp,
            gdp_change: 0.0,
            population,
            coordinates,
            trade_partners,
        }
    }

    /// Immutable after creation.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn total_exports(&self) -> f64 {
        self.trade_partners.iter().map(|e| e.export_volume).sum()
    }

    pub fn total_imports(&self) -> f64 {
        self.trade_partners.iter().map(|e| e.import_volume).sum()
    }

    pub fn trade_balance(&self) -> f64 {
        self.total_exports() - self.total_imports()
    }

    /// Percent change over the last tick, as shown in the details panel.
    /// Zero when there is no previous value to compare against.
    pub fn growth_percent(&self) -> f64 {
        if self.previous_gdp == 0.0 {
            0.0
        } else {
            (self.gdp - self.previous_gdp) / self.previous_gdp * 100.0
        }
    }

    pub fn is_growing(&self) -> bool {
        self.gdp > self.previous_gdp
    }
}
