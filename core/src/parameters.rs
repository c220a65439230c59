//! The five global tunables and the policy applied when the UI sets them.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Global parameters read by every tick. Treated as a value: the store
/// swaps in a new set rather than letting callers mutate a shared one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GlobalParameters {
    /// Percent, 0–100. Reserved: not read by the tick formula.
    pub base_tariff_rate:   f64,
    /// Percent, −5..5.
    pub gdp_growth_rate:    f64,
    /// Unitless scale, 0.1–2.
    pub trade_multiplier:   f64,
    /// Unitless, 0.5–1.5.
    pub labor_productivity: f64,
    /// Percent, 0–50.
    pub tax_rate:           f64,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        Self {
            base_tariff_rate:   5.0,
            gdp_growth_rate:    2.0,
            trade_multiplier:   1.0,
            labor_productivity: 1.0,
            tax_rate:           15.0,
        }
    }
}

impl GlobalParameters {
    /// Every channel switched off. Combined with a neutral random draw,
    /// a tick leaves every GDP unchanged.
    pub fn zero_effect() -> Self {
        Self {
            base_tariff_rate:   0.0,
            gdp_growth_rate:    0.0,
            trade_multiplier:   0.0,
            labor_productivity: 0.0,
            tax_rate:           0.0,
        }
    }

    pub fn get(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::BaseTariffRate    => self.base_tariff_rate,
            ParameterName::GdpGrowthRate     => self.gdp_growth_rate,
            ParameterName::TradeMultiplier   => self.trade_multiplier,
            ParameterName::LaborProductivity => self.labor_productivity,
            ParameterName::TaxRate           => self.tax_rate,
        }
    }

    /// Returns a copy with exactly one field replaced.
    pub fn with(mut self, name: ParameterName, value: f64) -> Self {
        match name {
            ParameterName::BaseTariffRate    => self.base_tariff_rate = value,
            ParameterName::GdpGrowthRate     => self.gdp_growth_rate = value,
            ParameterName::TradeMultiplier   => self.trade_multiplier = value,
            ParameterName::LaborProductivity => self.labor_productivity = value,
            ParameterName::TaxRate           => self.tax_rate = value,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ParameterName {
    BaseTariffRate,
    GdpGrowthRate,
    TradeMultiplier,
    LaborProductivity,
    TaxRate,
}

impl ParameterName {
    pub const ALL: [ParameterName; 5] = [
        Self::BaseTariffRate,
        Self::GdpGrowthRate,
        Self::TradeMultiplier,
        Self::LaborProductivity,
        Self::TaxRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseTariffRate    => "base_tariff_rate",
            Self::GdpGrowthRate     => "gdp_growth_rate",
            Self::TradeMultiplier   => "trade_multiplier",
            Self::LaborProductivity => "labor_productivity",
            Self::TaxRate           => "tax_rate",
        }
    }

    /// The slider range the UI offers, `(min, max)` inclusive.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::BaseTariffRate    => (0.0, 100.0),
            Self::GdpGrowthRate     => (-5.0, 5.0),
            Self::TradeMultiplier   => (0.1, 2.0),
            Self::LaborProductivity => (0.5, 1.5),
            Self::TaxRate           => (0.0, 50.0),
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = SimError;

    /// Accepts both the snake_case names and the UI's camelCase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base_tariff_rate" | "baseTariffRate"       => Ok(Self::BaseTariffRate),
            "gdp_growth_rate" | "gdpGrowthRate"         => Ok(Self::GdpGrowthRate),
            "trade_multiplier" | "tradeMultiplier"      => Ok(Self::TradeMultiplier),
            "labor_productivity" | "laborProductivity"  => Ok(Self::LaborProductivity),
            "tax_rate" | "taxRate"                      => Ok(Self::TaxRate),
            other => Err(SimError::UnknownParameter { name: other.to_string() }),
        }
    }
}

/// What the store does with a value outside the documented range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParameterPolicy {
    /// Pass every value straight into the formula.
    #[default]
    Accept,
    /// Clamp finite values into range. NaN and infinities pass through.
    Clamp,
    /// Refuse anything out of range or non-finite.
    Reject,
}

impl ParameterPolicy {
    pub fn admit(&self, name: ParameterName, value: f64) -> SimResult<f64> {
        let (min, max) = name.range();
        match self {
            Self::Accept => Ok(value),
            Self::Clamp if value.is_finite() => Ok(value.clamp(min, max)),
            Self::Clamp => Ok(value),
            Self::Reject if value.is_finite() && (min..=max).contains(&value) => Ok(value),
            Self::Reject => Err(SimError::ParameterOutOfRange { name, value, min, max }),
        }
    }

    /// Run every field of `params` through `admit`.
    pub fn admit_all(&self, params: GlobalParameters) -> SimResult<GlobalParameters> {
        ParameterName::ALL.iter().try_fold(params, |acc, &name| {
            let value = self.admit(name, acc.get(name))?;
            Ok(acc.with(name, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_exactly_one_field() {
        let base = GlobalParameters::default();
        let changed = base.with(ParameterName::TaxRate, 30.0);
        assert_eq!(changed.tax_rate, 30.0);
        for name in ParameterName::ALL {
            if name != ParameterName::TaxRate {
                assert_eq!(changed.get(name), base.get(name), "{name} changed");
            }
        }
    }

    #[test]
    fn names_parse_in_both_spellings() {
        assert_eq!("tradeMultiplier".parse::<ParameterName>().unwrap(), ParameterName::TradeMultiplier);
        assert_eq!("trade_multiplier".parse::<ParameterName>().unwrap(), ParameterName::TradeMultiplier);
        assert!(matches!(
            "interestRate".parse::<ParameterName>(),
            Err(SimError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn accept_policy_passes_out_of_range_values() {
        let v = ParameterPolicy::Accept.admit(ParameterName::TradeMultiplier, -3.0).unwrap();
        assert_eq!(v, -3.0);
    }

    #[test]
    fn clamp_policy_pins_to_range() {
        let p = ParameterPolicy::Clamp;
        assert_eq!(p.admit(ParameterName::TaxRate, 80.0).unwrap(), 50.0);
        assert_eq!(p.admit(ParameterName::GdpGrowthRate, -9.0).unwrap(), -5.0);
        assert_eq!(p.admit(ParameterName::LaborProductivity, 1.2).unwrap(), 1.2);
    }

    #[test]
    fn reject_policy_refuses_out_of_range_and_nan() {
        let p = ParameterPolicy::Reject;
        assert!(p.admit(ParameterName::TaxRate, 51.0).is_err());
        assert!(p.admit(ParameterName::TaxRate, f64::NAN).is_err());
        assert_eq!(p.admit(ParameterName::TaxRate, 50.0).unwrap(), 50.0);
    }

    #[test]
    fn admit_all_checks_every_field() {
        let bad = GlobalParameters::default().with(ParameterName::BaseTariffRate, 150.0);
        assert!(ParameterPolicy::Reject.admit_all(bad).is_err());
        let clamped = ParameterPolicy::Clamp.admit_all(bad).unwrap();
        assert_eq!(clamped.base_tariff_rate, 100.0);
    }
}
