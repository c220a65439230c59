//! The tick engine: a pure state transition.
//!
//! RULES:
//!   - Every country is updated from the pre-tick snapshot only. No
//!     country ever reads another country's updated value.
//!   - Exactly one random draw per country per call, in country order.
//!   - Topology is invariant: same countries, same order, same edges.
//!     Only `gdp`, `previous_gdp` and `gdp_change` change.
//!   - Parameters are not validated here. Out-of-range inputs produce
//!     out-of-range but well-defined outputs; the floor still holds.
//!
//! The scale constants below are fixed. Changing them changes every
//! trajectory produced from the reference dataset.

use crate::{
    country::Country,
    parameters::GlobalParameters,
    rng::RandomSource,
    types::{CountryId, GDP_FLOOR},
    world::WorldState,
};
use serde::{Deserialize, Serialize};

/// Trade balance (billions) to GDP (billions), before the multiplier.
pub const TRADE_EFFECT_SCALE: f64 = 0.005;
/// Labor productivity is applied per mille of GDP.
pub const PRODUCTIVITY_SCALE: f64 = 1000.0;
/// Tax rate percent to fraction of GDP lost per tick.
pub const TAX_DRAG_SCALE: f64 = 2000.0;
/// Full width of the random perturbation on intrinsic growth.
pub const RANDOM_FACTOR_SPAN: f64 = 0.05;

/// Every channel's contribution to one country's tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GdpBreakdown {
    pub country_id:           CountryId,
    pub previous_gdp:         f64,
    pub trade_balance:        f64,
    pub trade_balance_effect: f64,
    pub random_factor:        f64,
    pub intrinsic_growth:     f64,
    pub productivity_effect:  f64,
    pub tax_drag:             f64,
    /// After the floor.
    pub new_gdp:              f64,
    /// True when the floor replaced the raw sum.
    pub floored:              bool,
}

impl GdpBreakdown {
    pub fn gdp_change(&self) -> f64 {
        self.new_gdp - self.previous_gdp
    }
}

/// The next state plus the per-country breakdown that produced it.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state:      WorldState,
    pub breakdowns: Vec<GdpBreakdown>,
}

/// Map a uniform draw in [0, 1) to a factor in [-0.025, 0.025).
pub fn random_factor(draw: f64) -> f64 {
    (draw - 0.5) * RANDOM_FACTOR_SPAN
}

pub fn apply_floor(gdp: f64) -> f64 {
    // f64::max returns the non-NaN operand, so NaN also lands on the floor.
    gdp.max(GDP_FLOOR)
}

/// One country's update. `draw` is the uniform sample for this country.
pub fn compute_country(country: &Country, params: &GlobalParameters, draw: f64) -> GdpBreakdown {
    let previous_gdp = country.gdp;

    let trade_balance = country.trade_balance();
    let trade_balance_effect = trade_balance * params.trade_multiplier * TRADE_EFFECT_SCALE;

    let base_growth_rate = params.gdp_growth_rate / 100.0;
    let base_growth = previous_gdp * base_growth_rate;
    let random_factor = random_factor(draw);
    let intrinsic_growth = base_growth * (1.0 + random_factor);

    let productivity_effect = previous_gdp * (params.labor_productivity / PRODUCTIVITY_SCALE);
    let tax_drag = previous_gdp * (params.tax_rate / TAX_DRAG_SCALE);

    let raw = previous_gdp + intrinsic_growth + trade_balance_effect + productivity_effect - tax_drag;
    let new_gdp = apply_floor(raw);

    GdpBreakdown {
        country_id: country.id().to_string(),
        previous_gdp,
        trade_balance,
        trade_balance_effect,
        random_factor,
        intrinsic_growth,
        productivity_effect,
        tax_drag,
        new_gdp,
        floored: raw.is_nan() || raw < GDP_FLOOR,
    }
}

/// Produce the next world state from `state` under `params`.
///
/// `state` is never mutated. The returned state has `current_time`
/// advanced by exactly one and carries `params` as its parameter set.
pub fn compute_next_state<R>(state: &WorldState, params: &GlobalParameters, rng: &mut R) -> TickOutcome
where
    R: RandomSource + ?Sized,
{
    let breakdowns: Vec<GdpBreakdown> = state
        .countries
        .iter()
        .map(|country| compute_country(country, params, rng.next_f64()))
        .collect();

    let countries = state
        .countries
        .iter()
        .zip(&breakdowns)
        .map(|(country, b)| {
            let mut next = country.clone();
            next.previous_gdp = b.previous_gdp;
            next.gdp = b.new_gdp;
            next.gdp_change = b.gdp_change();
            next
        })
        .collect();

    TickOutcome {
        state: WorldState {
            countries,
            parameters: *params,
            current_time: state.current_time + 1,
            is_running: state.is_running,
        },
        breakdowns,
    }
}

/// `compute_next_state` using the parameters already on the state.
pub fn advance_tick<R>(state: &WorldState, rng: &mut R) -> TickOutcome
where
    R: RandomSource + ?Sized,
{
    compute_next_state(state, &state.parameters, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_factor_spans_half_a_tenth() {
        assert_eq!(random_factor(0.5), 0.0);
        assert_eq!(random_factor(0.0), -0.025);
        assert!(random_factor(0.999_999) < 0.025);
    }

    #[test]
    fn floor_catches_nan_and_negatives() {
        assert_eq!(apply_floor(-250.0), 1.0);
        assert_eq!(apply_floor(f64::NAN), 1.0);
        assert_eq!(apply_floor(1.5), 1.5);
    }
}
