use crate::{
    clock::SimSpeed,
    country::{Coordinates, Country, TradeEdge},
    error::{SimError, SimResult},
    parameters::{GlobalParameters, ParameterPolicy},
    types::{CountryId, GDP_FLOOR},
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

/// The reference dataset shipped with the crate.
const BUILTIN_SEED: &str = include_str!("../../data/seed_countries.json");

pub const DEFAULT_RNG_SEED: u64 = 42;

/// What `reset()` does to country GDPs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Restore every country to its seed values and rewind the RNG.
    #[default]
    RestoreSeed,
    /// Only rewind the tick counter and stop. GDPs keep their values.
    CounterOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCountry {
    pub id:             CountryId,
    pub name:           String,
    pub gdp:            f64,
    pub population:     f64,
    pub coordinates:    Coordinates,
    #[serde(default)]
    pub trade_partners: Vec<TradeEdge>,
}

impl From<SeedCountry> for Country {
    fn from(s: SeedCountry) -> Self {
        Country::new(s.id, s.name, s.gdp, s.population, s.coordinates, s.trade_partners)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SeedFile {
    countries: Vec<SeedCountry>,
}

/// Optional `sim_config.json`. Every field falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RunConfigFile {
    rng_seed:           Option<u64>,
    speed:              Option<SimSpeed>,
    parameter_policy:   ParameterPolicy,
    reset_policy:       ResetPolicy,
    initial_parameters: Option<GlobalParameters>,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub rng_seed:           u64,
    pub initial_parameters: GlobalParameters,
    pub speed:              SimSpeed,
    pub parameter_policy:   ParameterPolicy,
    pub reset_policy:       ResetPolicy,
    pub countries:          Vec<Country>,
}

impl SimConfig {
    /// The embedded reference dataset with default parameters.
    pub fn builtin() -> SimResult<Self> {
        let countries = parse_seed(BUILTIN_SEED)?;
        Ok(Self::with_countries(countries))
    }

    /// Load from a data directory.
    ///
    /// `{data_dir}/seed_countries.json` is required.
    /// `{data_dir}/sim_config.json` is optional.
    pub fn load(data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let data_dir = data_dir.as_ref();

        let seed_path = data_dir.join("seed_countries.json");
        let seed_content = std::fs::read_to_string(&seed_path)
            .with_context(|| format!("Cannot read {}", seed_path.display()))?;
        let countries = parse_seed(&seed_content)
            .with_context(|| format!("Bad seed data in {}", seed_path.display()))?;

        let run_path = data_dir.join("sim_config.json");
        let run_file: RunConfigFile = if run_path.exists() {
            let content = std::fs::read_to_string(&run_path)
                .with_context(|| format!("Cannot read {}", run_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Bad run config in {}", run_path.display()))?
        } else {
            log::debug!("{} not found, using defaults", run_path.display());
            RunConfigFile::default()
        };

        Ok(Self {
            rng_seed:           run_file.rng_seed.unwrap_or(DEFAULT_RNG_SEED),
            initial_parameters: run_file.initial_parameters.unwrap_or_default(),
            speed:              run_file.speed.unwrap_or_default(),
            parameter_policy:   run_file.parameter_policy,
            reset_policy:       run_file.reset_policy,
            countries,
        })
    }

    /// Config with hardcoded defaults for use in unit tests.
    /// Three countries, one of which trades with an id that does not exist.
    pub fn default_test() -> Self {
        let edge = |to: &str, import_volume: f64, export_volume: f64, tariff_rate: f64| TradeEdge {
            counterparty_id: to.into(),
            import_volume,
            export_volume,
            tariff_rate,
        };

        let countries = vec![
            Country::new(
                "aa",
                "Exporter",
                1000.0,
                50.0,
                Coordinates { lat: 10.0, lng: 20.0 },
                vec![edge("bb", 100.0, 500.0, 5.0)],
            ),
            Country::new(
                "bb",
                "Importer",
                800.0,
                40.0,
                Coordinates { lat: -5.0, lng: 60.0 },
                vec![edge("aa", 500.0, 100.0, 5.0), edge("zz", 20.0, 10.0, 2.0)],
            ),
            Country::new(
                "cc",
                "Autarky",
                300.0,
                10.0,
                Coordinates { lat: 45.0, lng: -120.0 },
                vec![],
            ),
        ];

        Self::with_countries(countries)
    }

    pub fn with_countries(countries: Vec<Country>) -> Self {
        Self {
            rng_seed: DEFAULT_RNG_SEED,
            initial_parameters: GlobalParameters::default(),
            speed: SimSpeed::default(),
            parameter_policy: ParameterPolicy::default(),
            reset_policy: ResetPolicy::default(),
            countries,
        }
    }

    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    pub fn with_parameters(mut self, parameters: GlobalParameters) -> Self {
        self.initial_parameters = parameters;
        self
    }

    pub fn with_parameter_policy(mut self, policy: ParameterPolicy) -> Self {
        self.parameter_policy = policy;
        self
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }
}

/// Parse and validate a seed file body.
pub fn parse_seed(json: &str) -> SimResult<Vec<Country>> {
    let file: SeedFile = serde_json::from_str(json)?;
    let countries: Vec<Country> = file.countries.into_iter().map(Country::from).collect();
    validate_countries(&countries)?;
    Ok(countries)
}

/// Seed invariants: unique ids, GDP at or above the floor, finite
/// non-negative trade volumes. Dangling counterparties are allowed.
pub fn validate_countries(countries: &[Country]) -> SimResult<()> {
    let mut seen = HashSet::new();
    for c in countries {
        if !seen.insert(c.id()) {
            return Err(invalid(format!("duplicate country id '{}'", c.id())));
        }
        if !(c.gdp.is_finite() && c.gdp >= GDP_FLOOR) {
            return Err(invalid(format!("country '{}' has gdp {} below {GDP_FLOOR}", c.id(), c.gdp)));
        }
        for e in &c.trade_partners {
            let volumes_ok = [e.import_volume, e.export_volume]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0);
            if !volumes_ok {
                return Err(invalid(format!(
                    "edge {} -> {} has a negative or non-finite volume",
                    c.id(),
                    e.counterparty_id
                )));
            }
        }
    }
    Ok(())
}

fn invalid(reason: String) -> SimError {
    SimError::InvalidSeedData { reason }
}
