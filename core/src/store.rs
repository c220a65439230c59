//! The world store: owner of the single mutable `WorldState`.
//!
//! RULE: Only the store mutates the world. Every mutation goes through
//! one of its methods and is recorded in the event log. Callers that
//! share a store across threads must serialize access themselves
//! (the realtime driver owns it outright).

use crate::{
    clock::{RunState, SimSpeed},
    command::PlayerCommand,
    config::{validate_countries, ResetPolicy, SimConfig},
    country::Country,
    engine::{self, GdpBreakdown, TickOutcome},
    error::SimResult,
    event::{EventLogEntry, SimEvent},
    parameters::{GlobalParameters, ParameterName, ParameterPolicy},
    rng::{RandomSource, SimRng},
    snapshot::WorldSnapshot,
    types::Tick,
    world::WorldState,
};

pub struct WorldStore {
    state:            WorldState,
    seed_countries:   Vec<Country>,
    rng:              SimRng,
    speed:            SimSpeed,
    parameter_policy: ParameterPolicy,
    reset_policy:     ResetPolicy,
    events:           Vec<EventLogEntry>,
}

impl WorldStore {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        validate_countries(&config.countries)?;
        let parameters = config.parameter_policy.admit_all(config.initial_parameters)?;
        log::info!(
            "world seeded: {} countries, rng seed {}",
            config.countries.len(),
            config.rng_seed
        );
        Ok(Self {
            state:            WorldState::new(config.countries.clone(), parameters),
            seed_countries:   config.countries,
            rng:              SimRng::new(config.rng_seed),
            speed:            config.speed,
            parameter_policy: config.parameter_policy,
            reset_policy:     config.reset_policy,
            events:           Vec::new(),
        })
    }

    // ── Read access ────────────────────────────────────────────

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn current_time(&self) -> Tick {
        self.state.current_time
    }

    pub fn run_state(&self) -> RunState {
        RunState::from_running(self.state.is_running)
    }

    pub fn speed(&self) -> SimSpeed {
        self.speed
    }

    pub fn parameters(&self) -> GlobalParameters {
        self.state.parameters
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.state, self.speed)
    }

    pub fn events(&self) -> &[EventLogEntry] {
        &self.events
    }

    // ── Parameters ─────────────────────────────────────────────

    /// Replace exactly one parameter, subject to the configured policy.
    pub fn set_parameter(&mut self, name: ParameterName, value: f64) -> SimResult<()> {
        let new_value = self.parameter_policy.admit(name, value)?;
        let old_value = self.state.parameters.get(name);
        self.state.parameters = self.state.parameters.with(name, new_value);
        self.record(SimEvent::ParameterChanged {
            tick: self.state.current_time,
            name,
            old_value,
            new_value,
        });
        Ok(())
    }

    /// String form used by the UI. Unknown names are an error.
    pub fn set_parameter_named(&mut self, name: &str, value: f64) -> SimResult<()> {
        self.set_parameter(name.parse()?, value)
    }

    /// Swap in a whole parameter set.
    pub fn replace_parameters(&mut self, parameters: GlobalParameters) -> SimResult<()> {
        let parameters = self.parameter_policy.admit_all(parameters)?;
        self.state.parameters = parameters;
        self.record(SimEvent::ParametersReplaced {
            tick: self.state.current_time,
            parameters,
        });
        Ok(())
    }

    // ── Run control ────────────────────────────────────────────

    /// Returns true if the state changed.
    pub fn start(&mut self) -> bool {
        self.transition(self.run_state().start())
    }

    /// Returns true if the state changed.
    pub fn pause(&mut self) -> bool {
        self.transition(self.run_state().pause())
    }

    pub fn set_speed(&mut self, speed: u32) -> SimResult<()> {
        let speed = SimSpeed::try_from(speed)?;
        if speed != self.speed {
            self.speed = speed;
            self.record(SimEvent::SpeedChanged {
                tick: self.state.current_time,
                speed,
            });
        }
        Ok(())
    }

    /// Stop, rewind the tick counter and, under `RestoreSeed`, put every
    /// country back to its seed values and rewind the RNG stream.
    pub fn reset(&mut self) {
        let tick_before = self.state.current_time;
        self.transition(self.run_state().reset());
        self.state.current_time = 0;

        let restored_seed = self.reset_policy == ResetPolicy::RestoreSeed;
        if restored_seed {
            self.state.countries = self.seed_countries.clone();
            self.rng.reseed();
        }

        log::info!("world reset at tick {tick_before} (restored seed: {restored_seed})");
        self.record(SimEvent::WorldReset { tick_before, restored_seed });
    }

    // ── Ticking ────────────────────────────────────────────────

    /// Advance one tick using the store's own RNG stream.
    /// Returns `None` without touching anything while stopped.
    pub fn tick(&mut self) -> Option<Vec<GdpBreakdown>> {
        if !self.state.is_running {
            return None;
        }
        let outcome = engine::advance_tick(&self.state, &mut self.rng);
        Some(self.commit(outcome))
    }

    /// Advance one tick with an injected random source.
    pub fn tick_with<R>(&mut self, rng: &mut R) -> Option<Vec<GdpBreakdown>>
    where
        R: RandomSource + ?Sized,
    {
        if !self.state.is_running {
            return None;
        }
        let outcome = engine::advance_tick(&self.state, rng);
        Some(self.commit(outcome))
    }

    /// Run n ticks back to back. Used by the headless runner and tests.
    /// The run state is restored afterwards.
    pub fn run_ticks(&mut self, n: u64) {
        let was_running = self.state.is_running;
        self.start();
        for _ in 0..n {
            self.tick();
        }
        if !was_running {
            self.pause();
        }
    }

    // ── Commands ───────────────────────────────────────────────

    pub fn apply(&mut self, command: PlayerCommand) -> SimResult<()> {
        match command {
            PlayerCommand::Start => {
                self.start();
            }
            PlayerCommand::Pause => {
                self.pause();
            }
            PlayerCommand::Reset => self.reset(),
            PlayerCommand::SetSpeed { speed } => self.set_speed(speed)?,
            PlayerCommand::SetParameter { name, value } => self.set_parameter_named(&name, value)?,
            PlayerCommand::SetParameters { parameters } => self.replace_parameters(parameters)?,
        }
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────

    fn commit(&mut self, outcome: TickOutcome) -> Vec<GdpBreakdown> {
        self.state = outcome.state;
        let tick = self.state.current_time;
        let total_gdp = self.state.total_gdp();
        let floored_countries = outcome.breakdowns.iter().filter(|b| b.floored).count();

        log::debug!("tick={tick} total_gdp={total_gdp:.2} floored={floored_countries}");

        self.record(SimEvent::TickCompleted { tick, total_gdp, floored_countries });
        outcome.breakdowns
    }

    fn transition(&mut self, to: RunState) -> bool {
        let from = self.run_state();
        if from == to {
            return false;
        }
        self.state.is_running = to.is_running();
        log::info!("tick={} run state {from:?} -> {to:?}", self.state.current_time);
        self.record(SimEvent::RunStateChanged {
            tick: self.state.current_time,
            from,
            to,
        });
        true
    }

    fn record(&mut self, event: SimEvent) {
        let entry = EventLogEntry {
            seq:        self.events.len() as u64,
            event_type: event.event_type().to_string(),
            event,
        };
        self.events.push(entry);
    }
}
