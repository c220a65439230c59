//! Trade-world GDP simulation core.
//!
//! A fixed set of countries trades along fixed directed edges. Each tick
//! recomputes every country's GDP from trade balance, intrinsic growth,
//! labor productivity and taxation under five global parameters.
//!
//! EXECUTION MODEL:
//!   - `engine` is a pure transition: previous state in, next state out.
//!   - `store` owns the one mutable `WorldState` and serializes mutation.
//!   - `driver` is the optional timer loop that calls `store.tick()`.

pub mod clock;
pub mod command;
pub mod config;
pub mod country;
pub mod driver;
pub mod engine;
pub mod error;
pub mod event;
pub mod parameters;
pub mod rng;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod world;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use store::WorldStore;
