//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one firing of the driver's timer.
pub type Tick = u64;

/// Stable country identifier, e.g. `"us"`.
pub type CountryId = String;

/// GDP never drops below this after a tick (billions).
pub const GDP_FLOOR: f64 = 1.0;
