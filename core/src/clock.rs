//! Run control: the Stopped/Running state machine and timer speed.
//!
//! The tick counter itself lives on `WorldState::current_time`; this
//! module only decides whether a tick may happen and how often.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base timer period at 1x.
pub const BASE_TICK_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Stopped,
    Running,
}

impl RunState {
    pub fn from_running(is_running: bool) -> Self {
        if is_running { Self::Running } else { Self::Stopped }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Stopped --start--> Running. Running stays Running.
    pub fn start(self) -> Self {
        Self::Running
    }

    /// Running --pause--> Stopped. Stopped stays Stopped.
    pub fn pause(self) -> Self {
        Self::Stopped
    }

    /// Both states reset into Stopped.
    pub fn reset(self) -> Self {
        Self::Stopped
    }
}

/// User-selectable timer speed. Only 1x, 2x and 5x exist.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u32", into = "u32")]
pub enum SimSpeed {
    #[default]
    Normal,   // 1x
    Double,   // 2x
    Fast,     // 5x
}

impl SimSpeed {
    pub fn multiplier(&self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Double => 2,
            Self::Fast   => 5,
        }
    }

    /// `1000 / speed` milliseconds at the default base period.
    pub fn tick_period(&self) -> Duration {
        self.period_from(BASE_TICK_PERIOD)
    }

    pub fn period_from(&self, base: Duration) -> Duration {
        base / self.multiplier()
    }
}

impl TryFrom<u32> for SimSpeed {
    type Error = SimError;

    fn try_from(speed: u32) -> Result<Self, Self::Error> {
        match speed {
            1 => Ok(Self::Normal),
            2 => Ok(Self::Double),
            5 => Ok(Self::Fast),
            _ => Err(SimError::InvalidSpeed { speed }),
        }
    }
}

impl From<SimSpeed> for u32 {
    fn from(speed: SimSpeed) -> Self {
        speed.multiplier()
    }
}
