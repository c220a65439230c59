use thiserror::Error;

use crate::parameters::ParameterName;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid speed {speed}: expected one of 1, 2, 5")]
    InvalidSpeed { speed: u32 },

    #[error("Unknown parameter '{name}'")]
    UnknownParameter { name: String },

    #[error("Parameter {name} = {value} outside [{min}, {max}]")]
    ParameterOutOfRange {
        name:  ParameterName,
        value: f64,
        min:   f64,
        max:   f64,
    },

    #[error("Invalid seed data: {reason}")]
    InvalidSeedData { reason: String },
}

pub type SimResult<T> = Result<T, SimError>;
