//! Error types for the simulator
//!
//! The physics core fails soft: degenerate numbers propagate as inf/NaN.
//! These errors only surface from opt-in strict checks, scenario loading,
//! and the output sink.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// A parameter or particle failed strict validation
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Strict mode found a non-finite position or velocity after a step
    #[error("numerical instability at step {step} (t = {time}): particle {id} has non-finite state")]
    NumericalInstability { step: usize, time: f64, id: usize },

    /// The output destination could not be opened
    #[error("failed to open output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("scenario parse error: {0}")]
    Scenario(#[from] serde_yaml::Error),
}

impl SimError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
