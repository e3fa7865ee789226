use std::fmt::{self, Display};
use std::io;

/// Errors raised by the simulation pipeline and its export helpers.
#[derive(Debug)]
pub enum SimError {
    /// A domain precondition was violated before any numerical work started.
    InvalidInput(String),
    /// The ODE solver could not produce a trustworthy solution.
    Integration(String),
    Io(io::Error),
    Csv(csv::Error),
    Config(toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidInput(msg.into())
    }

    pub(crate) fn integration(msg: impl Into<String>) -> Self {
        SimError::Integration(msg.into())
    }
}

impl From<io::Error> for SimError {
    fn from(error: io::Error) -> Self {
        SimError::Io(error)
    }
}

impl From<csv::Error> for SimError {
    fn from(error: csv::Error) -> Self {
        SimError::Csv(error)
    }
}

impl From<toml::de::Error> for SimError {
    fn from(error: toml::de::Error) -> Self {
        SimError::Config(error)
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Csv(e) => Some(e),
            SimError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            SimError::Integration(msg) => write!(f, "integration failed: {}", msg),
            SimError::Io(e) => write!(f, "i/o error: {}", e),
            SimError::Csv(e) => write!(f, "csv error: {}", e),
            SimError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}
