//! Deterministic SEIR projection of an epidemic and the ICU demand it implies.
//!
//! The crate is organised as a strict pipeline: [`params`] derives model
//! coefficients from a scenario, [`sim::integrate`] solves the compartment
//! model, [`sim::DemandSeries`] estimates ICU occupancy and
//! [`sim::to_chart_rows`] reshapes the result into long-format rows.
pub mod error;
pub mod models;
pub mod params;
pub mod prelude;
pub mod sim;
pub mod solver;
pub mod utils;

pub use crate::error::{Result, SimError};
pub use crate::sim::{run_batch, run_scenario, simulate};

/// Basic representation of time. This crate usually assumes time is measured
/// in days.
pub type Time = u32;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;
