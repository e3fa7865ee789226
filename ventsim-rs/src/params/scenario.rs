use crate::error::SimError;
use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// User supplied description of a scenario.
///
/// Values are already typed; parsing text input (thousand separators, date
/// formats) is a concern of the front end.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[getset(get_copy = "pub")]
    pub population: u64,
    /// Number of intensive care beds available. Reserved: it does not change
    /// the demand estimate and is only used by capacity summaries.
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub icu_capacity: u64,
    #[getset(get_copy = "pub")]
    pub first_infection: NaiveDate,
    /// Date social distancing begins. May precede `first_infection`, in which
    /// case the reduced transmission rate applies from day 0.
    #[getset(get_copy = "pub")]
    pub lockdown: NaiveDate,
    #[getset(get_copy = "pub")]
    pub mean_days_icu: u32,
    #[serde(default)]
    #[getset(get = "pub")]
    pub ventilators: Option<VentilatorSupply>,
}

/// Ventilator stock, carried along with a scenario for future supply models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VentilatorSupply {
    pub stock: u64,
    #[serde(default)]
    pub resupply: Option<Resupply>,
}

/// A single delivery of ventilators.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resupply {
    pub count: u64,
    pub date: NaiveDate,
}

impl ScenarioInput {
    pub fn new(
        population: u64,
        icu_capacity: u64,
        first_infection: NaiveDate,
        lockdown: NaiveDate,
        mean_days_icu: u32,
    ) -> Self {
        ScenarioInput {
            population,
            icu_capacity,
            first_infection,
            lockdown,
            mean_days_icu,
            ventilators: None,
        }
    }

    /// Attach a ventilator supply to the scenario.
    pub fn with_ventilators(mut self, supply: VentilatorSupply) -> Self {
        self.ventilators = Some(supply);
        self
    }

    /// Signed number of whole days from first infection to lockdown.
    pub fn days_before_lockdown(&self) -> i64 {
        (self.lockdown - self.first_infection).num_days()
    }

    /// Check domain preconditions of the pipeline.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.population == 0 {
            return Err(SimError::invalid("population must be at least 1"));
        }
        if self.mean_days_icu == 0 {
            return Err(SimError::invalid("mean_days_icu must be at least 1"));
        }
        Ok(())
    }
}
