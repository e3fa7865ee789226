use super::constants as cte;
use crate::{error::SimError, Real};
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

/// Literature values describing the disease.
///
/// Defaults reproduce COVID-19 estimates from early 2020. Any field can be
/// overridden (e.g. from the `[disease]` table of a config file) to study an
/// alternative pathogen or a different intervention efficacy.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct DiseaseParams {
    days_to_incubation: Real,
    days_presymptomatic: Real,
    generation_time: Real,
    r0: Real,
    r1: Real,
    infection_fatality_rate: Real,
    icu_per_fatality: Real,
}

impl Default for DiseaseParams {
    fn default() -> Self {
        DiseaseParams {
            days_to_incubation: cte::DAYS_TO_INCUBATION,
            days_presymptomatic: cte::DAYS_PRESYMPTOMATIC,
            generation_time: cte::GENERATION_TIME,
            r0: cte::R0,
            r1: cte::R1,
            infection_fatality_rate: cte::INFECTION_FATALITY_RATE,
            icu_per_fatality: cte::ICU_PER_FATALITY,
        }
    }
}

impl DiseaseParams {
    /// Duration of the non-infectious part of the incubation period. This is
    /// the mean residence time in the Exposed compartment.
    pub fn latent_period(&self) -> Real {
        self.days_to_incubation - self.days_presymptomatic
    }

    /// Fraction of all infections that end up in intensive care.
    pub fn icu_rate(&self) -> Real {
        self.icu_per_fatality * self.infection_fatality_rate
    }

    /// Reject values for which sigma, gamma or beta would not be strictly
    /// positive and finite, or for which the ICU rate is not a fraction.
    pub fn check(&self) -> Result<(), SimError> {
        let fields = [
            ("days_to_incubation", self.days_to_incubation),
            ("days_presymptomatic", self.days_presymptomatic),
            ("generation_time", self.generation_time),
            ("r0", self.r0),
            ("r1", self.r1),
            ("infection_fatality_rate", self.infection_fatality_rate),
            ("icu_per_fatality", self.icu_per_fatality),
        ];
        for (name, value) in fields.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(SimError::invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.latent_period() <= 0.0 {
            return Err(SimError::invalid(format!(
                "days_to_incubation ({}) must exceed days_presymptomatic ({})",
                self.days_to_incubation, self.days_presymptomatic
            )));
        }
        if self.generation_time <= self.latent_period() {
            return Err(SimError::invalid(format!(
                "generation_time ({}) must exceed the latent period ({})",
                self.generation_time,
                self.latent_period()
            )));
        }
        if self.r0 == 0.0 || self.r1 == 0.0 {
            return Err(SimError::invalid("reproduction numbers must be positive"));
        }
        if self.icu_rate() > 1.0 {
            return Err(SimError::invalid(format!(
                "icu rate {} is larger than one",
                self.icu_rate()
            )));
        }
        Ok(())
    }
}
