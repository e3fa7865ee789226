use crate::{Real, Time};

///////////////////////////////////////////////////////////////////////////////
// Default disease params for COVID-19
///////////////////////////////////////////////////////////////////////////////

/// Days from exposure to symptom onset.
pub const DAYS_TO_INCUBATION: Real = 5.2;
/// Days before symptom onset during which a case is already infectious
/// (Drosten: almost half of transmissions happen before symptoms).
pub const DAYS_PRESYMPTOMATIC: Real = 2.5;
/// Mean time between successive infections in a transmission chain.
pub const GENERATION_TIME: Real = 4.6;
/// Basic reproduction number.
pub const R0: Real = 3.0;
/// Reproduction number once distancing measures are in place.
pub const R1: Real = 1.1;
/// Age corrected infection fatality rate (Diamond Princess).
pub const INFECTION_FATALITY_RATE: Real = 0.01;
/// ICU admissions per death (Imperial College NPI: hospitalized/ICU/fatal = 6/2/1).
pub const ICU_PER_FATALITY: Real = 2.0;

///////////////////////////////////////////////////////////////////////////////
// Model structure
///////////////////////////////////////////////////////////////////////////////

/// Length of every projection, in days.
pub const DAYS_TOTAL: Time = 365;
/// Number of exposed people at t = 0.
pub const INITIAL_EXPOSED: u64 = 1;
/// Days between becoming infectious and arriving in the ICU.
pub const ICU_ADMISSION_LAG: usize = 10;
