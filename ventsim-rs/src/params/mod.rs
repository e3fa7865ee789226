//! Parameters of a scenario.
//!
//! A projection is controlled by two sets of values: the [`ScenarioInput`]
//! supplied by the user (population, dates, ICU stay) and the
//! [`DiseaseParams`] holding literature values for the pathogen. The
//! [`derive_parameters`] function combines both into the [`DerivedParameters`]
//! consumed by the integrator and the demand post-processor.
mod constants;
mod derived;
mod disease;
mod scenario;

pub use constants::*;
pub use derived::*;
pub use disease::*;
pub use scenario::*;
