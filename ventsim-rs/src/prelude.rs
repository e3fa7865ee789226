pub use crate::error::{Result, SimError};
pub use crate::models::{BetaSchedule, Compartment, SeirOde};
pub use crate::params::{
    derive_parameters, DerivedParameters, DiseaseParams, Resupply, ScenarioInput,
    VentilatorSupply,
};
pub use crate::sim::{
    integrate, run_batch, run_scenario, simulate, to_chart_rows, ChartRow, DayRecord,
    DemandRecord, DemandSeries, ScenarioOutput, Series, Trajectory,
};
pub use crate::solver::{Dopri5, OdeSystem, SolverOptions};
pub use crate::{Real, Time};
pub use chrono::NaiveDate;
