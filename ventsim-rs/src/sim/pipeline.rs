use super::{integrate, to_chart_rows, ChartRow, DemandSeries, Trajectory};
use crate::{
    error::Result,
    params::{
        derive_parameters, DerivedParameters, DiseaseParams, ScenarioInput, DAYS_TOTAL,
        INITIAL_EXPOSED,
    },
    solver::{Dopri5, SolverOptions},
};
use log::debug;
use rayon::prelude::*;

/// Every artifact produced while projecting a scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioOutput {
    pub params: DerivedParameters,
    pub trajectory: Trajectory,
    pub demand: DemandSeries,
    pub rows: Vec<ChartRow>,
}

/// Run the full pipeline for a scenario.
///
/// Preconditions on the scenario, disease and solver settings are checked
/// before any numerical work is done.
pub fn simulate(
    input: &ScenarioInput,
    disease: &DiseaseParams,
    options: &SolverOptions,
) -> Result<ScenarioOutput> {
    input.validate()?;
    disease.check()?;
    options.check()?;

    let params = derive_parameters(input, disease);
    let solver = Dopri5::new(*options);
    let trajectory = integrate(
        input.population(),
        INITIAL_EXPOSED,
        &params,
        DAYS_TOTAL,
        input.first_infection(),
        &solver,
    )?;
    let demand =
        DemandSeries::from_trajectory(&trajectory, params.icu_rate(), input.mean_days_icu())?;
    let rows = to_chart_rows(&demand);
    debug!(
        "scenario population={} lockdown_day={} produced {} chart rows",
        input.population(),
        params.days_before_lockdown(),
        rows.len()
    );

    Ok(ScenarioOutput {
        params,
        trajectory,
        demand,
        rows,
    })
}

/// Project a scenario with the default disease parameters and solver settings
/// and return the chart rows.
pub fn run_scenario(input: &ScenarioInput) -> Result<Vec<ChartRow>> {
    simulate(input, &DiseaseParams::default(), &SolverOptions::default()).map(|out| out.rows)
}

/// Project many independent scenarios in parallel. Results keep the order of
/// the inputs.
pub fn run_batch(
    inputs: &[ScenarioInput],
    disease: &DiseaseParams,
    options: &SolverOptions,
) -> Vec<Result<ScenarioOutput>> {
    inputs
        .par_iter()
        .map(|input| simulate(input, disease, options))
        .collect()
}
