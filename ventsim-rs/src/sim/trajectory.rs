use crate::{
    error::{Result, SimError},
    models::{BetaSchedule, Compartment, SeirOde},
    params::DerivedParameters,
    solver::Dopri5,
    Real, Time,
};
use chrono::{Duration, NaiveDate};
use log::debug;
use serde::Serialize;

/// Rounded compartment counts for a single day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub day: Time,
    pub date: NaiveDate,
    pub susceptible: u64,
    pub exposed: u64,
    pub infectious: u64,
    pub recovered: u64,
}

impl DayRecord {
    pub fn get(&self, compartment: Compartment) -> u64 {
        match compartment {
            Compartment::Susceptible => self.susceptible,
            Compartment::Exposed => self.exposed,
            Compartment::Infectious => self.infectious,
            Compartment::Recovered => self.recovered,
        }
    }

    /// Sum of all compartments. Equals the population up to rounding.
    pub fn total(&self) -> u64 {
        self.susceptible + self.exposed + self.infectious + self.recovered
    }
}

/// Daily SEIR counts, ordered by day.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    population: u64,
    records: Vec<DayRecord>,
}

impl Trajectory {
    /// Build a trajectory from day ordered records.
    pub fn from_records(population: u64, records: Vec<DayRecord>) -> Self {
        Trajectory {
            population,
            records,
        }
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return the i-th day.
    pub fn get(&self, i: usize) -> Option<&DayRecord> {
        self.records.get(i)
    }

    /// Return the counts of a single compartment for every day.
    pub fn column(&self, compartment: Compartment) -> Vec<u64> {
        self.records.iter().map(|r| r.get(compartment)).collect()
    }

    /// Render the trajectory as CSV data, one line per day.
    pub fn render_csv(&self, sep: char) -> String {
        let mut data = format!("day{}date", sep);
        for c in Compartment::ALL.iter() {
            data.push(sep);
            data.push_str(&c.to_string());
        }
        for r in &self.records {
            data.push('\n');
            data.push_str(&format!("{}{}{}", r.day, sep, r.date));
            for c in Compartment::ALL.iter() {
                data.push(sep);
                data.push_str(&r.get(*c).to_string());
            }
        }
        data
    }
}

/// Solve the SEIR model for `days_total` days starting with `initial_exposed`
/// exposed individuals and sample it at every integer day.
///
/// The transmission rate is piecewise constant, so each constant-beta segment
/// of the schedule is solved separately, starting from the state at the end
/// of the previous one.
pub fn integrate(
    population: u64,
    initial_exposed: u64,
    params: &DerivedParameters,
    days_total: Time,
    first_infection: NaiveDate,
    solver: &Dopri5,
) -> Result<Trajectory> {
    if population == 0 {
        return Err(SimError::invalid("cannot integrate an empty population"));
    }
    if initial_exposed > population {
        return Err(SimError::invalid(format!(
            "initial exposed ({}) exceeds population ({})",
            initial_exposed, population
        )));
    }
    if days_total == 0 {
        return Ok(Trajectory::from_records(population, vec![]));
    }

    let n = population as Real;
    let e0 = initial_exposed as Real;
    let mut y = [n - e0, e0, 0.0, 0.0];
    let mut states: Vec<[Real; Compartment::CARDINALITY]> =
        Vec::with_capacity(days_total as usize);
    let mut next_day: Time = 0;

    let schedule = BetaSchedule::from_params(params);
    for segment in schedule.segments(0.0, (days_total - 1) as Real) {
        let times: Vec<Real> = (next_day..days_total)
            .map(|d| d as Real)
            .take_while(|&t| t <= segment.until)
            .collect();
        debug!(
            "solving t = {}..{} with beta = {:.4} ({} samples)",
            segment.from,
            segment.until,
            segment.beta,
            times.len()
        );

        let ode = SeirOde::new(n, segment.beta, params);
        let solution = solver.solve(&ode, y, segment.from, &times)?;
        for row in solution.outer_iter() {
            states.push([row[0], row[1], row[2], row[3]]);
        }
        if let Some(last) = states.last() {
            y = *last;
        }
        next_day += times.len() as Time;
    }

    let mut records = Vec::with_capacity(states.len());
    for (day, state) in states.iter().enumerate() {
        let date = first_infection
            .checked_add_signed(Duration::days(day as i64))
            .ok_or_else(|| SimError::invalid("calendar date out of range"))?;
        records.push(DayRecord {
            day: day as Time,
            date,
            susceptible: round_count(state[Compartment::Susceptible.index()]),
            exposed: round_count(state[Compartment::Exposed.index()]),
            infectious: round_count(state[Compartment::Infectious.index()]),
            recovered: round_count(state[Compartment::Recovered.index()]),
        });
    }
    Ok(Trajectory::from_records(population, records))
}

/// Round a continuous count to the nearest non-negative integer. Exact halves
/// go to the even neighbour.
#[inline]
pub(crate) fn round_count(x: Real) -> u64 {
    x.round_ties_even().max(0.0) as u64
}
