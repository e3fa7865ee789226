use crate::{params::DerivedParameters, solver::OdeSystem, Real};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compartments of the SEIR model, in the order they are stored in state
/// vectors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compartment {
    Susceptible,
    Exposed,
    Infectious,
    Recovered,
}

impl Compartment {
    pub const CARDINALITY: usize = 4;
    pub const CSV_HEADER: &'static str = "S,E,I,R";
    pub const ALL: [Compartment; 4] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infectious,
        Compartment::Recovered,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Susceptible => 0,
            Self::Exposed => 1,
            Self::Infectious => 2,
            Self::Recovered => 3,
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Susceptible => write!(f, "S"),
            Self::Exposed => write!(f, "E"),
            Self::Infectious => write!(f, "I"),
            Self::Recovered => write!(f, "R"),
        }
    }
}

/// Transmission rate that drops from beta0 to beta1 on the lockdown day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetaSchedule {
    pub beta0: Real,
    pub beta1: Real,
    /// First day (relative to the first infection) at which beta1 applies.
    /// Negative values mean the lockdown predates the first infection.
    pub switch_day: i64,
}

/// A time interval with constant transmission rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetaSegment {
    pub from: Real,
    pub until: Real,
    pub beta: Real,
}

impl BetaSchedule {
    pub fn from_params(params: &DerivedParameters) -> Self {
        BetaSchedule {
            beta0: params.beta0(),
            beta1: params.beta1(),
            switch_day: params.days_before_lockdown(),
        }
    }

    /// Transmission rate in effect at time t.
    pub fn beta_at(&self, t: Real) -> Real {
        if t < self.switch_day as Real {
            self.beta0
        } else {
            self.beta1
        }
    }

    /// Split [start, end] into intervals of constant beta.
    ///
    /// A switch outside the open interval, or a switch between two equal
    /// rates, yields a single segment.
    pub fn segments(&self, start: Real, end: Real) -> Vec<BetaSegment> {
        let switch = self.switch_day as Real;
        if self.beta0 == self.beta1 || switch <= start || switch >= end {
            return vec![BetaSegment {
                from: start,
                until: end,
                beta: self.beta_at(start),
            }];
        }
        vec![
            BetaSegment {
                from: start,
                until: switch,
                beta: self.beta0,
            },
            BetaSegment {
                from: switch,
                until: end,
                beta: self.beta1,
            },
        ]
    }
}

/// Right hand side of the SEIR equations for a constant transmission rate.
///
/// ```text
/// dS/dt = -beta * S * I / N
/// dE/dt =  beta * S * I / N - sigma * E
/// dI/dt =  sigma * E - gamma * I
/// dR/dt =  gamma * I
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeirOde {
    pub population: Real,
    pub beta: Real,
    pub sigma: Real,
    pub gamma: Real,
}

impl SeirOde {
    pub fn new(population: Real, beta: Real, params: &DerivedParameters) -> Self {
        SeirOde {
            population,
            beta,
            sigma: params.sigma(),
            gamma: params.gamma(),
        }
    }
}

const DIM: usize = Compartment::CARDINALITY;

impl OdeSystem<DIM> for SeirOde {
    fn rhs(&self, _t: Real, y: &[Real; DIM]) -> [Real; DIM] {
        let [s, e, i, _r] = *y;
        let infections = self.beta * s * i / self.population;
        let onsets = self.sigma * e;
        let removals = self.gamma * i;
        [-infections, infections - onsets, onsets - removals, removals]
    }
}
