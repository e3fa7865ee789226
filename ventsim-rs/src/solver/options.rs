use crate::{error::SimError, Real};
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

/// Tolerances and step limits of the adaptive integrator.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SolverOptions {
    rtol: Real,
    atol: Real,
    initial_step: Real,
    min_step: Real,
    max_step: Real,
    max_steps: usize,
    safety: Real,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            rtol: 1e-8,
            atol: 1e-6,
            initial_step: 0.1,
            min_step: 1e-10,
            max_step: 1.0,
            max_steps: 100_000,
            safety: 0.9,
        }
    }
}

impl SolverOptions {
    pub fn check(&self) -> Result<(), SimError> {
        let positive = [
            ("rtol", self.rtol),
            ("atol", self.atol),
            ("initial_step", self.initial_step),
            ("min_step", self.min_step),
            ("max_step", self.max_step),
        ];
        for (name, value) in positive.iter() {
            if !(value.is_finite() && *value > 0.0) {
                return Err(SimError::invalid(format!(
                    "solver option {} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.min_step > self.max_step {
            return Err(SimError::invalid("solver min_step exceeds max_step"));
        }
        if !(self.safety > 0.0 && self.safety < 1.0) {
            return Err(SimError::invalid("solver safety factor must lie in (0, 1)"));
        }
        if self.max_steps == 0 {
            return Err(SimError::invalid("solver max_steps must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(SolverOptions::default().check().is_ok());
    }

    #[test]
    fn rejects_inverted_step_bounds() {
        let mut opts = SolverOptions::default();
        opts.set_min_step(2.0);
        assert!(opts.check().is_err());

        let mut opts = SolverOptions::default();
        opts.set_rtol(0.0);
        assert!(opts.check().is_err());
    }
}
