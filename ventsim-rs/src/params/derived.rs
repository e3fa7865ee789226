use super::{DiseaseParams, ScenarioInput};
use crate::Real;
use getset::CopyGetters;
use log::debug;
use serde::Serialize;

/// Full set of coefficients used by the SEIR integrator and the ICU demand
/// post-processor. Created once per scenario by [`derive_parameters`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct DerivedParameters {
    days_to_incubation: Real,
    days_presymptomatic: Real,
    generation_time: Real,
    r0: Real,
    r1: Real,

    /// Rate at which an exposed person becomes infectious.
    sigma: Real,
    /// Rate at which an infectious person stops infecting others.
    gamma: Real,
    /// Transmission rate before the lockdown.
    beta0: Real,
    /// Transmission rate after the lockdown.
    beta1: Real,
    /// Day offset at which transmission switches from beta0 to beta1.
    days_before_lockdown: i64,
    /// Fraction of infectious individuals who will need intensive care.
    icu_rate: Real,
}

/// Derive the model coefficients for a scenario.
///
/// For SEIR the generation time is `1/sigma + 0.5/gamma`, which fixes gamma
/// once sigma is known from the latent period.
pub fn derive_parameters(input: &ScenarioInput, disease: &DiseaseParams) -> DerivedParameters {
    let sigma = 1.0 / disease.latent_period();
    let gamma = 1.0 / (2.0 * (disease.generation_time() - 1.0 / sigma));
    let params = DerivedParameters {
        days_to_incubation: disease.days_to_incubation(),
        days_presymptomatic: disease.days_presymptomatic(),
        generation_time: disease.generation_time(),
        r0: disease.r0(),
        r1: disease.r1(),
        sigma,
        gamma,
        beta0: disease.r0() * gamma,
        beta1: disease.r1() * gamma,
        days_before_lockdown: input.days_before_lockdown(),
        icu_rate: disease.icu_rate(),
    };
    debug!(
        "derived sigma={:.4} gamma={:.4} beta0={:.4} beta1={:.4} lockdown_day={} icu_rate={}",
        params.sigma,
        params.gamma,
        params.beta0,
        params.beta1,
        params.days_before_lockdown,
        params.icu_rate
    );
    params
}

impl DerivedParameters {
    /// Mean time spent in the infectious compartment.
    pub fn infectious_period(&self) -> Real {
        1.0 / self.gamma
    }

    /// Exponential growth rate of the early epidemic, i.e. the dominant
    /// eigenvalue of the SEIR system linearised around the disease free state
    /// with R = r0.
    pub fn initial_growth_rate(&self) -> Real {
        let (s, g) = (self.sigma, self.gamma);
        0.5 * (-(s + g) + ((s + g).powi(2) + 4.0 * s * g * (self.r0 - 1.0)).sqrt())
    }

    /// Doubling time of the early epidemic, if it grows at all.
    pub fn doubling_time(&self) -> Option<Real> {
        let rate = self.initial_growth_rate();
        if rate > 0.0 && rate.is_finite() {
            Some(Real::ln(2.0) / rate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;

    fn scenario(lockdown: NaiveDate) -> ScenarioInput {
        let first = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        ScenarioInput::new(10_000_000, 5_000, first, lockdown, 5)
    }

    #[test]
    fn derives_default_rates() {
        let lockdown = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
        let p = derive_parameters(&scenario(lockdown), &DiseaseParams::default());

        assert_approx_eq!(p.sigma(), 1.0 / 2.7);
        assert_approx_eq!(p.gamma(), 1.0 / (2.0 * (4.6 - 2.7)));
        assert_approx_eq!(p.infectious_period(), 3.8);
        assert_approx_eq!(p.beta0(), 3.0 / 3.8);
        assert_approx_eq!(p.beta1(), 1.1 / 3.8);
        assert_approx_eq!(p.icu_rate(), 0.02);
        assert_eq!(p.days_before_lockdown(), 60);
        assert!(p.sigma() > 0.0 && p.gamma() > 0.0 && p.beta0() > 0.0 && p.beta1() > 0.0);
    }

    #[test]
    fn lockdown_before_first_infection_is_not_clamped() {
        let lockdown = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let p = derive_parameters(&scenario(lockdown), &DiseaseParams::default());
        assert_eq!(p.days_before_lockdown(), -14);
    }

    #[test]
    fn growth_rate_matches_doubling_time() {
        let lockdown = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
        let p = derive_parameters(&scenario(lockdown), &DiseaseParams::default());
        let rate = p.initial_growth_rate();
        assert!(rate > 0.0);
        assert_approx_eq!(p.doubling_time().unwrap() * rate, Real::ln(2.0));

        let mut disease = DiseaseParams::default();
        disease.set_r0(0.9);
        let p = derive_parameters(&scenario(lockdown), &disease);
        assert!(p.initial_growth_rate() < 0.0);
        assert!(p.doubling_time().is_none());
    }
}
