use super::{OdeSystem, SolverOptions};
use crate::{
    error::{Result, SimError},
    Real,
};
use log::trace;
use ndarray::Array2;

// Dormand-Prince 5(4) tableau.
const C2: Real = 1.0 / 5.0;
const C3: Real = 3.0 / 10.0;
const C4: Real = 4.0 / 5.0;
const C5: Real = 8.0 / 9.0;

const A21: Real = 1.0 / 5.0;
const A31: Real = 3.0 / 40.0;
const A32: Real = 9.0 / 40.0;
const A41: Real = 44.0 / 45.0;
const A42: Real = -56.0 / 15.0;
const A43: Real = 32.0 / 9.0;
const A51: Real = 19372.0 / 6561.0;
const A52: Real = -25360.0 / 2187.0;
const A53: Real = 64448.0 / 6561.0;
const A54: Real = -212.0 / 729.0;
const A61: Real = 9017.0 / 3168.0;
const A62: Real = -355.0 / 33.0;
const A63: Real = 46732.0 / 5247.0;
const A64: Real = 49.0 / 176.0;
const A65: Real = -5103.0 / 18656.0;

// 5th order weights (b2 = 0).
const B1: Real = 35.0 / 384.0;
const B3: Real = 500.0 / 1113.0;
const B4: Real = 125.0 / 192.0;
const B5: Real = -2187.0 / 6784.0;
const B6: Real = 11.0 / 84.0;

// Difference between the 5th and 4th order weights (e2 = 0).
const E1: Real = 71.0 / 57600.0;
const E3: Real = -71.0 / 16695.0;
const E4: Real = 71.0 / 1920.0;
const E5: Real = -17253.0 / 339200.0;
const E6: Real = 22.0 / 525.0;
const E7: Real = -1.0 / 40.0;

const MIN_FACTOR: Real = 0.2;
const MAX_FACTOR: Real = 5.0;

/// Adaptive Dormand-Prince 5(4) integrator.
///
/// The solution is sampled exactly at the requested output times: steps are
/// shortened so that they land on each of them, which also means the right
/// hand side is never evaluated past the last requested time.
#[derive(Clone, Debug, Default)]
pub struct Dopri5 {
    options: SolverOptions,
}

impl Dopri5 {
    pub fn new(options: SolverOptions) -> Self {
        Dopri5 { options }
    }

    /// Integrate `system` from `(t0, y0)` and return the state at each of the
    /// given output times, one row per time.
    ///
    /// Times must be ascending and not earlier than t0. A time equal to t0
    /// yields y0 unchanged.
    pub fn solve<S, const N: usize>(
        &self,
        system: &S,
        y0: [Real; N],
        t0: Real,
        times: &[Real],
    ) -> Result<Array2<Real>>
    where
        S: OdeSystem<N>,
    {
        let opts = &self.options;
        let mut out = Array2::zeros((times.len(), N));
        let mut t = t0;
        let mut y = y0;
        let mut h = opts.initial_step().min(opts.max_step());
        let (mut accepted, mut rejected) = (0usize, 0usize);

        for (row, &target) in times.iter().enumerate() {
            if !(target >= t) {
                return Err(SimError::integration(format!(
                    "output time {} precedes current time {}",
                    target, t
                )));
            }

            while t < target {
                if accepted + rejected >= opts.max_steps() {
                    return Err(SimError::integration(format!(
                        "exceeded {} steps before reaching t = {}",
                        opts.max_steps(),
                        target
                    )));
                }
                let remaining = target - t;
                let truncated = h >= remaining;
                let dt = if truncated { remaining } else { h };

                let (y_new, err) = self.step(system, t, &y, dt);
                let finite = err.is_finite() && y_new.iter().all(|x| x.is_finite());

                if finite && err <= 1.0 {
                    accepted += 1;
                    t = if truncated { target } else { t + dt };
                    y = y_new;
                    let factor = if err == 0.0 {
                        MAX_FACTOR
                    } else {
                        (opts.safety() * err.powf(-0.2)).min(MAX_FACTOR).max(MIN_FACTOR)
                    };
                    let proposal = dt * factor;
                    // A step cut short to hit an output time says nothing about
                    // the step size the dynamics allow.
                    h = if truncated { proposal.max(h) } else { proposal };
                    h = h.min(opts.max_step());
                } else {
                    rejected += 1;
                    let factor = if finite {
                        (opts.safety() * err.powf(-0.2)).max(MIN_FACTOR)
                    } else {
                        MIN_FACTOR
                    };
                    h = dt * factor;
                    if h < opts.min_step() {
                        return Err(SimError::integration(format!(
                            "step size underflow ({:e}) at t = {}",
                            h, t
                        )));
                    }
                }
            }

            for (j, value) in y.iter().enumerate() {
                out[[row, j]] = *value;
            }
        }

        trace!(
            "dopri5: {} accepted / {} rejected steps over [{}, {}]",
            accepted,
            rejected,
            t0,
            t
        );
        Ok(out)
    }

    /// Advance a single step of size h. Return the 5th order solution and the
    /// scaled RMS norm of the embedded error estimate.
    fn step<S, const N: usize>(
        &self,
        system: &S,
        t: Real,
        y: &[Real; N],
        h: Real,
    ) -> ([Real; N], Real)
    where
        S: OdeSystem<N>,
    {
        let k1 = system.rhs(t, y);
        let k2 = system.rhs(t + C2 * h, &stage(y, h, &[(A21, &k1)]));
        let k3 = system.rhs(t + C3 * h, &stage(y, h, &[(A31, &k1), (A32, &k2)]));
        let k4 = system.rhs(
            t + C4 * h,
            &stage(y, h, &[(A41, &k1), (A42, &k2), (A43, &k3)]),
        );
        let k5 = system.rhs(
            t + C5 * h,
            &stage(y, h, &[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)]),
        );
        let k6 = system.rhs(
            t + h,
            &stage(
                y,
                h,
                &[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
            ),
        );
        let y5 = stage(
            y,
            h,
            &[(B1, &k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)],
        );
        let k7 = system.rhs(t + h, &y5);

        let opts = &self.options;
        let mut acc = 0.0;
        for i in 0..N {
            let e = h
                * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i]);
            let scale = opts.atol() + opts.rtol() * y[i].abs().max(y5[i].abs());
            acc += (e / scale).powi(2);
        }
        let err = if N == 0 { 0.0 } else { (acc / N as Real).sqrt() };
        (y5, err)
    }
}

/// Compute `y + h * sum(a * k)`.
#[inline]
fn stage<const N: usize>(y: &[Real; N], h: Real, terms: &[(Real, &[Real; N])]) -> [Real; N] {
    let mut out = *y;
    for i in 0..N {
        let mut acc = 0.0;
        for (a, k) in terms {
            acc += a * k[i];
        }
        out[i] += h * acc;
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn days(n: usize) -> Vec<Real> {
        (0..n).map(|d| d as Real).collect()
    }

    #[test]
    fn exponential_decay() {
        let solver = Dopri5::default();
        let decay = |_t: Real, y: &[Real; 1]| [-0.5 * y[0]];
        let sol = solver.solve(&decay, [1000.0], 0.0, &days(20)).unwrap();

        assert_eq!(sol.dim(), (20, 1));
        for (i, t) in days(20).into_iter().enumerate() {
            assert_approx_eq!(sol[[i, 0]], 1000.0 * (-0.5 * t).exp(), 1e-3);
        }
    }

    #[test]
    fn harmonic_oscillator() {
        let solver = Dopri5::default();
        let spring = |_t: Real, y: &[Real; 2]| [y[1], -y[0]];
        let times = [0.0, 1.5, 3.0, 12.5];
        let sol = solver.solve(&spring, [1.0, 0.0], 0.0, &times).unwrap();
        for (i, t) in times.iter().enumerate() {
            assert_approx_eq!(sol[[i, 0]], t.cos(), 1e-4);
            assert_approx_eq!(sol[[i, 1]], -t.sin(), 1e-4);
        }
    }

    #[test]
    fn output_at_start_time_is_initial_state() {
        let solver = Dopri5::default();
        let growth = |_t: Real, y: &[Real; 1]| [y[0]];
        let sol = solver.solve(&growth, [3.0], 5.0, &[5.0, 6.0]).unwrap();
        assert_eq!(sol[[0, 0]], 3.0);
        assert_approx_eq!(sol[[1, 0]], 3.0 * Real::exp(1.0), 1e-4);
    }

    #[test]
    fn time_dependent_rhs() {
        let solver = Dopri5::default();
        let ramp = |t: Real, _y: &[Real; 1]| [2.0 * t];
        let sol = solver.solve(&ramp, [0.0], 0.0, &[4.0]).unwrap();
        assert_approx_eq!(sol[[0, 0]], 16.0, 1e-8);
    }

    #[test]
    fn step_budget_is_enforced() {
        let mut opts = SolverOptions::default();
        opts.set_max_steps(3);
        let solver = Dopri5::new(opts);
        let decay = |_t: Real, y: &[Real; 1]| [-y[0]];
        let res = solver.solve(&decay, [1.0], 0.0, &days(100));
        assert!(matches!(res, Err(SimError::Integration(_))));
    }

    #[test]
    fn blow_up_is_reported() {
        let solver = Dopri5::default();
        // y' = y^2 with y(0) = 1 is singular at t = 1.
        let blow_up = |_t: Real, y: &[Real; 1]| [y[0] * y[0]];
        let res = solver.solve(&blow_up, [1.0], 0.0, &[0.5, 2.0]);
        assert!(matches!(res, Err(SimError::Integration(_))));
    }

    #[test]
    fn descending_times_are_rejected() {
        let solver = Dopri5::default();
        let decay = |_t: Real, y: &[Real; 1]| [-y[0]];
        let res = solver.solve(&decay, [1.0], 0.0, &[2.0, 1.0]);
        assert!(res.is_err());
    }
}
