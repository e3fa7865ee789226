//! Numerical integration of ordinary differential equations.
//!
//! Populations span many orders of magnitude, so the compartment model is
//! solved with an embedded Runge-Kutta pair that adapts its step to keep the
//! local error within a mixed absolute/relative tolerance.
mod dopri5;
mod options;

pub use dopri5::*;
pub use options::*;

use crate::Real;

/// A system of first order ODEs `dy/dt = f(t, y)` with N components.
pub trait OdeSystem<const N: usize> {
    /// Evaluate the right hand side f(t, y).
    fn rhs(&self, t: Real, y: &[Real; N]) -> [Real; N];
}

impl<F, const N: usize> OdeSystem<N> for F
where
    F: Fn(Real, &[Real; N]) -> [Real; N],
{
    fn rhs(&self, t: Real, y: &[Real; N]) -> [Real; N] {
        self(t, y)
    }
}
