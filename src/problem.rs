use core::fmt;
use std::f64::consts::PI;

use crate::Float;

/// A scalar PDE of the form `u_t + a u_x = nu u_xx` on a periodic domain,
/// together with its initial condition and closed-form solution.
///
/// The only problem shipped here has `a = nu = 1`; both coefficients are
/// baked into the stencil rather than stored.
#[derive(Clone)]
pub struct Problem {
    pub(crate) name: String,
    pub(crate) domain: (Float, Float),
    pub(crate) u0: fn(Float) -> Float,
    pub(crate) exact: fn(Float, Float) -> Float,
}

fn sine(x: Float) -> Float {
    x.sin()
}

fn damped_travelling_sine(x: Float, t: Float) -> Float {
    (-t).exp() * (x - t).sin()
}

impl Problem {
    /// `u(x, 0) = sin(x)` on `[0, 2π)`, with exact solution `e^{-t} sin(x - t)`.
    pub fn advection_diffusion() -> Self {
        Self {
            name: "advection_diffusion_periodic".to_string(),
            domain: (0.0, 2.0 * PI),
            u0: sine,
            exact: damped_travelling_sine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> (Float, Float) {
        self.domain
    }

    pub fn initial(&self, x: Float) -> Float {
        (self.u0)(x)
    }

    pub fn exact(&self, x: Float, t: Float) -> Float {
        (self.exact)(x, t)
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("u0", &"<fn(x)>")
            .field("exact", &"<fn(x, t)>")
            .finish()
    }
}
