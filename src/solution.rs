use core::fmt;

use faer_core::{Mat, MatRef};

use crate::{output::General, Float, Problem};

/// Final state of a run.
#[derive(Debug, Clone)]
pub struct Solution {
    pub(crate) x: Mat<Float>,
    pub(crate) u: Mat<Float>,
    pub(crate) time: Float,
    pub(crate) steps: usize,
    pub(crate) time_step: Float,
    pub(crate) space_step: Float,
}

impl Solution {
    pub fn coordinates(&self) -> MatRef<'_, Float> {
        self.x.as_ref()
    }

    pub fn values(&self) -> MatRef<'_, Float> {
        self.u.as_ref()
    }

    /// Time reached by the loop; the first `t >= tfinal`, not `tfinal` itself.
    pub fn time(&self) -> Float {
        self.time
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn time_step(&self) -> Float {
        self.time_step
    }

    pub fn space_step(&self) -> Float {
        self.space_step
    }

    /// Exact solution sampled on the grid at the final time.
    pub fn exact(&self, problem: &Problem) -> Mat<Float> {
        Mat::from_fn(self.x.nrows(), 1, |i, _| {
            problem.exact(self.x[(i, 0)], self.time)
        })
    }

    /// `(1/N) Σ |u_i - exact(x_i, t)|`
    pub fn mean_absolute_error(&self, problem: &Problem) -> Float {
        let n = self.u.nrows();
        let mut error = 0.0;
        for i in 0..n {
            error += (self.u[(i, 0)] - problem.exact(self.x[(i, 0)], self.time)).abs();
        }
        error / n as Float
    }

    pub fn summary(&self, problem: &Problem) -> Summary {
        Summary {
            time_step: self.time_step,
            space_step: self.space_step,
            error: self.mean_absolute_error(problem),
        }
    }
}

/// End-of-run report, printed as `(dt,dx,error) = (..,..,..)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub time_step: Float,
    pub space_step: Float,
    pub error: Float,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(dt,dx,error) = ({},{},{})",
            General(self.time_step),
            General(self.space_step),
            General(self.error)
        )
    }
}
