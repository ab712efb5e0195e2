use faer_core::Mat;

use crate::{faer_add::linspace, Float};

/// Largest explicit time step that keeps the upwind/central scheme stable on
/// a grid of spacing `dx`.
pub fn stable_time_step(dx: Float) -> Float {
    (0.5 * dx).min(0.25 * dx * dx)
}

pub fn is_stable(dt: Float, dx: Float) -> bool {
    dt <= 0.5 * dx && dt <= 0.25 * dx * dx
}

// grid[0] <-> lower
// grid[i] <-> lower + i * delta forall i < steps
// grid[steps] would be upper, which wraps back onto grid[0] and is not stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub(crate) lower: Float,
    pub(crate) upper: Float,
    pub(crate) delta: Float,
    pub(crate) steps: usize,
}

impl Grid {
    pub fn from_steps(lower: Float, upper: Float, steps: usize) -> Self {
        let delta = (upper - lower) / steps as Float;
        Self {
            lower,
            upper,
            delta,
            steps,
        }
    }

    pub fn lower(&self) -> Float {
        self.lower
    }

    pub fn upper(&self) -> Float {
        self.upper
    }

    pub fn delta(&self) -> Float {
        self.delta
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn iter(self) -> impl Iterator<Item = Float> {
        (0..self.steps).map(move |i| self.lower + self.delta * i as Float)
    }

    /// Grid coordinates as a column vector.
    pub fn get(&self) -> Mat<Float> {
        linspace(self.lower, self.steps, self.delta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub(crate) space: Grid,
    pub(crate) delta_t: Float,
    pub(crate) final_time: Float,
}

impl Mesh {
    pub fn new(space: Grid, final_time: Float) -> Self {
        let delta_t = stable_time_step(space.delta);
        debug_assert!(is_stable(delta_t, space.delta));

        Self {
            space,
            delta_t,
            final_time,
        }
    }

    pub fn space(&self) -> Grid {
        self.space
    }

    pub fn time_step(&self) -> Float {
        self.delta_t
    }

    pub fn final_time(&self) -> Float {
        self.final_time
    }

    /// Number of iterations of the time loop. Replays the `t += dt`
    /// accumulation so the count agrees with the driver bit for bit.
    pub fn time_steps(&self) -> usize {
        let mut t = 0.0;
        let mut n = 0;
        while t < self.final_time {
            t += self.delta_t;
            n += 1;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn periodic(n: usize) -> Grid {
        Grid::from_steps(0.0, 2.0 * PI, n)
    }

    #[test]
    fn spacing_and_time_step_follow_grid_size() {
        for n in [3, 4, 7, 16, 64, 100, 1000] {
            let mesh = Mesh::new(periodic(n), 0.5);
            let dx = 2.0 * PI / n as Float;
            assert_eq!(mesh.space().delta(), dx);
            assert_eq!(mesh.time_step(), (0.5 * dx).min(0.25 * dx * dx));
            assert!(is_stable(mesh.time_step(), dx));
        }
    }

    #[test]
    fn coarse_grids_are_advection_limited() {
        // 0.25 dx^2 > 0.5 dx as soon as dx > 2
        let mesh = Mesh::new(periodic(3), 0.5);
        assert_eq!(mesh.time_step(), 0.5 * mesh.space().delta());
    }

    #[test]
    fn fine_grids_are_diffusion_limited() {
        let mesh = Mesh::new(periodic(64), 0.5);
        let dx = mesh.space().delta();
        assert_eq!(mesh.time_step(), 0.25 * dx * dx);
        assert_relative_eq!(dx, 0.0981748, max_relative = 1e-6);
        assert_relative_eq!(mesh.time_step(), 0.0024096, max_relative = 1e-4);
    }

    #[test]
    fn coordinates_increase_and_stay_below_upper_bound() {
        for n in [1, 2, 3, 10, 64, 513] {
            let grid = periodic(n);
            let x = grid.get();
            assert_eq!(x.nrows(), n);
            assert_eq!(x[(0, 0)], 0.0);
            for i in 1..n {
                assert!(x[(i, 0)] > x[(i - 1, 0)]);
                assert_eq!(x[(i, 0)], i as Float * grid.delta());
            }
            assert!(x[(n - 1, 0)] < 2.0 * PI);
        }
    }

    #[test]
    fn iter_matches_column() {
        let grid = periodic(12);
        let x = grid.get();
        for (i, xi) in grid.iter().enumerate() {
            assert_eq!(xi, x[(i, 0)]);
        }
        assert_eq!(grid.iter().count(), 12);
    }

    #[test]
    fn time_steps_cover_final_time() {
        let mesh = Mesh::new(periodic(64), 0.5);
        assert_eq!(mesh.time_steps(), 208);

        let mesh = Mesh::new(periodic(16), 0.5);
        assert_eq!(mesh.time_steps(), 13);
    }
}
