use faer_core::{zipped, MatMut, MatRef};
use reborrow::*;

use crate::{method::Method, Float, Mesh};

// first-order backward difference for `-u_x`, second-order central
// difference for `u_xx`, forward Euler in time
#[inline]
fn stencil(um: Float, u: Float, up: Float, dt: Float, dxi: Float) -> Float {
    u + dt * (-(u - um) * dxi + (up - 2.0 * u + um) * dxi * dxi)
}

/// Forward Euler with an upwind advection term and a central diffusion term.
///
/// Periodicity is handled by special-casing the two end points; no ghost
/// cells are allocated. Requires at least three grid points.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForwardEuler;

impl Method for ForwardEuler {
    fn apply(&mut self, mesh: &Mesh, u: MatRef<'_, Float>, mut v: MatMut<'_, Float>) {
        let n = u.nrows();
        debug_assert!(n >= 3);
        debug_assert_eq!(n, v.nrows());

        let dt = mesh.time_step();
        let dxi = 1.0 / mesh.space().delta();
        let schema = |um: Float, u: Float, up: Float| stencil(um, u, up, dt, dxi);

        // interior points
        zipped!(
            v.rb_mut().submatrix(1, 0, n - 2, 1),
            u.submatrix(0, 0, n - 2, 1),
            u.submatrix(1, 0, n - 2, 1),
            u.submatrix(2, 0, n - 2, 1)
        )
        .for_each(|mut v, um, u, up| v.write(schema(um.read(), u.read(), up.read())));

        // end points wrap around
        v[(0, 0)] = schema(u[(n - 1, 0)], u[(0, 0)], u[(1, 0)]);
        v[(n - 1, 0)] = schema(u[(n - 2, 0)], u[(n - 1, 0)], u[(0, 0)]);
    }

    fn name(&self) -> &'static str {
        "Forward Euler (upwind advection, central diffusion)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;
    use faer_core::Mat;
    use std::f64::consts::PI;

    fn mesh(n: usize) -> Mesh {
        Mesh::new(Grid::from_steps(0.0, 2.0 * PI, n), 0.5)
    }

    fn step(mesh: &Mesh, u: &Mat<Float>) -> Mat<Float> {
        let mut v = Mat::<Float>::zeros(u.nrows(), 1);
        ForwardEuler.apply(mesh, u.as_ref(), v.as_mut());
        v
    }

    // reference: the whole grid treated as a ring, indices taken modulo n
    fn circular_step(mesh: &Mesh, u: &[Float]) -> Vec<Float> {
        let n = u.len();
        let dt = mesh.time_step();
        let dxi = 1.0 / mesh.space().delta();
        (0..n)
            .map(|i| stencil(u[(i + n - 1) % n], u[i], u[(i + 1) % n], dt, dxi))
            .collect()
    }

    #[test]
    fn constant_field_is_a_fixed_point() {
        let mesh = mesh(10);
        let u = Mat::from_fn(10, 1, |_, _| 0.75);
        let v = step(&mesh, &u);
        for i in 0..10 {
            assert_eq!(v[(i, 0)], 0.75);
        }
    }

    #[test]
    fn boundary_points_use_wrapped_neighbours() {
        let mesh = mesh(5);
        let u = Mat::from_fn(5, 1, |i, _| [1.0, 2.0, 4.0, 8.0, 16.0][i]);
        let v = step(&mesh, &u);

        let dt = mesh.time_step();
        let dxi = 1.0 / mesh.space().delta();
        let first = 1.0 + dt * (-(1.0 - 16.0) * dxi + (2.0 - 2.0 * 1.0 + 16.0) * dxi * dxi);
        let last = 16.0 + dt * (-(16.0 - 8.0) * dxi + (1.0 - 2.0 * 16.0 + 8.0) * dxi * dxi);
        let middle = 4.0 + dt * (-(4.0 - 2.0) * dxi + (8.0 - 2.0 * 4.0 + 2.0) * dxi * dxi);

        assert_eq!(v[(0, 0)], first);
        assert_eq!(v[(4, 0)], last);
        assert_eq!(v[(2, 0)], middle);
    }

    #[test]
    fn seam_matches_circular_indexing_over_many_steps() {
        let n = 48;
        let mesh = mesh(n);
        let x = mesh.space().get();

        let mut u = Mat::from_fn(n, 1, |i, _| x[(i, 0)].sin());
        let mut r: Vec<Float> = (0..n).map(|i| x[(i, 0)].sin()).collect();

        for _ in 0..500 {
            u = step(&mesh, &u);
            r = circular_step(&mesh, &r);
        }

        for i in 0..n {
            assert_eq!(u[(i, 0)].to_bits(), r[i].to_bits(), "mismatch at {i}");
        }
    }

    #[test]
    fn stepping_commutes_with_rotation() {
        let n = 17;
        let mesh = mesh(n);
        let shift = 5;
        let u = Mat::from_fn(n, 1, |i, _| ((i * i) % 7) as Float - 3.0);
        let rotated = Mat::from_fn(n, 1, |i, _| u[((i + shift) % n, 0)]);

        let v = step(&mesh, &u);
        let w = step(&mesh, &rotated);

        for i in 0..n {
            assert_eq!(w[(i, 0)], v[((i + shift) % n, 0)]);
        }
    }

    #[test]
    fn smallest_supported_grid() {
        let mesh = mesh(3);
        let u = Mat::from_fn(3, 1, |i, _| i as Float);
        let v = step(&mesh, &u);
        let r = circular_step(&mesh, &[0.0, 1.0, 2.0]);
        for i in 0..3 {
            assert_eq!(v[(i, 0)], r[i]);
        }
    }
}
