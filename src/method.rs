use faer_core::{MatMut, MatRef};

use crate::{Float, Mesh};

/// A two-level explicit scheme: computes the field at `t + dt` into `next`
/// from the field at `t` in `current`.
pub trait Method {
    fn apply(&mut self, mesh: &Mesh, current: MatRef<'_, Float>, next: MatMut<'_, Float>);
    fn name(&self) -> &'static str;
}
