use std::fmt;

use crate::{
    mesh::{Grid, Mesh},
    method::Method,
    methods, Parameters, Problem,
};

#[derive(Debug, Clone)]
pub struct Simulation<M> {
    pub(crate) problem: Problem,
    pub(crate) mesh: Mesh,
    pub(crate) method: M,
}

impl Simulation<methods::ForwardEuler> {
    pub fn new(problem: Problem, params: Parameters) -> Self {
        let (lower, upper) = problem.domain;
        let mesh = Mesh::new(
            Grid::from_steps(lower, upper, params.points),
            params.final_time,
        );

        Self {
            problem,
            mesh,
            method: methods::ForwardEuler,
        }
    }
}

impl<M: Method> Simulation<M> {
    pub fn with_method<N: Method + Default>(self) -> Simulation<N> {
        Simulation {
            problem: self.problem,
            mesh: self.mesh,
            method: N::default(),
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn method(&self) -> &M {
        &self.method
    }
}

impl<M: Method> fmt::Display for Simulation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "simulation of `{}` problem:\n\t- `{}` method\n\t- Δx = {:e} ({} points)\n\t- Δt = {:e} ({} steps up to t = {})",
            self.problem.name,
            self.method.name(),
            self.mesh.space.delta,
            self.mesh.space.steps,
            self.mesh.delta_t,
            self.mesh.time_steps(),
            self.mesh.final_time
        )
    }
}
