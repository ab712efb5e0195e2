use std::{io::Write, path::PathBuf};

use faer_core::{Mat, MatRef};
use thiserror::Error;

use crate::{
    config::ConfigError, faer_add::apply_func, method::Method, output::General, sim::Simulation,
    Float, Mesh, Problem, Solution,
};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("output error")]
    Io(#[from] std::io::Error),
    #[error("couldn't write `{}`", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy)]
pub struct ObsCtx<'ctx> {
    // Meta
    problem: &'ctx Problem,
    mesh: &'ctx Mesh,
    method: &'ctx dyn Method,

    // Iteration info
    iter: usize,
    time: Float,
    solution: MatRef<'ctx, Float>,
}

impl<'ctx> ObsCtx<'ctx> {
    pub fn problem(&self) -> &Problem {
        self.problem
    }

    pub fn mesh(&self) -> &Mesh {
        self.mesh
    }

    pub fn method(&self) -> &dyn Method {
        self.method
    }

    pub fn iter(&self) -> usize {
        self.iter
    }

    pub fn time(&self) -> Float {
        self.time
    }

    pub fn solution(&self) -> MatRef<'_, Float> {
        self.solution
    }
}

/// Hooks into the time loop. `at_each_iteration` sees the field *before*
/// the step is applied, together with the time it corresponds to.
#[allow(unused_variables)]
pub trait Observer {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }
}

pub struct Driver<'d, M> {
    pub(crate) sim: Simulation<M>,
    pub(crate) observers: Vec<Box<dyn Observer + 'd>>,
}

impl<'d, M: Method> Driver<'d, M> {
    pub fn new(sim: Simulation<M>) -> Self {
        Self {
            sim,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: impl Observer + 'd) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn simulation(&self) -> &Simulation<M> {
        &self.sim
    }

    /// Steps from `t = 0` until `t >= tfinal` and returns the final state.
    pub fn run(&mut self) -> Result<Solution, SimError> {
        let Simulation {
            problem,
            mesh,
            method,
        } = &mut self.sim;
        let (problem, mesh) = (&*problem, &*mesh);

        let x = mesh.space.get();
        let mut u = apply_func(&x, |x| problem.initial(x));
        let mut v = Mat::<Float>::zeros(mesh.space.steps, 1);

        let mut t: Float = 0.0;
        let mut n = 0;

        for o in self.observers.iter_mut() {
            o.at_startup(ObsCtx {
                problem,
                mesh,
                method: &*method,
                iter: n,
                time: t,
                solution: u.as_ref(),
            })?;
        }

        while t < mesh.final_time {
            for o in self.observers.iter_mut() {
                o.at_each_iteration(ObsCtx {
                    problem,
                    mesh,
                    method: &*method,
                    iter: n,
                    time: t,
                    solution: u.as_ref(),
                })?;
            }

            // apply numerical method to u into v, then v becomes current
            method.apply(mesh, u.as_ref(), v.as_mut());
            std::mem::swap(&mut u, &mut v);

            t += mesh.delta_t;
            n += 1;
        }

        for o in self.observers.iter_mut() {
            o.at_cleanup(ObsCtx {
                problem,
                mesh,
                method: &*method,
                iter: n,
                time: t,
                solution: u.as_ref(),
            })?;
        }

        Ok(Solution {
            x,
            u,
            time: t,
            steps: n,
            time_step: mesh.delta_t,
            space_step: mesh.space.delta,
        })
    }
}

pub struct Logger;

impl Observer for Logger {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "start of simulation of problem `{}` (`{}` method, Δx={:e} ({} points), Δt={:e} ({} steps))",
            ctx.problem().name(),
            ctx.method().name(),
            ctx.mesh().space.delta,
            ctx.mesh().space.steps,
            ctx.mesh().delta_t,
            ctx.mesh().time_steps(),
        );
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::TRACE,
            "problem `{}`: step {} at t = {:e}",
            ctx.problem().name(),
            ctx.iter(),
            ctx.time()
        );
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "finished simulation of problem `{}` after {} steps (t = {:e})",
            ctx.problem().name(),
            ctx.iter(),
            ctx.time()
        );
        Ok(())
    }
}

/// Prints `t = <time>` before every step.
pub struct Progress<W> {
    output: W,
}

impl<W: Write> Progress<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write> Observer for Progress<W> {
    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        writeln!(self.output, "t = {}", General(ctx.time()))?;
        Ok(())
    }

    fn at_cleanup(&mut self, _ctx: ObsCtx) -> Result<(), SimError> {
        self.output.flush().map_err(SimError::from)
    }
}
