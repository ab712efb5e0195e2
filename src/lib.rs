//! Explicit finite-difference solver for the periodic 1D advection-diffusion
//! equation `u_t = -u_x + u_xx` on `[0, 2π)`.

pub mod config;
pub mod driver;
pub mod faer_add;
pub mod mesh;
pub mod method;
pub mod methods;
pub mod output;
pub mod problem;
pub mod sim;
pub mod solution;

pub type Float = f64;

pub use config::{ConfigError, Parameters};
pub use driver::{Driver, Logger, ObsCtx, Observer, Progress, SimError};
pub use mesh::{Grid, Mesh};
pub use method::Method;
pub use output::{Exporter, General};
pub use problem::Problem;
pub use sim::Simulation;
pub use solution::{Solution, Summary};
