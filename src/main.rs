use std::{
    error::Error,
    io::{self, Write},
    process::ExitCode,
};

use tracing::{error, info};

use advdiff::{Driver, Exporter, Logger, Parameters, Problem, Progress, SimError, Simulation};

fn run() -> Result<(), SimError> {
    info!("finite difference code for the 1D advection-diffusion equation with periodic BCs");

    {
        let mut stdout = io::stdout().lock();
        write!(stdout, "Input N:")?;
        stdout.flush()?;
    }
    let params = Parameters::from_reader(io::stdin().lock())?;

    let sim = Simulation::new(Problem::advection_diffusion(), params);
    info!("{}", sim);

    let mut driver = Driver::new(sim)
        .with_observer(Logger)
        .with_observer(Progress::new(io::stdout().lock()));
    let solution = driver.run()?;
    let problem = driver.simulation().problem();

    info!("timestepping complete, writing final state");
    for path in Exporter::new(".").export(problem, &solution)? {
        info!("wrote {}", path.display());
    }

    // the progress observer holds the stdout lock until the driver goes away
    let summary = solution.summary(problem);
    drop(driver);
    println!("{}", summary);

    info!("finished");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                error!("caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
