//! One complete run: generate requests, dispatch them, and report on the result.

use crate::{build_simulation, Driver, Report, Request, RequestGenerator, RunConfig};

use rand::Rng;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Seed the request generator was built from. Passing it back in [`RunConfig::seed`] replays the run.
    pub seed: u64,
    /// Clock time when the last event executed.
    pub end_time: u64,
    pub report: Report,
}

impl RunOutcome {
    /// Finished requests in completion order.
    pub fn history(&self) -> &[Request] {
        &self.report.history
    }
}

/// Run the simulation described by `config` to completion.
///
/// # Errors
///
/// [`Error::InvalidConfiguration`] when `config` fails validation. Any error raised while executing events is passed
/// back unchanged and ends the run.
///
/// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
pub fn run(config: &RunConfig) -> crate::Result<RunOutcome> {
    config.validate()?;

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::rng().random();
            log::info!("no seed given, drew {}", seed);
            seed
        }
    };

    let requests = RequestGenerator::seeded(config.start_time, config.window_secs, seed)?
        .with_priority_jitter(config.jitter)
        .generate_batch(config.requests);
    let mut sim = build_simulation(Driver::fleet(config.drivers), requests, config.start_time)?;
    sim.run()?;

    let end_time = *sim.event_queue().current_time();
    let history = sim.into_state().into_finished_requests();
    log::info!("finished {} rides by {}", history.len(), end_time);
    let report = Report::from_history(history, config.drivers)?;
    Ok(RunOutcome { seed, end_time, report })
}
