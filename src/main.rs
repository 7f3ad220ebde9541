use anyhow::{Context, Result};
use clap::Parser;
use dispatchsim::{prompt_counts, runner, PriorityJitter, RunConfig, DEFAULT_WINDOW_SECS};

#[derive(Parser)]
#[command(name = "dispatchsim")]
#[command(about = "Simulate ride-share dispatch for a fleet of drivers and a batch of ride requests")]
struct Cli {
    /// Number of drivers in the fleet. Both counts are asked for on stdin when neither is given
    #[arg(requires = "requests")]
    drivers: Option<usize>,

    /// Number of ride requests to generate
    requests: Option<usize>,

    /// Seed for the request generator, to replay an earlier run
    #[arg(long)]
    seed: Option<u64>,

    /// Length in seconds of the window over which requests are issued
    #[arg(long, default_value_t = DEFAULT_WINDOW_SECS)]
    window_secs: u64,

    /// Clock time in seconds at which the simulation starts
    #[arg(long, default_value_t = 0)]
    start_time: u64,

    /// Nudge priorities with the legacy distance hash instead of breaking ties by estimated arrival
    #[arg(long)]
    legacy_jitter: bool,

    /// Print the summary without the list of finished requests
    #[arg(long)]
    no_history: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let (drivers, requests) = match (cli.drivers, cli.requests) {
        (Some(drivers), Some(requests)) => (drivers, requests),
        _ => prompt_counts(std::io::stdin().lock(), std::io::stdout()).context("reading driver and request counts")?,
    };

    let config = RunConfig {
        start_time: cli.start_time,
        window_secs: cli.window_secs,
        seed: cli.seed,
        jitter: if cli.legacy_jitter {
            PriorityJitter::LegacyDistanceHash
        } else {
            PriorityJitter::None
        },
        ..RunConfig::new(drivers, requests)
    };

    let outcome = runner::run(&config).with_context(|| format!("running simulation with {:?}", config))?;
    log::info!("run with seed {} ended at {}", outcome.seed, outcome.end_time);

    let report = if cli.no_history {
        outcome.report.without_history()
    } else {
        outcome.report
    };
    println!("{}", report);
    println!("Seed: {}", outcome.seed);
    Ok(())
}
