mod benchmark;
mod config;
mod measure;
mod report;

use clap::Parser;

use inversion_count::patterns;

use crate::config::TrialConfig;
use crate::report::Report;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrialConfig::parse();
    config.validate()?;

    match config.seed {
        Some(seed) => {
            if !patterns::set_fixed_seed(seed) {
                log::warn!("seed was already initialized, --seed {seed} is ignored");
            }
        }
        // Every fork should see a different input.
        None => patterns::disable_fixed_seed(),
    }

    log::info!(
        "counting {} elements in [{}, {}], {} warmup and {} timed iterations, {} fork(s){}",
        config.len,
        config.min,
        config.max,
        config.warmup,
        config.iterations,
        config.forks,
        if config.concurrent { " in parallel" } else { "" }
    );

    let measurements = benchmark::run_all(&config)?;
    let report = Report::new(&config, &measurements)?;

    log::info!("finished {} trial(s)", report.results.len());
    report.print();

    if let Some(path) = &config.json {
        report.write_json(path)?;
        log::info!("wrote results to {}", path.display());
    }

    Ok(())
}
