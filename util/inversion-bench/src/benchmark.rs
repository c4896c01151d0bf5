use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};

use crate::config::{CounterKind, PatternKind, TrialConfig};
use crate::measure::measure_duration;

/// All timings and counts of one counter on one input kind, gathered over every fork.
#[derive(Clone, Debug)]
pub struct Measurement {
    pub counter: CounterKind,
    pub pattern: PatternKind,
    pub inversions: u64,
    pub durations: Vec<Duration>,
}

/// Runs every selected counter on every selected input kind, `config.forks` times with fresh
/// inputs per fork.
pub fn run_all(config: &TrialConfig) -> anyhow::Result<Vec<Measurement>> {
    let forks = if config.concurrent {
        thread::scope(|s| {
            let handles = (0..config.forks)
                .map(|fork| s.spawn(move || run_fork(config, fork)))
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .map_err(|_| anyhow!("benchmark thread panicked"))
                        .and_then(|result| result)
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })?
    } else {
        // Pin the benchmark to the same core to improve repeatability.
        pin_thread_to_core();

        (0..config.forks)
            .map(|fork| run_fork(config, fork))
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    merge_forks(forks)
}

fn run_fork(config: &TrialConfig, fork: usize) -> anyhow::Result<Vec<Measurement>> {
    let mut measurements = Vec::new();

    for pattern in config.patterns() {
        let input = pattern.generate(config);
        log::debug!(
            "fork {fork}: generated {} input with {} elements",
            pattern.name(),
            input.len()
        );

        let mut expected = None;
        for counter in config.counters() {
            let measurement =
                run_trial(config, counter, pattern, &input).with_context(|| {
                    format!("fork {fork}: {} on {}", counter.name(), pattern.name())
                })?;

            // Every counter sees the same input, so they all have to agree.
            match expected {
                None => expected = Some((counter, measurement.inversions)),
                Some((first, count)) if count != measurement.inversions => {
                    log::error!(
                        "{} counted {count} but {} counted {} on the same {} input",
                        first.name(),
                        counter.name(),
                        measurement.inversions,
                        pattern.name()
                    );
                    bail!(
                        "counters disagree on fork {fork} {} input: {count} vs {}",
                        pattern.name(),
                        measurement.inversions
                    );
                }
                Some(_) => {}
            }

            measurements.push(measurement);
        }
    }

    Ok(measurements)
}

fn run_trial(
    config: &TrialConfig,
    counter: CounterKind,
    pattern: PatternKind,
    input: &[i32],
) -> anyhow::Result<Measurement> {
    let mut inversions = None;

    for _ in 0..config.warmup {
        // Counting sorts the input, so every iteration gets its own copy.
        let mut v = input.to_vec();
        check_count(&mut inversions, counter.count(&mut v))?;
    }

    let mut durations = Vec::with_capacity(config.iterations);
    for iteration in 0..config.iterations {
        let mut v = input.to_vec();
        let (duration, count) = measure_duration(|| counter.count(&mut v));
        log::debug!(
            "{} {} iteration {iteration}: {count} inversions in {:.3} ms",
            counter.name(),
            pattern.name(),
            duration.as_secs_f64() * 1e3
        );

        check_count(&mut inversions, count)?;
        durations.push(duration);
    }

    Ok(Measurement {
        counter,
        pattern,
        inversions: inversions.context("no iterations were run")?,
        durations,
    })
}

fn check_count(previous: &mut Option<u64>, count: u64) -> anyhow::Result<()> {
    match *previous {
        None => *previous = Some(count),
        Some(expected) if expected != count => {
            log::error!("count changed between iterations: {expected} then {count}");
            bail!("inconsistent count on identical input: {expected} vs {count}");
        }
        Some(_) => {}
    }

    Ok(())
}

/// Folds the per fork results into one measurement per counter and input kind. Counts of
/// different forks differ, as each fork generates its own inputs, so the last one is kept.
fn merge_forks(forks: Vec<Vec<Measurement>>) -> anyhow::Result<Vec<Measurement>> {
    let mut merged = BTreeMap::<(CounterKind, PatternKind), Measurement>::new();

    for measurement in forks.into_iter().flatten() {
        merged
            .entry((measurement.counter, measurement.pattern))
            .and_modify(|entry| {
                entry.inversions = measurement.inversions;
                entry.durations.extend_from_slice(&measurement.durations);
            })
            .or_insert(measurement);
    }

    if merged.is_empty() {
        bail!("nothing was measured");
    }

    Ok(merged.into_values().collect())
}

fn pin_thread_to_core() {
    let pin_core_id: usize = 2;

    match core_affinity::get_core_ids()
        .as_ref()
        .and_then(|ids| ids.get(pin_core_id))
    {
        Some(core_id) => {
            if !core_affinity::set_for_current(*core_id) {
                log::warn!("failed to pin benchmark thread to core {pin_core_id}");
            }
        }
        None => log::warn!("core {pin_core_id} not available, benchmark thread is not pinned"),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn small_config(args: &[&str]) -> TrialConfig {
        let base = ["inversion-bench", "--len", "500", "--run-len", "50"];
        TrialConfig::parse_from(base.iter().chain(args.iter()).copied())
    }

    #[test]
    fn counters_agree_and_all_iterations_are_kept() {
        let config = small_config(&["--warmup", "1", "--iterations", "3", "--forks", "2"]);
        let measurements = run_all(&config).unwrap();

        assert_eq!(measurements.len(), 4);
        for measurement in &measurements {
            assert_eq!(measurement.durations.len(), 6);
        }
    }

    #[test]
    fn concurrent_forks() {
        let config = small_config(&["--concurrent", "--forks", "3", "--counter", "natural"]);
        let measurements = run_all(&config).unwrap();

        assert_eq!(measurements.len(), 2);
        assert!(measurements
            .iter()
            .all(|m| m.counter == CounterKind::Natural && m.durations.len() == 30));
    }

    #[test]
    fn inconsistent_counts_are_reported() {
        let mut previous = None;
        assert!(check_count(&mut previous, 7).is_ok());
        assert!(check_count(&mut previous, 7).is_ok());
        assert!(check_count(&mut previous, 8).is_err());
    }
}
