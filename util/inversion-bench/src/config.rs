use std::path::PathBuf;

use anyhow::ensure;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use inversion_count::{divide_and_conquer, natural, patterns, Counter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    DivideAndConquer,
    Natural,
}

impl CounterKind {
    pub const ALL: [CounterKind; 2] = [CounterKind::DivideAndConquer, CounterKind::Natural];

    pub fn name(self) -> String {
        match self {
            CounterKind::DivideAndConquer => divide_and_conquer::CounterImpl::name(),
            CounterKind::Natural => natural::CounterImpl::name(),
        }
    }

    #[inline]
    pub fn count(self, v: &mut [i32]) -> u64 {
        match self {
            CounterKind::DivideAndConquer => divide_and_conquer::CounterImpl::count(v),
            CounterKind::Natural => natural::CounterImpl::count(v),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Uniformly random values.
    Random,
    /// Uniformly random values, sorted in chunks of `--run-len`.
    Presorted,
}

impl PatternKind {
    pub const ALL: [PatternKind; 2] = [PatternKind::Random, PatternKind::Presorted];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Random => "random",
            PatternKind::Presorted => "presorted",
        }
    }

    pub fn generate(self, config: &TrialConfig) -> Vec<i32> {
        let range = config.min..=config.max;
        match self {
            PatternKind::Random => patterns::random_uniform(config.len, range),
            PatternKind::Presorted => patterns::presorted_uniform(config.len, config.run_len, range),
        }
    }
}

/// Times the inversion counters on random and presorted inputs.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct TrialConfig {
    /// Number of elements per input.
    #[arg(long, default_value_t = 1_000_000)]
    pub len: usize,

    /// Smallest generated value.
    #[arg(long, default_value_t = -100_000, allow_negative_numbers = true)]
    pub min: i32,

    /// Largest generated value.
    #[arg(long, default_value_t = 100_000, allow_negative_numbers = true)]
    pub max: i32,

    /// Length of the independently sorted chunks of the presorted input.
    #[arg(long, default_value_t = 2_000)]
    pub run_len: usize,

    /// Untimed iterations per trial.
    #[arg(long, default_value_t = 5)]
    pub warmup: usize,

    /// Timed iterations per trial.
    #[arg(long, default_value_t = 10)]
    pub iterations: usize,

    /// Independent trials, each with freshly generated inputs.
    #[arg(long, default_value_t = 1)]
    pub forks: usize,

    /// Only run these counters, may be repeated. Runs all by default.
    #[arg(long = "counter", value_enum)]
    pub counters: Vec<CounterKind>,

    /// Only use these inputs, may be repeated. Uses all by default.
    #[arg(long = "pattern", value_enum)]
    pub patterns: Vec<PatternKind>,

    /// Run the forks on separate threads.
    #[arg(long)]
    pub concurrent: bool,

    /// Also write the results as JSON to this file.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Generate every input from this seed instead of a fresh random one.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TrialConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.min <= self.max,
            "--min {} is larger than --max {}",
            self.min,
            self.max
        );
        ensure!(self.run_len >= 1, "--run-len must be at least 1");
        // The spread estimate looks at samples on both sides of the median.
        ensure!(
            self.iterations >= 3,
            "--iterations must be at least 3, got {}",
            self.iterations
        );
        ensure!(self.forks >= 1, "--forks must be at least 1");

        Ok(())
    }

    pub fn counters(&self) -> Vec<CounterKind> {
        selected_or_all(&self.counters, &CounterKind::ALL)
    }

    pub fn patterns(&self) -> Vec<PatternKind> {
        selected_or_all(&self.patterns, &PatternKind::ALL)
    }
}

fn selected_or_all<T: Copy + Ord>(selected: &[T], all: &[T]) -> Vec<T> {
    let mut kinds = if selected.is_empty() {
        all.to_vec()
    } else {
        selected.to_vec()
    };
    kinds.sort();
    kinds.dedup();
    kinds
}
