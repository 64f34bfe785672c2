use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use streammedian::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logger();

    match App::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Print the running median of numbers read from files or standard input
#[derive(Parser)]
#[clap(name = "streammedian")]
#[clap(version)]
struct App {
    /// Input files with whitespace separated numbers; `-` or nothing reads stdin
    inputs: Vec<PathBuf>,

    /// Estimator used to track the median
    #[clap(long, value_enum, default_value_t = EstimatorKind::TwoHeap)]
    estimator: EstimatorKind,

    /// Print the running median after every N values; 0 prints only the final one
    #[clap(long, default_value_t = 0)]
    every: u64,

    /// Fail on the first token that is not a finite number instead of skipping it
    #[clap(long)]
    strict: bool,

    /// Extra ranks in [0, 1] to report at the end, e.g. `--quantile 0.9,0.99` (sorted estimator only)
    #[clap(long, value_delimiter = ',', value_parser = parse_rank)]
    quantile: Vec<f64>,
}

fn parse_rank(s: &str) -> Result<f64, String> {
    let rank = s.parse::<f64>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&rank) {
        Ok(rank)
    } else {
        Err(format!("rank must be within [0, 1], got {rank}"))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EstimatorKind {
    /// Two heaps: O(log n) insert, O(1) median
    TwoHeap,
    /// Sorted buffer: O(n) insert, O(1) median and quantiles
    Sorted,
}

impl App {
    fn run(self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());

        match self.estimator {
            EstimatorKind::TwoHeap => {
                anyhow::ensure!(
                    self.quantile.is_empty(),
                    "--quantile requires --estimator sorted"
                );
                let mut estimator = TwoHeapMedian::new();
                self.ingest_all(&mut estimator, &mut out)?;
                report_median(&estimator, &mut out)?;
            }
            EstimatorKind::Sorted => {
                let mut estimator = SortedMedian::new();
                self.ingest_all(&mut estimator, &mut out)?;
                report_median(&estimator, &mut out)?;
                for &rank in &self.quantile {
                    let value = estimator.quantile(rank)?;
                    writeln!(out, "q{rank}\t{value}")?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    fn ingest_all<E, W>(&self, estimator: &mut E, out: &mut W) -> Result<()>
    where
        E: MedianEstimator<Value = f64>,
        W: Write,
    {
        let mut ingest = Ingest::new(self.every, self.strict);

        if self.inputs.is_empty() {
            ingest.read("<stdin>", std::io::stdin().lock(), estimator, out)?;
        }
        for path in &self.inputs {
            if path == Path::new("-") {
                ingest.read("<stdin>", std::io::stdin().lock(), estimator, out)?;
                continue;
            }
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let name = path.display().to_string();
            ingest.read(&name, BufReader::new(file), estimator, out)?;
        }

        tracing::info!(
            accepted = estimator.count(),
            skipped = ingest.skipped,
            "finished reading input"
        );
        Ok(())
    }
}

fn report_median<E: MedianEstimator, W: Write>(estimator: &E, out: &mut W) -> Result<()> {
    let median = estimator
        .median()
        .context("input contained no usable numbers")?;
    writeln!(out, "median\t{median}")?;
    Ok(())
}

/// Feeds tokens from text sources into an estimator
struct Ingest {
    every: u64,
    strict: bool,
    skipped: u64,
}

impl Ingest {
    fn new(every: u64, strict: bool) -> Self {
        Self {
            every,
            strict,
            skipped: 0,
        }
    }

    fn read<R, E, W>(&mut self, source: &str, reader: R, estimator: &mut E, out: &mut W) -> Result<()>
    where
        R: BufRead,
        E: MedianEstimator<Value = f64>,
        W: Write,
    {
        tracing::debug!(source, "reading values");

        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("failed to read {source}"))?;
            let line_no = index + 1;

            for token in line.split_whitespace() {
                if let Err(err) = self.accept(token, estimator) {
                    if self.strict {
                        return Err(err).with_context(|| format!("{source}:{line_no}"));
                    }
                    self.skipped += 1;
                    tracing::warn!(source, line = line_no, token, "skipping value: {err}");
                    continue;
                }

                let count = estimator.count();
                if self.every > 0 && count % self.every == 0 {
                    writeln!(out, "{count}\t{}", estimator.median()?)?;
                }
            }
        }
        Ok(())
    }

    fn accept<E>(&self, token: &str, estimator: &mut E) -> Result<()>
    where
        E: MedianEstimator<Value = f64>,
    {
        let value = token
            .parse::<f64>()
            .with_context(|| format!("`{token}` is not a number"))?;
        estimator.add(value)?;
        tracing::trace!(value, "accepted");
        Ok(())
    }
}
