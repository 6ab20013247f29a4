//! End-to-end run: read both inputs, seed the graph, evaluate, write verdicts.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::evaluator::{Feature, FeatureEvaluator};
use crate::graph::{GraphStatistics, SocialGraph};
use crate::stream::{read_edges, write_verdicts, BatchCounts, EdgeBatch};

/// What a run read, built and decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Seed batch record counts.
    pub batch: BatchCounts,
    /// Live stream record counts.
    pub stream: BatchCounts,
    /// Shape of the seed graph.
    pub seed: GraphStatistics,
    /// Per-feature verdict totals, in feature order.
    pub features: Vec<FeatureSummary>,
}

/// Verdict totals of one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    /// The feature.
    pub feature: Feature,
    /// Trusted transactions.
    pub trusted: usize,
    /// Unverified transactions.
    pub unverified: usize,
    /// File the verdicts were written to.
    pub output: PathBuf,
}

/// Executes a full run described by `config`.
///
/// # Errors
/// Fails on an invalid configuration or any I/O error. Malformed records are
/// skipped, not reported as errors.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let batch = read_file(&config.batch, config.verbose)?;
    info!(path = %config.batch.display(), records = batch.edges.len(), skipped = batch.skipped, "read batch");
    let stream = read_file(&config.stream, config.verbose)?;
    info!(path = %config.stream.display(), records = stream.edges.len(), skipped = stream.skipped, "read stream");

    let seed = SocialGraph::from_edges(batch.edges.iter().copied());
    let statistics = seed.statistics();
    info!(nodes = statistics.node_count, edges = statistics.edge_count, "seed graph built");

    let evaluator = FeatureEvaluator::new(seed);
    let verdicts = if config.parallel {
        evaluator.run_parallel(&stream.edges)
    } else {
        evaluator.run_serial(&stream.edges)
    };

    let mut features = Vec::with_capacity(Feature::ALL.len());
    for (feature, output) in Feature::ALL.into_iter().zip(&config.outputs) {
        let feature_verdicts = verdicts.get(feature);
        write_file(output, |file| write_verdicts(file, feature_verdicts))?;

        let trusted = verdicts.trusted_count(feature);
        info!(%feature, trusted, path = %output.display(), "verdicts written");
        features.push(FeatureSummary {
            feature,
            trusted,
            unverified: feature_verdicts.len() - trusted,
            output: output.clone(),
        });
    }

    Ok(RunSummary {
        batch: batch.counts(),
        stream: stream.counts(),
        seed: statistics,
        features,
    })
}

fn read_file(path: &Path, verbose: bool) -> Result<EdgeBatch> {
    let file = File::open(path).map_err(|source| Error::io(path, source))?;
    read_edges(BufReader::new(file), verbose).map_err(|source| Error::io(path, source))
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|source| Error::io(path, source))?;
    write(BufWriter::new(file)).map_err(|source| Error::io(path, source))
}
