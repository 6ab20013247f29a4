//! Run configuration.
//!
//! A run names two inputs (the seed batch and the live stream) and one output
//! file per feature. Configurations come either from the command line or from
//! a JSON file:
//!
//! ```json
//! {
//!   "batch": "paymo_input/batch_payment.csv",
//!   "stream": "paymo_input/stream_payment.csv",
//!   "outputs": ["out/output1.txt", "out/output2.txt", "out/output3.txt"],
//!   "verbose": false,
//!   "parallel": true
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::evaluator::Feature;

/// Paths and switches for one end-to-end run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Historical transactions used to seed the graph.
    pub batch: PathBuf,
    /// Transactions to verify, in order.
    pub stream: PathBuf,
    /// One verdict file per feature, in feature order.
    pub outputs: Vec<PathBuf>,
    /// Log every skipped record with its contents.
    #[serde(default)]
    pub verbose: bool,
    /// Run the feature passes concurrently.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Config {
    /// Builds a configuration with default switches.
    pub fn new(
        batch: impl Into<PathBuf>,
        stream: impl Into<PathBuf>,
        outputs: [PathBuf; 3],
    ) -> Self {
        Self {
            batch: batch.into(),
            stream: stream.into(),
            outputs: outputs.into(),
            verbose: false,
            parallel: default_parallel(),
        }
    }

    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    /// Fails if the file cannot be read, is not a valid configuration, or
    /// does not name exactly one output per feature.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        let config: Self = serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that there is exactly one output path per feature.
    ///
    /// # Errors
    /// [`Error::OutputCount`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let expected = Feature::ALL.len();
        if self.outputs.len() == expected {
            Ok(())
        } else {
            Err(Error::OutputCount {
                expected,
                found: self.outputs.len(),
            })
        }
    }

    /// Output path for `feature`, if configured.
    pub fn output_for(&self, feature: Feature) -> Option<&Path> {
        self.outputs.get(feature.index()).map(PathBuf::as_path)
    }
}
