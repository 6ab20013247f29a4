//! Stream adapter: turns payment files into edges and verdicts into lines.

mod record;

pub use record::parse_record;

use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::evaluator::Verdict;
use crate::graph::{Edge, UserId};

/// Edges read from one input, with bookkeeping about what was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeBatch {
    /// Well-formed edges, in file order.
    pub edges: Vec<Edge<UserId>>,
    /// Lines skipped because they were malformed.
    pub skipped: usize,
}

impl EdgeBatch {
    /// Counts for run summaries.
    pub fn counts(&self) -> BatchCounts {
        BatchCounts {
            records: self.edges.len(),
            skipped: self.skipped,
        }
    }
}

/// Record counts of one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchCounts {
    /// Edges kept.
    pub records: usize,
    /// Malformed lines skipped.
    pub skipped: usize,
}

/// Reads every record after the header line.
///
/// Malformed records are skipped. With `verbose`, each one is logged at
/// `warn` together with its line; otherwise only at `debug`. Lines are
/// decoded lossily, so invalid UTF-8 in the message column costs nothing and
/// invalid UTF-8 in an id column costs only that record.
///
/// # Errors
/// Propagates I/O errors from `reader`.
pub fn read_edges<R: BufRead>(mut reader: R, verbose: bool) -> io::Result<EdgeBatch> {
    let mut batch = EdgeBatch::default();
    let mut buf = Vec::new();

    // header
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(batch);
    }

    let mut line_number: usize = 1;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        match parse_record(line) {
            Ok(edge) => batch.edges.push(edge),
            Err(err) => {
                batch.skipped += 1;
                if verbose {
                    warn!(line_number, %err, line = %line, "skipping record");
                } else {
                    debug!(line_number, %err, "skipping record");
                }
            }
        }
    }

    Ok(batch)
}

/// Writes one verdict token per line.
///
/// # Errors
/// Propagates I/O errors from `writer`.
pub fn write_verdicts<W: Write>(mut writer: W, verdicts: &[Verdict]) -> io::Result<()> {
    for verdict in verdicts {
        writeln!(writer, "{verdict}")?;
    }
    writer.flush()
}
