//! # `antifraud` - Transaction Graph Trust Checks
//!
//! Decides, for each payment in a stream, whether the two parties were
//! already close in the graph of earlier payments. Closeness is measured in
//! degrees of separation over an undirected graph that keeps growing while it
//! is queried.
//!
//! ## Architecture
//!
//! 1. **Graph engine** ([`SocialGraph`]):
//!    - Inclusive adjacency sets: every node is its own neighbor
//!    - Thresholds 1, 2 and 4 answered by set intersection, no BFS
//!    - Exact BFS distance for diagnostics
//!
//! 2. **Feature evaluator** ([`FeatureEvaluator`]):
//!    - One independent clone of the seed graph per feature
//!    - Each pass checks a transaction, then records it
//!    - Passes run serially or on separate threads with identical results
//!
//! 3. **Stream adapter** ([`stream`]) and [`pipeline`]:
//!    - Parses payment records, skipping malformed lines
//!    - Writes one `trusted` / `unverified` token per transaction per feature
//!
//! ## Invariants
//!
//! - **Inclusivity**: `x ∈ N[x]` for every node `x` in the graph.
//! - **Symmetry**: `y ∈ N[x] ⟺ x ∈ N[y]`.
//! - **Clone independence**: mutating a clone never affects its source.
//!
//! ## Example
//!
//! ```rust
//! use antifraud::{Degree, Feature, FeatureEvaluator, SocialGraph, Verdict};
//!
//! let seed = SocialGraph::from_edges([(1, 2), (2, 3)]);
//! assert!(!seed.within_degree(&1, &3, Degree::One));
//! assert!(seed.within_degree(&1, &3, Degree::Two));
//!
//! let verdicts = FeatureEvaluator::new(seed).run_serial(&[(1, 3), (1, 3)]);
//! assert_eq!(verdicts.get(Feature::One), &[Verdict::Unverified, Verdict::Trusted]);
//! assert_eq!(verdicts.get(Feature::Two), &[Verdict::Trusted, Verdict::Trusted]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod pipeline;
pub mod stream;

pub use config::Config;
pub use error::{Error, GraphError, RecordError};
pub use evaluator::{Feature, FeatureEvaluator, FeatureVerdicts, ThresholdPass, Verdict};
pub use graph::{Degree, Edge, GraphStatistics, Node, SocialGraph, UserId};
pub use pipeline::{run, RunSummary};
