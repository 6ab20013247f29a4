//! Feature evaluation: three independent threshold passes over one stream.
//!
//! Every pass starts from its own clone of the seed graph and mutates only
//! that clone, so the passes share nothing but the read-only stream and may
//! run on separate threads. All clones are taken before any pass starts.

mod pass;
mod verdict;

pub use pass::ThresholdPass;
pub use verdict::{Feature, Verdict};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::graph::{Edge, Node, SocialGraph, UserId};

/// Verdicts of every feature, one entry per stream transaction each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureVerdicts {
    passes: Vec<(Feature, Vec<Verdict>)>,
}

impl FeatureVerdicts {
    fn new(mut passes: Vec<(Feature, Vec<Verdict>)>) -> Self {
        passes.sort_by_key(|(feature, _)| *feature);
        Self { passes }
    }

    /// Verdicts for `feature`, in stream order.
    pub fn get(&self, feature: Feature) -> &[Verdict] {
        self.passes
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, verdicts)| verdicts.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over `(feature, verdicts)` in feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &[Verdict])> + '_ {
        self.passes.iter().map(|(f, v)| (*f, v.as_slice()))
    }

    /// Number of trusted verdicts for `feature`.
    pub fn trusted_count(&self, feature: Feature) -> usize {
        self.get(feature).iter().filter(|v| v.is_trusted()).count()
    }
}

/// Drives one [`ThresholdPass`] per [`Feature`] from a shared seed graph.
#[derive(Debug, Clone)]
pub struct FeatureEvaluator<N = UserId> {
    seed: SocialGraph<N>,
}

impl<N: Node> FeatureEvaluator<N> {
    /// Wraps the seed graph built from the batch.
    pub fn new(seed: SocialGraph<N>) -> Self {
        Self { seed }
    }

    /// The untouched seed graph.
    pub fn seed(&self) -> &SocialGraph<N> {
        &self.seed
    }

    fn passes(&self) -> Vec<ThresholdPass<N>> {
        Feature::ALL
            .iter()
            .map(|&feature| ThresholdPass::new(self.seed.clone(), feature))
            .collect()
    }

    /// Runs the passes one after another on the calling thread.
    pub fn run_serial(&self, stream: &[Edge<N>]) -> FeatureVerdicts {
        info!(transactions = stream.len(), "evaluating features serially");
        let results = self
            .passes()
            .into_iter()
            .map(|mut pass| {
                let verdicts = pass.run(stream.iter().cloned());
                (pass.feature(), verdicts)
            })
            .collect();
        FeatureVerdicts::new(results)
    }

    /// Runs the passes concurrently, one per worker.
    ///
    /// Produces exactly the same verdicts as [`run_serial`](Self::run_serial).
    pub fn run_parallel(&self, stream: &[Edge<N>]) -> FeatureVerdicts
    where
        N: Send + Sync,
    {
        info!(transactions = stream.len(), "evaluating features in parallel");
        let passes = self.passes();

        #[cfg(feature = "parallel")]
        let results = passes
            .into_par_iter()
            .map(|mut pass| {
                let verdicts = pass.run(stream.iter().cloned());
                (pass.feature(), verdicts)
            })
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results = std::thread::scope(|scope| {
            let handles: Vec<_> = passes
                .into_iter()
                .map(|mut pass| {
                    scope.spawn(move || {
                        let verdicts = pass.run(stream.iter().cloned());
                        (pass.feature(), verdicts)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        FeatureVerdicts::new(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> Vec<Edge<u32>> {
        vec![(1, 3), (1, 5), (3, 5), (7, 8), (8, 7), (2, 2), (6, 1)]
    }

    #[test]
    fn features_diverge_on_the_same_stream() {
        let seed = SocialGraph::from_edges([(1, 2), (2, 3), (3, 4), (4, 5), (5, 6)]);
        let evaluator = FeatureEvaluator::new(seed);
        let verdicts = evaluator.run_serial(&stream());

        use Verdict::{Trusted as T, Unverified as U};
        assert_eq!(verdicts.get(Feature::One), &[U, U, U, U, T, T, U]);
        assert_eq!(verdicts.get(Feature::Two), &[T, U, T, U, T, T, T]);
        assert_eq!(verdicts.get(Feature::Three), &[T, T, T, U, T, T, T]);
        assert_eq!(verdicts.trusted_count(Feature::Three), 6);
    }

    #[test]
    fn seed_is_not_mutated() {
        let seed = SocialGraph::from_edges([(1, 2)]);
        let evaluator = FeatureEvaluator::new(seed.clone());
        evaluator.run_serial(&[(3, 4), (1, 4)]);
        evaluator.run_parallel(&[(3, 4), (1, 4)]);
        assert_eq!(evaluator.seed(), &seed);
    }

    #[test]
    fn parallel_matches_serial() {
        let seed = SocialGraph::from_edges([(1, 2), (2, 3), (3, 4), (4, 5), (5, 6)]);
        let evaluator = FeatureEvaluator::new(seed);
        assert_eq!(evaluator.run_serial(&stream()), evaluator.run_parallel(&stream()));
    }

    #[test]
    fn every_feature_has_one_verdict_per_transaction() {
        let evaluator = FeatureEvaluator::new(SocialGraph::new());
        let verdicts = evaluator.run_parallel(&stream());
        let features: Vec<Feature> = verdicts.iter().map(|(f, _)| f).collect();
        assert_eq!(features, Feature::ALL.to_vec());
        for (_, v) in verdicts.iter() {
            assert_eq!(v.len(), stream().len());
        }
    }
}
