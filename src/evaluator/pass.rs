//! A single threshold pass over the transaction stream.

use tracing::{debug, instrument};

use super::verdict::{Feature, Verdict};
use crate::graph::{Degree, Edge, Node, SocialGraph, UserId};

/// Replays transactions against a graph it owns exclusively.
///
/// Each transaction is checked against the graph as left by every earlier
/// transaction of the same pass:
/// 1. Direct contacts are trusted and the graph is left untouched.
/// 2. Otherwise the feature's threshold decides the verdict, and the
///    transaction is recorded as a new edge either way.
#[derive(Debug, Clone)]
pub struct ThresholdPass<N = UserId> {
    graph: SocialGraph<N>,
    feature: Feature,
}

impl<N: Node> ThresholdPass<N> {
    /// Starts a pass for `feature` on `graph`.
    pub fn new(graph: SocialGraph<N>, feature: Feature) -> Self {
        Self { graph, feature }
    }

    /// The feature this pass evaluates.
    #[inline]
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// The graph in its current state.
    #[inline]
    pub fn graph(&self) -> &SocialGraph<N> {
        &self.graph
    }

    /// Consumes the pass, returning its mutated graph.
    pub fn into_graph(self) -> SocialGraph<N> {
        self.graph
    }

    /// Checks one transaction and updates the graph.
    pub fn evaluate(&mut self, x: N, y: N) -> Verdict {
        if self.graph.within_degree(&x, &y, Degree::One) {
            return Verdict::Trusted;
        }

        let threshold = self.feature.threshold();
        let verdict = if threshold > Degree::One && self.graph.within_degree(&x, &y, threshold) {
            Verdict::Trusted
        } else {
            Verdict::Unverified
        };
        self.graph.add_edge(x, y);
        verdict
    }

    /// Checks every transaction in order.
    #[instrument(level = "debug", skip_all, fields(feature = %self.feature))]
    pub fn run<I>(&mut self, stream: I) -> Vec<Verdict>
    where
        I: IntoIterator<Item = Edge<N>>,
    {
        let verdicts: Vec<Verdict> = stream
            .into_iter()
            .map(|(x, y)| self.evaluate(x, y))
            .collect();
        debug!(
            transactions = verdicts.len(),
            trusted = verdicts.iter().filter(|v| v.is_trusted()).count(),
            nodes = self.graph.node_count(),
            "threshold pass complete"
        );
        verdicts
    }
}
