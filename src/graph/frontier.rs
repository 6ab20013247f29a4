//! Breadth-first frontier expansion over inclusive adjacency sets.
//!
//! Traversals here keep two sets: the current frontier (nodes first reached
//! in the latest round) and everything visited so far. Because every
//! adjacency set contains its own key, expanding a set of nodes always yields
//! a superset of it, so "one more hop" is a plain union of neighbor sets.

use std::collections::{HashMap, HashSet};

use super::node::Node;

/// Inclusive adjacency mapping: every key's set contains the key itself.
pub(crate) type Adjacency<N> = HashMap<N, HashSet<N>>;

/// Union of the adjacency sets of every member of `nodes`.
///
/// Members that are not keys of `adjacency` contribute nothing.
pub(crate) fn expand<'a, N, I>(adjacency: &Adjacency<N>, nodes: I) -> HashSet<N>
where
    N: Node + 'a,
    I: IntoIterator<Item = &'a N>,
{
    let mut reached = HashSet::new();
    for node in nodes {
        if let Some(neighbors) = adjacency.get(node) {
            reached.extend(neighbors.iter().cloned());
        }
    }
    reached
}

/// Outcome of one frontier round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The target was reached in this round.
    Reached,
    /// New nodes were discovered; the target is still ahead.
    Advanced,
    /// Nothing new is reachable.
    Exhausted,
}

/// BFS state rooted at a single node.
pub(crate) struct Frontier<N> {
    current: HashSet<N>,
    visited: HashSet<N>,
    depth: usize,
}

impl<N: Node> Frontier<N> {
    pub(crate) fn new(root: N) -> Self {
        let current = HashSet::from([root]);
        let visited = current.clone();
        Self {
            current,
            visited,
            depth: 0,
        }
    }

    /// Rounds completed so far; nodes in the frontier are exactly this far
    /// from the root.
    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Full expansion: discovers every node one hop beyond the frontier.
    pub(crate) fn advance(&mut self, adjacency: &Adjacency<N>, target: &N) -> Step {
        if self.current.is_empty() {
            return Step::Exhausted;
        }
        let mut next = expand(adjacency, &self.current);
        next.retain(|n| !self.visited.contains(n));
        self.settle(next, target)
    }

    /// Like [`advance`](Self::advance) but stops scanning as soon as some
    /// frontier node has `target` as a neighbor.
    pub(crate) fn advance_towards(&mut self, adjacency: &Adjacency<N>, target: &N) -> Step {
        if self.current.is_empty() {
            return Step::Exhausted;
        }
        let mut next = HashSet::new();
        for node in &self.current {
            let Some(neighbors) = adjacency.get(node) else {
                continue;
            };
            if neighbors.contains(target) {
                self.depth += 1;
                return Step::Reached;
            }
            next.extend(
                neighbors
                    .iter()
                    .filter(|n| !self.visited.contains(*n))
                    .cloned(),
            );
        }
        self.settle(next, target)
    }

    fn settle(&mut self, next: HashSet<N>, target: &N) -> Step {
        self.depth += 1;
        if next.contains(target) {
            return Step::Reached;
        }
        if next.is_empty() {
            self.current.clear();
            return Step::Exhausted;
        }
        self.visited.extend(next.iter().cloned());
        self.current = next;
        Step::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: u32) -> Adjacency<u32> {
        let mut adjacency = Adjacency::new();
        for i in 0..len {
            let mut set = HashSet::from([i]);
            if i > 0 {
                set.insert(i - 1);
            }
            if i + 1 < len {
                set.insert(i + 1);
            }
            adjacency.insert(i, set);
        }
        adjacency
    }

    #[test]
    fn expand_is_union_of_inclusive_sets() {
        let adjacency = chain(5);
        let reached = expand(&adjacency, &HashSet::from([0, 3]));
        assert_eq!(reached, HashSet::from([0, 1, 2, 3, 4]));
    }

    #[test]
    fn expand_ignores_unknown_members() {
        let adjacency = chain(2);
        assert!(expand(&adjacency, &[7u32]).is_empty());
    }

    #[test]
    fn advance_reaches_target_at_exact_depth() {
        let adjacency = chain(5);
        let mut frontier = Frontier::new(0);
        for _ in 0..3 {
            assert_eq!(frontier.advance(&adjacency, &4), Step::Advanced);
        }
        assert_eq!(frontier.advance(&adjacency, &4), Step::Reached);
        assert_eq!(frontier.depth(), 4);
    }

    #[test]
    fn advance_towards_agrees_on_depth() {
        let adjacency = chain(6);
        let mut frontier = Frontier::new(0);
        let mut step = Step::Advanced;
        while step == Step::Advanced {
            step = frontier.advance_towards(&adjacency, &5);
        }
        assert_eq!(step, Step::Reached);
        assert_eq!(frontier.depth(), 5);
    }

    #[test]
    fn exhausts_when_target_is_in_another_component() {
        let mut adjacency = chain(3);
        adjacency.insert(9, HashSet::from([9]));
        let mut frontier = Frontier::new(0);
        assert_eq!(frontier.advance(&adjacency, &9), Step::Advanced);
        assert_eq!(frontier.advance(&adjacency, &9), Step::Advanced);
        assert_eq!(frontier.advance(&adjacency, &9), Step::Exhausted);
        assert_eq!(frontier.advance(&adjacency, &9), Step::Exhausted);
    }
}
