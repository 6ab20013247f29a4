//! An incremental, undirected transaction graph with bounded-hop queries.
//!
//! Adjacency is stored **inclusively**: the neighbor set of every node contains
//! the node itself. This turns the small-degree connectivity checks into pure
//! set operations:
//! - `d(a, b) <= 1` iff `b ∈ N[a]`
//! - `d(a, b) <= 2` iff `N[a] ∩ N[b] ≠ ∅`
//! - `d(a, b) <= 4` iff `N²[a] ∩ N²[b] ≠ ∅`, where `N²[a]` is the union of
//!   `N[n]` for every `n ∈ N[a]`
//!
//! Nothing is precomputed: the 2-hop sets are built on demand, so the graph
//! stays trivially consistent while edges are added between queries.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_edge` | \(O(1)\) expected | two set insertions |
//! | `within_degree(.., One)` | \(O(1)\) expected | one membership test |
//! | `within_degree(.., Two)` | \(O(\min(\deg a, \deg b))\) | set intersection |
//! | `within_degree(.., Four)` | \(O(\sum_{n \in N[a]} \deg n + \sum_{n \in N[b]} \deg n)\) | 2-hop expansion of one side |
//! | `distance` | \(O(n + m)\) | full BFS |
//! | `is_self_consistent` | \(O(m)\) | diagnostic only |

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::degree::Degree;
use super::frontier::{expand, Adjacency, Frontier, Step};
use super::node::{Edge, Node, UserId};
use crate::error::GraphError;

/// Undirected graph over opaque node identifiers.
///
/// Cloning produces a fully independent graph: every neighbor set is copied,
/// so mutating one clone is never visible through another.
#[derive(Debug, Clone)]
pub struct SocialGraph<N = UserId> {
    adjacency: Adjacency<N>,
}

impl<N: Node> Default for SocialGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> SocialGraph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// Creates an empty graph with room for at least `nodes` identifiers.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(nodes),
        }
    }

    /// Builds a graph from a seed batch of edges.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge<N>>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }

    /// Number of distinct identifiers in the graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if no node has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges between distinct nodes.
    ///
    /// Self-edges are not counted; they are indistinguishable from the
    /// implicit inclusive entry.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|set| set.len() - 1).sum::<usize>() / 2
    }

    /// Returns `true` if `node` is a key of the adjacency mapping.
    #[inline]
    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Iterates over every node, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adjacency.keys()
    }

    /// Returns the inclusive neighbor set of `node`.
    #[inline]
    pub fn neighbors(&self, node: &N) -> Option<&HashSet<N>> {
        self.adjacency.get(node)
    }

    /// Returns `true` if both nodes are present and `y` is in `x`'s inclusive
    /// neighbor set.
    #[inline]
    pub fn has_edge(&self, x: &N, y: &N) -> bool {
        self.adjacency.get(x).is_some_and(|set| set.contains(y))
    }

    /// Inserts the undirected edge `(x, y)`, creating either endpoint if needed.
    ///
    /// Idempotent. A self-edge only creates the node.
    pub fn add_edge(&mut self, x: N, y: N) {
        self.adjacency
            .entry(x.clone())
            .or_insert_with(|| HashSet::from([x.clone()]))
            .insert(y.clone());
        self.adjacency
            .entry(y.clone())
            .or_insert_with(|| HashSet::from([y]))
            .insert(x);
    }

    /// Inserts every edge in order.
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = Edge<N>>,
    {
        for (x, y) in edges {
            self.add_edge(x, y);
        }
    }

    /// Every node within one hop of some member of `friends`, members included.
    ///
    /// Members that are not in the graph contribute nothing.
    pub fn next_degree_friends(&self, friends: &HashSet<N>) -> HashSet<N> {
        expand(&self.adjacency, friends)
    }

    /// Every node within two hops of `node`, `node` included.
    ///
    /// Returns `None` if `node` is absent.
    pub fn friends_of_friends(&self, node: &N) -> Option<HashSet<N>> {
        self.adjacency
            .get(node)
            .map(|friends| expand(&self.adjacency, friends))
    }

    /// Returns `true` if `x` and `y` are at most `degree` hops apart.
    ///
    /// A node is always within any degree of itself, even when it has never
    /// been inserted. Otherwise an absent endpoint answers `false`.
    pub fn within_degree(&self, x: &N, y: &N, degree: Degree) -> bool {
        if x == y {
            return true;
        }
        if degree == Degree::Zero {
            return false;
        }
        let (Some(nx), Some(ny)) = (self.adjacency.get(x), self.adjacency.get(y)) else {
            return false;
        };

        if nx.contains(y) {
            return true;
        }
        if degree == Degree::One {
            return false;
        }

        if !nx.is_disjoint(ny) {
            return true;
        }
        if degree == Degree::Two {
            return false;
        }

        self.two_hop_overlap(nx, ny)
    }

    /// Checked variant of [`within_degree`](Self::within_degree) taking a raw
    /// hop count.
    ///
    /// # Errors
    /// Returns [`GraphError::UnsupportedDegree`] unless `hops` is 0, 1, 2 or 4.
    pub fn within_hops(&self, x: &N, y: &N, hops: u32) -> Result<bool, GraphError> {
        let degree = Degree::try_from(hops)?;
        Ok(self.within_degree(x, y, degree))
    }

    // Expands the smaller side to its full 2-hop set, then probes the other
    // side's 2-hop set one neighbor list at a time.
    fn two_hop_overlap(&self, nx: &HashSet<N>, ny: &HashSet<N>) -> bool {
        let (small, large) = if nx.len() <= ny.len() { (nx, ny) } else { (ny, nx) };
        let reach = expand(&self.adjacency, small);
        large
            .iter()
            .filter_map(|n| self.adjacency.get(n))
            .any(|set| !set.is_disjoint(&reach))
    }

    /// Exact hop distance between `x` and `y` by breadth-first search.
    ///
    /// Returns `Some(0)` when `x == y`, and `None` when either node is absent
    /// or no path of at most `max_hops` edges exists. `max_hops` defaults to
    /// the node count, which bounds every shortest path.
    pub fn distance(&self, x: &N, y: &N, max_hops: Option<usize>) -> Option<usize> {
        if x == y {
            return Some(0);
        }
        if !self.contains_node(x) || !self.contains_node(y) {
            return None;
        }
        let max_hops = max_hops.unwrap_or(self.node_count());

        let mut frontier = Frontier::new(x.clone());
        while frontier.depth() < max_hops {
            match frontier.advance(&self.adjacency, y) {
                Step::Reached => return Some(frontier.depth()),
                Step::Advanced => {}
                Step::Exhausted => return None,
            }
        }
        None
    }

    /// Returns `true` if `x` and `y` are at most `max_hops` apart.
    ///
    /// Unlike [`distance`](Self::distance), each round stops scanning as soon
    /// as a frontier node lists `y` as a neighbor.
    pub fn distance_within(&self, x: &N, y: &N, max_hops: usize) -> bool {
        if x == y {
            return true;
        }
        if !self.contains_node(x) || !self.contains_node(y) {
            return false;
        }

        let mut frontier = Frontier::new(x.clone());
        while frontier.depth() < max_hops {
            match frontier.advance_towards(&self.adjacency, y) {
                Step::Reached => return true,
                Step::Advanced => {}
                Step::Exhausted => return false,
            }
        }
        false
    }

    /// Checks symmetry: `y ∈ N[x]` iff `x ∈ N[y]` for every stored pair.
    ///
    /// Intended for tests and debugging; visits every edge.
    pub fn is_self_consistent(&self) -> bool {
        self.adjacency.iter().all(|(x, set)| {
            set.iter()
                .all(|y| self.adjacency.get(y).is_some_and(|back| back.contains(x)))
        })
    }

    /// Checks inclusivity: every node lists itself as a neighbor.
    pub fn is_inclusive(&self) -> bool {
        self.adjacency.iter().all(|(x, set)| set.contains(x))
    }

    /// Computes basic degree statistics. Degrees exclude the inclusive entry.
    #[allow(clippy::cast_precision_loss)]
    pub fn statistics(&self) -> GraphStatistics {
        let node_count = self.node_count();
        let mut degrees: Vec<usize> = self.adjacency.values().map(|set| set.len() - 1).collect();
        degrees.sort_unstable();
        let degree_sum: usize = degrees.iter().sum();

        let (min_degree, max_degree) = match (degrees.first(), degrees.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => (0, 0),
        };
        let median_degree = if degrees.is_empty() {
            0
        } else if degrees.len() % 2 == 0 {
            let a = degrees[degrees.len() / 2 - 1];
            let b = degrees[degrees.len() / 2];
            (a + b) / 2
        } else {
            degrees[degrees.len() / 2]
        };

        GraphStatistics {
            node_count,
            edge_count: degree_sum / 2,
            min_degree,
            max_degree,
            median_degree,
            average_degree: if node_count == 0 {
                0.0
            } else {
                degree_sum as f64 / node_count as f64
            },
        }
    }
}

impl<N: Node> PartialEq for SocialGraph<N> {
    fn eq(&self, other: &Self) -> bool {
        self.adjacency == other.adjacency
    }
}

impl<N: Node> Eq for SocialGraph<N> {}

impl<N: Node> FromIterator<Edge<N>> for SocialGraph<N> {
    fn from_iter<I: IntoIterator<Item = Edge<N>>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<N: Node> Extend<Edge<N>> for SocialGraph<N> {
    fn extend<I: IntoIterator<Item = Edge<N>>>(&mut self, iter: I) {
        self.add_edges(iter);
    }
}

/// Statistics about a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected edges between distinct nodes.
    pub edge_count: usize,
    /// Minimum degree over all nodes.
    pub min_degree: usize,
    /// Maximum degree over all nodes.
    pub max_degree: usize,
    /// Median degree over all nodes.
    pub median_degree: usize,
    /// Average degree \(= 2m/n\).
    pub average_degree: f64,
}
