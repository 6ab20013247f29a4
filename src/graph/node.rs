//! Node and edge model.
//!
//! A node is nothing more than its identity: the graph never materializes a
//! node object, only an entry in the adjacency mapping.

use std::hash::Hash;

/// Identifier bound for graph nodes.
///
/// Blanket-implemented for every hashable, cloneable identifier type; the
/// engine needs nothing else.
pub trait Node: Eq + Hash + Clone {}

impl<T: Eq + Hash + Clone> Node for T {}

/// Identifier type produced by the transaction stream adapter.
pub type UserId = i64;

/// An undirected relationship created by one transaction.
///
/// The endpoints may be equal; such a self-edge only ensures the node exists.
pub type Edge<N = UserId> = (N, N);
