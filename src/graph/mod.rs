//! Transaction graph and bounded-distance queries.
//!
//! - `node`: identifier and edge model
//! - `degree`: the fixed hop thresholds answerable by set intersection
//! - `social_graph`: the incremental inclusive-adjacency graph
//! - `frontier`: breadth-first frontier expansion shared by the BFS queries

pub mod degree;
pub mod node;
pub mod social_graph;
pub(crate) mod frontier;

pub use degree::Degree;
pub use node::{Edge, Node, UserId};
pub use social_graph::{GraphStatistics, SocialGraph};
