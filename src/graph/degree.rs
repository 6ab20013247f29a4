//! Bounded degrees of separation.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A hop threshold the graph can answer with set-intersection tests alone.
///
/// Only 0, 1, 2 and 4 hops are supported: each is a fixed number of lookups
/// over inclusive neighbor sets, with no general BFS. Use
/// [`SocialGraph::distance`](crate::graph::SocialGraph::distance) for
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Degree {
    /// Identity: the two endpoints are the same node.
    Zero,
    /// Direct neighbors.
    One,
    /// At most one intermediary.
    Two,
    /// At most three intermediaries.
    Four,
}

impl Degree {
    /// Every supported degree, in increasing order.
    pub const ALL: [Degree; 4] = [Degree::Zero, Degree::One, Degree::Two, Degree::Four];

    /// Number of hops this degree admits.
    #[inline]
    pub const fn hops(self) -> u32 {
        match self {
            Degree::Zero => 0,
            Degree::One => 1,
            Degree::Two => 2,
            Degree::Four => 4,
        }
    }
}

impl TryFrom<u32> for Degree {
    type Error = GraphError;

    fn try_from(hops: u32) -> Result<Self, Self::Error> {
        match hops {
            0 => Ok(Degree::Zero),
            1 => Ok(Degree::One),
            2 => Ok(Degree::Two),
            4 => Ok(Degree::Four),
            _ => Err(GraphError::UnsupportedDegree { hops }),
        }
    }
}

impl From<Degree> for u32 {
    fn from(degree: Degree) -> Self {
        degree.hops()
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hops())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_degrees_round_trip_through_hops() {
        for degree in Degree::ALL {
            assert_eq!(Degree::try_from(degree.hops()), Ok(degree));
        }
    }

    #[test]
    fn unsupported_degrees_are_rejected() {
        for hops in [3, 5, 8, u32::MAX] {
            assert_eq!(
                Degree::try_from(hops),
                Err(GraphError::UnsupportedDegree { hops })
            );
        }
    }

    #[test]
    fn ordering_follows_hop_count() {
        assert!(Degree::Zero < Degree::One);
        assert!(Degree::Two < Degree::Four);
        assert_eq!(Degree::ALL.iter().max(), Some(&Degree::Four));
    }

    #[test]
    fn deserializes_from_plain_integers() {
        let degree: Degree = serde_json::from_str("4").unwrap();
        assert_eq!(degree, Degree::Four);
        assert!(serde_json::from_str::<Degree>("3").is_err());
        assert_eq!(serde_json::to_string(&Degree::Two).unwrap(), "2");
    }
}
