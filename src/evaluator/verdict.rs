//! Verdicts and the features that produce them.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Degree;

/// Outcome of checking one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The parties were already within the feature's threshold.
    Trusted,
    /// The parties were not connected closely enough.
    Unverified,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Trusted`].
    #[inline]
    pub const fn is_trusted(self) -> bool {
        matches!(self, Verdict::Trusted)
    }

    /// The literal output token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Verdict::Trusted => "trusted",
            Verdict::Unverified => "unverified",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three trust features, each with a fixed hop threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Trusted only between direct contacts.
    One,
    /// Trusted up to friends of friends.
    Two,
    /// Trusted up to the fourth degree of separation.
    Three,
}

impl Feature {
    /// All features, in output order.
    pub const ALL: [Feature; 3] = [Feature::One, Feature::Two, Feature::Three];

    /// The degree of separation this feature accepts.
    pub const fn threshold(self) -> Degree {
        match self {
            Feature::One => Degree::One,
            Feature::Two => Degree::Two,
            Feature::Three => Degree::Four,
        }
    }

    /// Position of this feature in [`Feature::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Feature::One => 0,
            Feature::Two => 1,
            Feature::Three => 2,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature{}", self.index() + 1)
    }
}
