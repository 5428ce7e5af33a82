//! Category identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A node in the taxonomy tree, identified by the id the taxonomy assigns.
///
/// Id `0` is reserved and means "unknown / no match".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Category(u32);

impl Category {
    /// The reserved "unknown" category.
    pub const UNKNOWN: Category = Category(0);

    /// Creates a category from its taxonomy id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric taxonomy id.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns true for the reserved unknown category.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Category {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl FromStr for Category {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
