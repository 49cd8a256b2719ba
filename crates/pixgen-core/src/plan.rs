//! The credit plan catalog.
//!
//! Plans are a fixed enumeration, each mapping to a credit grant and a
//! price in whole currency units. Unknown plan names are rejected before
//! any state is touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A purchasable credit plan.
///
/// Serialized with the catalog name (`"Basic"`, `"Advanced"`,
/// `"Business"`), which is also the wire form clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    /// 100 credits for 10 units.
    Basic,
    /// 500 credits for 50 units.
    Advanced,
    /// 5000 credits for 250 units.
    Business,
}

/// Error returned when a plan name is not in the catalog.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown plan: {0}")]
pub struct UnknownPlan(pub String);

impl Plan {
    /// Every plan in the catalog.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Advanced, Self::Business];

    /// Credits granted when a purchase of this plan settles.
    #[must_use]
    pub const fn credits(&self) -> i64 {
        match self {
            Self::Basic => 100,
            Self::Advanced => 500,
            Self::Business => 5000,
        }
    }

    /// Price in whole currency units.
    #[must_use]
    pub const fn price_units(&self) -> i64 {
        match self {
            Self::Basic => 10,
            Self::Advanced => 50,
            Self::Business => 250,
        }
    }

    /// Catalog name as it appears on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Advanced => "Advanced",
            Self::Business => "Business",
        }
    }
}

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Basic" => Ok(Self::Basic),
            "Advanced" => Ok(Self::Advanced),
            "Business" => Ok(Self::Business),
            other => Err(UnknownPlan(other.to_string())),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
