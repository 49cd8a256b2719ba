//! Purchase records.
//!
//! A purchase is created unpaid when a user initiates a plan top-up, and
//! settles (credits granted, `paid` set) once the gateway reports the
//! matching order as paid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Plan, TransactionId, UserId};

/// A credit purchase awaiting or past settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Unique purchase id (ULID, time-ordered).
    pub id: TransactionId,

    /// The purchasing user.
    pub user_id: UserId,

    /// The plan bought.
    pub plan: Plan,

    /// Price charged, in whole currency units.
    pub amount_units: i64,

    /// Credits granted at settlement.
    pub credits: i64,

    /// Whether the purchase has settled.
    ///
    /// Transitions false to true exactly once; a paid purchase has caused
    /// exactly one credit grant.
    pub paid: bool,

    /// When the purchase was initiated.
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Create a new unpaid purchase for a plan, priced from the catalog.
    #[must_use]
    pub fn new(user_id: UserId, plan: Plan) -> Self {
        Self {
            id: TransactionId::generate(),
            user_id,
            plan,
            amount_units: plan.price_units(),
            credits: plan.credits(),
            paid: false,
            created_at: Utc::now(),
        }
    }

    /// The receipt reference embedded in the gateway order, which is how
    /// settlement finds this purchase again.
    #[must_use]
    pub fn receipt(&self) -> String {
        self.id.to_string()
    }
}
