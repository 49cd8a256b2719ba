//! User records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Credits granted to every newly registered user.
pub const SIGNUP_CREDITS: i64 = 5;

/// Credits consumed by one successful image generation.
pub const GENERATION_COST_CREDITS: i64 = 1;

/// A registered user and their credit balance.
///
/// The full record (including the credential hash) only crosses the store
/// boundary; API responses use their own DTOs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address, unique across users.
    pub email: String,

    /// bcrypt hash of the password.
    pub password_hash: String,

    /// Current credit balance. Never negative.
    pub credit_balance: i64,

    /// When the user registered.
    pub created_at: DateTime<Utc>,

    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and the given starting balance.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        starting_credits: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            credit_balance: starting_credits,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the balance covers a debit of `credits`.
    #[must_use]
    pub const fn has_credits(&self, credits: i64) -> bool {
        self.credit_balance >= credits
    }
}
