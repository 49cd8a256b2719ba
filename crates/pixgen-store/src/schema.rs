//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary user records, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Index: user id by email, keyed by the raw email bytes.
    /// Value is the 16-byte user id.
    pub const USERS_BY_EMAIL: &str = "users_by_email";

    /// Purchase records, keyed by `transaction_id` (ULID).
    pub const PURCHASES: &str = "purchases";

    /// Index: purchases by user, keyed by `user_id || transaction_id`.
    /// Value is empty (index only).
    pub const PURCHASES_BY_USER: &str = "purchases_by_user";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::USERS_BY_EMAIL,
        cf::PURCHASES,
        cf::PURCHASES_BY_USER,
    ]
}
