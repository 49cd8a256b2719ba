//! Error types for pixgen storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// The id that missed.
        id: String,
    },

    /// A user with this email already exists.
    #[error("email already registered: {email}")]
    EmailExists {
        /// The conflicting email.
        email: String,
    },

    /// Insufficient credits for a debit.
    #[error("insufficient credits: balance={balance}, required={required}")]
    InsufficientCredits {
        /// Current balance in credits.
        balance: i64,
        /// Credits the debit asked for.
        required: i64,
    },

    /// The purchase was already settled (idempotency check failed).
    #[error("purchase already settled: {transaction_id}")]
    AlreadySettled {
        /// The purchase that was settled before.
        transaction_id: String,
    },
}
