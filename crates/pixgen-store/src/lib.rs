//! `RocksDB` storage layer for pixgen.
//!
//! This crate provides persistent storage for users and credit purchases
//! using `RocksDB` with column families for efficient indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `users`: Primary user records, keyed by `user_id`
//! - `users_by_email`: Index for login lookups, keyed by email
//! - `purchases`: Purchase records, keyed by `transaction_id` (ULID)
//! - `purchases_by_user`: Index for listing purchases by user
//!
//! The ledger invariants live in the compound operations:
//! [`Store::settle_purchase`] grants a purchase's credits exactly once,
//! and [`Store::consume_credits`] refuses any debit that would push a
//! balance negative. Both serialize on an internal write gate so the
//! check and the write apply as a unit even under concurrent callers.
//!
//! # Example
//!
//! ```no_run
//! use pixgen_store::{RocksStore, Store};
//! use pixgen_core::{User, SIGNUP_CREDITS};
//!
//! let store = RocksStore::open("/tmp/pixgen-db").unwrap();
//!
//! // Register a user
//! let user = User::new("Ada", "ada@example.com", "$2b$12$hash", SIGNUP_CREDITS);
//! store.create_user(&user).unwrap();
//!
//! // Look them up again
//! let retrieved = store.get_user_by_email("ada@example.com").unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use pixgen_core::{Purchase, TransactionId, User, UserId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Create a user, enforcing email uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmailExists` if the email is already
    /// registered, or an error if the database operation fails.
    fn create_user(&self, user: &User) -> Result<()>;

    /// Insert or update a user record, maintaining the email index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_user(&self, user: &User) -> Result<()>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Get a user by email (exact match).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // =========================================================================
    // Purchase Operations
    // =========================================================================

    /// Insert a purchase record.
    ///
    /// This also maintains the user index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_purchase(&self, purchase: &Purchase) -> Result<()>;

    /// Get a purchase by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_purchase(&self, transaction_id: &TransactionId) -> Result<Option<Purchase>>;

    /// List purchases for a user, ordered by time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_purchases_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Purchase>>;

    // =========================================================================
    // Compound Operations
    // =========================================================================

    /// Settle a purchase: mark it paid and grant its credits atomically.
    ///
    /// Returns the new balance after the grant. A purchase settles at most
    /// once; concurrent duplicate calls see `AlreadySettled`.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the purchase or its user doesn't exist.
    /// - `StoreError::AlreadySettled` if the purchase was settled before.
    fn settle_purchase(&self, transaction_id: &TransactionId) -> Result<i64>;

    /// Debit credits from a user, refusing to go below zero.
    ///
    /// The balance check and the decrement apply as a unit, so concurrent
    /// debits can never drive the balance negative. Returns the new
    /// balance after the debit.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the user doesn't exist.
    /// - `StoreError::InsufficientCredits` if the balance is too low.
    fn consume_credits(&self, user_id: &UserId, credits: i64) -> Result<i64>;
}
