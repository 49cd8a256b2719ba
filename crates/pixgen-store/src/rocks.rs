//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use pixgen_core::{Purchase, TransactionId, User, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// `RocksDB`-backed storage implementation.
///
/// Compound read-modify-write operations (`create_user`,
/// `settle_purchase`, `consume_credits`) serialize on `write_gate`, so
/// their check and write apply as a unit. The gate is held only across
/// synchronous `RocksDB` calls.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    write_gate: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_gate: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Acquire the write gate for a compound operation.
    fn gate(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_gate
            .lock()
            .map_err(|_| StoreError::Database("write gate poisoned".to_string()))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Write a user record plus its email index entry in one batch.
    fn write_user(&self, user: &User) -> Result<()> {
        let cf_users = self.cf(cf::USERS)?;
        let cf_by_email = self.cf(cf::USERS_BY_EMAIL)?;
        let value = Self::serialize(user)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, keys::user_key(&user.id), &value);
        batch.put_cf(&cf_by_email, keys::email_key(&user.email), user.id.as_bytes());

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn create_user(&self, user: &User) -> Result<()> {
        let _gate = self.gate()?;

        if self.get_user_by_email(&user.email)?.is_some() {
            return Err(StoreError::EmailExists {
                email: user.email.clone(),
            });
        }

        self.write_user(user)
    }

    fn put_user(&self, user: &User) -> Result<()> {
        self.write_user(user)
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS)?;
        let key = keys::user_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS_BY_EMAIL)?;
        let key = keys::email_key(email);

        let Some(id_bytes) = self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let bytes: [u8; 16] = id_bytes
            .try_into()
            .map_err(|_| StoreError::Database("malformed email index entry".to_string()))?;

        self.get_user(&UserId::from_bytes(bytes))
    }

    // =========================================================================
    // Purchase Operations
    // =========================================================================

    fn put_purchase(&self, purchase: &Purchase) -> Result<()> {
        let cf_purchases = self.cf(cf::PURCHASES)?;
        let cf_by_user = self.cf(cf::PURCHASES_BY_USER)?;

        let purchase_key = keys::purchase_key(&purchase.id);
        let user_purchase_key = keys::user_purchase_key(&purchase.user_id, &purchase.id);
        let value = Self::serialize(purchase)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_purchases, &purchase_key, &value);
        batch.put_cf(&cf_by_user, &user_purchase_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_purchase(&self, transaction_id: &TransactionId) -> Result<Option<Purchase>> {
        let cf = self.cf(cf::PURCHASES)?;
        let key = keys::purchase_key(transaction_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_purchases_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Purchase>> {
        let cf_by_user = self.cf(cf::PURCHASES_BY_USER)?;
        let prefix = keys::user_purchases_prefix(user_id);

        let mut purchases = Vec::new();
        let mut skipped = 0;

        let iter = self.db.iterator_cf(
            &cf_by_user,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // Collect all matching keys first (ULIDs are naturally time-ordered)
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            all_keys.push(key.to_vec());
        }

        // Reverse to get newest first
        all_keys.reverse();

        for key in all_keys {
            if skipped < offset {
                skipped += 1;
                continue;
            }

            if purchases.len() >= limit {
                break;
            }

            let tx_id = keys::extract_transaction_id_from_user_key(&key);
            if let Some(purchase) = self.get_purchase(&tx_id)? {
                purchases.push(purchase);
            }
        }

        Ok(purchases)
    }

    // =========================================================================
    // Compound Operations
    // =========================================================================

    fn settle_purchase(&self, transaction_id: &TransactionId) -> Result<i64> {
        let _gate = self.gate()?;

        // Re-read under the gate: exactly one concurrent settlement may
        // observe paid == false.
        let mut purchase =
            self.get_purchase(transaction_id)?
                .ok_or_else(|| StoreError::NotFound {
                    entity: "purchase",
                    id: transaction_id.to_string(),
                })?;

        if purchase.paid {
            return Err(StoreError::AlreadySettled {
                transaction_id: transaction_id.to_string(),
            });
        }

        let mut user = self
            .get_user(&purchase.user_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "user",
                id: purchase.user_id.to_string(),
            })?;

        purchase.paid = true;
        user.credit_balance += purchase.credits;
        user.updated_at = chrono::Utc::now();

        let cf_users = self.cf(cf::USERS)?;
        let cf_purchases = self.cf(cf::PURCHASES)?;

        let user_value = Self::serialize(&user)?;
        let purchase_value = Self::serialize(&purchase)?;

        // The grant and the paid flag commit together or not at all.
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, keys::user_key(&user.id), &user_value);
        batch.put_cf(&cf_purchases, keys::purchase_key(transaction_id), &purchase_value);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(user.credit_balance)
    }

    fn consume_credits(&self, user_id: &UserId, credits: i64) -> Result<i64> {
        let _gate = self.gate()?;

        let mut user = self.get_user(user_id)?.ok_or_else(|| StoreError::NotFound {
            entity: "user",
            id: user_id.to_string(),
        })?;

        // Conditional debit: checked under the gate so the balance can
        // never go negative.
        if user.credit_balance < credits {
            return Err(StoreError::InsufficientCredits {
                balance: user.credit_balance,
                required: credits,
            });
        }

        user.credit_balance -= credits;
        user.updated_at = chrono::Utc::now();

        let cf = self.cf(cf::USERS)?;
        let value = Self::serialize(&user)?;

        self.db
            .put_cf(&cf, keys::user_key(user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(user.credit_balance)
    }
}
