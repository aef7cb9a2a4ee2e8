//! # Named Buckets
//!
//! A [`Bucket`] is a named, durable, transactional byte-key/byte-value
//! namespace: a thin wrapper over a sled tree that pins down the exact
//! capability the stores above it are allowed to use. Open, get, put,
//! and put-within-a-caller's-transaction. Nothing else.
//!
//! sled provides the real guarantees: crash-consistent commits,
//! lock-free concurrent reads, serialized writes, and multi-tree
//! transactions. The wrapper exists so those guarantees are consumed
//! through one audited seam, and so an alternate engine would have one
//! type to replace instead of a dozen call sites.

use sled::transaction::{ConflictableTransactionResult, TransactionalTree};
use sled::{Db, IVec, Tree};
use tracing::debug;

use super::{DbError, DbResult};

/// A named key-value namespace within the storage engine.
///
/// Holds the open tree handle for its lifetime. The handle is never
/// exposed for external mutation; [`Bucket::tree`] hands out a reference
/// only so callers can include this bucket when opening a multi-tree
/// transaction.
#[derive(Debug, Clone)]
pub struct Bucket {
    name: String,
    tree: Tree,
}

impl Bucket {
    /// Open or create the named bucket inside the given engine handle.
    ///
    /// # Errors
    ///
    /// [`DbError::Bucket`] if the engine cannot open or create the tree
    /// (engine unavailable, corrupted metadata). Construction failures
    /// are fatal to whichever store needed the bucket.
    pub fn open(db: &Db, name: &str) -> DbResult<Self> {
        let tree = db.open_tree(name).map_err(|source| DbError::Bucket {
            name: name.to_string(),
            source,
        })?;
        debug!(bucket = name, "opened bucket");
        Ok(Bucket {
            name: name.to_string(),
            tree,
        })
    }

    /// The bucket's name, as registered with the engine.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch the raw value for `key`, or `None` if absent.
    pub fn get(&self, key: &[u8]) -> DbResult<Option<IVec>> {
        Ok(self.tree.get(key)?)
    }

    /// Write `value` under `key`, replacing any prior value.
    ///
    /// Standalone and self-committing. For a write that must land
    /// together with writes to other buckets, use [`Bucket::put_with_tx`]
    /// inside a transaction the caller owns.
    pub fn put(&self, key: &[u8], value: &[u8]) -> DbResult<()> {
        self.tree.insert(key, value)?;
        Ok(())
    }

    /// Stage `value` under `key` on a caller-owned open transaction.
    ///
    /// Neither commits nor aborts: the transaction's owner does that,
    /// once, for every write staged on it. The handle must belong to a
    /// transaction that includes this bucket's tree.
    pub fn put_with_tx(
        &self,
        tx: &TransactionalTree,
        key: &[u8],
        value: &[u8],
    ) -> ConflictableTransactionResult<(), DbError> {
        tx.insert(key, value)?;
        Ok(())
    }

    /// The underlying tree, exposed only as a transaction-participation
    /// point for callers opening a multi-tree transaction.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Number of records in the bucket.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the bucket holds no records.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sled::transaction::TransactionError;

    fn test_db() -> Db {
        sled::Config::new()
            .temporary(true)
            .open()
            .expect("temporary sled db")
    }

    #[test]
    fn open_creates_bucket() {
        let db = test_db();
        let bucket = Bucket::open(&db, "test").unwrap();
        assert_eq!(bucket.name(), "test");
        assert!(bucket.is_empty());
    }

    #[test]
    fn put_then_get() {
        let db = test_db();
        let bucket = Bucket::open(&db, "test").unwrap();

        bucket.put(b"key", b"value").unwrap();
        let value = bucket.get(b"key").unwrap().expect("value present");
        assert_eq!(&value[..], b"value");
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn get_missing_key_is_none() {
        let db = test_db();
        let bucket = Bucket::open(&db, "test").unwrap();
        assert!(bucket.get(b"never written").unwrap().is_none());
    }

    #[test]
    fn put_overwrites() {
        let db = test_db();
        let bucket = Bucket::open(&db, "test").unwrap();

        bucket.put(b"key", b"first").unwrap();
        bucket.put(b"key", b"second").unwrap();

        let value = bucket.get(b"key").unwrap().unwrap();
        assert_eq!(&value[..], b"second");
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn buckets_are_isolated_namespaces() {
        let db = test_db();
        let a = Bucket::open(&db, "a").unwrap();
        let b = Bucket::open(&db, "b").unwrap();

        a.put(b"key", b"in a").unwrap();
        assert!(b.get(b"key").unwrap().is_none());
    }

    #[test]
    fn put_with_tx_commits_with_transaction() {
        let db = test_db();
        let bucket = Bucket::open(&db, "test").unwrap();

        let result: Result<(), TransactionError<DbError>> =
            bucket.tree().transaction(|tx| {
                bucket.put_with_tx(tx, b"key", b"value")?;
                Ok(())
            });
        result.unwrap();

        assert_eq!(&bucket.get(b"key").unwrap().unwrap()[..], b"value");
    }

    #[test]
    fn put_with_tx_aborted_leaves_no_record() {
        let db = test_db();
        let bucket = Bucket::open(&db, "test").unwrap();

        let result: Result<(), TransactionError<DbError>> =
            bucket.tree().transaction(|tx| {
                bucket.put_with_tx(tx, b"key", b"value")?;
                sled::transaction::abort(DbError::Aborted)
            });
        assert!(matches!(result, Err(TransactionError::Abort(DbError::Aborted))));

        assert!(bucket.get(b"key").unwrap().is_none());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");

        {
            let db = sled::open(dir.path()).unwrap();
            let bucket = Bucket::open(&db, "test").unwrap();
            bucket.put(b"key", b"value").unwrap();
            db.flush().unwrap();
        }

        let db = sled::open(dir.path()).unwrap();
        let bucket = Bucket::open(&db, "test").unwrap();
        assert_eq!(&bucket.get(b"key").unwrap().unwrap()[..], b"value");
    }
}
