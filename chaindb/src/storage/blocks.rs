//! # Block Body Store
//!
//! Hash-keyed persistence for block bodies: the companion record to the
//! signature kept by [`super::block_sigs::BlockSigs`]. Bodies are
//! bincode-encoded [`Block`] values under the same 32-byte header hash
//! that keys the signature, so the two stores agree on identity by
//! construction.
//!
//! The surface mirrors the signature store deliberately: `get`, a
//! self-committing `add`, and `add_with_tx` for staging on a
//! caller-owned transaction. [`super::db::ChainDb`] composes the two
//! `_with_tx` halves into the one atomic signed-block commit.

use sled::transaction::{ConflictableTransactionError, ConflictableTransactionResult, TransactionalTree};
use sled::{Db, Tree};

use crate::config::BLOCKS_BUCKET;
use crate::crypto::hash::hash_hex;

use super::block::Block;
use super::bucket::Bucket;
use super::{DbError, DbResult};

/// Hash-keyed store of block bodies.
#[derive(Debug, Clone)]
pub struct Blocks {
    bodies: Bucket,
}

impl Blocks {
    /// Open the block bucket inside the given engine handle.
    ///
    /// # Errors
    ///
    /// [`DbError::Bucket`] if the bucket cannot be opened or created.
    pub fn new(db: &Db) -> DbResult<Self> {
        let bodies = Bucket::open(db, BLOCKS_BUCKET)?;
        Ok(Blocks { bodies })
    }

    /// Look up the block stored under a header hash.
    ///
    /// Returns `Ok(None)` for a hash that was never stored.
    ///
    /// # Errors
    ///
    /// [`DbError::Corrupt`] when bytes exist under `hash` but do not
    /// decode as a block.
    pub fn get(&self, hash: &[u8; 32]) -> DbResult<Option<Block>> {
        match self.bodies.get(hash)? {
            Some(raw) => {
                let block = bincode::deserialize(&raw).map_err(|err| DbError::Corrupt {
                    key: hash_hex(hash),
                    reason: err.to_string(),
                })?;
                Ok(Some(block))
            }
            None => Ok(None),
        }
    }

    /// Store a block body, keyed by its header hash. Standalone and
    /// self-committing; unconditional, so re-adding replaces.
    ///
    /// # Errors
    ///
    /// [`DbError::Serialization`] if the block cannot be encoded,
    /// [`DbError::Storage`] if the engine cannot commit the write.
    pub fn add(&self, block: &Block) -> DbResult<()> {
        let hash = block.hash_header();
        let bytes =
            bincode::serialize(block).map_err(|err| DbError::Serialization(err.to_string()))?;
        self.bodies.put(&hash, &bytes)
    }

    /// Stage a block body on a caller-owned transaction. Neither commits
    /// nor aborts it; an encoding failure aborts the transaction with
    /// [`DbError::Serialization`].
    pub fn add_with_tx(
        &self,
        tx: &TransactionalTree,
        block: &Block,
    ) -> ConflictableTransactionResult<(), DbError> {
        let hash = block.hash_header();
        let bytes = bincode::serialize(block).map_err(|err| {
            ConflictableTransactionError::Abort(DbError::Serialization(err.to_string()))
        })?;
        self.bodies.put_with_tx(tx, &hash, &bytes)
    }

    /// The store's tree, exposed only as an opaque participation point
    /// for callers opening a transaction across multiple stores.
    pub fn tree(&self) -> &Tree {
        self.bodies.tree()
    }

    /// Number of blocks stored.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the store holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn test_db() -> Db {
        sled::Config::new()
            .temporary(true)
            .open()
            .expect("temporary sled db")
    }

    fn random_hash() -> [u8; 32] {
        let mut hash = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut hash);
        hash
    }

    #[test]
    fn add_then_get_roundtrip() {
        let db = test_db();
        let store = Blocks::new(&db).unwrap();

        let genesis = Block::genesis();
        let block = Block::new(&genesis, 1_700_000_000, b"payload".to_vec());
        store.add(&block).unwrap();

        let found = store.get(&block.hash_header()).unwrap().expect("stored block");
        assert_eq!(found, block);
    }

    #[test]
    fn get_unknown_hash_is_none() {
        let db = test_db();
        let store = Blocks::new(&db).unwrap();
        assert!(store.get(&random_hash()).unwrap().is_none());
    }

    #[test]
    fn malformed_record_is_corruption() {
        let db = test_db();
        let store = Blocks::new(&db).unwrap();
        let hash = random_hash();

        store.bodies.put(&hash, b"not a block").unwrap();

        let err = store.get(&hash).unwrap_err();
        assert!(matches!(err, DbError::Corrupt { .. }));
    }

    #[test]
    fn readd_overwrites() {
        let db = test_db();
        let store = Blocks::new(&db).unwrap();

        let genesis = Block::genesis();
        store.add(&genesis).unwrap();
        store.add(&genesis).unwrap();

        assert_eq!(store.len(), 1);
    }
}
