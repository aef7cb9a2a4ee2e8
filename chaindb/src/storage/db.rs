//! # ChainDb — Persistence Facade
//!
//! Owns the sled database and the two hash-keyed stores inside it, and
//! implements the one write path that must be atomic: committing a block
//! body together with its signature.
//!
//! ## Bucket Layout
//!
//! | Bucket       | Key              | Value                      |
//! |--------------|------------------|----------------------------|
//! | `blocks`     | header hash (32B)| `bincode(Block)`           |
//! | `block_sigs` | header hash (32B)| raw signature (65B)        |
//!
//! ## Atomicity
//!
//! [`ChainDb::commit_signed_block`] opens a single transaction over both
//! trees, stages the body and the signature, and commits once. Either
//! both records land or neither does. A crash can never leave a
//! signature observable without its block, or a block without its
//! signature.
//!
//! ## Thread Safety
//!
//! sled trees support lock-free concurrent reads and serialized writes.
//! `ChainDb` is `Clone` and can be shared across threads without
//! external locking; all serialization of concurrent access is the
//! engine's contract.

use std::path::Path;

use sled::transaction::{TransactionError, Transactional};
use sled::Db;
use tracing::debug;

use super::block::{Block, SignedBlock};
use super::block_sigs::BlockSigs;
use super::blocks::Blocks;
use super::{DbError, DbResult};
use crate::crypto::Signature;

/// Persistent block storage for a Corvid node.
#[derive(Debug, Clone)]
pub struct ChainDb {
    db: Db,
    blocks: Blocks,
    sigs: BlockSigs,
}

impl ChainDb {
    /// Open or create a database at the given filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Open a temporary database that lives in memory and disappears on
    /// drop. The substitution point for tests: same engine, same
    /// transaction semantics, no filesystem residue.
    pub fn open_temporary() -> DbResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    /// Construct stores over an already-open engine handle.
    fn from_db(db: Db) -> DbResult<Self> {
        let blocks = Blocks::new(&db)?;
        let sigs = BlockSigs::new(&db)?;
        debug!(blocks = blocks.len(), sigs = sigs.len(), "chaindb open");
        Ok(ChainDb { db, blocks, sigs })
    }

    /// The block-body store.
    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    /// The block-signature store.
    pub fn sigs(&self) -> &BlockSigs {
        &self.sigs
    }

    /// Commit a signed block: body and signature in one transaction.
    ///
    /// This is the write path chain validation calls after verifying a
    /// block. Both records are staged on a single transaction spanning
    /// both trees and committed together, then flushed for durability.
    ///
    /// # Errors
    ///
    /// [`DbError::Storage`] if the engine cannot commit,
    /// [`DbError::Serialization`] if the body cannot be encoded.
    pub fn commit_signed_block(&self, sb: &SignedBlock) -> DbResult<()> {
        (self.blocks.tree(), self.sigs.tree())
            .transaction(|(block_tx, sig_tx)| {
                self.blocks.add_with_tx(block_tx, &sb.block)?;
                self.sigs.add_with_tx(sig_tx, sb)?;
                Ok(())
            })
            .map_err(|err| match err {
                TransactionError::Abort(abort) => abort,
                TransactionError::Storage(source) => DbError::Storage(source),
            })?;

        self.db.flush()?;
        Ok(())
    }

    /// Look up a block body by header hash. See [`Blocks::get`].
    pub fn block(&self, hash: &[u8; 32]) -> DbResult<Option<Block>> {
        self.blocks.get(hash)
    }

    /// Look up a block signature by header hash. See [`BlockSigs::get`].
    pub fn signature(&self, hash: &[u8; 32]) -> DbResult<Option<Signature>> {
        self.sigs.get(hash)
    }

    /// Block until all pending writes are durable on disk.
    pub fn flush(&self) -> DbResult<()> {
        self.db.flush()?;
        Ok(())
    }
}
