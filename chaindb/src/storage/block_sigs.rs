//! # Block Signature Store
//!
//! Durable mapping from block identity to issuer signature. This is the
//! provenance half of block persistence: given a header hash, hand back
//! the signature proving a trusted issuer authorized that block, without
//! re-running chain validation.
//!
//! The store holds at most one signature per block hash. Out-of-order
//! arrival and multiple candidate signatures per sequence number are
//! tracked above this layer, if at all; down here a hash either has its
//! one signature or it has nothing.
//!
//! Nothing is verified on the way in. Callers check a signature against
//! the issuer's key before [`BlockSigs::add`]; the store's own promise
//! is on the way out, where bytes that are no longer a well-formed
//! signature surface as [`DbError::Corrupt`] instead of masquerading as
//! a missing record.

use sled::transaction::{ConflictableTransactionResult, TransactionalTree};
use sled::{Db, Tree};

use crate::config::BLOCK_SIGS_BUCKET;
use crate::crypto::hash::hash_hex;
use crate::crypto::Signature;

use super::block::SignedBlock;
use super::bucket::Bucket;
use super::{DbError, DbResult};

/// Hash-keyed store of block signatures.
///
/// Stateless between calls apart from the open bucket handle, which it
/// owns exclusively for its lifetime. Concurrent `get` and `add` from
/// multiple callers need no locking here; serialization of access is
/// the storage engine's contract.
#[derive(Debug, Clone)]
pub struct BlockSigs {
    sigs: Bucket,
}

impl BlockSigs {
    /// Open the signature bucket inside the given engine handle.
    ///
    /// # Errors
    ///
    /// [`DbError::Bucket`] if the bucket cannot be opened or created.
    /// The dependent subsystem should treat that as fatal at startup.
    pub fn new(db: &Db) -> DbResult<Self> {
        let sigs = Bucket::open(db, BLOCK_SIGS_BUCKET)?;
        Ok(BlockSigs { sigs })
    }

    /// Look up the signature stored for a block hash.
    ///
    /// Returns `Ok(None)` when no signature was ever stored for `hash`;
    /// absence is a valid query result, not an error.
    ///
    /// # Errors
    ///
    /// [`DbError::Corrupt`] when bytes exist under `hash` but are not a
    /// well-formed fixed-width signature. That is a data-integrity
    /// fault, and it is deliberately distinguishable from "not found".
    pub fn get(&self, hash: &[u8; 32]) -> DbResult<Option<Signature>> {
        match self.sigs.get(hash)? {
            Some(raw) => {
                let sig = Signature::from_bytes(&raw).map_err(|err| DbError::Corrupt {
                    key: hash_hex(hash),
                    reason: err.to_string(),
                })?;
                Ok(Some(sig))
            }
            None => Ok(None),
        }
    }

    /// Store a signed block's signature, keyed by its header hash.
    ///
    /// The hash is computed here, not supplied by the caller. The put is
    /// unconditional, so re-adding under the same hash replaces the
    /// prior value. Standalone and self-committing: a caller that needs
    /// this write to land atomically with a companion write (the block
    /// body, typically) must use [`BlockSigs::add_with_tx`] instead,
    /// because a crash between two independent commits can leave a
    /// signature persisted without its block.
    ///
    /// # Errors
    ///
    /// [`DbError::Storage`] if the engine cannot commit the write.
    pub fn add(&self, sb: &SignedBlock) -> DbResult<()> {
        let hash = sb.hash_header();
        self.sigs.put(&hash, sb.sig.as_bytes())
    }

    /// Stage a signed block's signature on a caller-owned transaction.
    ///
    /// Same computation as [`BlockSigs::add`], but the put lands on the
    /// supplied open transaction instead of committing on its own. This
    /// store neither commits nor aborts `tx` and assumes nothing about
    /// its other writes; the transaction's owner commits once for the
    /// whole unit. `tx` must belong to a transaction that includes this
    /// store's tree (see [`BlockSigs::tree`]).
    pub fn add_with_tx(
        &self,
        tx: &TransactionalTree,
        sb: &SignedBlock,
    ) -> ConflictableTransactionResult<(), DbError> {
        let hash = sb.hash_header();
        self.sigs.put_with_tx(tx, &hash, sb.sig.as_bytes())
    }

    /// The store's tree, exposed only as an opaque participation point
    /// for callers opening a transaction across multiple stores.
    pub fn tree(&self) -> &Tree {
        self.sigs.tree()
    }

    /// Number of signatures stored.
    pub fn len(&self) -> usize {
        self.sigs.len()
    }

    /// Whether the store holds no signatures.
    pub fn is_empty(&self) -> bool {
        self.sigs.is_empty()
    }
}
