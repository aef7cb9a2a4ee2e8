//! # Storage Module
//!
//! The persistence layer of a Corvid node. Everything durable lives in
//! named sled trees, wrapped here as buckets with a deliberately small
//! surface.
//!
//! ## Architecture
//!
//! ```text
//! block.rs      — BlockHeader / Block / SignedBlock, header hashing
//! bucket.rs     — named bucket over a sled tree: get / put / put_with_tx
//! blocks.rs     — block bodies, keyed by header hash
//! block_sigs.rs — block signatures, keyed by header hash
//! db.rs         — ChainDb facade, owns sled::Db, atomic signed-block commit
//! ```
//!
//! ## Design Decisions
//!
//! 1. **Hashes are the only keys.** Both stores key on the 32-byte BLAKE3
//!    header hash. One block, one key, at most one record per store.
//!
//! 2. **Absence is a result, not an error.** Lookups return `Ok(None)`
//!    for a key that was never written. Errors are reserved for actual
//!    faults: a bucket that won't open, a write that won't land, or bytes
//!    that no longer decode.
//!
//! 3. **The stores own no policy.** No retries, no internal logging on
//!    the data path, no recovery. Every failure goes straight back to the
//!    caller; chain validation and node startup decide what to do next.
//!
//! 4. **Atomicity is the caller's to compose.** Each store can stage its
//!    write on a caller-owned sled transaction. [`db::ChainDb`] uses that
//!    to commit a block body and its signature as one unit.

use thiserror::Error;

pub mod block;
pub mod block_sigs;
pub mod blocks;
pub mod bucket;
pub mod db;

pub use block::{Block, BlockHeader, SignedBlock};
pub use block_sigs::BlockSigs;
pub use blocks::Blocks;
pub use bucket::Bucket;
pub use db::ChainDb;

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors from the persistence layer.
///
/// The variants deliberately separate three different kinds of bad day:
/// a store that could not be constructed, data that came back mangled,
/// and an engine that refused a write. Callers abort startup on the
/// first, alarm on the second, and choose retry policy on the third.
#[derive(Debug, Error)]
pub enum DbError {
    /// A named bucket could not be opened or created. Fatal to
    /// constructing the store that needed it.
    #[error("failed to open bucket {name:?}: {source}")]
    Bucket {
        name: String,
        #[source]
        source: sled::Error,
    },

    /// Stored bytes under a known key failed to decode as a well-formed
    /// record. On-disk corruption or a format mismatch; never conflated
    /// with "not found".
    #[error("corrupt record for key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// A record could not be encoded for storage.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The storage engine failed to stage or commit a write.
    #[error("storage engine error: {0}")]
    Storage(#[from] sled::Error),

    /// The enclosing transaction was rolled back by its owner before
    /// commit. Used as the abort value when a caller unwinds a
    /// multi-store transaction.
    #[error("transaction aborted before commit")]
    Aborted,
}

pub type DbResult<T> = Result<T, DbError>;
