//! # ChainDB Constants
//!
//! Every width and well-known name used by the persistence layer lives
//! here. If a module hardcodes one of these inline, that module is wrong.
//!
//! These values are part of the on-disk format. Changing them invalidates
//! every database written before the change, so don't.

// ---------------------------------------------------------------------------
// Cryptographic Widths
// ---------------------------------------------------------------------------

/// Content hashes are BLAKE3, truncation-free: 32 bytes, always.
/// Block identity, bucket keys, and parent links all use this width.
pub const HASH_LENGTH: usize = 32;

/// Block signatures are recoverable ECDSA: 64 bytes of `r || s` plus one
/// recovery-id byte. Fixed width is what makes the on-disk codec trivial
/// and corruption detectable by length alone.
pub const SIGNATURE_LENGTH: usize = 65;

// ---------------------------------------------------------------------------
// Bucket Names
// ---------------------------------------------------------------------------

/// Bucket holding bincode-encoded block bodies, keyed by header hash.
pub const BLOCKS_BUCKET: &str = "blocks";

/// Bucket holding raw fixed-width signatures, keyed by header hash.
pub const BLOCK_SIGS_BUCKET: &str = "block_sigs";

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Timestamp of the genesis block. Epoch zero, by definition.
pub const GENESIS_TIMESTAMP: u64 = 0;
