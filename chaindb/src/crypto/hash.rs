//! # Content Hashing
//!
//! BLAKE3 is the only hash function in ChainDB. Block identity, parent
//! links, and body roots are all 32-byte BLAKE3 digests. One function,
//! one width, no negotiation.
//!
//! Why BLAKE3: it is faster than SHA-256 on every platform a node runs
//! on, it resists length extension by construction, and its 256-bit
//! output gives the collision resistance the whole keying scheme leans
//! on. Bucket keys are hashes precisely because two distinct blocks can
//! be assumed never to collide.

/// Compute the BLAKE3 hash of the input data.
///
/// Returns a 32-byte digest as a fixed-size array. This is the workhorse
/// of the crate: header hashes, body roots, and therefore every bucket
/// key comes out of this function.
///
/// # Example
///
/// ```
/// use corvid_chaindb::blake3_hash;
///
/// let digest = blake3_hash(b"corvid");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Render a 32-byte hash as lowercase hex.
///
/// For error messages and logs. Sixty-four characters of hex is not
/// pretty, but it is unambiguous, and unambiguous wins.
pub fn hash_hex(hash: &[u8; 32]) -> String {
    hex::encode(hash)
}
