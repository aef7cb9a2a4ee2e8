//! # Block Structure
//!
//! The minimal block model the persistence layer needs: a header that
//! hashes to the block's identity, an opaque body, and the signed-block
//! pairing that the stores persist.
//!
//! ## Block identity
//!
//! A block is identified by the BLAKE3 hash of its canonical header
//! encoding: `seq || parent_hash || timestamp || body_root`. The
//! signature is never part of the preimage; it signs the hash, not the
//! other way around. Two different signatures over the same block
//! therefore key to the same record.
//!
//! The header hash is recomputed on demand rather than stored in the
//! struct. A stored hash is a field that can disagree with the fields
//! it summarizes; a computed one cannot.
//!
//! ## Body
//!
//! The body is an opaque, canonically-encoded transaction payload.
//! Transaction structure belongs to the chain layer; down here a body is
//! bytes whose BLAKE3 digest must match `body_root`.

use serde::{Deserialize, Serialize};

use crate::config::GENESIS_TIMESTAMP;
use crate::crypto::hash::{blake3_hash, hash_hex};
use crate::crypto::Signature;

// ---------------------------------------------------------------------------
// BlockHeader
// ---------------------------------------------------------------------------

/// Block metadata and chain linkage. Hashing this is what names a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Sequence number in the chain (0-indexed, genesis = 0).
    pub seq: u64,
    /// Header hash of the parent block. All zeros for genesis.
    pub parent_hash: [u8; 32],
    /// Unix timestamp (seconds) when the block was created.
    pub timestamp: u64,
    /// BLAKE3 digest of the block body.
    pub body_root: [u8; 32],
}

impl BlockHeader {
    /// Compute the header hash: the block's identity and its key in
    /// every bucket.
    pub fn hash(&self) -> [u8; 32] {
        let mut preimage = Vec::with_capacity(80);
        preimage.extend_from_slice(&self.seq.to_le_bytes());
        preimage.extend_from_slice(&self.parent_hash);
        preimage.extend_from_slice(&self.timestamp.to_le_bytes());
        preimage.extend_from_slice(&self.body_root);
        blake3_hash(&preimage)
    }

    /// The header hash as lowercase hex.
    pub fn hash_hex(&self) -> String {
        hash_hex(&self.hash())
    }
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A full block: header plus opaque body payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Metadata and chain linkage.
    pub header: BlockHeader,
    /// Canonically-encoded transaction payload. Opaque at this layer.
    pub body: Vec<u8>,
}

impl Block {
    /// Construct the genesis block: sequence 0, zeroed parent hash,
    /// epoch-zero timestamp, empty body.
    pub fn genesis() -> Self {
        Block {
            header: BlockHeader {
                seq: 0,
                parent_hash: [0u8; 32],
                timestamp: GENESIS_TIMESTAMP,
                body_root: blake3_hash(&[]),
            },
            body: Vec::new(),
        }
    }

    /// Construct a block extending `parent` with the given body.
    ///
    /// The timestamp is supplied by the caller, not sampled here, so
    /// block construction stays deterministic and testable.
    pub fn new(parent: &Block, timestamp: u64, body: Vec<u8>) -> Self {
        Block {
            header: BlockHeader {
                seq: parent.header.seq + 1,
                parent_hash: parent.hash_header(),
                timestamp,
                body_root: blake3_hash(&body),
            },
            body,
        }
    }

    /// The block's content hash, computed from the header.
    pub fn hash_header(&self) -> [u8; 32] {
        self.header.hash()
    }

    /// Check structural integrity: the body root must match the body,
    /// and a genesis block must have a zeroed parent hash.
    ///
    /// Does NOT check any signature; that is the validation layer's job.
    pub fn verify(&self) -> Result<(), String> {
        let expected_root = blake3_hash(&self.body);
        if self.header.body_root != expected_root {
            return Err(format!(
                "block {} body_root mismatch: stored={}, computed={}",
                self.header.seq,
                hash_hex(&self.header.body_root),
                hash_hex(&expected_root),
            ));
        }

        if self.header.seq == 0 && self.header.parent_hash != [0u8; 32] {
            return Err("genesis block must have zeroed parent_hash".to_string());
        }

        Ok(())
    }

    /// The block's sequence number.
    pub fn seq(&self) -> u64 {
        self.header.seq
    }

    /// The header hash as lowercase hex.
    pub fn hash_hex(&self) -> String {
        self.header.hash_hex()
    }
}

// ---------------------------------------------------------------------------
// SignedBlock
// ---------------------------------------------------------------------------

/// A block paired with the issuer signature that authorizes it.
///
/// Construction does not verify anything. A `SignedBlock` reaching the
/// stores is a claim the validation layer has already checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlock {
    /// The block itself.
    pub block: Block,
    /// Issuer signature over the block's header hash.
    pub sig: Signature,
}

impl SignedBlock {
    /// Pair a block with its signature.
    pub fn new(block: Block, sig: Signature) -> Self {
        SignedBlock { block, sig }
    }

    /// The underlying block's content hash.
    pub fn hash_header(&self) -> [u8; 32] {
        self.block.hash_header()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_properties() {
        let genesis = Block::genesis();
        assert_eq!(genesis.seq(), 0);
        assert_eq!(genesis.header.parent_hash, [0u8; 32]);
        assert_eq!(genesis.header.timestamp, GENESIS_TIMESTAMP);
        assert!(genesis.body.is_empty());
        assert!(genesis.verify().is_ok());
    }

    #[test]
    fn genesis_hash_is_deterministic() {
        assert_eq!(Block::genesis().hash_header(), Block::genesis().hash_header());
    }

    #[test]
    fn new_block_links_to_parent() {
        let genesis = Block::genesis();
        let block = Block::new(&genesis, 1_700_000_000, b"payload".to_vec());

        assert_eq!(block.seq(), 1);
        assert_eq!(block.header.parent_hash, genesis.hash_header());
        assert_eq!(block.header.body_root, blake3_hash(b"payload"));
        assert!(block.verify().is_ok());
    }

    #[test]
    fn header_hash_ignores_signature() {
        let genesis = Block::genesis();
        let block = Block::new(&genesis, 1_700_000_000, b"payload".to_vec());

        let signed_a = SignedBlock::new(block.clone(), Signature::new([0xAA; 65]));
        let signed_b = SignedBlock::new(block, Signature::new([0xBB; 65]));

        // Different signatures, same block, same identity.
        assert_eq!(signed_a.hash_header(), signed_b.hash_header());
    }

    #[test]
    fn distinct_blocks_distinct_hashes() {
        let genesis = Block::genesis();
        let a = Block::new(&genesis, 1_700_000_000, b"a".to_vec());
        let b = Block::new(&genesis, 1_700_000_000, b"b".to_vec());
        let later = Block::new(&genesis, 1_700_000_001, b"a".to_vec());

        assert_ne!(a.hash_header(), b.hash_header());
        assert_ne!(a.hash_header(), later.hash_header());
    }

    #[test]
    fn tampered_body_fails_verification() {
        let genesis = Block::genesis();
        let mut block = Block::new(&genesis, 1_700_000_000, b"payload".to_vec());

        block.body.push(0xFF);
        assert!(block.verify().is_err());
    }

    #[test]
    fn non_zero_genesis_parent_fails_verification() {
        let mut genesis = Block::genesis();
        genesis.header.parent_hash = [1u8; 32];
        assert!(genesis.verify().is_err());
    }

    #[test]
    fn signed_block_bincode_roundtrip() {
        let genesis = Block::genesis();
        let block = Block::new(&genesis, 1_700_000_000, b"payload".to_vec());
        let signed = SignedBlock::new(block, Signature::new([0x42; 65]));

        let encoded = bincode::serialize(&signed).unwrap();
        let decoded: SignedBlock = bincode::deserialize(&encoded).unwrap();
        assert_eq!(signed, decoded);
    }
}
