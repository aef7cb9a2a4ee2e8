// Copyright (c) 2026 Corvid Labs. MIT License.
// See LICENSE for details.

//! # Corvid ChainDB — Block Persistence for the Corvid Chain
//!
//! The durable half of a Corvid node. Consensus decides which blocks are
//! real; this crate makes sure they are still real after a power cut.
//!
//! ChainDB stores two things and stores them well:
//!
//! 1. **Block bodies**, keyed by the content hash of their header.
//! 2. **Block signatures**, the proof that a trusted issuer authorized a
//!    block, keyed by the same hash.
//!
//! The two records for a block must never be observable independently: a
//! signature without its block (or vice versa) after a crash would be a
//! provenance hole. Every write path that touches both therefore goes
//! through a single storage transaction and commits once.
//!
//! ## Architecture
//!
//! - **config** — Widths, bucket names, and the other numbers that must
//!   never drift between modules.
//! - **crypto** — BLAKE3 content hashing and the fixed-width signature
//!   value. No signing or verification lives here; validation happens
//!   upstream and ChainDB trusts it.
//! - **storage** — Buckets over sled trees, the block-body store, the
//!   block-signature store, and the [`ChainDb`] facade that commits a
//!   signed block atomically.
//!
//! ## Trust boundary
//!
//! ChainDB never checks a signature. Callers verify blocks before handing
//! them to [`ChainDb::commit_signed_block`] or [`BlockSigs::add`]; what
//! arrives here is assumed authentic and is persisted as-is. What ChainDB
//! does promise is integrity on the way back out: bytes that no longer
//! decode as a well-formed record surface as corruption, never as a quiet
//! "not found".

pub mod config;
pub mod crypto;
pub mod storage;

pub use crypto::{blake3_hash, Signature, SignatureError};
pub use storage::block::{Block, BlockHeader, SignedBlock};
pub use storage::block_sigs::BlockSigs;
pub use storage::blocks::Blocks;
pub use storage::db::ChainDb;
pub use storage::{DbError, DbResult};
