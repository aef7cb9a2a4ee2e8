//! # Cryptographic Primitives
//!
//! The small cryptographic surface ChainDB actually needs: content hashing
//! and the fixed-width signature value type. Signing and verification are
//! deliberately absent. A persistence layer that can mint signatures is a
//! persistence layer that can forge history, so key material never enters
//! this crate.

pub mod hash;
pub mod signatures;

pub use hash::{blake3_hash, hash_hex};
pub use signatures::{Signature, SignatureError};
