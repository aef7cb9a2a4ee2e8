//! # Block Signatures
//!
//! The fixed-width signature value stored against each block hash.
//!
//! A [`Signature`] is 65 opaque bytes: a 64-byte recoverable ECDSA
//! signature (`r || s`) followed by a one-byte recovery id. ChainDB never
//! interprets those bytes. Verification happens in the validation layer
//! before anything reaches storage; recovery of the signer's public key
//! happens wherever provenance is re-checked. Here a signature is a value
//! with exactly one interesting property: its width never varies.
//!
//! ## On-disk codec
//!
//! The codec is the identity function. A signature is persisted as its
//! raw 65 bytes and parsed back with a strict length check. No framing,
//! no version byte, no varint. Fixed width means a truncated or padded
//! record is detectable from length alone, and [`Signature::from_bytes`]
//! treats any such record as malformed rather than guessing.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::SIGNATURE_LENGTH;

/// Errors while decoding signature bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The byte sequence is not exactly [`SIGNATURE_LENGTH`] bytes.
    #[error("invalid signature length: expected {SIGNATURE_LENGTH} bytes, got {0}")]
    InvalidLength(usize),
}

/// A fixed-width recoverable block signature.
///
/// Opaque to this crate. Construct one from verified bytes with
/// [`Signature::from_bytes`]; get the raw bytes back for storage with
/// [`Signature::as_bytes`]. Copy is deliberate: 65 bytes on the stack is
/// cheaper than reasoning about ownership of a value this small.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Width of every signature, in bytes.
    pub const LENGTH: usize = SIGNATURE_LENGTH;

    /// Wrap exactly [`SIGNATURE_LENGTH`] bytes as a signature.
    pub fn new(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature(bytes)
    }

    /// Decode a signature from a byte slice with a strict length check.
    ///
    /// This is the read side of the on-disk codec. Anything that is not
    /// exactly 65 bytes is rejected; a store that finds such bytes under
    /// a known key is looking at corruption, not at a shorter signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let arr: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidLength(bytes.len()))?;
        Ok(Signature(arr))
    }

    /// The raw 65 bytes. This is also the on-disk encoding.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// The trailing recovery-id byte.
    pub fn recovery_id(&self) -> u8 {
        self.0[SIGNATURE_LENGTH - 1]
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// The all-zero signature. Not a valid signature of anything; exists so
/// tests and placeholders have a well-defined inert value.
impl Default for Signature {
    fn default() -> Self {
        Signature([0u8; SIGNATURE_LENGTH])
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature(bytes)
    }
}

// Serde as raw bytes, not as a 65-element sequence. bincode then encodes
// a signature exactly as its wire form plus a length prefix, and decode
// reuses the strict length check in `from_bytes`.

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

struct SignatureVisitor;

impl<'de> Visitor<'de> for SignatureVisitor {
    type Value = Signature;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {SIGNATURE_LENGTH}-byte recoverable signature")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Signature, E> {
        Signature::from_bytes(v).map_err(E::custom)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Signature, A::Error> {
        let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH);
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Signature::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_bytes(SignatureVisitor)
    }
}
