//! Hash capability consumed by the lock.
//!
//! Verification code depends only on the narrow [`Hasher`] interface; the
//! chain's blake2b-256 ("ckb-default-hash" personalization) is the default
//! provider.

use crate::constants::{DIGEST_BYTES, IDENTIFIER_WIDTH};

pub trait Hasher {
    fn digest(&self, input: &[u8]) -> [u8; DIGEST_BYTES];

    /// First [`IDENTIFIER_WIDTH`] bytes of [`Hasher::digest`].
    fn short_hash(&self, input: &[u8]) -> [u8; IDENTIFIER_WIDTH] {
        truncate_identifier(&self.digest(input))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CkbHasher;

impl Hasher for CkbHasher {
    fn digest(&self, input: &[u8]) -> [u8; DIGEST_BYTES] {
        ckb_hash::blake2b_256(input)
    }
}

/// Lock hashes and preimage digests are compared on their 20-byte prefix
/// to match the chain's lock-hash identifier width.
pub fn truncate_identifier(digest: &[u8; DIGEST_BYTES]) -> [u8; IDENTIFIER_WIDTH] {
    let mut out = [0u8; IDENTIFIER_WIDTH];
    out.copy_from_slice(&digest[..IDENTIFIER_WIDTH]);
    out
}

pub fn short_hash(input: &[u8]) -> [u8; IDENTIFIER_WIDTH] {
    CkbHasher.short_hash(input)
}
