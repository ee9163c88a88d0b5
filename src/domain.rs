//! Domain-separated SHA-256 around the memory-hard core.
//!
//! Both hashes sandwich their payload between two copies of [`CONTEXT_TAG`].

use sha2::{Digest, Sha256};

use crate::params::{CHASE_SIZE, CONTEXT_TAG, HASH_SIZE};

/// Seed for the memory-hard core: `SHA-256(tag || input || tag)`
pub fn pre_hash(input: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(CONTEXT_TAG);
    hasher.update(input);
    hasher.update(CONTEXT_TAG);
    hasher.finalize().into()
}

/// Final output: `SHA-256(tag || chase || digest || tag)`
pub fn post_hash(chase: &[u8; CHASE_SIZE], digest: &[u8; HASH_SIZE]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(CONTEXT_TAG);
    hasher.update(chase);
    hasher.update(digest);
    hasher.update(CONTEXT_TAG);
    hasher.finalize().into()
}
