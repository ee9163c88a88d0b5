//! The CryptoVantaa pipeline
//!
//! ```text
//! input -> pre-hash -> yespower (scratch area) -> chase over V -> post-hash -> output
//! ```
//!
//! A [`CryptoVantaa`] value is one execution context: it owns one scratch
//! area, created on the first hash and reused afterwards. Evaluations take
//! `&mut self`, so two evaluations can never overlap on the same area. Run
//! concurrent work with one hasher per thread.

use log::trace;

use crate::chase::{self, ChaseMode, ChaseTrace};
use crate::domain::{post_hash, pre_hash};
use crate::error::Result;
use crate::params::HASH_SIZE;
use crate::scratch::ScratchSlot;
use crate::yespower::{MemoryHardCore, Yespower};

/// Intermediate values of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace {
    /// Pre-hash output fed to the memory-hard core
    pub seed: [u8; HASH_SIZE],
    /// Memory-hard core output
    pub digest: [u8; HASH_SIZE],
    /// Chase buffer and the indices it read
    pub chase: ChaseTrace,
    /// Final proof-of-work value
    pub output: [u8; HASH_SIZE],
}

/// CryptoVantaa hasher
///
/// Holds the scratch area (about 16.1 MiB) between calls, so reuse one
/// instance per worker instead of calling [`hash`] in a loop.
pub struct CryptoVantaa<C = Yespower> {
    core: C,
    scratch: ScratchSlot,
    mode: ChaseMode,
}

impl CryptoVantaa<Yespower> {
    /// Create a hasher over yespower 1.0 (N = 4096, r = 32).
    ///
    /// Nothing is allocated until the first hash.
    pub fn new() -> Self {
        Self::with_core(Yespower::cryptovantaa())
    }
}

impl Default for CryptoVantaa<Yespower> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MemoryHardCore> CryptoVantaa<C> {
    pub(crate) fn with_core(core: C) -> Self {
        Self {
            core,
            scratch: ScratchSlot::new(),
            mode: ChaseMode::default(),
        }
    }

    /// Select how the chase lays out its output.
    pub fn with_chase_mode(mut self, mode: ChaseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn chase_mode(&self) -> ChaseMode {
        self.mode
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    /// Whether the scratch area has been created.
    pub fn is_allocated(&self) -> bool {
        self.scratch.is_allocated()
    }

    /// Free the scratch area; the next hash allocates it again.
    pub fn release(&mut self) {
        self.scratch.release();
    }

    /// Compute the 32-byte proof-of-work hash of `input`.
    ///
    /// Any byte sequence is valid, including the empty one. Errors are fatal
    /// (see [`crate::Error`]).
    pub fn hash(&mut self, input: &[u8]) -> Result<[u8; HASH_SIZE]> {
        self.hash_traced(input).map(|trace| trace.output)
    }

    /// Compute the hash and return every intermediate value.
    pub fn hash_traced(&mut self, input: &[u8]) -> Result<Trace> {
        let seed = pre_hash(input);

        let core = &self.core;
        let scratch = self.scratch.get_or_init(|| core.init())?;
        let digest = core.evaluate(scratch, &seed)?;

        let memory = core.working_memory(scratch)?;
        let chase = chase::chase_traced(&memory, &digest, &seed, self.mode);
        trace!("chase read indices {:?}", chase.indices);

        let output = post_hash(&chase.buffer, &digest);
        Ok(Trace {
            seed,
            digest,
            chase,
            output,
        })
    }
}

/// Convenience function for single-shot hashing
///
/// Creates a new hasher (allocating a fresh scratch area), computes the hash,
/// and drops it. For repeated hashing keep a [`CryptoVantaa`] instead.
pub fn hash(input: &[u8]) -> Result<[u8; HASH_SIZE]> {
    CryptoVantaa::new().hash(input)
}

/// Check a hash against a share or block target.
///
/// Both values are read as little-endian 256-bit integers (last byte most
/// significant), as yespower-family miners compare them; the hash passes when
/// it is not above the target.
///
/// # Example
///
/// ```rust
/// use cryptovantaa::meets_target;
///
/// let mut target = [0xFF; 32];
/// target[31] = 0x00;
/// target[30] = 0x0F;
///
/// let mut hash = [0x11; 32];
/// hash[31] = 0x00;
/// hash[30] = 0x0E;
/// assert!(meets_target(&hash, &target));
///
/// hash[30] = 0x10;
/// assert!(!meets_target(&hash, &target));
/// ```
#[inline(always)]
pub fn meets_target(hash: &[u8; HASH_SIZE], target: &[u8; HASH_SIZE]) -> bool {
    for (h, t) in hash.iter().rev().zip(target.iter().rev()) {
        if h != t {
            return h < t;
        }
    }
    true
}
