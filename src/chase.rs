//! Dependent memory chase
//!
//! After yespower finishes, four reads are made from its working memory `V`,
//! each address taken from the value of the previous read. A device that only
//! implements yespower's arithmetic, without general addressable memory, cannot
//! produce these bytes: they are not derivable from the digest alone.
//!
//! The chase only ever reads `V`; it never writes it.

use crate::error::{Error, Result};
use crate::params::{CHASE_SIZE, CHASE_SPAN, CHASE_STEPS, HASH_SIZE};

/// Read-only view of a working memory as 64-bit elements.
///
/// Element `k` is `words[2k] | words[2k + 1] << 32`, matching how yespower's
/// 32-bit words pair up on a little-endian machine.
#[derive(Debug, Clone, Copy)]
pub struct WorkingMemory<'a> {
    words: &'a [u32],
}

impl<'a> WorkingMemory<'a> {
    /// Wrap `words`; the element count (`words.len() / 2`) must be a power of two
    /// so masking an index is exact.
    pub fn new(words: &'a [u32]) -> Result<Self> {
        if words.len() % 2 != 0 {
            return Err(Error::Evaluation("working memory has an odd word count"));
        }
        if !(words.len() / 2).is_power_of_two() {
            return Err(Error::Evaluation(
                "working memory element count is not a power of two",
            ));
        }
        Ok(Self { words })
    }

    /// Number of 64-bit elements
    pub fn len(&self) -> usize {
        self.words.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `len() - 1`
    pub fn mask(&self) -> u64 {
        self.len() as u64 - 1
    }

    /// Element at `index`; `index` must already be masked.
    #[inline(always)]
    pub fn read(&self, index: usize) -> u64 {
        let lo = self.words[2 * index];
        let hi = self.words[2 * index + 1];
        u64::from(lo) | (u64::from(hi) << 32)
    }
}

/// How the chase confines its indices and lays out its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChaseMode {
    /// Spans at 0, 8, 16, 24 and every index forced into the upper half of `V`.
    #[default]
    Tiled,
    /// Digest-compatible with deployed CryptoVantaa miners and pools.
    ///
    /// The buffer starts as the seed, spans start at 0, 9, 18 and 27, and the
    /// last span is clipped to the buffer, so bytes 8, 17 and 26 keep the
    /// seed's values and only 5 bytes of the last read are used. Only the
    /// initial index is forced into the upper half.
    Legacy,
}

impl ChaseMode {
    /// Offset of the span written by `step`
    pub const fn span_offset(self, step: usize) -> usize {
        match self {
            ChaseMode::Tiled => step * CHASE_SPAN,
            ChaseMode::Legacy => step * (CHASE_SPAN + 1),
        }
    }
}

/// Chase output together with the indices that were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseTrace {
    pub buffer: [u8; CHASE_SIZE],
    pub indices: [usize; CHASE_STEPS],
}

/// Run the chase and return the 32-byte buffer.
///
/// `seed` only matters in [`ChaseMode::Legacy`], where it fills the gaps
/// between spans.
pub fn chase(
    memory: &WorkingMemory<'_>,
    digest: &[u8; HASH_SIZE],
    seed: &[u8; HASH_SIZE],
    mode: ChaseMode,
) -> [u8; CHASE_SIZE] {
    chase_traced(memory, digest, seed, mode).buffer
}

/// Run the chase, also reporting every masked index it read.
pub fn chase_traced(
    memory: &WorkingMemory<'_>,
    digest: &[u8; HASH_SIZE],
    seed: &[u8; HASH_SIZE],
    mode: ChaseMode,
) -> ChaseTrace {
    let mask = memory.mask();
    let half = (mask + 1) >> 1;

    let mut buffer = match mode {
        ChaseMode::Tiled => [0u8; CHASE_SIZE],
        ChaseMode::Legacy => *seed,
    };
    let mut indices = [0usize; CHASE_STEPS];

    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let mut next = u64::from(head) | half;

    for (step, slot) in indices.iter_mut().enumerate() {
        let index = match mode {
            ChaseMode::Tiled => (next | half) & mask,
            ChaseMode::Legacy => next & mask,
        } as usize;
        *slot = index;

        next = memory.read(index);

        let start = mode.span_offset(step);
        let end = (start + CHASE_SPAN).min(CHASE_SIZE);
        buffer[start..end].copy_from_slice(&next.to_be_bytes()[..end - start]);
    }

    ChaseTrace { buffer, indices }
}
