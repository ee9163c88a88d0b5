//! yespower 1.0 memory-hard core
//!
//! The core is reached through the [`MemoryHardCore`] trait so the pipeline
//! only depends on its contract: allocate a working area, evaluate a 32-byte
//! seed into a 32-byte digest, and expose the working memory afterwards.
//!
//! [`Yespower`] is yespower 1.0 without personalization:
//! - `B = PBKDF2-HMAC-SHA256(SHA-256(seed), "", 1, 128)`
//! - S-boxes filled by sMix1 with a Salsa20/2 BlockMix
//! - sMix1 then sMix2 over `V` with the pwxform BlockMix
//! - digest = `HMAC-SHA256(last 64 bytes of B, first 32 bytes of the PBKDF2 output)`
//!
//! Salsa20 words are kept in the SIMD-shuffled order (`i * 5 mod 16`)
//! throughout, which is also the order they have in `V` when the chase reads it.

use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac};
use log::trace;
use sha2::{Digest, Sha256};

use crate::chase::WorkingMemory;
use crate::error::{Error, Result};
use crate::params::{HASH_SIZE, YESPOWER_N, YESPOWER_R};
use crate::scratch::{Regions, SBOX_WORDS, S_WORDS, ScratchArea, ScratchLayout};

/// pwxform lanes per gather
const PWX_SIMPLE: usize = 2;

/// pwxform gathers per 64-byte block
const PWX_GATHER: usize = 4;

/// pwxform rounds (yespower 1.0)
const PWX_ROUNDS: usize = 3;

/// log2 of the S-box entry count (yespower 1.0)
const S_WIDTH: u32 = 11;

/// Byte mask selecting an S-box entry
const S_MASK: u32 = ((1 << S_WIDTH) - 1) * (PWX_SIMPLE as u32) * 8;

/// Salsa20 rounds inside BlockMix (yespower 1.0)
const SALSA20_ROUNDS: usize = 2;

/// Bytes of `B` produced by PBKDF2
const PBKDF2_OUTPUT: usize = 128;

/// Contract of the memory-hard core used by the construction.
pub trait MemoryHardCore {
    /// Layout of the working area this core evaluates in.
    fn layout(&self) -> ScratchLayout;

    /// Allocate a working area. Fails only on resource exhaustion.
    fn init(&self) -> Result<ScratchArea> {
        ScratchArea::allocate(self.layout())
    }

    /// Evaluate `seed`, leaving the full working memory in `scratch`.
    fn evaluate(&self, scratch: &mut ScratchArea, seed: &[u8; HASH_SIZE]) -> Result<[u8; HASH_SIZE]>;

    /// The working memory left by the last evaluation on `scratch`.
    fn working_memory<'a>(&self, scratch: &'a ScratchArea) -> Result<WorkingMemory<'a>> {
        if scratch.layout() != self.layout() {
            return Err(Error::Evaluation("scratch area was sized for other cost parameters"));
        }
        scratch.working_memory()
    }
}

/// yespower 1.0 with fixed cost parameters.
///
/// The only public constructor is [`Yespower::cryptovantaa`]; the cost
/// parameters cannot be chosen at runtime.
///
/// ```compile_fail
/// let core = cryptovantaa::Yespower::new(1024, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yespower {
    layout: ScratchLayout,
}

impl Yespower {
    /// The parameters CryptoVantaa is defined over (N = 4096, r = 32).
    pub const fn cryptovantaa() -> Self {
        Self {
            layout: ScratchLayout::new(YESPOWER_N, YESPOWER_R),
        }
    }

    /// Reduced-cost parameters for tests.
    ///
    /// N must be a power of two in [1024, 512 * 1024] and r in [8, 32].
    #[cfg(test)]
    pub(crate) fn new(n: u32, r: u32) -> Result<Self> {
        if !n.is_power_of_two() || !(1024..=512 * 1024).contains(&n) {
            return Err(Error::Evaluation("N must be a power of two in [1024, 524288]"));
        }
        if !(8..=32).contains(&r) {
            return Err(Error::Evaluation("r must be in [8, 32]"));
        }
        Ok(Self {
            layout: ScratchLayout::new(n, r),
        })
    }
}

impl Default for Yespower {
    fn default() -> Self {
        Self::cryptovantaa()
    }
}

impl MemoryHardCore for Yespower {
    fn layout(&self) -> ScratchLayout {
        self.layout
    }

    fn evaluate(&self, scratch: &mut ScratchArea, seed: &[u8; HASH_SIZE]) -> Result<[u8; HASH_SIZE]> {
        if scratch.layout() != self.layout {
            return Err(Error::Evaluation("scratch area was sized for other cost parameters"));
        }
        let n = self.layout.n() as usize;
        let r = self.layout.r() as usize;
        trace!("yespower evaluation (N = {}, r = {})", n, r);

        let prehash = Sha256::digest(seed);
        let mut init = [0u8; PBKDF2_OUTPUT];
        pbkdf2::pbkdf2_hmac::<Sha256>(&prehash, &[], 1, &mut init);

        let Regions { b, v, x, s } = scratch.regions_mut();
        for (word, bytes) in b.iter_mut().zip(init.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        // Only the first 128 bytes of B feed the core; the rest is overwritten.
        b[PBKDF2_OUTPUT / 4..].fill(0);

        smix(b, r, n, v, x, s);

        let mut key = [0u8; 64];
        let tail = &b[b.len() - 16..];
        for (bytes, word) in key.chunks_exact_mut(4).zip(tail) {
            bytes.copy_from_slice(&word.to_le_bytes());
        }
        let mut mac = <Hmac<Sha256> as Mac>::new(GenericArray::from_slice(&key));
        mac.update(&init[..HASH_SIZE]);
        Ok(mac.finalize().into_bytes().into())
    }
}

/// Full yespower 1.0 sMix: S-box fill, sMix1, read-write sMix2.
fn smix(b: &mut [u32], r: usize, n: usize, v: &mut [u32], x: &mut [u32], s: &mut [u32]) {
    // ceil(N / 3), rounded up to even
    let nloop = ((n + 2) / 3 + 1) & !1;

    smix1(&mut b[..32], 1, S_WORDS / 32, s, &mut x[..32], &mut SalsaMix);

    let mut pwx = Pwxform::new(s);
    smix1(b, r, n, v, x, &mut pwx);
    smix2(b, r, n, nloop, v, x, &mut pwx);
}

/// First loop of sMix: fill `v` sequentially, mixing in earlier blocks.
fn smix1<M: BlockMix>(b: &mut [u32], r: usize, n: usize, v: &mut [u32], x: &mut [u32], mix: &mut M) {
    let s = 32 * r;
    shuffle_in(b, x);

    // yespower 1.0 derives blocks 1..r from block 0
    for k in 1..r {
        x.copy_within((k - 1) * 32..k * 32, k * 32);
        mix.block_mix(&mut x[k * 32..(k + 1) * 32]);
    }

    for i in 0..n {
        v[i * s..(i + 1) * s].copy_from_slice(x);
        if i > 1 {
            let j = wrap(integerify(x), i as u32) as usize;
            blkxor(x, &v[j * s..(j + 1) * s]);
        }
        mix.block_mix(x);
    }

    shuffle_out(x, b);
}

/// Second loop of sMix: random reads of `v`, writing each mixed block back.
fn smix2(b: &mut [u32], r: usize, n: usize, nloop: usize, v: &mut [u32], x: &mut [u32], mix: &mut Pwxform<'_>) {
    let s = 32 * r;
    let mask = n as u32 - 1;
    shuffle_in(b, x);

    for _ in 0..nloop {
        let j = (integerify(x) & mask) as usize;
        let vj = &mut v[j * s..(j + 1) * s];
        blkxor(x, vj);
        if nloop != 2 {
            vj.copy_from_slice(x);
        }
        mix.block_mix(x);
    }

    shuffle_out(x, b);
}

/// Load `b` (natural word order) into `x` (shuffled order).
#[inline(always)]
fn shuffle_in(b: &[u32], x: &mut [u32]) {
    for (dst, src) in x.chunks_exact_mut(16).zip(b.chunks_exact(16)) {
        for (i, word) in dst.iter_mut().enumerate() {
            *word = src[i * 5 % 16];
        }
    }
}

/// Store `x` (shuffled order) back into `b` (natural word order).
#[inline(always)]
fn shuffle_out(x: &[u32], b: &mut [u32]) {
    for (src, dst) in x.chunks_exact(16).zip(b.chunks_exact_mut(16)) {
        for (i, word) in src.iter().enumerate() {
            dst[i * 5 % 16] = *word;
        }
    }
}

#[inline(always)]
fn blkxor(dst: &mut [u32], src: &[u32]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}

/// First word of the last 64-byte sub-block (unaffected by the shuffle)
#[inline(always)]
fn integerify(x: &[u32]) -> u32 {
    x[x.len() - 16]
}

/// Largest power of two not above `x` (`x > 0`)
#[inline(always)]
pub(crate) fn p2floor(x: u32) -> u32 {
    1 << (31 - x.leading_zeros())
}

/// Map `x` into the window `[i - p2floor(i), i)` of already-written blocks
#[inline(always)]
pub(crate) fn wrap(x: u32, i: u32) -> u32 {
    let n = p2floor(i);
    (x & (n - 1)) + (i - n)
}

/// Salsa20 core on one shuffled 64-byte block, `SALSA20_ROUNDS` rounds.
pub(crate) fn salsa20(block: &mut [u32]) {
    let mut x = [0u32; 16];
    for (i, word) in block.iter().enumerate() {
        x[i * 5 % 16] = *word;
    }

    for _ in (0..SALSA20_ROUNDS).step_by(2) {
        // columns
        quarter_round(&mut x, 0, 4, 8, 12);
        quarter_round(&mut x, 5, 9, 13, 1);
        quarter_round(&mut x, 10, 14, 2, 6);
        quarter_round(&mut x, 15, 3, 7, 11);
        // rows
        quarter_round(&mut x, 0, 1, 2, 3);
        quarter_round(&mut x, 5, 6, 7, 4);
        quarter_round(&mut x, 10, 11, 8, 9);
        quarter_round(&mut x, 15, 12, 13, 14);
    }

    for (i, word) in block.iter_mut().enumerate() {
        *word = word.wrapping_add(x[i * 5 % 16]);
    }
}

#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}

/// BlockMix variant used by an sMix loop.
trait BlockMix {
    fn block_mix(&mut self, block: &mut [u32]);
}

/// Classic scrypt BlockMix with Salsa20/2, used to fill the S-boxes (r = 1).
struct SalsaMix;

impl BlockMix for SalsaMix {
    fn block_mix(&mut self, block: &mut [u32]) {
        let mut x = [0u32; 16];
        x.copy_from_slice(&block[16..32]);
        for sub in block.chunks_exact_mut(16) {
            blkxor(&mut x, sub);
            salsa20(&mut x);
            sub.copy_from_slice(&x);
        }
    }
}

/// pwxform state: the three rotating S-boxes and the write cursor.
struct Pwxform<'s> {
    s: &'s mut [u32],
    s0: usize,
    s1: usize,
    s2: usize,
    w: usize,
}

impl<'s> Pwxform<'s> {
    fn new(s: &'s mut [u32]) -> Self {
        Self {
            s,
            s0: 0,
            s1: SBOX_WORDS,
            s2: 2 * SBOX_WORDS,
            w: 0,
        }
    }

    /// 64-bit S-box entry at word offset `at`
    #[inline(always)]
    fn entry(&self, at: usize) -> u64 {
        (u64::from(self.s[at + 1]) << 32) | u64::from(self.s[at])
    }

    /// pwxform on one 64-byte block (4 gathers of 2 lanes of 64 bits).
    fn transform(&mut self, x: &mut [u32; 16]) {
        let mut w = self.w;

        for round in 0..PWX_ROUNDS {
            for j in 0..PWX_GATHER {
                let lane = j * PWX_SIMPLE * 2;
                let p0 = self.s0 + (x[lane] & S_MASK) as usize / 4;
                let p1 = self.s1 + (x[lane + 1] & S_MASK) as usize / 4;

                for k in 0..PWX_SIMPLE {
                    let at = lane + 2 * k;
                    let s0 = self.entry(p0 + 2 * k);
                    let s1 = self.entry(p1 + 2 * k);
                    let product = u64::from(x[at + 1]) * u64::from(x[at]);
                    let value = product.wrapping_add(s0) ^ s1;
                    x[at] = value as u32;
                    x[at + 1] = (value >> 32) as u32;
                }

                // Write the freshly mixed lanes back into S0 / S1
                if round == 0 || j < PWX_GATHER / 2 {
                    let base = if j & 1 == 1 { self.s1 } else { self.s0 };
                    for k in 0..PWX_SIMPLE {
                        let dst = base + 2 * (w + k);
                        self.s[dst] = x[lane + 2 * k];
                        self.s[dst + 1] = x[lane + 2 * k + 1];
                    }
                    if j & 1 == 1 {
                        w += PWX_SIMPLE;
                    }
                }
            }
        }

        // (S0, S1, S2) <- (S2, S0, S1)
        let (s0, s1, s2) = (self.s0, self.s1, self.s2);
        self.s0 = s2;
        self.s1 = s0;
        self.s2 = s1;
        self.w = w & ((1 << S_WIDTH) * PWX_SIMPLE - 1);
    }
}

impl BlockMix for Pwxform<'_> {
    /// yespower BlockMix: chained pwxform over every 64-byte sub-block, then
    /// Salsa20/2 on the last one.
    fn block_mix(&mut self, block: &mut [u32]) {
        let mut x = [0u32; 16];
        x.copy_from_slice(&block[block.len() - 16..]);
        for sub in block.chunks_exact_mut(16) {
            blkxor(&mut x, sub);
            self.transform(&mut x);
            sub.copy_from_slice(&x);
        }
        let last = block.len() - 16;
        salsa20(&mut block[last..]);
    }
}
