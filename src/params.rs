//! CryptoVantaa Construction Parameters
//!
//! Every value here is fixed for the lifetime of the protocol. Changing the
//! yespower cost parameters without also changing the context tag would let
//! differently-parameterized outputs collide.

/// Context tag absorbed at both ends of the pre-hash and the post-hash
pub const CONTEXT_TAG: &[u8] = b"CryptoVantaa";

/// Size of every intermediate and final value (seed, digest, chase buffer, output)
pub const HASH_SIZE: usize = 32;

/// yespower memory-cost factor N (blocks in the working memory)
pub const YESPOWER_N: u32 = 4096;

/// yespower block-size factor r (128-byte units per block)
pub const YESPOWER_R: u32 = 32;

/// Number of dependent reads performed by the chase
pub const CHASE_STEPS: usize = 4;

/// Bytes emitted per chase step (one big-endian 64-bit word)
pub const CHASE_SPAN: usize = 8;

/// Chase buffer size; the spans tile it exactly
pub const CHASE_SIZE: usize = CHASE_STEPS * CHASE_SPAN;

/// 32-bit words in the input block B that precedes the working memory
pub const INPUT_BLOCK_WORDS: usize = 32 * YESPOWER_R as usize;

/// 64-bit elements in the working memory V (2^21)
pub const WORKING_MEMORY_ELEMENTS: usize = 16 * YESPOWER_R as usize * YESPOWER_N as usize;

/// Working memory size in bytes (16 MiB)
pub const WORKING_MEMORY_SIZE: usize = WORKING_MEMORY_ELEMENTS * 8;

const _: () = assert!(CHASE_SIZE == HASH_SIZE);
const _: () = assert!(WORKING_MEMORY_ELEMENTS.is_power_of_two());
