//! # CryptoVantaa
//!
//! A proof-of-work hash that wraps yespower 1.0 in domain-separated SHA-256
//! and adds a short data-dependent chase through yespower's working memory.
//! Accelerators that implement only yespower's arithmetic, without general
//! addressable memory, cannot produce the chase bytes.
//!
//! ## Construction
//!
//! ```text
//! seed   = SHA-256("CryptoVantaa" || input || "CryptoVantaa")
//! digest = yespower-1.0(seed, N = 4096, r = 32)
//! chase  = 4 dependent 64-bit reads from V, upper half, big-endian
//! output = SHA-256("CryptoVantaa" || chase || digest || "CryptoVantaa")
//! ```
//!
//! ## Parameters
//!
//! - 16 MiB working memory (N = 4096, r = 32), about 16.1 MiB scratch area per context
//! - 4 chase reads, 8 bytes each, tiling a 32-byte buffer
//! - Nothing is tunable at runtime
//!
//! ## Example
//!
//! ```rust
//! use cryptovantaa::{CryptoVantaa, meets_target};
//!
//! // Reusable hasher (allocates its scratch area once)
//! let mut hasher = CryptoVantaa::new();
//! let hash1 = hasher.hash(b"first header").unwrap();
//! let hash2 = hasher.hash(b"second header").unwrap();
//! assert_ne!(hash1, hash2);
//!
//! // Share check against a little-endian target
//! let target = [0xFF; 32];
//! assert!(meets_target(&hash1, &target));
//! ```
//!
//! ## Deployed digests
//!
//! Miners and pools already running CryptoVantaa compute the chase with a
//! stride of 9 bytes. [`ChaseMode::Legacy`] reproduces their digests without
//! writing outside the buffer:
//!
//! ```rust
//! use cryptovantaa::{ChaseMode, CryptoVantaa};
//!
//! let mut hasher = CryptoVantaa::new().with_chase_mode(ChaseMode::Legacy);
//! let header: Vec<u8> = (0..80u8).map(|i| i.wrapping_mul(3)).collect();
//! let hash = hasher.hash(&header).unwrap();
//! assert_eq!(hash[..4], [0x0a, 0xd2, 0x2b, 0x18]);
//! ```
//!
//! ## Errors
//!
//! Every [`Error`] is fatal: it means the scratch area could not be allocated
//! or the core could not run, never that the input was bad.

mod params;

pub mod chase;
pub mod domain;
pub mod error;
pub mod ffi;
pub mod scratch;
pub mod vantaa;
pub mod yespower;

#[cfg(feature = "parallel")]
mod batch;

pub use chase::{ChaseMode, ChaseTrace, WorkingMemory};
pub use error::{Error, Result};
pub use params::*;
pub use scratch::{ScratchArea, ScratchLayout, ScratchSlot};
pub use vantaa::{CryptoVantaa, Trace, hash, meets_target};
pub use yespower::{MemoryHardCore, Yespower};

#[cfg(feature = "parallel")]
pub use batch::hash_batch;
