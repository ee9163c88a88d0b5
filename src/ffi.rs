//! C FFI bindings for miners and pool servers
//!
//! Each `VantaaContext` is one execution context: create one per worker
//! thread with `cryptovantaa_ctx_new` and never share it between threads
//! that hash at the same time.
//!
//! Fatal errors (scratch allocation or evaluation failure) abort the process.

use core::slice;

use log::error;

use crate::error::Error;
use crate::params::HASH_SIZE;
use crate::vantaa::CryptoVantaa;

/// 32-byte output record
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VantaaBinary {
    pub uc: [u8; HASH_SIZE],
}

/// Opaque hasher handle for FFI
pub struct VantaaContext {
    inner: CryptoVantaa,
}

/// Create a new context
/// Returns a pointer to the context (caller must free with cryptovantaa_ctx_free)
#[unsafe(no_mangle)]
pub extern "C" fn cryptovantaa_ctx_new() -> *mut VantaaContext {
    let ctx = Box::new(VantaaContext {
        inner: CryptoVantaa::new(),
    });
    Box::into_raw(ctx)
}

/// Free a context and its scratch area
#[unsafe(no_mangle)]
pub extern "C" fn cryptovantaa_ctx_free(ctx: *mut VantaaContext) {
    if !ctx.is_null() {
        unsafe {
            let _ = Box::from_raw(ctx);
        }
    }
}

/// Hash `srclen` bytes at `src` into the record at `dst`
/// - ctx: pointer from cryptovantaa_ctx_new()
/// - src: input bytes (may be null when srclen is 0)
/// - dst: output record
#[unsafe(no_mangle)]
pub extern "C" fn cryptovantaa(
    ctx: *mut VantaaContext,
    src: *const u8,
    srclen: usize,
    dst: *mut VantaaBinary,
) {
    if ctx.is_null() || dst.is_null() || (src.is_null() && srclen != 0) {
        return;
    }

    unsafe {
        let ctx = &mut *ctx;
        let input = if srclen == 0 {
            &[][..]
        } else {
            slice::from_raw_parts(src, srclen)
        };
        match ctx.inner.hash(input) {
            Ok(output) => (*dst).uc = output,
            Err(err) => abort_on(err),
        }
    }
}

/// Hash `len` bytes at `input` into the 32 bytes at `output`
/// - ctx: pointer from cryptovantaa_ctx_new()
/// - input: input bytes (may be null when len is 0)
/// - output: pointer to a 32-byte buffer for the result
#[unsafe(no_mangle)]
pub extern "C" fn cryptovantaa_hash(
    ctx: *mut VantaaContext,
    input: *const u8,
    output: *mut u8,
    len: u32,
) {
    cryptovantaa(ctx, input, len as usize, output as *mut VantaaBinary);
}

fn abort_on(err: Error) -> ! {
    error!("cryptovantaa: {}, aborting", err);
    std::process::abort()
}
