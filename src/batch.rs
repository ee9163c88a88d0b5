//! Batch hashing over rayon workers
//!
//! Every worker gets its own [`CryptoVantaa`] (and so its own scratch area)
//! through `map_init`; no scratch area is ever touched by two workers at once.

use rayon::prelude::*;

use crate::chase::ChaseMode;
use crate::error::Result;
use crate::params::HASH_SIZE;
use crate::vantaa::CryptoVantaa;

/// Hash every input in parallel, returning results in input order.
///
/// Stops at the first fatal error. Rayon may split the work more finely than
/// there are threads, so a few more scratch areas than threads can be created.
pub fn hash_batch<T>(inputs: &[T], mode: ChaseMode) -> Result<Vec<[u8; HASH_SIZE]>>
where
    T: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map_init(
            || CryptoVantaa::new().with_chase_mode(mode),
            |hasher, input| hasher.hash(input.as_ref()),
        )
        .collect()
}
