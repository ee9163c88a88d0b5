//! Scratch areas for the memory-hard core
//!
//! A scratch area is one flat allocation of 32-bit words holding everything
//! yespower touches during an evaluation:
//!
//! ```text
//! | B (32r) | V (32r * N) | X (32r) | S (3 * 2^11 * 4) |
//! ```
//!
//! `V` is the working memory the chase reads. It starts right after the input
//! block `B`, i.e. `16r` 64-bit words into the area.

use log::debug;

use crate::chase::WorkingMemory;
use crate::error::{Error, Result};

/// Words in one of the three pwxform S-boxes (2^11 entries of two lanes of 64 bits)
pub(crate) const SBOX_WORDS: usize = (1 << 11) * 2 * 2;

/// Words in the whole S region
pub(crate) const S_WORDS: usize = 3 * SBOX_WORDS;

/// Region sizes derived from the cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchLayout {
    n: u32,
    r: u32,
}

impl ScratchLayout {
    pub const fn new(n: u32, r: u32) -> Self {
        Self { n, r }
    }

    pub const fn n(&self) -> u32 {
        self.n
    }

    pub const fn r(&self) -> u32 {
        self.r
    }

    /// Words in one block (`B`, `X`, or one entry of `V`)
    pub const fn block_words(&self) -> Option<usize> {
        (self.r as usize).checked_mul(32)
    }

    /// Words in the working memory `V`
    pub const fn working_memory_words(&self) -> Option<usize> {
        match self.block_words() {
            Some(block) => block.checked_mul(self.n as usize),
            None => None,
        }
    }

    /// Total words in the area, `None` if it does not fit in `usize`
    pub fn total_words(&self) -> Option<usize> {
        self.block_words()?
            .checked_mul(2)?
            .checked_add(self.working_memory_words()?)?
            .checked_add(S_WORDS)
    }

    pub fn size_bytes(&self) -> Option<usize> {
        self.total_words()?.checked_mul(4)
    }
}

/// Mutable views of the four regions of an area.
pub(crate) struct Regions<'a> {
    pub b: &'a mut [u32],
    pub v: &'a mut [u32],
    pub x: &'a mut [u32],
    pub s: &'a mut [u32],
}

/// One reusable working area for the memory-hard core.
pub struct ScratchArea {
    words: Vec<u32>,
    layout: ScratchLayout,
    block_words: usize,
    working_memory_words: usize,
}

impl ScratchArea {
    /// Reserve and zero an area for `layout`.
    ///
    /// Both an unrepresentable size and a failed reservation surface as
    /// [`Error::ScratchAllocation`] instead of a panic or an allocator abort.
    pub fn allocate(layout: ScratchLayout) -> Result<Self> {
        let (Some(block_words), Some(working_memory_words), Some(total), Some(bytes)) = (
            layout.block_words(),
            layout.working_memory_words(),
            layout.total_words(),
            layout.size_bytes(),
        ) else {
            return Err(Error::ScratchAllocation { bytes: usize::MAX });
        };

        let mut words = Vec::new();
        words
            .try_reserve_exact(total)
            .map_err(|_| Error::ScratchAllocation { bytes })?;
        words.resize(total, 0);

        debug!(
            "allocated {} byte scratch area (N = {}, r = {})",
            bytes, layout.n, layout.r
        );

        Ok(Self {
            words,
            layout,
            block_words,
            working_memory_words,
        })
    }

    pub fn layout(&self) -> ScratchLayout {
        self.layout
    }

    pub fn size_bytes(&self) -> usize {
        self.words.len() * 4
    }

    /// The raw words of the working memory `V`
    pub fn working_memory_words(&self) -> &[u32] {
        let start = self.block_words;
        &self.words[start..start + self.working_memory_words]
    }

    /// Read-only view of `V` for the chase.
    ///
    /// Fails when the element count is not a power of two (`r` not a power of two).
    pub fn working_memory(&self) -> Result<WorkingMemory<'_>> {
        WorkingMemory::new(self.working_memory_words())
    }

    pub(crate) fn regions_mut(&mut self) -> Regions<'_> {
        let block = self.block_words;
        let (b, rest) = self.words.split_at_mut(block);
        let (v, rest) = rest.split_at_mut(self.working_memory_words);
        let (x, s) = rest.split_at_mut(block);
        Regions { b, v, x, s }
    }
}

/// Lazily created scratch area owned by one execution context.
///
/// The area is created on first use and then reused for every evaluation
/// until [`ScratchSlot::release`] or the owner is dropped.
#[derive(Default)]
pub struct ScratchSlot {
    area: Option<ScratchArea>,
}

impl ScratchSlot {
    pub const fn new() -> Self {
        Self { area: None }
    }

    pub fn is_allocated(&self) -> bool {
        self.area.is_some()
    }

    pub fn get(&self) -> Option<&ScratchArea> {
        self.area.as_ref()
    }

    /// Return the area, creating it with `init` if this is the first use.
    pub fn get_or_init<F>(&mut self, init: F) -> Result<&mut ScratchArea>
    where
        F: FnOnce() -> Result<ScratchArea>,
    {
        let area = match self.area.take() {
            Some(area) => area,
            None => init()?,
        };
        Ok(self.area.insert(area))
    }

    /// Drop the area; the next use allocates a fresh one.
    pub fn release(&mut self) {
        if let Some(area) = self.area.take() {
            debug!("released {} byte scratch area", area.size_bytes());
        }
    }
}
