use crate::error::DigestError;
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` over 0-based sequence coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fragment {
    pub start: usize,
    pub end: usize,
}

impl Fragment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An inverted interval counts as empty.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `[0, sequence_len)` at every offset in `sites`.
///
/// `sites` must already be strictly ascending and lie within
/// `0..=sequence_len`; anything else is rejected rather than sorted or
/// clamped. The result always has `sites.len() + 1` fragments whose lengths
/// sum to `sequence_len`. A cut at either end yields a zero-length fragment.
pub fn assemble_fragments(sequence_len: usize, sites: &[usize]) -> Result<Vec<Fragment>, DigestError> {
    let mut fragments = Vec::with_capacity(sites.len() + 1);
    let mut prev: Option<usize> = None;
    for (index, &offset) in sites.iter().enumerate() {
        if offset > sequence_len {
            return Err(DigestError::OffsetOutOfRange {
                offset,
                sequence_len,
            });
        }
        if let Some(previous) = prev {
            if offset <= previous {
                return Err(DigestError::UnsortedOffsets {
                    index,
                    previous,
                    offset,
                });
            }
        }
        fragments.push(Fragment::new(prev.unwrap_or(0), offset));
        prev = Some(offset);
    }
    fragments.push(Fragment::new(prev.unwrap_or(0), sequence_len));
    Ok(fragments)
}

pub fn fragment_lengths(fragments: &[Fragment]) -> Vec<usize> {
    fragments.iter().map(Fragment::len).collect()
}
