//! Reusable scratch storage for the aligner.
//!
//! The original source manages these buffers with raw pointers allocated
//! once per `init` call and freed manually. Here they live as plain `Vec`
//! fields on one `Workspace` value, resized (not reallocated, when
//! capacity already suffices) on every `init`/`align` call and owned for
//! the lifetime of the [`Aligner`](crate::aligner::Aligner).

use crate::kernel::{BYTE_LANES, WORD_LANES};
use std::simd::Simd;

/// Scratch buffers shared by the byte kernel, word kernel, and banded
/// traceback.
#[derive(Debug, Default)]
pub struct Workspace {
    pub(crate) h_store_byte: Vec<Simd<u8, BYTE_LANES>>,
    pub(crate) h_load_byte: Vec<Simd<u8, BYTE_LANES>>,
    pub(crate) e_byte: Vec<Simd<u8, BYTE_LANES>>,
    pub(crate) h_max_byte: Vec<Simd<u8, BYTE_LANES>>,

    pub(crate) h_store_word: Vec<Simd<i16, WORD_LANES>>,
    pub(crate) h_load_word: Vec<Simd<i16, WORD_LANES>>,
    pub(crate) e_word: Vec<Simd<i16, WORD_LANES>>,
    pub(crate) h_max_word: Vec<Simd<i16, WORD_LANES>>,

    /// Per-database-column horizontal max, reused by both kernels and by
    /// second-best scanning.
    pub(crate) max_column: Vec<u16>,

    /// Back-pointer matrix for the banded traceback: 2 bits per cell,
    /// `query_len.div_ceil(4)` bytes per database row.
    pub(crate) bt_matrix: Vec<u8>,
}

impl Workspace {
    #[must_use]
    pub fn new(max_query_len: usize, max_db_len: usize) -> Self {
        let mut ws = Workspace::default();
        ws.reserve(max_query_len, max_db_len);
        ws
    }

    /// Grows backing storage to the given bounds without shrinking it;
    /// a no-op if the workspace is already large enough.
    pub fn reserve(&mut self, max_query_len: usize, max_db_len: usize) {
        let byte_seg_cap = max_query_len.div_ceil(BYTE_LANES).max(1);
        let word_seg_cap = max_query_len.div_ceil(WORD_LANES).max(1);

        self.h_store_byte.resize(byte_seg_cap, Simd::splat(0));
        self.h_load_byte.resize(byte_seg_cap, Simd::splat(0));
        self.e_byte.resize(byte_seg_cap, Simd::splat(0));
        self.h_max_byte.resize(byte_seg_cap, Simd::splat(0));

        self.h_store_word.resize(word_seg_cap, Simd::splat(0));
        self.h_load_word.resize(word_seg_cap, Simd::splat(0));
        self.e_word.resize(word_seg_cap, Simd::splat(0));
        self.h_max_word.resize(word_seg_cap, Simd::splat(0));

        if self.max_column.len() < max_db_len {
            self.max_column.resize(max_db_len, 0);
        }
        let bt_len = max_query_len.div_ceil(4) * max_db_len;
        if self.bt_matrix.len() < bt_len {
            self.bt_matrix.resize(bt_len, 0);
        }
    }

    /// Zeroes the byte-kernel buffers for a column sweep of `seg_len`
    /// segments.
    pub(crate) fn reset_byte(&mut self, seg_len: usize) {
        self.h_store_byte[..seg_len].fill(Simd::splat(0));
        self.h_load_byte[..seg_len].fill(Simd::splat(0));
        self.e_byte[..seg_len].fill(Simd::splat(0));
        self.h_max_byte[..seg_len].fill(Simd::splat(0));
    }

    /// Zeroes the word-kernel buffers for a column sweep of `seg_len`
    /// segments.
    pub(crate) fn reset_word(&mut self, seg_len: usize) {
        self.h_store_word[..seg_len].fill(Simd::splat(0));
        self.h_load_word[..seg_len].fill(Simd::splat(0));
        self.e_word[..seg_len].fill(Simd::splat(0));
        self.h_max_word[..seg_len].fill(Simd::splat(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_grows_but_never_shrinks() {
        let mut ws = Workspace::new(100, 200);
        let cap_before = ws.max_column.len();
        ws.reserve(10, 10);
        assert_eq!(ws.max_column.len(), cap_before);
        ws.reserve(1000, 2000);
        assert!(ws.max_column.len() >= 2000);
    }

    #[test]
    fn reset_byte_zeroes_in_use_segments() {
        let mut ws = Workspace::new(64, 10);
        ws.h_store_byte[0] = Simd::splat(200);
        ws.reset_byte(ws.h_store_byte.len());
        assert_eq!(ws.h_store_byte[0], Simd::splat(0));
    }
}
