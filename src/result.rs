//! The alignment result record and the flags controlling how much of it
//! [`Aligner::align`](crate::aligner::Aligner::align) actually computes.

/// Bit flags controlling `align`'s behavior. Deliberately a thin bitset
/// rather than a bitflags-crate type, mirroring the single-`u8` flags word
/// the original interface passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignFlags(u8);

impl AlignFlags {
    pub const NONE: AlignFlags = AlignFlags(0);

    /// Skip the banded traceback entirely; report endpoints and scores
    /// only.
    pub const ENDPOINTS_ONLY: AlignFlags = AlignFlags(1 << 0);

    #[must_use]
    pub fn contains(self, other: AlignFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for AlignFlags {
    type Output = AlignFlags;
    fn bitor(self, rhs: AlignFlags) -> AlignFlags {
        AlignFlags(self.0 | rhs.0)
    }
}

/// The outcome of a successful alignment.
#[derive(Debug, Clone)]
pub struct AlignmentResult {
    /// Best local-alignment score.
    pub score1: i32,
    /// 0-based, inclusive database end position.
    pub db_end: usize,
    /// 0-based, inclusive query end position.
    pub q_end: usize,
    /// 0-based, inclusive database start position.
    pub db_start: usize,
    /// 0-based, inclusive query start position.
    pub q_start: usize,
    /// Best score found strictly outside the `mask_len` window around
    /// `db_end`, if second-best reporting was enabled and a qualifying
    /// column was found.
    pub score2: Option<i32>,
    /// Database end position paired with `score2`.
    pub ref_end2: Option<usize>,
    /// Packed `(length << 4) | op_code` CIGAR entries, in query order.
    /// `None` when [`AlignFlags::ENDPOINTS_ONLY`] was requested or a
    /// filter skipped the traceback.
    pub cigar: Option<Vec<u32>>,
}
