//! Striped query profile construction (Farrar's layout).
//!
//! A profile reorders query positions so that the lanes of a single SIMD
//! vector hold scores for query positions spaced `segLen` apart instead of
//! adjacent ones. Consecutive segments then read contiguously from memory,
//! and the only cross-lane dependency in the forward kernels is the
//! single-lane carry at the end of a column (see `crate::kernel`).
//!
//! Note: the original C++ source indexes its flat `PROFILE`-mode matrix
//! with a `-1` column offset, an artifact of a leading placeholder row in
//! its residue table. [`crate::matrix::ScoringMatrix::Profile`] has no such
//! placeholder, so that `-1` is absorbed here rather than carried over.

use crate::matrix::ScoringMatrix;
use crate::simd::ScoreLane;
use std::simd::{LaneCount, Simd, SupportedLaneCount};

/// A striped query profile for a fixed lane width.
///
/// `entries[residue]` holds `segLen` vectors; lane `s` of segment `i`
/// carries the score for query position `i + s * segLen` against
/// database residue `residue`.
#[derive(Debug, Clone)]
pub struct StripedProfile<T: ScoreLane, const LANES: usize>
where
    LaneCount<LANES>: SupportedLaneCount,
{
    /// `alphabet_size` rows, each `seg_len` vectors long.
    entries: Vec<Vec<Simd<T, LANES>>>,
    seg_len: usize,
    query_len: usize,
}

impl<T: ScoreLane, const LANES: usize> StripedProfile<T, LANES>
where
    LaneCount<LANES>: SupportedLaneCount,
{
    #[must_use]
    pub fn seg_len(&self) -> usize {
        self.seg_len
    }

    #[must_use]
    pub fn query_len(&self) -> usize {
        self.query_len
    }

    /// The `seg_len`-long run of striped vectors for database residue `a`.
    #[must_use]
    pub fn row(&self, db_residue: u8) -> &[Simd<T, LANES>] {
        &self.entries[db_residue as usize]
    }

    /// Maps a striped `(segment, lane)` coordinate back to a linear query
    /// position, per the `pos = (i / Elements) + (i % Elements) * segLen`
    /// relation used when scanning `H_max` for the best-scoring column.
    #[must_use]
    pub fn striped_to_linear(&self, segment: usize, lane: usize) -> usize {
        segment + lane * self.seg_len
    }
}

/// Builds a striped profile over `query` against `matrix`, with an
/// additive `bias` (zero in word mode) and a per-query-position
/// composition-bias correction (zero vector if disabled).
///
/// `offset` supports building a reverse profile from a query slice that
/// has already been reversed by the caller: it is the original query's
/// `L - q_end` used by endpoint recovery (see `crate::endpoint`), and is
/// `0` for the ordinary forward profile.
#[must_use]
pub fn build_striped<T: ScoreLane, const LANES: usize>(
    query: &[u8],
    matrix: &ScoringMatrix,
    bias: T,
    composition_bias: &[i16],
    offset: usize,
) -> StripedProfile<T, LANES>
where
    LaneCount<LANES>: SupportedLaneCount,
{
    let query_len = query.len();
    let seg_len = query_len.div_ceil(LANES).max(1);
    let alphabet_size = matrix.alphabet_size();

    let mut entries = Vec::with_capacity(alphabet_size);
    for db_residue in 0..alphabet_size {
        let mut row = Vec::with_capacity(seg_len);
        for segment in 0..seg_len {
            let mut lanes = [T::FLOOR; LANES];
            for (lane, slot) in lanes.iter_mut().enumerate() {
                let j = segment + lane * seg_len;
                *slot = if j >= query_len {
                    bias
                } else {
                    let query_pos = j + offset;
                    let raw = match matrix {
                        ScoringMatrix::Substitution { .. } => {
                            let query_res = query[j];
                            matrix.score(query_res, query_pos, db_residue as u8) as i32
                                + composition_bias.get(query_pos).copied().unwrap_or(0) as i32
                        }
                        ScoringMatrix::Profile { .. } => {
                            matrix.score(0, query_pos, db_residue as u8) as i32
                        }
                    };
                    T::from_i32(raw + bias.to_i32())
                };
            }
            row.push(Simd::from_array(lanes));
        }
        entries.push(row);
    }

    StripedProfile { entries, seg_len, query_len }
}

/// Builds the linear (non-striped) `i16` profile used by the banded
/// traceback: `linear[db_residue][query_pos]`.
#[must_use]
pub fn build_linear(
    query: &[u8],
    matrix: &ScoringMatrix,
    composition_bias: &[i16],
) -> Vec<Vec<i16>> {
    let alphabet_size = matrix.alphabet_size();
    let query_len = query.len();
    let mut linear = vec![vec![0i16; query_len]; alphabet_size];
    for (db_residue, row) in linear.iter_mut().enumerate() {
        for (query_pos, slot) in row.iter_mut().enumerate() {
            let raw = match matrix {
                ScoringMatrix::Substitution { .. } => {
                    matrix.score(query[query_pos], query_pos, db_residue as u8) as i32
                        + composition_bias.get(query_pos).copied().unwrap_or(0) as i32
                }
                ScoringMatrix::Profile { .. } => {
                    matrix.score(0, query_pos, db_residue as u8) as i32
                }
            };
            *slot = raw as i16;
        }
    }
    linear
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_matrix() -> ScoringMatrix {
        let mut scores = vec![-1i8; 9];
        for i in 0..3 {
            scores[i * 3 + i] = 2;
        }
        ScoringMatrix::substitution(scores, 3)
    }

    #[test]
    fn striped_layout_matches_documented_formula() {
        // query length 5, 4 lanes -> seg_len = 2.
        let query = [0u8, 1, 2, 0, 1];
        let matrix = toy_matrix();
        let bias = 10u8;
        let profile = build_striped::<u8, 4>(&query, &matrix, bias, &[], 0);
        assert_eq!(profile.seg_len(), 2);

        // segment 0, lane 2 -> j = 0 + 2*2 = 4 -> query[4] = residue 1.
        let seg0 = profile.row(1)[0].to_array();
        let expected = matrix.score(query[4], 4, 1) as i32 + bias as i32;
        assert_eq!(seg0[2] as i32, expected);

        // segment 1, lane 2 -> j = 1 + 2*2 = 5 >= L=5 -> neutral (bias).
        let seg1 = profile.row(1)[1].to_array();
        assert_eq!(seg1[2], bias);
    }

    #[test]
    fn striped_to_linear_round_trips() {
        let query = [0u8; 7];
        let matrix = toy_matrix();
        let profile = build_striped::<u8, 4>(&query, &matrix, 0, &[], 0);
        for segment in 0..profile.seg_len() {
            for lane in 0..4 {
                let j = profile.striped_to_linear(segment, lane);
                assert_eq!(j, segment + lane * profile.seg_len());
            }
        }
    }

    #[test]
    fn linear_profile_matches_substitution_lookup() {
        let query = [0u8, 1, 2];
        let matrix = toy_matrix();
        let linear = build_linear(&query, &matrix, &[]);
        assert_eq!(linear[1][0], matrix.score(0, 0, 1) as i16);
        assert_eq!(linear[2][2], matrix.score(2, 2, 2) as i16);
    }
}
