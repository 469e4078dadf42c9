//! The 8-bit saturating striped forward kernel.

use super::{Endpoint, ForwardOutcome, BYTE_LANES};
use crate::profile::StripedProfile;
use crate::simd::{shift_in_zero, ScoreLane};
use crate::workspace::Workspace;
use std::simd::cmp::{SimdOrd, SimdPartialOrd};
use std::simd::Simd;

type Vector = Simd<u8, BYTE_LANES>;

fn horizontal_max(v: Vector) -> u8 {
    v.to_array().into_iter().max().unwrap_or(0)
}

/// Runs the byte kernel over `db`, against `profile`, returning the best
/// (and optionally second-best) local-alignment endpoint.
///
/// `terminate`, when set, is the previously known best score; the sweep
/// stops as soon as a column's horizontal max reattains it (used by
/// endpoint recovery's reverse pass, see `crate::endpoint`).
#[allow(clippy::too_many_arguments)]
pub fn forward(
    db: &[u8],
    profile: &StripedProfile<u8, BYTE_LANES>,
    gap_open: u8,
    gap_extend: u8,
    bias: u8,
    mask_len: i32,
    terminate: Option<i32>,
    workspace: &mut Workspace,
) -> ForwardOutcome {
    let seg_len = profile.seg_len();
    workspace.reset_byte(seg_len);

    let h_store = &mut workspace.h_store_byte;
    let h_load = &mut workspace.h_load_byte;
    let e = &mut workspace.e_byte;
    let h_max = &mut workspace.h_max_byte;
    let max_column = &mut workspace.max_column;

    let v_gap_open = Vector::splat(gap_open);
    let v_gap_extend = Vector::splat(gap_extend);
    let v_bias = Vector::splat(bias);

    let mut best = Endpoint::default();
    let mut saturated = false;
    let mut processed = db.len();

    'outer: for (i, &db_res) in db.iter().enumerate() {
        let row = profile.row(db_res);
        let mut v_f = Vector::splat(0);
        // Shift seed comes from the column just finished, still in
        // `h_store` at this point; only after taking it do we swap the
        // buffers so `h_load` refers to that finished column for the
        // diagonal reads below and `h_store` becomes this column's target.
        let mut v_h = shift_in_zero(h_store[seg_len - 1]);
        std::mem::swap(h_store, h_load);
        let mut column_max = Vector::splat(0);

        for j in 0..seg_len {
            v_h = u8::add(v_h, row[j]);
            v_h = u8::sub_floored(v_h, v_bias);
            v_h = v_h.simd_max(e[j]);
            v_h = v_h.simd_max(v_f);
            column_max = column_max.simd_max(v_h);
            h_store[j] = v_h;

            let v_h_minus_open = u8::sub_floored(v_h, v_gap_open);
            e[j] = u8::sub_floored(e[j], v_gap_extend).simd_max(v_h_minus_open);
            v_f = u8::sub_floored(v_f, v_gap_extend).simd_max(v_h_minus_open);

            v_h = h_load[j];
        }

        // Lazy-F correction: F's intra-column dependency propagates at most
        // one lane per round, so `BYTE_LANES` rounds always suffice.
        let mut v_f_shift = shift_in_zero(v_f);
        for _ in 0..=BYTE_LANES {
            let mut any_update = false;
            for j in 0..seg_len {
                let threshold = u8::sub_floored(h_store[j], v_gap_open);
                let improves = v_f_shift.simd_gt(threshold);
                if improves.any() {
                    any_update = true;
                    let updated = h_store[j].simd_max(v_f_shift);
                    column_max = column_max.simd_max(updated);
                    h_store[j] = updated;
                    v_f_shift = u8::sub_floored(v_f_shift, v_gap_extend);
                } else {
                    v_f_shift = u8::sub_floored(v_f_shift, v_gap_extend);
                }
            }
            if !any_update {
                break;
            }
            v_f_shift = shift_in_zero(v_f_shift);
        }

        let column_best = horizontal_max(column_max);
        max_column[i] = column_best as u16;

        let unbiased = column_best as i32;
        if unbiased > best.score {
            best = Endpoint { score: unbiased, db_pos: i };
            h_max[..seg_len].copy_from_slice(&h_store[..seg_len]);
            if column_best as i32 + (bias as i32) >= 255 || column_best == u8::MAX {
                saturated = true;
            }
        }

        if let Some(t) = terminate {
            if unbiased >= t {
                processed = i + 1;
                break 'outer;
            }
        }
    }

    let mut end_query = 0;
    let mut best_in_h_max = 0u8;
    for seg in 0..seg_len {
        let arr = h_max[seg].to_array();
        for (lane, &v) in arr.iter().enumerate() {
            if v > best_in_h_max {
                best_in_h_max = v;
                end_query = profile.striped_to_linear(seg, lane);
            }
        }
    }

    let second_best = super::second_best_outside_mask(&max_column[..processed], best.db_pos, mask_len);

    ForwardOutcome { best, end_query, second_best, saturated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ScoringMatrix;

    fn toy_matrix() -> ScoringMatrix {
        let mut scores = vec![-1i8; 9];
        for i in 0..3 {
            scores[i * 3 + i] = 2;
        }
        ScoringMatrix::substitution(scores, 3)
    }

    #[test]
    fn identical_sequences_score_full_match() {
        let query = [0u8, 1, 2, 0, 1, 2];
        let matrix = toy_matrix();
        let bias = (matrix.min_score().unsigned_abs()) as u8;
        let profile = crate::profile::build_striped::<u8, BYTE_LANES>(&query, &matrix, bias, &[], 0);
        let mut workspace = Workspace::new(query.len(), query.len());
        let outcome = forward(&query, &profile, 3, 1, bias, 0, None, &mut workspace);
        assert_eq!(outcome.best.score, 12);
        assert_eq!(outcome.end_query, query.len() - 1);
    }

    #[test]
    fn unrelated_sequences_score_zero() {
        let query = [0u8; 5];
        let db = [1u8; 5];
        let matrix = toy_matrix();
        let bias = (matrix.min_score().unsigned_abs()) as u8;
        let profile = crate::profile::build_striped::<u8, BYTE_LANES>(&query, &matrix, bias, &[], 0);
        let mut workspace = Workspace::new(query.len(), db.len());
        let outcome = forward(&db, &profile, 3, 1, bias, 0, None, &mut workspace);
        assert_eq!(outcome.best.score, 0);
    }
}
