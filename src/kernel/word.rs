//! The 16-bit signed striped forward kernel (byte-kernel fallback).

use super::{Endpoint, ForwardOutcome, WORD_LANES};
use crate::profile::StripedProfile;
use crate::simd::{shift_in_zero, ScoreLane};
use crate::workspace::Workspace;
use std::simd::cmp::{SimdOrd, SimdPartialOrd};
use std::simd::Simd;

type Vector = Simd<i16, WORD_LANES>;

fn horizontal_max(v: Vector) -> i16 {
    v.to_array().into_iter().max().unwrap_or(0)
}

/// Runs the word kernel over `db`, against `profile`. Same recurrence as
/// [`crate::kernel::byte::forward`] without the bias offset, using signed
/// 16-bit saturating arithmetic instead.
#[allow(clippy::too_many_arguments)]
pub fn forward(
    db: &[u8],
    profile: &StripedProfile<i16, WORD_LANES>,
    gap_open: i16,
    gap_extend: i16,
    mask_len: i32,
    terminate: Option<i32>,
    workspace: &mut Workspace,
) -> ForwardOutcome {
    let seg_len = profile.seg_len();
    workspace.reset_word(seg_len);

    let h_store = &mut workspace.h_store_word;
    let h_load = &mut workspace.h_load_word;
    let e = &mut workspace.e_word;
    let h_max = &mut workspace.h_max_word;
    let max_column = &mut workspace.max_column;

    let v_gap_open = Vector::splat(gap_open);
    let v_gap_extend = Vector::splat(gap_extend);

    let mut best = Endpoint::default();
    let mut processed = db.len();

    'outer: for (i, &db_res) in db.iter().enumerate() {
        let row = profile.row(db_res);
        let mut v_f = Vector::splat(0);
        // See `kernel::byte::forward` for why the swap happens here rather
        // than at the end of the column.
        let mut v_h = shift_in_zero(h_store[seg_len - 1]);
        std::mem::swap(h_store, h_load);
        let mut column_max = Vector::splat(0);

        for j in 0..seg_len {
            v_h = i16::add(v_h, row[j]);
            v_h = i16::max_floor(v_h);
            v_h = v_h.simd_max(e[j]);
            v_h = v_h.simd_max(v_f);
            column_max = column_max.simd_max(v_h);
            h_store[j] = v_h;

            let v_h_minus_open = i16::sub_floored(v_h, v_gap_open);
            e[j] = i16::sub_floored(e[j], v_gap_extend).simd_max(v_h_minus_open);
            v_f = i16::sub_floored(v_f, v_gap_extend).simd_max(v_h_minus_open);

            v_h = h_load[j];
        }

        let mut v_f_shift = shift_in_zero(v_f);
        for _ in 0..=WORD_LANES {
            let mut any_update = false;
            for j in 0..seg_len {
                let threshold = i16::sub_floored(h_store[j], v_gap_open);
                let improves = v_f_shift.simd_gt(threshold);
                if improves.any() {
                    any_update = true;
                    let updated = h_store[j].simd_max(v_f_shift);
                    column_max = column_max.simd_max(updated);
                    h_store[j] = updated;
                }
                v_f_shift = i16::sub_floored(v_f_shift, v_gap_extend);
            }
            if !any_update {
                break;
            }
            v_f_shift = shift_in_zero(v_f_shift);
        }

        let column_best = horizontal_max(column_max);
        max_column[i] = column_best as u16;

        let score = column_best as i32;
        if score > best.score {
            best = Endpoint { score, db_pos: i };
            h_max[..seg_len].copy_from_slice(&h_store[..seg_len]);
        }

        if let Some(t) = terminate {
            if score >= t {
                processed = i + 1;
                break 'outer;
            }
        }
    }

    let mut end_query = 0;
    let mut best_in_h_max = 0i16;
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

    ForwardOutcome { best, end_query, second_best, saturated: false }
}
