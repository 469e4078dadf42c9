//! Endpoint recovery: finding `(db_start, q_start)` from a known
//! `(db_end, q_end, score)`.
//!
//! The forward kernels only ever grow `H` forward, so they naturally find
//! the alignment's end but not its start. Farrar's trick for recovering
//! the start without a full traceback is to re-run the same kernel
//! backwards over the prefix `db[0..=db_end]` with a reverse-ordered query
//! profile, stopping as soon as the known best score is reattained.

use crate::bias::composition_bias;
use crate::error::AlignError;
use crate::kernel::{byte, word, BYTE_LANES, WORD_LANES};
use crate::matrix::ScoringMatrix;
use crate::profile::build_striped;
use crate::workspace::Workspace;
use log::error;

/// The recovered `(db_start, q_start)` pair, both 0-based and inclusive.
#[derive(Debug, Clone, Copy)]
pub struct StartEndpoint {
    pub db_start: usize,
    pub q_start: usize,
}

/// Recovers the alignment start using the byte kernel.
#[allow(clippy::too_many_arguments)]
pub fn recover_start_byte(
    query: &[u8],
    matrix: &ScoringMatrix,
    use_composition_bias: bool,
    db: &[u8],
    q_end: usize,
    db_end: usize,
    best_score: i32,
    gap_open: u8,
    gap_extend: u8,
    bias: u8,
    workspace: &mut Workspace,
) -> Result<StartEndpoint, AlignError> {
    let rev_query: Vec<u8> = query[..=q_end].iter().rev().copied().collect();
    let rev_db: Vec<u8> = db[..=db_end].iter().rev().copied().collect();
    let offset = query.len() - (q_end + 1);

    let rev_bias = if use_composition_bias {
        let mut full = composition_bias(query, matrix, crate::bias::DEFAULT_WINDOW_RADIUS);
        full.reverse();
        full[offset..].to_vec()
    } else {
        Vec::new()
    };

    let profile = build_striped::<u8, BYTE_LANES>(&rev_query, matrix, bias, &rev_bias, 0);
    let outcome = byte::forward(
        &rev_db,
        &profile,
        gap_open,
        gap_extend,
        bias,
        0,
        Some(best_score),
        workspace,
    );

    if outcome.best.score != best_score {
        error!(
            "reverse byte pass found score {} but forward pass found {}",
            outcome.best.score, best_score
        );
        return Err(AlignError::InternalInconsistency(format!(
            "reverse byte pass found score {} but forward pass found {}",
            outcome.best.score, best_score
        )));
    }

    Ok(StartEndpoint { db_start: db_end - outcome.best.db_pos, q_start: q_end - outcome.end_query })
}

/// Recovers the alignment start using the word kernel.
#[allow(clippy::too_many_arguments)]
pub fn recover_start_word(
    query: &[u8],
    matrix: &ScoringMatrix,
    use_composition_bias: bool,
    db: &[u8],
    q_end: usize,
    db_end: usize,
    best_score: i32,
    gap_open: i16,
    gap_extend: i16,
    workspace: &mut Workspace,
) -> Result<StartEndpoint, AlignError> {
    let rev_query: Vec<u8> = query[..=q_end].iter().rev().copied().collect();
    let rev_db: Vec<u8> = db[..=db_end].iter().rev().copied().collect();
    let offset = query.len() - (q_end + 1);

    let rev_bias = if use_composition_bias {
        let mut full = composition_bias(query, matrix, crate::bias::DEFAULT_WINDOW_RADIUS);
        full.reverse();
        full[offset..].to_vec()
    } else {
        Vec::new()
    };

    let profile = build_striped::<i16, WORD_LANES>(&rev_query, matrix, 0, &rev_bias, 0);
    let outcome =
        word::forward(&rev_db, &profile, gap_open, gap_extend, 0, Some(best_score), workspace);

    if outcome.best.score != best_score {
        error!(
            "reverse word pass found score {} but forward pass found {}",
            outcome.best.score, best_score
        );
        return Err(AlignError::InternalInconsistency(format!(
            "reverse word pass found score {} but forward pass found {}",
            outcome.best.score, best_score
        )));
    }

    Ok(StartEndpoint { db_start: db_end - outcome.best.db_pos, q_start: q_end - outcome.end_query })
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
    fn recovers_full_span_for_identical_sequences() {
        let query = [0u8, 1, 2, 0, 1, 2];
        let matrix = toy_matrix();
        let bias = matrix.min_score().unsigned_abs();
        let mut workspace = Workspace::new(query.len(), query.len());
        let start = recover_start_byte(
            &query, &matrix, false, &query, query.len() - 1, query.len() - 1, 12, 3, 1, bias,
            &mut workspace,
        )
        .unwrap();
        assert_eq!(start.db_start, 0);
        assert_eq!(start.q_start, 0);
    }
}
