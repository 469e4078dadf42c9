//! Local amino-acid composition bias correction.
//!
//! Low-complexity stretches of a query (long homopolymer runs, repeats)
//! produce spuriously high scores against compositionally similar
//! database regions. The original SSW library corrects for this with an
//! undisclosed per-position bias supplied by an external matrix object;
//! this module implements an equivalent in the same shape: for each query
//! position, compare the local window's average self-similarity under the
//! matrix against the matrix's global average self-similarity, and use
//! the (usually negative, for biased regions) difference as the
//! correction.

use crate::matrix::ScoringMatrix;

/// Default symmetric window radius, in residues, for the local average.
pub const DEFAULT_WINDOW_RADIUS: usize = 10;

/// Rounds `x` to the nearest integer, breaking ties away from zero.
fn round_half_away_from_zero(x: f32) -> i8 {
    let rounded = if x < 0.0 { x - 0.5 } else { x + 0.5 };
    rounded.trunc().clamp(i8::MIN as f32, i8::MAX as f32) as i8
}

/// Computes the matrix's unweighted average self-score (the average of
/// `M[a, a]` over the query's realized residues).
fn global_average_self_score(matrix: &ScoringMatrix, query: &[u8]) -> f32 {
    if query.is_empty() {
        return 0.0;
    }
    let total: i32 = query
        .iter()
        .enumerate()
        .map(|(pos, &res)| matrix.score(res, pos, res) as i32)
        .sum();
    total as f32 / query.len() as f32
}

/// Computes the per-query-position composition bias vector.
///
/// Returns a zero-filled vector (no-op correction) for an empty query;
/// callers that want correction disabled entirely should simply not call
/// this and pass an empty slice to the profile builder instead.
#[must_use]
pub fn composition_bias(query: &[u8], matrix: &ScoringMatrix, window_radius: usize) -> Vec<i16> {
    if query.is_empty() {
        return Vec::new();
    }
    let global_avg = global_average_self_score(matrix, query);
    let len = query.len();

    (0..len)
        .map(|i| {
            let lo = i.saturating_sub(window_radius);
            let hi = (i + window_radius + 1).min(len);
            let window_total: i32 = (lo..hi).map(|k| matrix.score(query[k], k, query[k]) as i32).sum();
            let window_avg = window_total as f32 / (hi - lo) as f32;
            round_half_away_from_zero(window_avg - global_avg) as i16
        })
        .collect()
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
    fn uniform_query_has_zero_bias_everywhere() {
        let query = [0u8; 30];
        let matrix = toy_matrix();
        let bias = composition_bias(&query, &matrix, DEFAULT_WINDOW_RADIUS);
        assert!(bias.iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_query_returns_empty_bias() {
        let matrix = toy_matrix();
        assert!(composition_bias(&[], &matrix, DEFAULT_WINDOW_RADIUS).is_empty());
    }

    #[test]
    fn round_half_away_from_zero_breaks_ties_outward() {
        assert_eq!(round_half_away_from_zero(0.5), 1);
        assert_eq!(round_half_away_from_zero(-0.5), -1);
        assert_eq!(round_half_away_from_zero(1.4), 1);
        assert_eq!(round_half_away_from_zero(-1.4), -1);
    }

    #[test]
    fn window_clips_at_sequence_boundaries() {
        // All residues identical so every window average equals the global
        // average regardless of clipping; this just exercises the boundary
        // arithmetic without panicking on out-of-range indices.
        let query = [1u8; 5];
        let matrix = toy_matrix();
        let bias = composition_bias(&query, &matrix, 10);
        assert_eq!(bias.len(), 5);
    }
}
