//! Scoring matrices.
//!
//! Mirrors the two modes the original `SmithWaterman::createQueryProfile`
//! template supports: a square substitution matrix indexed by two residue
//! codes, and a position-specific scoring matrix (a "profile") indexed by
//! residue code and query position. Both are stored as flat `Vec<i8>` to
//! keep the layout cache-friendly for the striped profile builder.

/// Which kernel precision an [`Aligner`](crate::aligner::Aligner) is
/// prepared to run.
///
/// The original SSW library always runs the byte kernel first and only
/// falls back to the word kernel when a column score saturates at 255.
/// `ScoreWidth` lets a caller skip the byte pass entirely when it already
/// knows scores will overflow (e.g. very long, very similar sequences).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreWidth {
    /// Build only the `u8` striped profile.
    Byte,
    /// Build only the `i16` striped profile.
    Word,
    /// Build both; `align` starts with the byte kernel and re-runs with the
    /// word kernel on saturation.
    Both,
}

/// A scoring matrix in one of the two modes the kernels understand.
#[derive(Debug, Clone)]
pub enum ScoringMatrix {
    /// A conventional square substitution matrix (e.g. `BLOSUM62`), shared
    /// across all query positions.
    Substitution {
        /// Row-major `alphabet_size * alphabet_size` score table.
        scores: Vec<i8>,
        /// Number of distinct residue codes.
        alphabet_size: usize,
    },
    /// A position-specific scoring matrix, one score per `(residue, query
    /// position)` pair.
    Profile {
        /// Row-major `alphabet_size * query_len` score table: residue `r`
        /// at query position `q` is `scores[r * query_len + q]`.
        scores: Vec<i8>,
        /// Number of distinct residue codes.
        alphabet_size: usize,
        /// Length of the query the profile was built against.
        query_len: usize,
    },
}

impl ScoringMatrix {
    /// Builds a substitution matrix from a row-major table, panicking if
    /// the table isn't square.
    #[must_use]
    pub fn substitution(scores: Vec<i8>, alphabet_size: usize) -> Self {
        assert_eq!(
            scores.len(),
            alphabet_size * alphabet_size,
            "substitution matrix must be alphabet_size^2"
        );
        ScoringMatrix::Substitution { scores, alphabet_size }
    }

    /// Builds a position-specific matrix from a row-major
    /// `alphabet_size * query_len` table.
    #[must_use]
    pub fn profile(scores: Vec<i8>, alphabet_size: usize, query_len: usize) -> Self {
        assert_eq!(
            scores.len(),
            alphabet_size * query_len,
            "profile matrix must be alphabet_size * query_len"
        );
        ScoringMatrix::Profile { scores, alphabet_size, query_len }
    }

    #[must_use]
    pub fn is_profile(&self) -> bool {
        matches!(self, ScoringMatrix::Profile { .. })
    }

    #[must_use]
    pub fn alphabet_size(&self) -> usize {
        match self {
            ScoringMatrix::Substitution { alphabet_size, .. }
            | ScoringMatrix::Profile { alphabet_size, .. } => *alphabet_size,
        }
    }

    /// Looks up the score for aligning query residue `query_res` (at query
    /// position `query_pos`) against database residue `db_res`.
    ///
    /// `query_pos` is ignored in `Substitution` mode.
    #[must_use]
    pub fn score(&self, query_res: u8, query_pos: usize, db_res: u8) -> i8 {
        match self {
            ScoringMatrix::Substitution { scores, alphabet_size } => {
                scores[query_res as usize * alphabet_size + db_res as usize]
            }
            ScoringMatrix::Profile { scores, query_len, .. } => {
                scores[db_res as usize * query_len + query_pos]
            }
        }
    }

    /// The minimum score achievable anywhere in the matrix, used to seed
    /// padding cells in striped profiles.
    #[must_use]
    pub fn min_score(&self) -> i8 {
        match self {
            ScoringMatrix::Substitution { scores, .. } | ScoringMatrix::Profile { scores, .. } => {
                scores.iter().copied().min().unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blosum_like() -> ScoringMatrix {
        // 3-letter toy alphabet: match = 2, mismatch = -1.
        let mut scores = vec![-1i8; 9];
        for i in 0..3 {
            scores[i * 3 + i] = 2;
        }
        ScoringMatrix::substitution(scores, 3)
    }

    #[test]
    fn substitution_lookup_ignores_query_pos() {
        let m = blosum_like();
        assert_eq!(m.score(0, 0, 0), 2);
        assert_eq!(m.score(0, 41, 0), 2);
        assert_eq!(m.score(0, 0, 1), -1);
    }

    #[test]
    fn profile_lookup_depends_on_query_pos() {
        let scores = vec![5i8, 6, 7, /* residue 1 */ -1, -2, -3];
        let m = ScoringMatrix::profile(scores, 2, 3);
        assert_eq!(m.score(0, 0, 0), 5);
        assert_eq!(m.score(0, 2, 0), 7);
        assert_eq!(m.score(0, 1, 1), -2);
    }

    #[test]
    fn min_score_reports_matrix_floor() {
        assert_eq!(blosum_like().min_score(), -1);
    }
}
