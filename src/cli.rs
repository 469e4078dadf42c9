//! Command-line argument parsing for the `striped-sw` binary.
//!
//! Sequence encoding and substitution-matrix loading are out of scope for
//! the core aligner; this module supplies just enough of both — raw
//! amino-acid strings and a simple match/mismatch matrix — to exercise it
//! from a terminal.

use clap::Parser;

/// Align two protein sequences with a striped, vectorized Smith-Waterman
/// local aligner.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The query amino-acid sequence.
    pub query: String,

    /// The database (subject) amino-acid sequence.
    pub database: String,

    /// Gap open penalty (applied as a subtraction).
    #[arg(long, default_value_t = 3)]
    pub gap_open: u8,

    /// Gap extend penalty (applied as a subtraction).
    #[arg(long, default_value_t = 1)]
    pub gap_extend: u8,

    /// Match score for the default match/mismatch matrix.
    #[arg(long, default_value_t = 2)]
    pub matching: i8,

    /// Mismatch score for the default match/mismatch matrix.
    #[arg(long, default_value_t = -1)]
    pub mismatch: i8,

    /// Disable the local amino-acid composition bias correction.
    #[arg(long)]
    pub no_bias_correction: bool,

    /// Exclusion radius around the best endpoint for second-best
    /// reporting; values below 15 disable it.
    #[arg(long, default_value_t = 15)]
    pub mask_len: i32,

    /// Only report endpoints and scores, skipping the CIGAR traceback.
    #[arg(long)]
    pub endpoints_only: bool,

    /// Set Rayon's global thread pool size to one.
    #[cfg(not(feature = "dev_no_rayon"))]
    #[arg(long)]
    pub single_thread: bool,
}

/// Builds a flat `alphabet_size x alphabet_size` match/mismatch
/// substitution matrix, the way `WeightMatrix::new_dna_matrix` builds one
/// for the DNA case in the teacher's CLI.
#[must_use]
pub fn match_mismatch_matrix(alphabet_size: usize, matching: i8, mismatch: i8) -> Vec<i8> {
    let mut scores = vec![mismatch; alphabet_size * alphabet_size];
    for i in 0..alphabet_size {
        scores[i * alphabet_size + i] = matching;
    }
    scores
}
