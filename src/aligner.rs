//! The orchestrator tying profile construction, kernel selection, endpoint
//! recovery, and traceback together.

use crate::bias::{composition_bias, DEFAULT_WINDOW_RADIUS};
use crate::endpoint::{recover_start_byte, recover_start_word};
use crate::error::AlignError;
use crate::kernel::{byte, word, BYTE_LANES, WORD_LANES};
use crate::matrix::{ScoreWidth, ScoringMatrix};
use crate::profile::{build_linear, build_striped, StripedProfile};
use crate::result::{AlignFlags, AlignmentResult};
use crate::traceback::banded_traceback;
use crate::workspace::Workspace;
use log::{debug, trace};

/// A reusable Smith-Waterman aligner.
///
/// One `Aligner` is built per query (via [`Aligner::init`]) and then run
/// against as many database sequences as needed (via [`Aligner::align`]),
/// reusing its scratch [`Workspace`] across calls.
pub struct Aligner {
    max_seq_len: usize,
    aa_bias_correction: bool,
    workspace: Workspace,
    query: Vec<u8>,
    matrix: Option<ScoringMatrix>,
    composition_bias: Vec<i16>,
    byte_profile: Option<StripedProfile<u8, BYTE_LANES>>,
    word_profile: Option<StripedProfile<i16, WORD_LANES>>,
    linear_profile: Option<Vec<Vec<i16>>>,
    bias: u8,
}

impl Aligner {
    /// Creates an aligner sized for queries and database sequences up to
    /// `max_seq_len`. `alphabet_size` is currently informational (the
    /// scoring matrix carries its own alphabet size); it's accepted here
    /// to mirror the original constructor shape callers may expect.
    #[must_use]
    pub fn new(max_seq_len: usize, _alphabet_size: usize, aa_bias_correction: bool) -> Self {
        Aligner {
            max_seq_len,
            aa_bias_correction,
            workspace: Workspace::new(max_seq_len, max_seq_len),
            query: Vec::new(),
            matrix: None,
            composition_bias: Vec::new(),
            byte_profile: None,
            word_profile: None,
            linear_profile: None,
            bias: 0,
        }
    }

    /// Builds the striped profiles for `query` against `matrix`.
    ///
    /// Composition bias correction only applies in `SUBSTITUTION` mode
    /// (PROFILE-mode matrices already encode position-specific scores).
    pub fn init(
        &mut self,
        query: &[u8],
        matrix: &ScoringMatrix,
        score_size: ScoreWidth,
    ) -> Result<(), AlignError> {
        debug!("init: query_len={} score_size={:?}", query.len(), score_size);
        self.workspace.reserve(query.len().max(self.max_seq_len), self.max_seq_len);

        self.composition_bias = if self.aa_bias_correction && !matrix.is_profile() {
            composition_bias(query, matrix, DEFAULT_WINDOW_RADIUS)
        } else {
            vec![0i16; query.len()]
        };

        let min_comp_bias = self.composition_bias.iter().copied().min().unwrap_or(0);
        self.bias = matrix.min_score().unsigned_abs().saturating_add(min_comp_bias.unsigned_abs() as u8);

        self.byte_profile = matches!(score_size, ScoreWidth::Byte | ScoreWidth::Both).then(|| {
            build_striped::<u8, BYTE_LANES>(query, matrix, self.bias, &self.composition_bias, 0)
        });
        self.word_profile = matches!(score_size, ScoreWidth::Word | ScoreWidth::Both).then(|| {
            build_striped::<i16, WORD_LANES>(query, matrix, 0, &self.composition_bias, 0)
        });
        self.linear_profile = Some(build_linear(query, matrix, &self.composition_bias));

        self.query = query.to_vec();
        self.matrix = Some(matrix.clone());
        trace!(
            "bias={} byte_profile={} word_profile={}",
            self.bias,
            self.byte_profile.is_some(),
            self.word_profile.is_some()
        );
        Ok(())
    }

    /// Aligns `db` against the query configured in the last [`Aligner::init`]
    /// call.
    ///
    /// Returns `Ok(None)` never occurs today (a local alignment with score
    /// 0 is still reported); it's reserved for a future "below minimum
    /// score" short-circuit. Filters skip increasingly expensive stages:
    /// `filters` skips endpoint recovery and traceback outright, `filterd`
    /// skips only the traceback once the span is known.
    #[allow(clippy::too_many_arguments)]
    pub fn align(
        &mut self,
        db: &[u8],
        gap_open: u8,
        gap_extend: u8,
        flags: AlignFlags,
        filters: Option<u16>,
        filterd: Option<i32>,
        mask_len: i32,
    ) -> Result<Option<AlignmentResult>, AlignError> {
        let matrix = self.matrix.as_ref().ok_or(AlignError::NotInitialized)?;
        self.workspace.reserve(self.query.len(), db.len());

        let (mut outcome, mut used_word) = if let Some(profile) = &self.byte_profile {
            (
                byte::forward(db, profile, gap_open, gap_extend, self.bias, mask_len, None, &mut self.workspace),
                false,
            )
        } else if let Some(profile) = &self.word_profile {
            (
                word::forward(db, profile, gap_open as i16, gap_extend as i16, mask_len, None, &mut self.workspace),
                true,
            )
        } else {
            return Err(AlignError::NotInitialized);
        };

        if !used_word && outcome.saturated {
            let Some(word_profile) = &self.word_profile else {
                return Err(AlignError::Saturated);
            };
            debug!("byte kernel saturated near db_end={}, retrying with word kernel", outcome.best.db_pos);
            outcome = word::forward(
                db,
                word_profile,
                gap_open as i16,
                gap_extend as i16,
                mask_len,
                None,
                &mut self.workspace,
            );
            used_word = true;
        }

        let score1 = outcome.best.score;
        let db_end = outcome.best.db_pos;
        let q_end = outcome.end_query;

        if let Some(threshold) = filters {
            if score1 < threshold as i32 {
                debug!("score {score1} below filter threshold {threshold}, skipping endpoint recovery");
                return Ok(Some(AlignmentResult {
                    score1,
                    db_end,
                    q_end,
                    db_start: db_end,
                    q_start: q_end,
                    score2: outcome.second_best.map(|e| e.score),
                    ref_end2: outcome.second_best.map(|e| e.db_pos),
                    cigar: None,
                }));
            }
        }

        let use_bias = self.aa_bias_correction && !matrix.is_profile();
        let start = if used_word {
            recover_start_word(
                &self.query, matrix, use_bias, db, q_end, db_end, score1,
                gap_open as i16, gap_extend as i16, &mut self.workspace,
            )?
        } else {
            recover_start_byte(
                &self.query, matrix, use_bias, db, q_end, db_end, score1,
                gap_open, gap_extend, self.bias, &mut self.workspace,
            )?
        };

        let span = (db_end - start.db_start).max(q_end - start.q_start) as i32;
        if let Some(max_span) = filterd {
            if span > max_span {
                debug!("alignment span {span} exceeds filterd {max_span}, skipping traceback");
                return Ok(Some(AlignmentResult {
                    score1,
                    db_end,
                    q_end,
                    db_start: start.db_start,
                    q_start: start.q_start,
                    score2: outcome.second_best.map(|e| e.score),
                    ref_end2: outcome.second_best.map(|e| e.db_pos),
                    cigar: None,
                }));
            }
        }

        let cigar = if flags.contains(AlignFlags::ENDPOINTS_ONLY) {
            None
        } else {
            let linear_profile = self.linear_profile.as_ref().expect("init populates linear_profile");
            Some(banded_traceback(
                db,
                linear_profile,
                start.q_start,
                q_end + 1,
                start.db_start,
                db_end + 1,
                gap_open as i32,
                gap_extend as i32,
            ))
        };

        Ok(Some(AlignmentResult {
            score1,
            db_end,
            q_end,
            db_start: start.db_start,
            q_start: start.q_start,
            score2: outcome.second_best.map(|e| e.score),
            ref_end2: outcome.second_best.map(|e| e.db_pos),
            cigar,
        }))
    }
}
