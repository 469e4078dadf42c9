//! Property tests over randomly generated short sequences, covering
//! determinism, init-idempotence, and byte/word kernel agreement.

use proptest::prelude::*;
use striped_sw::{AlignFlags, Aligner, ScoreWidth, ScoringMatrix};

const ALPHABET_SIZE: usize = 4;

fn matrix() -> ScoringMatrix {
    let mut scores = vec![-1i8; ALPHABET_SIZE * ALPHABET_SIZE];
    for i in 0..ALPHABET_SIZE {
        scores[i * ALPHABET_SIZE + i] = 2;
    }
    ScoringMatrix::substitution(scores, ALPHABET_SIZE)
}

fn residue() -> impl Strategy<Value = u8> {
    0..ALPHABET_SIZE as u8
}

fn sequence(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(residue(), 1..max_len)
}

proptest! {
    #[test]
    fn align_is_deterministic(query in sequence(24), db in sequence(24)) {
        let mut a = Aligner::new(32, ALPHABET_SIZE, false);
        let mut b = Aligner::new(32, ALPHABET_SIZE, false);
        a.init(&query, &matrix(), ScoreWidth::Both).unwrap();
        b.init(&query, &matrix(), ScoreWidth::Both).unwrap();

        let result_a = a.align(&db, 3, 1, AlignFlags::NONE, None, None, 15).unwrap();
        let result_b = b.align(&db, 3, 1, AlignFlags::NONE, None, None, 15).unwrap();

        prop_assert_eq!(result_a.as_ref().map(|r| r.score1), result_b.as_ref().map(|r| r.score1));
        prop_assert_eq!(
            result_a.as_ref().map(|r| (r.db_start, r.db_end, r.q_start, r.q_end)),
            result_b.as_ref().map(|r| (r.db_start, r.db_end, r.q_start, r.q_end))
        );
    }

    #[test]
    fn repeated_init_leaves_identical_behavior(query in sequence(24), db in sequence(24)) {
        let mut aligner = Aligner::new(32, ALPHABET_SIZE, false);
        aligner.init(&query, &matrix(), ScoreWidth::Byte).unwrap();
        let first = aligner.align(&db, 3, 1, AlignFlags::NONE, None, None, 15).unwrap();

        aligner.init(&query, &matrix(), ScoreWidth::Byte).unwrap();
        let second = aligner.align(&db, 3, 1, AlignFlags::NONE, None, None, 15).unwrap();

        prop_assert_eq!(first.map(|r| r.score1), second.map(|r| r.score1));
    }

    #[test]
    fn byte_and_word_kernels_agree_when_not_saturating(query in sequence(20), db in sequence(20)) {
        let mut aligner = Aligner::new(32, ALPHABET_SIZE, false);
        aligner.init(&query, &matrix(), ScoreWidth::Both).unwrap();
        let result = aligner.align(&db, 3, 1, AlignFlags::ENDPOINTS_ONLY, None, None, 15).unwrap();

        if let Some(result) = result {
            if result.score1 <= 254 {
                let mut word_only = Aligner::new(32, ALPHABET_SIZE, false);
                word_only.init(&query, &matrix(), ScoreWidth::Word).unwrap();
                let word_result = word_only
                    .align(&db, 3, 1, AlignFlags::ENDPOINTS_ONLY, None, None, 15)
                    .unwrap()
                    .unwrap();
                prop_assert_eq!(result.score1, word_result.score1);
                prop_assert_eq!(result.db_end, word_result.db_end);
                prop_assert_eq!(result.q_end, word_result.q_end);
            }
        }
    }
}
