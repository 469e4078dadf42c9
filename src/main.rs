mod cli;

use clap::Parser;
use cli::{match_mismatch_matrix, Cli};
use striped_sw::{AlignFlags, Aligner, ScoreWidth, ScoringMatrix};
use striped_sw::alphabet::{encode_amino_acids, AA_ALPHABET_SIZE};
use striped_sw::cigar::unpack;

fn main() {
    env_logger::init();
    let args = Cli::parse();

    #[cfg(not(feature = "dev_no_rayon"))]
    if args.single_thread {
        rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build_global()
            .expect("thread pool is only built once");
    }

    let query = encode_amino_acids(args.query.as_bytes());
    let database = encode_amino_acids(args.database.as_bytes());
    let matrix = ScoringMatrix::substitution(
        match_mismatch_matrix(AA_ALPHABET_SIZE, args.matching, args.mismatch),
        AA_ALPHABET_SIZE,
    );

    let max_len = query.len().max(database.len());
    let mut aligner = Aligner::new(max_len, AA_ALPHABET_SIZE, !args.no_bias_correction);
    if let Err(err) = aligner.init(&query, &matrix, ScoreWidth::Both) {
        eprintln!("failed to initialize aligner: {err}");
        std::process::exit(1);
    }

    let flags = if args.endpoints_only { AlignFlags::ENDPOINTS_ONLY } else { AlignFlags::NONE };
    match aligner.align(&database, args.gap_open, args.gap_extend, flags, None, None, args.mask_len) {
        Ok(Some(result)) => {
            println!(
                "score={} query=[{}..={}] db=[{}..={}]",
                result.score1, result.q_start, result.q_end, result.db_start, result.db_end
            );
            if let Some(score2) = result.score2 {
                println!("second_best={score2} ref_end2={:?}", result.ref_end2);
            }
            if let Some(cigar) = result.cigar {
                let rendered: String =
                    cigar.iter().map(|&entry| {
                        let (len, op) = unpack(entry);
                        format!("{len}{}", op.as_char())
                    }).collect();
                println!("cigar={rendered}");
            }
        }
        Ok(None) => println!("no alignment found"),
        Err(err) => {
            eprintln!("alignment failed: {err}");
            std::process::exit(1);
        }
    }
}
