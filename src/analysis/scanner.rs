//! Sequence scanning
//!
//! Locates the exon region of each record and every occurrence of each
//! expanded motif variant. Records are independent, so a run scans them in
//! parallel and collects results in input order.

use bio::pattern_matching::horspool::Horspool;
use rayon::prelude::*;
use tracing::{debug, info};

use super::fasta::{FastaRecord, SequenceSet};
use super::motifs::{Motif, MotifSet};
use super::types::{
    ExonRegion, MotifHits, Occurrence, OccurrenceMap, ScanParams, ScanResults, SequenceScan,
};
use crate::error::Result;

/// Run the complete scan over all records
pub fn run_scan(
    sequences: &SequenceSet,
    motifs: &MotifSet,
    params: &ScanParams,
) -> Result<ScanResults> {
    let num_threads = params.thread_count.get_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;

    info!(
        records = sequences.len(),
        motifs = motifs.len(),
        threads = num_threads,
        "scanning sequences"
    );

    let mut results = ScanResults::new(params.clone(), motifs.texts());
    results.scans = pool.install(|| {
        sequences
            .records
            .par_iter()
            .map(|record| scan_record(record, motifs))
            .collect()
    });

    Ok(results)
}

/// Scan a single FASTA record
pub fn scan_record(record: &FastaRecord, motifs: &MotifSet) -> SequenceScan {
    let scan = scan_sequence(&record.name, &record.sequence, motifs);
    debug!(
        name = %scan.name,
        length = scan.length,
        exon_start = scan.exon.start,
        exon_end = scan.exon.end,
        occurrences = scan.occurrences.total_occurrences(),
        "scanned record"
    );
    scan
}

/// Scan a raw (case-mixed) sequence for the exon region and motif occurrences
pub fn scan_sequence(name: &str, sequence: &str, motifs: &MotifSet) -> SequenceScan {
    let upper = sequence.to_ascii_uppercase();
    let entries = motifs
        .iter()
        .map(|motif| MotifHits {
            motif: motif.text.clone(),
            occurrences: motif_occurrences(upper.as_bytes(), motif),
        })
        .collect();

    SequenceScan {
        name: name.to_string(),
        length: sequence.len(),
        exon: find_exon(sequence),
        occurrences: OccurrenceMap { entries },
    }
}

/// First maximal run of uppercase letters, half-open.
/// Returns an empty region when the sequence has none.
pub fn find_exon(sequence: &str) -> ExonRegion {
    let bytes = sequence.as_bytes();
    let Some(start) = bytes.iter().position(|b| b.is_ascii_uppercase()) else {
        return ExonRegion::default();
    };
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_uppercase())
        .map_or(bytes.len(), |len| start + len);

    ExonRegion { start, end }
}

/// All occurrences of any variant of a motif, sorted by start then end
fn motif_occurrences(upper: &[u8], motif: &Motif) -> Vec<Occurrence> {
    let mut occurrences: Vec<Occurrence> = motif
        .variants
        .iter()
        .flat_map(|variant| find_variant(upper, variant.as_bytes()))
        .collect();
    occurrences.sort_unstable();
    occurrences
}

/// Leftmost non-overlapping matches of one literal variant.
/// The empty variant never matches.
pub fn find_variant(text: &[u8], variant: &[u8]) -> Vec<Occurrence> {
    let m = variant.len();
    if m == 0 || m > text.len() {
        return Vec::new();
    }

    let horspool = Horspool::new(variant);
    let mut occurrences = Vec::new();
    let mut consumed = 0;
    for start in horspool.find_all(text) {
        if start < consumed {
            continue;
        }
        occurrences.push(Occurrence::new(start, start + m));
        consumed = start + m;
    }
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fasta::parse_fasta;
    use crate::analysis::iupac::sequence_matches_motif;
    use crate::analysis::types::ThreadCount;
    use proptest::prelude::*;

    fn motif_set(motifs: &[&str]) -> MotifSet {
        MotifSet::expand(motifs, &ScanParams::default()).unwrap()
    }

    #[test]
    fn test_find_exon_single_run() {
        assert_eq!(find_exon("actgACTGactg"), ExonRegion { start: 4, end: 8 });
    }

    #[test]
    fn test_find_exon_first_run_only() {
        assert_eq!(find_exon("aaCCggTTTt"), ExonRegion { start: 2, end: 4 });
    }

    #[test]
    fn test_find_exon_at_edges() {
        assert_eq!(find_exon("ACGTacgt"), ExonRegion { start: 0, end: 4 });
        assert_eq!(find_exon("acgtACGT"), ExonRegion { start: 4, end: 8 });
        assert_eq!(find_exon("ACGT"), ExonRegion { start: 0, end: 4 });
    }

    #[test]
    fn test_find_exon_missing_is_empty() {
        let exon = find_exon("actgactg");
        assert!(exon.is_empty());
        assert_eq!(exon.len(), 0);
        assert!(find_exon("").is_empty());
    }

    #[test]
    fn test_scan_unambiguous_motif() {
        let scan = scan_sequence("s", "aaaCATAGaaa", &motif_set(&["CATAG"]));
        assert_eq!(scan.occurrences.get("CATAG"), Some(&[Occurrence::new(3, 8)][..]));
        assert_eq!(scan.length, 11);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let scan = scan_sequence("s", "catagCATAGcAtAg", &motif_set(&["catag"]));
        assert_eq!(
            scan.occurrences.get("CATAG"),
            Some(&[Occurrence::new(0, 5), Occurrence::new(5, 10), Occurrence::new(10, 15)][..])
        );
    }

    #[test]
    fn test_absent_motif_keeps_empty_entry() {
        let scan = scan_sequence("s", "aaaaaaaa", &motif_set(&["CATAG", "AAA"]));
        assert_eq!(scan.occurrences.len(), 2);
        assert!(scan.occurrences.contains_motif("CATAG"));
        assert_eq!(scan.occurrences.get("CATAG").map(|o| o.len()), Some(0));
    }

    #[test]
    fn test_matches_of_one_variant_do_not_overlap() {
        assert_eq!(
            find_variant(b"AAAAA", b"AA"),
            vec![Occurrence::new(0, 2), Occurrence::new(2, 4)]
        );
        assert_eq!(
            find_variant(b"ATATAT", b"ATA"),
            vec![Occurrence::new(0, 3)]
        );
    }

    #[test]
    fn test_variants_of_one_motif_may_overlap() {
        // YY expands to CC, CT, TC, TT: each variant matches on its own
        let scan = scan_sequence("s", "CTC", &motif_set(&["YY"]));
        assert_eq!(
            scan.occurrences.get("YY"),
            Some(&[Occurrence::new(0, 2), Occurrence::new(1, 3)][..])
        );
    }

    #[test]
    fn test_occurrences_sorted_by_position() {
        // variant order is CGCC, CGCT, TGCC, TGCT; positions must not follow it
        let scan = scan_sequence("s", "tgctaaCGCCaaTGCCaaCGCT", &motif_set(&["YGCY"]));
        let starts: Vec<usize> = scan
            .occurrences
            .get("YGCY")
            .unwrap()
            .iter()
            .map(|o| o.start)
            .collect();
        assert_eq!(starts, vec![0, 6, 12, 18]);
    }

    #[test]
    fn test_empty_variant_never_matches() {
        assert!(find_variant(b"ACGT", b"").is_empty());
        let scan = scan_sequence("s", "ACGT", &motif_set(&[""]));
        assert_eq!(scan.occurrences.get("").map(|o| o.len()), Some(0));
    }

    #[test]
    fn test_variant_longer_than_sequence() {
        assert!(find_variant(b"ACG", b"ACGT").is_empty());
        assert!(find_variant(b"", b"A").is_empty());
    }

    #[test]
    fn test_different_motifs_may_overlap() {
        let scan = scan_sequence("s", "ttCATAGtt", &motif_set(&["CATAG", "ATA"]));
        assert_eq!(scan.occurrences.get("CATAG"), Some(&[Occurrence::new(2, 7)][..]));
        assert_eq!(scan.occurrences.get("ATA"), Some(&[Occurrence::new(3, 6)][..]));
    }

    #[test]
    fn test_run_scan_keeps_record_order() {
        let fasta = ">one\naaCATAGaa\n>two\nTTTTTT\n>three\ncatagcatag\n";
        let sequences = parse_fasta(fasta).unwrap();
        let params = ScanParams {
            thread_count: ThreadCount::Fixed(2),
            ..ScanParams::default()
        };
        let motifs = MotifSet::expand(&["CATAG", "YYY"], &params).unwrap();
        let results = run_scan(&sequences, &motifs, &params).unwrap();

        let names: Vec<&str> = results.scans.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
        assert_eq!(results.motifs, vec!["CATAG", "YYY"]);
        assert_eq!(results.scans[0].exon, ExonRegion { start: 2, end: 7 });
        assert!(results.scans[2].exon.is_empty());
        assert_eq!(
            results.scans[1].occurrences.get("YYY"),
            Some(&[Occurrence::new(0, 3), Occurrence::new(3, 6)][..])
        );
        assert_eq!(
            results.scans[2].occurrences.get("CATAG").map(|o| o.len()),
            Some(2)
        );
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let fasta = ">a\nttgtCATAGgcatgTGCTtt\n>b\nYYY\n>c\ncgcttgcatgcatg\n>d\nacgt\n";
        let sequences = parse_fasta(fasta).unwrap();
        let motifs = motif_set(&["YGCY", "GCATG", "CATAG"]);
        let sequential: Vec<SequenceScan> = sequences
            .iter()
            .map(|r| scan_record(r, &motifs))
            .collect();
        let params = ScanParams {
            thread_count: ThreadCount::Fixed(4),
            ..ScanParams::default()
        };
        let results = run_scan(&sequences, &motifs, &params).unwrap();
        assert_eq!(results.scans, sequential);
    }

    proptest! {
        #[test]
        fn prop_occurrences_reproduce_a_variant(
            sequence in "[acgtACGT]{0,60}",
            motif in "[ACGTRYN]{1,4}",
        ) {
            let motifs = motif_set(&[motif.as_str()]);
            let scan = scan_sequence("p", &sequence, &motifs);
            let variants = &motifs.get(&motif).unwrap().variants;
            let upper = sequence.to_ascii_uppercase();
            for occ in scan.occurrences.get(&motif).unwrap() {
                let slice = &upper[occ.start..occ.end];
                prop_assert!(variants.iter().any(|v| v == slice));
                prop_assert!(sequence_matches_motif(&sequence[occ.start..occ.end], &motif));
            }
        }

        #[test]
        fn prop_occurrences_sorted(sequence in "[ACGT]{0,80}", motif in "[ACGTN]{1,3}") {
            let scan = scan_sequence("p", &sequence, &motif_set(&[motif.as_str()]));
            let occ = scan.occurrences.get(&motif).unwrap();
            prop_assert!(occ.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_exon_is_uppercase_run(sequence in "[acgtACGT]{0,40}") {
            let exon = find_exon(&sequence);
            prop_assert!(exon.start <= exon.end && exon.end <= sequence.len());
            let bytes = sequence.as_bytes();
            prop_assert!(bytes[exon.start..exon.end].iter().all(|b| b.is_ascii_uppercase()));
            prop_assert!(bytes[..exon.start].iter().all(|b| !b.is_ascii_uppercase()));
            if exon.is_empty() {
                prop_assert!(!bytes.iter().any(|b| b.is_ascii_uppercase()));
            } else if exon.end < bytes.len() {
                prop_assert!(!bytes[exon.end].is_ascii_uppercase());
            }
        }
    }
}
