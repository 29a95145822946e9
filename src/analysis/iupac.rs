//! IUPAC ambiguity codes for nucleotide motifs

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// IUPAC code to the literal bases it may stand for.
///
/// Candidate order per code is fixed so that variant enumeration is
/// deterministic.
pub static IUPAC_TO_BASES: Lazy<HashMap<char, &'static [char]>> = Lazy::new(|| {
    let mut map: HashMap<char, &'static [char]> = HashMap::new();
    map.insert('A', &['A']);
    map.insert('C', &['C']);
    map.insert('G', &['G']);
    map.insert('T', &['T']);
    map.insert('U', &['U']);
    map.insert('W', &['A', 'T']);
    map.insert('S', &['G', 'C']);
    map.insert('M', &['A', 'C']);
    map.insert('K', &['G', 'T']);
    map.insert('R', &['A', 'G']);
    map.insert('Y', &['C', 'T']);
    map.insert('B', &['C', 'G', 'T']);
    map.insert('D', &['A', 'G', 'T']);
    map.insert('H', &['A', 'C', 'T']);
    map.insert('V', &['A', 'C', 'G']);
    map.insert('N', &['A', 'C', 'G', 'T']);
    map
});

/// Check if a character is a key of the IUPAC table (uppercase only)
pub fn is_iupac_code(c: char) -> bool {
    IUPAC_TO_BASES.contains_key(&c)
}

/// Get the bases represented by an IUPAC code
pub fn iupac_to_bases(code: char) -> Option<&'static [char]> {
    IUPAC_TO_BASES.get(&code).copied()
}

/// Number of literal strings an uppercase motif resolves to.
/// Returns None if the motif holds a character outside the table.
pub fn variant_count(motif: &str) -> Option<usize> {
    motif
        .chars()
        .map(|c| iupac_to_bases(c).map(|bases| bases.len()))
        .try_fold(1usize, |acc, n| n.map(|n| acc.saturating_mul(n)))
}

/// Check if a literal sequence is one of the resolutions of an ambiguous motif.
/// Comparison is case-insensitive on the sequence side.
pub fn sequence_matches_motif(seq: &str, motif: &str) -> bool {
    if seq.len() != motif.len() {
        return false;
    }

    for (s, m) in seq.chars().zip(motif.chars()) {
        let s = s.to_ascii_uppercase();
        match iupac_to_bases(m) {
            Some(allowed) if allowed.contains(&s) => {}
            _ => return false,
        }
    }
    true
}
