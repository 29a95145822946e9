//! Motif list parsing and IUPAC expansion
//!
//! Each ambiguous motif is resolved into every literal string it can match:
//! the Cartesian product of the candidate bases at each position. Validation
//! runs over the whole list before anything is expanded, so a bad character
//! is reported before any scanning starts.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use super::iupac::{is_iupac_code, iupac_to_bases};
use super::types::ScanParams;
use crate::error::{MotifMarkError, Result};

/// An ambiguous motif and its literal variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motif {
    /// Uppercased motif text, as written in the motif file
    pub text: String,
    /// Product enumeration order; the first position varies slowest
    pub variants: Vec<String>,
}

/// Expanded motifs in motif-list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotifSet {
    motifs: Vec<Motif>,
}

impl MotifSet {
    /// Validate every motif, then expand each one.
    pub fn expand<S: AsRef<str>>(motifs: &[S], params: &ScanParams) -> Result<Self> {
        let normalized: Vec<String> = motifs
            .iter()
            .map(|m| m.as_ref().trim().to_ascii_uppercase())
            .collect();

        for motif in &normalized {
            validate_motif(motif)?;
        }

        let motifs = normalized
            .into_iter()
            .map(|text| {
                let variants = expand_validated(&text, params.u_matches_t);
                debug!(motif = %text, variants = variants.len(), "expanded motif");
                Motif { text, variants }
            })
            .collect();

        Ok(Self { motifs })
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Motif> {
        self.motifs.iter()
    }

    pub fn get(&self, text: &str) -> Option<&Motif> {
        self.motifs.iter().find(|m| m.text == text)
    }

    /// Motif texts in list order
    pub fn texts(&self) -> Vec<String> {
        self.motifs.iter().map(|m| m.text.clone()).collect()
    }
}

/// Fail with `InvalidMotifCharacter` on the first character outside the table.
/// Expects an uppercased motif.
pub fn validate_motif(motif: &str) -> Result<()> {
    match motif.chars().find(|c| !is_iupac_code(*c)) {
        Some(character) => Err(MotifMarkError::InvalidMotifCharacter {
            character,
            motif: motif.to_string(),
        }),
        None => Ok(()),
    }
}

/// Expand a single motif (case-insensitive) into all literal variants.
///
/// The empty motif yields one empty variant; the scanner never reports
/// matches for it.
pub fn expand_motif(motif: &str, params: &ScanParams) -> Result<Vec<String>> {
    let motif = motif.to_ascii_uppercase();
    validate_motif(&motif)?;
    Ok(expand_validated(&motif, params.u_matches_t))
}

fn expand_validated(motif: &str, u_matches_t: bool) -> Vec<String> {
    let mut variants = vec![String::with_capacity(motif.len())];

    for c in motif.chars() {
        let bases: &[char] = match (c, u_matches_t) {
            ('U', true) => &['T'],
            _ => iupac_to_bases(c).unwrap_or(&[]),
        };
        let mut next = Vec::with_capacity(variants.len() * bases.len());
        for prefix in &variants {
            for &base in bases {
                let mut variant = String::with_capacity(motif.len());
                variant.push_str(prefix);
                variant.push(base);
                next.push(variant);
            }
        }
        variants = next;
    }

    variants
}

/// Parse motif file contents: one motif per line, blank lines ignored,
/// normalized to uppercase. Repeated motifs keep their first position.
pub fn parse_motif_list(text: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut motifs = Vec::new();

    for line in text.lines() {
        let motif = line.trim();
        if motif.is_empty() {
            continue;
        }
        let motif = motif.to_ascii_uppercase();
        if !seen.insert(motif.clone()) {
            warn!(motif = %motif, "duplicate motif ignored");
            continue;
        }
        motifs.push(motif);
    }

    if motifs.is_empty() {
        return Err(MotifMarkError::EmptyMotifList);
    }
    Ok(motifs)
}

/// Read and parse a motif file
pub fn read_motif_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| MotifMarkError::io(path, e))?;
    parse_motif_list(&text)
}
