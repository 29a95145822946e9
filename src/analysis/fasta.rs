//! FASTA parsing for the gene sequences to annotate

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{MotifMarkError, Result};

/// A single named sequence. Case is preserved: uppercase marks exon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub sequence: String,
}

/// Parsed FASTA records in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceSet {
    pub records: Vec<FastaRecord>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FastaRecord> {
        self.records.iter()
    }
}

/// Parse multi-record FASTA text.
///
/// Sequence lines are concatenated with all whitespace removed. Content
/// before the first header, non-ASCII sequence characters and input without
/// any record are errors.
pub fn parse_fasta(text: &str) -> Result<SequenceSet> {
    let mut set = SequenceSet::new();
    let mut current: Option<FastaRecord> = None;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                push_record(&mut set, record);
            }
            let name = name.trim();
            current = Some(FastaRecord {
                name: if name.is_empty() {
                    format!("Sequence_{}", set.len() + 1)
                } else {
                    name.to_string()
                },
                sequence: String::new(),
            });
        } else {
            let Some(record) = current.as_mut() else {
                return Err(MotifMarkError::malformed_fasta(format!(
                    "sequence data on line {} before any '>' header",
                    line_no + 1
                )));
            };
            // offsets downstream are byte positions
            if let Some(c) = line.chars().find(|c| !c.is_ascii()) {
                return Err(MotifMarkError::malformed_fasta(format!(
                    "non-ASCII character '{}' in sequence on line {}",
                    c,
                    line_no + 1
                )));
            }
            record
                .sequence
                .extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if let Some(record) = current.take() {
        push_record(&mut set, record);
    }

    if set.is_empty() {
        return Err(MotifMarkError::malformed_fasta("input contains no records"));
    }

    Ok(set)
}

fn push_record(set: &mut SequenceSet, record: FastaRecord) {
    if record.sequence.is_empty() {
        warn!(name = %record.name, "FASTA record has an empty sequence");
    }
    debug!(name = %record.name, length = record.sequence.len(), "parsed FASTA record");
    set.records.push(record);
}

/// Read and parse a FASTA file
pub fn read_fasta_file(path: impl AsRef<Path>) -> Result<SequenceSet> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| MotifMarkError::io(path, e))?;
    parse_fasta(&text)
}
