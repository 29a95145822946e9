//! End-to-end run: motif file + FASTA file -> scan results -> SVG

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis::{
    read_fasta_file, read_motif_file, run_scan, MarkParams, MotifSet, ScanResults,
};
use crate::config::save_results;
use crate::error::Result;
use crate::render::{default_output_path, write_svg};

/// Inputs and outputs of one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub fasta: PathBuf,
    pub motifs: PathBuf,
    /// Defaults to the FASTA path with an `.svg` extension
    pub output: Option<PathBuf>,
    /// Also write the scan results as JSON
    pub json: Option<PathBuf>,
    pub params: MarkParams,
}

/// Read both inputs and scan. Motifs are validated before the FASTA is read.
pub fn scan_files(
    fasta: impl AsRef<Path>,
    motifs: impl AsRef<Path>,
    params: &MarkParams,
) -> Result<ScanResults> {
    let motif_list = read_motif_file(motifs)?;
    let motifs = MotifSet::expand(&motif_list, &params.scan)?;
    let sequences = read_fasta_file(fasta)?;
    run_scan(&sequences, &motifs, &params.scan)
}

/// Run the whole pipeline, returning the path of the written diagram
pub fn run(config: &RunConfig) -> Result<PathBuf> {
    info!(fasta = %config.fasta.display(), motifs = %config.motifs.display(), "starting run");
    let results = scan_files(&config.fasta, &config.motifs, &config.params)?;

    if let Some(json) = &config.json {
        save_results(json, &results)?;
        info!(path = %json.display(), "wrote scan results");
    }

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&config.fasta));
    write_svg(&output, &results, &config.params.render)?;
    Ok(output)
}
