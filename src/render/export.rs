//! SVG export of the motif diagram

use std::path::{Path, PathBuf};

use svg::node::element::{Line, Rectangle, Text};
use svg::Document;
use tracing::info;

use super::layout::{Block, DiagramLayout, EXON_LABEL};
use super::palette::MotifPalette;
use crate::analysis::{RenderParams, Rgb, ScanResults};
use crate::error::{MotifMarkError, Result};

const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);

/// Build the diagram for all scanned records
pub fn render_svg(results: &ScanResults, params: &RenderParams) -> Document {
    let layout = DiagramLayout::new(params, results);
    let palette = MotifPalette::new(&results.motifs, &params.palette);
    let (width, height) = layout.canvas_size();

    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, width, height))
        .set("width", width)
        .set("height", height)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", "#ffffff"),
        );

    for (idx, scan) in results.scans.iter().enumerate() {
        let (name_x, name_y) = layout.name_anchor(idx);
        doc = doc.add(label(&scan.name, name_x, name_y, params.font_size));

        let track = layout.track(idx, scan.length);
        doc = doc.add(
            Line::new()
                .set("x1", track.x1)
                .set("y1", track.y)
                .set("x2", track.x2)
                .set("y2", track.y)
                .set("stroke", BLACK.to_hex())
                .set("stroke-width", params.line_width),
        );

        if !scan.exon.is_empty() {
            let block = layout.block(idx, scan.exon.start, scan.exon.end);
            doc = doc.add(rect(&block, BLACK, params.exon_opacity));
        }

        for (motif, occurrences) in scan.occurrences.iter() {
            let color = palette.color_for(motif).unwrap_or(BLACK);
            for occ in occurrences {
                let block = layout.block(idx, occ.start, occ.end);
                doc = doc.add(rect(&block, color, params.motif_opacity));
            }
        }
    }

    let swatch = layout.exon_swatch();
    let (label_x, label_y) = layout.label_anchor(&swatch);
    doc = doc
        .add(rect(&swatch, BLACK, params.exon_opacity))
        .add(label(EXON_LABEL, label_x, label_y, params.font_size));

    for (idx, (motif, color)) in palette.iter().enumerate() {
        let swatch = layout.motif_swatch(idx);
        let (label_x, label_y) = layout.label_anchor(&swatch);
        doc = doc
            .add(rect(&swatch, color, params.motif_opacity))
            .add(label(motif, label_x, label_y, params.font_size));
    }

    doc
}

fn rect(block: &Block, color: Rgb, opacity: f32) -> Rectangle {
    Rectangle::new()
        .set("x", block.x)
        .set("y", block.y)
        .set("width", block.width)
        .set("height", block.height)
        .set("fill", color.to_hex())
        .set("fill-opacity", opacity)
}

fn label(text: &str, x: f32, y: f32, font_size: f32) -> Text {
    Text::new(text)
        .set("x", x)
        .set("y", y)
        .set("font-family", "sans-serif")
        .set("font-size", font_size)
        .set("fill", BLACK.to_hex())
}

/// Render and write the diagram
pub fn write_svg(path: impl AsRef<Path>, results: &ScanResults, params: &RenderParams) -> Result<()> {
    let path = path.as_ref();
    let doc = render_svg(results, params);
    svg::save(path, &doc).map_err(|e| MotifMarkError::io(path, e))?;
    info!(path = %path.display(), records = results.scans.len(), "wrote diagram");
    Ok(())
}

/// FASTA path with its extension replaced by `.svg`
pub fn default_output_path(fasta: impl AsRef<Path>) -> PathBuf {
    fasta.as_ref().with_extension("svg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        parse_fasta, run_scan, MotifSet, ScanParams, ThreadCount, DEFAULT_PALETTE,
    };

    fn scan(fasta: &str, motifs: &[&str]) -> ScanResults {
        let params = ScanParams {
            thread_count: ThreadCount::Fixed(1),
            ..ScanParams::default()
        };
        let sequences = parse_fasta(fasta).unwrap();
        let motifs = MotifSet::expand(motifs, &params).unwrap();
        run_scan(&sequences, &motifs, &params).unwrap()
    }

    #[test]
    fn test_render_contains_tracks_blocks_and_legend() {
        let results = scan(">gene1\naaaCATAGaaa\n>gene2\ntttt\n", &["CATAG", "YGCY"]);
        let svg = render_svg(&results, &RenderParams::default()).to_string();

        assert!(svg.contains("gene1"));
        assert!(svg.contains("gene2"));
        assert!(svg.contains(EXON_LABEL));
        assert!(svg.contains("CATAG"));
        assert!(svg.contains("YGCY"));
        assert_eq!(svg.matches("<line").count(), 2);
        // background + one exon + one CATAG hit + exon swatch + two motif swatches
        assert_eq!(svg.matches("<rect").count(), 6);
        assert!(svg.contains(&DEFAULT_PALETTE[0].to_hex()));
    }

    #[test]
    fn test_empty_exon_is_not_shaded() {
        let results = scan(">lower\nacgtacgt\n", &["ACGT"]);
        let svg = render_svg(&results, &RenderParams::default()).to_string();
        // background + two ACGT hits + exon swatch + one motif swatch
        assert_eq!(svg.matches("<rect").count(), 5);
    }

    #[test]
    fn test_write_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        let results = scan(">g\nttCATAGtt\n", &["CATAG"]);
        write_svg(&path, &results, &RenderParams::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }

    #[test]
    fn test_write_svg_to_missing_dir_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.svg");
        let results = scan(">g\nACGT\n", &["A"]);
        let err = write_svg(&path, &results, &RenderParams::default()).unwrap_err();
        assert!(matches!(err, MotifMarkError::Io { .. }));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("data/Figure_1.fasta"),
            PathBuf::from("data/Figure_1.svg")
        );
        assert_eq!(default_output_path("seqs"), PathBuf::from("seqs.svg"));
    }
}
