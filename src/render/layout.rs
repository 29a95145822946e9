//! Diagram geometry shared by the SVG export and the viewer

use crate::analysis::{RenderParams, ScanResults};

/// Legend swatch edge length
pub const SWATCH_SIZE: f32 = 20.0;
/// Gap between swatch and label
pub const SWATCH_GAP: f32 = 10.0;
/// Vertical offset of the exon legend entry
pub const LEGEND_TOP: f32 = 60.0;
/// Vertical offset of the first motif legend entry
pub const LEGEND_MOTIFS_TOP: f32 = 100.0;
/// Vertical distance between motif legend entries
pub const LEGEND_SPACING: f32 = 40.0;
/// Label of the exon legend entry
pub const EXON_LABEL: &str = "EXON";

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Horizontal line for a full sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

/// Positions every element of the diagram.
///
/// Record `i` sits on baseline `track_height * (i + 1)`; blocks are centered
/// on the baseline. The legend is placed right of the longest sequence.
#[derive(Debug, Clone)]
pub struct DiagramLayout<'a> {
    params: &'a RenderParams,
    records: usize,
    motifs: usize,
    longest: usize,
    longest_label: usize,
}

impl<'a> DiagramLayout<'a> {
    pub fn new(params: &'a RenderParams, results: &ScanResults) -> Self {
        let longest_label = results
            .motifs
            .iter()
            .map(|m| m.chars().count())
            .chain(std::iter::once(EXON_LABEL.len()))
            .max()
            .unwrap_or(0);
        Self {
            params,
            records: results.scans.len(),
            motifs: results.motifs.len(),
            longest: results.longest_sequence(),
            longest_label,
        }
    }

    pub fn baseline(&self, record: usize) -> f32 {
        self.params.track_height * (record as f32 + 1.0)
    }

    /// Canvas x of a sequence offset
    pub fn x_for(&self, offset: usize) -> f32 {
        self.params.left_margin + offset as f32 * self.params.pixels_per_base
    }

    pub fn name_anchor(&self, record: usize) -> (f32, f32) {
        (
            self.params.name_x,
            self.baseline(record) - self.params.track_height / 2.0,
        )
    }

    pub fn track(&self, record: usize, length: usize) -> Track {
        Track {
            x1: self.x_for(0),
            x2: self.x_for(length),
            y: self.baseline(record),
        }
    }

    /// Block covering `[start, end)` on a record's track
    pub fn block(&self, record: usize, start: usize, end: usize) -> Block {
        Block {
            x: self.x_for(start),
            y: self.baseline(record) - self.params.block_height / 2.0,
            width: end.saturating_sub(start) as f32 * self.params.pixels_per_base,
            height: self.params.block_height,
        }
    }

    pub fn legend_x(&self) -> f32 {
        self.params.legend_x.max(self.x_for(self.longest) + 50.0)
    }

    /// Swatch of the exon entry
    pub fn exon_swatch(&self) -> Block {
        self.swatch(LEGEND_TOP)
    }

    /// Swatch of the `index`-th motif entry
    pub fn motif_swatch(&self, index: usize) -> Block {
        self.swatch(LEGEND_MOTIFS_TOP + LEGEND_SPACING * index as f32)
    }

    fn swatch(&self, y: f32) -> Block {
        Block {
            x: self.legend_x(),
            y,
            width: SWATCH_SIZE,
            height: SWATCH_SIZE,
        }
    }

    /// Baseline-left anchor of the label next to a swatch
    pub fn label_anchor(&self, swatch: &Block) -> (f32, f32) {
        (
            swatch.x + swatch.width + SWATCH_GAP,
            swatch.y + SWATCH_SIZE * 0.75,
        )
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        let label_width = self.longest_label as f32 * self.params.font_size * 0.6;
        let width = self
            .params
            .width
            .max(self.legend_x() + SWATCH_SIZE + SWATCH_GAP + label_width + 20.0);

        let tracks = self.params.track_height * self.records as f32 + self.params.track_height / 2.0;
        let legend = LEGEND_MOTIFS_TOP + LEGEND_SPACING * self.motifs as f32;
        (width, tracks.max(legend))
    }
}
