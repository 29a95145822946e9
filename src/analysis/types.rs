//! Data types for motif scanning and rendering

use serde::{Deserialize, Serialize};

/// Thread count configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadCount {
    /// Use all available CPU cores
    Auto,
    /// Use a specific number of threads
    Fixed(usize),
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self::Auto
    }
}

impl ThreadCount {
    /// Get the actual number of threads to use
    pub fn get_count(&self) -> usize {
        match self {
            Self::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Self::Fixed(n) => (*n).max(1),
        }
    }
}

/// Parameters for motif expansion and scanning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    pub thread_count: ThreadCount,
    /// Expand `U` in motifs to `T` so RNA motifs match DNA sequences
    pub u_matches_t: bool,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            thread_count: ThreadCount::Auto,
            u_matches_t: false,
        }
    }
}

/// RGB color with channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    /// Hex notation used in SVG fill attributes
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.0),
            channel(self.1),
            channel(self.2)
        )
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.0), channel(self.1), channel(self.2)]
    }
}

/// Default motif colors, assigned in motif-list order
pub const DEFAULT_PALETTE: [Rgb; 10] = [
    Rgb(1.0, 0.6, 0.3),
    Rgb(1.0, 0.8, 0.2),
    Rgb(0.0, 0.2, 0.8),
    Rgb(0.2, 0.9, 0.8),
    Rgb(0.5, 0.3, 1.0),
    Rgb(0.7, 0.0, 0.1),
    Rgb(0.5, 0.7, 0.6),
    Rgb(0.1, 0.7, 0.6),
    Rgb(0.5, 0.7, 0.5),
    Rgb(0.5, 0.3, 0.4),
];

/// Diagram geometry and styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Minimum canvas width
    pub width: f32,
    /// Vertical distance between sequence tracks
    pub track_height: f32,
    /// Height of exon and motif blocks
    pub block_height: f32,
    /// X offset of the sequence line start
    pub left_margin: f32,
    /// X offset of the record name
    pub name_x: f32,
    /// Horizontal scale
    pub pixels_per_base: f32,
    /// Minimum legend x offset
    pub legend_x: f32,
    pub line_width: f32,
    pub font_size: f32,
    pub exon_opacity: f32,
    pub motif_opacity: f32,
    pub palette: Vec<Rgb>,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width: 1200.0,
            track_height: 200.0,
            block_height: 100.0,
            left_margin: 100.0,
            name_x: 50.0,
            pixels_per_base: 1.0,
            legend_x: 850.0,
            line_width: 3.0,
            font_size: 20.0,
            exon_opacity: 0.1,
            motif_opacity: 0.5,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

/// Top-level configuration, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkParams {
    pub scan: ScanParams,
    pub render: RenderParams,
}

/// Half-open span of the first uppercase run in a sequence.
/// `start == end` means the sequence has no exon signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExonRegion {
    pub start: usize,
    pub end: usize,
}

impl ExonRegion {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Half-open span where a literal motif variant matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

impl Occurrence {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// All occurrences of one ambiguous motif
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifHits {
    /// Motif in its original ambiguous form
    pub motif: String,
    /// Sorted by start, then end
    pub occurrences: Vec<Occurrence>,
}

/// Motif -> occurrences, one entry per requested motif in motif-list order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceMap {
    pub entries: Vec<MotifHits>,
}

impl OccurrenceMap {
    pub fn get(&self, motif: &str) -> Option<&[Occurrence]> {
        self.entries
            .iter()
            .find(|hits| hits.motif == motif)
            .map(|hits| hits.occurrences.as_slice())
    }

    pub fn contains_motif(&self, motif: &str) -> bool {
        self.entries.iter().any(|hits| hits.motif == motif)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.entries
            .iter()
            .map(|hits| (hits.motif.as_str(), hits.occurrences.as_slice()))
    }

    /// Total number of occurrences over all motifs
    pub fn total_occurrences(&self) -> usize {
        self.entries.iter().map(|hits| hits.occurrences.len()).sum()
    }
}

/// Scan result for one FASTA record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceScan {
    pub name: String,
    pub length: usize,
    pub exon: ExonRegion,
    pub occurrences: OccurrenceMap,
}

/// Complete scan results for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResults {
    pub params: ScanParams,
    /// Motifs in motif-file order
    pub motifs: Vec<String>,
    pub scans: Vec<SequenceScan>,
}

impl ScanResults {
    pub fn new(params: ScanParams, motifs: Vec<String>) -> Self {
        Self {
            params,
            motifs,
            scans: Vec::new(),
        }
    }

    pub fn longest_sequence(&self) -> usize {
        self.scans.iter().map(|s| s.length).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(Rgb(1.0, 0.6, 0.3).to_hex(), "#ff994d");
        assert_eq!(Rgb(0.0, 0.0, 0.0).to_hex(), "#000000");
        assert_eq!(Rgb(2.0, -1.0, 1.0).to_rgb8(), [255, 0, 255]);
    }

    #[test]
    fn test_params_fill_missing_fields_from_defaults() {
        let params: MarkParams =
            serde_json::from_str(r#"{"render": {"pixels_per_base": 2.0}}"#).unwrap();
        assert_eq!(params.render.pixels_per_base, 2.0);
        assert_eq!(params.render.track_height, 200.0);
        assert_eq!(params.render.palette.len(), 10);
        assert_eq!(params.scan, ScanParams::default());
    }

    #[test]
    fn test_occurrence_map_lookup() {
        let map = OccurrenceMap {
            entries: vec![
                MotifHits {
                    motif: "YGCY".to_string(),
                    occurrences: vec![Occurrence::new(1, 5), Occurrence::new(7, 11)],
                },
                MotifHits {
                    motif: "CATAG".to_string(),
                    occurrences: Vec::new(),
                },
            ],
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("YGCY").map(|o| o.len()), Some(2));
        assert_eq!(map.get("CATAG").map(|o| o.is_empty()), Some(true));
        assert!(map.get("GCAUG").is_none());
        assert_eq!(map.total_occurrences(), 2);
    }

    #[test]
    fn test_thread_count_fixed_never_zero() {
        assert_eq!(ThreadCount::Fixed(0).get_count(), 1);
        assert_eq!(ThreadCount::Fixed(3).get_count(), 3);
        assert!(ThreadCount::Auto.get_count() >= 1);
    }
}
