//! Motif to color assignment

use crate::analysis::{Rgb, DEFAULT_PALETTE};

/// Immutable motif -> color table, built once from the ordered motif list.
/// Colors are assigned in list order and cycle when motifs outnumber them.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifPalette {
    entries: Vec<(String, Rgb)>,
}

impl MotifPalette {
    pub fn new<S: AsRef<str>>(motifs: &[S], palette: &[Rgb]) -> Self {
        let palette = if palette.is_empty() {
            &DEFAULT_PALETTE[..]
        } else {
            palette
        };
        let entries = motifs
            .iter()
            .zip(palette.iter().cycle())
            .map(|(motif, color)| (motif.as_ref().to_string(), *color))
            .collect();
        Self { entries }
    }

    pub fn color_for(&self, motif: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(m, _)| m == motif)
            .map(|(_, color)| *color)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.entries.iter().map(|(m, c)| (m.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
