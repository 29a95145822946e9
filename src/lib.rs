//! Motif Mark - Motif Diagram Tool
//!
//! Expands ambiguous IUPAC motifs, scans gene sequences for every occurrence
//! and the exon region, and draws one diagram track per sequence.

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;

pub use analysis::*;
pub use error::{MotifMarkError, Result};
