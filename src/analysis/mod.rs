mod types;
mod iupac;
mod fasta;
mod motifs;
mod scanner;

pub use types::*;
pub use iupac::*;
pub use fasta::*;
pub use motifs::*;
pub use scanner::*;
