//! Motif diagram rendering

mod export;
mod layout;
mod palette;

pub use export::*;
pub use layout::*;
pub use palette::*;
