//! Batch layer over `furigana_core`: whole documents to JSON entries and
//! album lyric notes.

pub mod document;
pub mod lyrics;
pub mod trace_init;

pub use furigana_core;
pub use trace_init::init_tracing;
