pub mod aligner;
pub mod counter;
pub mod explain;
pub mod oracle;
pub mod overrides;
pub mod render;
pub mod settings;
pub mod unicode;
pub mod unit;

pub use aligner::{AlignError, AlignOptions, Aligner, CounterStyle, OraclePolicy, Route};
pub use oracle::{LexiconTransliterator, OracleToken, Transliterator};
pub use render::{RenderFormat, Renderer};
pub use unit::{reconstruct, AlignmentUnit};
