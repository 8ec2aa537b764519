//! Kanji-to-reading alignment.
//!
//! A line goes through counter normalization, the oracle, per-token
//! alignment and the override pass, one line at a time with no state
//! carried between lines.

mod run;
#[cfg(test)]
pub(crate) mod testutil;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::counter::{counters, CounterPiece, CounterTable};
use crate::oracle::{check_reconstruction, OracleToken, Transliterator};
use crate::overrides::{apply_overrides, overrides, PreferredReadingTable};
use crate::settings::{settings, AlignmentSettings};
use crate::unit::AlignmentUnit;

pub use run::{align_token, route_of, Route};

#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    #[error("oracle tokens do not rebuild the input: expected {expected:?}, got {actual:?}")]
    OracleContractViolation { expected: String, actual: String },
}

/// What to do with `<digits><counter>` spans that have an irregular reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterStyle {
    /// Keep the digits and counter as the base of one annotated unit.
    #[default]
    Annotate,
    /// Rewrite the span to its reading before the oracle runs.
    Replace,
}

/// Whether oracle output is checked against the text it was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OraclePolicy {
    #[default]
    Strict,
    Trusting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignOptions {
    pub counter_style: CounterStyle,
    pub oracle_policy: OraclePolicy,
}

impl From<&AlignmentSettings> for AlignOptions {
    fn from(s: &AlignmentSettings) -> Self {
        Self {
            counter_style: s.counter_style,
            oracle_policy: s.oracle_policy,
        }
    }
}

/// Align every token in order. No counter or override handling.
pub fn align_tokens(oracle: &dyn Transliterator, tokens: &[OracleToken]) -> Vec<AlignmentUnit> {
    let mut units = Vec::with_capacity(tokens.len());
    for token in tokens {
        align_token(oracle, token, &mut units);
    }
    units
}

/// Step-by-step record of a line going through the pipeline.
#[derive(Debug)]
pub(crate) enum PipelineEvent<'a> {
    Counter {
        surface: &'a str,
        reading: &'a str,
    },
    /// `units` are the units the token produced, before overrides.
    Token {
        token: &'a OracleToken,
        route: Route,
        units: &'a [AlignmentUnit],
    },
}

/// The per-line pipeline with its tables and options bound.
#[derive(Clone, Copy)]
pub struct Aligner<'a> {
    oracle: &'a dyn Transliterator,
    counters: &'a CounterTable,
    overrides: &'a PreferredReadingTable,
    options: AlignOptions,
}

impl<'a> Aligner<'a> {
    /// An aligner over the global counter table, override table and settings.
    pub fn new(oracle: &'a dyn Transliterator) -> Self {
        Self {
            oracle,
            counters: counters(),
            overrides: overrides(),
            options: AlignOptions::from(&settings().alignment),
        }
    }

    pub fn with_tables(
        oracle: &'a dyn Transliterator,
        counters: &'a CounterTable,
        overrides: &'a PreferredReadingTable,
        options: AlignOptions,
    ) -> Self {
        Self {
            oracle,
            counters,
            overrides,
            options,
        }
    }

    pub fn with_options(mut self, options: AlignOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> AlignOptions {
        self.options
    }

    pub fn oracle(&self) -> &'a dyn Transliterator {
        self.oracle
    }

    /// Align one line into units whose bases rebuild it.
    ///
    /// With `CounterStyle::Replace` the bases rebuild the counter-normalized
    /// line instead.
    pub fn align_line(&self, line: &str) -> Result<Vec<AlignmentUnit>, AlignError> {
        let (units, _) = self.run(line, &mut |_| {})?;
        Ok(units)
    }

    /// Shared pipeline. Returns the units and the indices the override pass rewrote.
    pub(crate) fn run(
        &self,
        line: &str,
        observe: &mut dyn FnMut(PipelineEvent<'_>),
    ) -> Result<(Vec<AlignmentUnit>, Vec<usize>), AlignError> {
        let _span = debug_span!("align_line", chars = line.chars().count()).entered();

        let mut units = Vec::new();
        if line.is_empty() {
            return Ok((units, Vec::new()));
        }

        match self.options.counter_style {
            CounterStyle::Annotate => {
                for piece in self.counters.split(line) {
                    match piece {
                        CounterPiece::Text(text) => self.align_text(text, &mut units, observe)?,
                        CounterPiece::Counter { surface, reading } => {
                            observe(PipelineEvent::Counter { surface, reading });
                            units.push(AlignmentUnit::annotated(surface, reading));
                        }
                    }
                }
            }
            CounterStyle::Replace => {
                let normalized = self.counters.normalize(line);
                self.align_text(&normalized, &mut units, observe)?;
            }
        }

        let applied = apply_overrides(&mut units, self.overrides);
        debug!(units = units.len(), overrides = applied.len());
        Ok((units, applied))
    }

    fn align_text(
        &self,
        text: &str,
        units: &mut Vec<AlignmentUnit>,
        observe: &mut dyn FnMut(PipelineEvent<'_>),
    ) -> Result<(), AlignError> {
        if text.is_empty() {
            return Ok(());
        }
        let tokens = self.oracle.transliterate(text);
        if let Err(e) = check_reconstruction(text, &tokens) {
            match self.options.oracle_policy {
                OraclePolicy::Strict => return Err(e),
                OraclePolicy::Trusting => warn!("{e}; aligning anyway"),
            }
        }

        for token in &tokens {
            let before = units.len();
            let route = align_token(self.oracle, token, units);
            debug!(orig = %token.orig, hira = %token.hira, ?route);
            observe(PipelineEvent::Token {
                token,
                route,
                units: &units[before..],
            });
        }
        Ok(())
    }
}
