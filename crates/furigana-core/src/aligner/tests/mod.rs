mod basic;
mod scenarios;

use super::testutil::{default_counters, default_overrides};
use super::{AlignOptions, Aligner, CounterStyle, OraclePolicy};
use crate::counter::CounterTable;
use crate::oracle::Transliterator;
use crate::overrides::PreferredReadingTable;
use crate::unit::AlignmentUnit;

/// Align `line` with the embedded default tables and the given options.
pub(super) fn align_with(
    oracle: &dyn Transliterator,
    line: &str,
    options: AlignOptions,
) -> Result<Vec<AlignmentUnit>, super::AlignError> {
    let counters = default_counters();
    let overrides = default_overrides();
    Aligner::with_tables(oracle, &counters, &overrides, options).align_line(line)
}

pub(super) fn align(oracle: &dyn Transliterator, line: &str) -> Vec<AlignmentUnit> {
    align_with(oracle, line, AlignOptions::default()).unwrap()
}

/// Align with no counter or override tables.
pub(super) fn align_bare(oracle: &dyn Transliterator, line: &str) -> Vec<AlignmentUnit> {
    let counters = CounterTable::empty();
    let overrides = PreferredReadingTable::default();
    Aligner::with_tables(oracle, &counters, &overrides, AlignOptions::default())
        .align_line(line)
        .unwrap()
}

pub(super) fn replace_style() -> AlignOptions {
    AlignOptions {
        counter_style: CounterStyle::Replace,
        ..AlignOptions::default()
    }
}

pub(super) fn trusting() -> AlignOptions {
    AlignOptions {
        oracle_policy: OraclePolicy::Trusting,
        ..AlignOptions::default()
    }
}
