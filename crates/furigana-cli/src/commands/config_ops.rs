use std::fs;
use std::path::Path;

use furigana_core::oracle::LexiconTransliterator;
use furigana_core::{counter, overrides, settings};

/// Install custom TOML tables before anything reads the globals.
pub fn init_custom(settings_file: Option<&str>, counters_file: Option<&str>, overrides_file: Option<&str>) {
    if let Some(file) = settings_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error in {file}: {}");
    }
    if let Some(file) = counters_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(counter::init_custom(content), "Error in {file}: {}");
    }
    if let Some(file) = overrides_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(overrides::init_custom(content), "Error in {file}: {}");
    }
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: alignment.counter_style={:?}, alignment.oracle_policy={:?}, render.format={}",
        s.alignment.counter_style, s.alignment.oracle_policy, s.render.format
    );
}

pub fn counters_export() {
    print!("{}", counter::default_toml());
}

pub fn counters_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(counter::parse_counters_toml(&content), "Error: {}");
    println!(
        "OK: {} counters, {} readings",
        table.counter_count(),
        table.entry_count()
    );
}

pub fn overrides_export() {
    print!("{}", overrides::default_toml());
}

pub fn overrides_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(overrides::parse_overrides_toml(&content), "Error: {}");
    println!("OK: {} preferred readings", table.len());
}

pub fn lexicon_validate(file: &str) {
    let lexicon = die!(
        LexiconTransliterator::open(Path::new(file)),
        "Error loading lexicon {file}: {}"
    );
    println!("OK: {} entries", lexicon.len());
}
