//! Batch processing of a lyric/text file into per-line JSON entries.
//!
//! Each non-blank line is aligned and rendered on its own; blank lines
//! become paragraph-break entries. An optional manual translation table is
//! looked up by the trimmed line.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use furigana_core::aligner::{AlignError, Aligner};
use furigana_core::render::Renderer;
use furigana_core::settings::settings;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug_span, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manual translation row {row} has no translation column")]
    MissingColumn { row: usize },
}

/// Japanese line → human translation.
#[derive(Debug, Clone, Default)]
pub struct ManualTranslations {
    map: HashMap<String, String>,
}

impl ManualTranslations {
    /// Pairs are trimmed; pairs with an empty side are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let map = pairs
            .into_iter()
            .filter_map(|(jp, tr)| {
                let (jp, tr) = (jp.as_ref().trim(), tr.as_ref().trim());
                (!jp.is_empty() && !tr.is_empty()).then(|| (jp.to_string(), tr.to_string()))
            })
            .collect();
        Self { map }
    }

    /// A JSON object of `"line": "translation"`.
    pub fn from_json_str(s: &str) -> Result<Self, DocumentError> {
        let map: HashMap<String, String> = serde_json::from_str(s)?;
        Ok(Self::from_pairs(map))
    }

    /// Two tab-separated columns, Japanese then translation. The first row
    /// is a header and is skipped, as are blank rows.
    pub fn from_tsv_str(s: &str) -> Result<Self, DocumentError> {
        let mut pairs = Vec::new();
        for (i, row) in s.lines().enumerate().skip(1) {
            if row.trim().is_empty() {
                continue;
            }
            let mut cols = row.split('\t');
            let jp = cols.next().unwrap_or_default();
            let Some(tr) = cols.next() else {
                return Err(DocumentError::MissingColumn { row: i + 1 });
            };
            pairs.push((jp, tr));
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Load by extension: `.json` is a JSON object, anything else is TSV.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_tsv_str(&content)
        }
    }

    pub fn get(&self, line: &str) -> Option<&str> {
        self.map.get(line.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// One output entry per input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineEntry {
    pub jp_text: String,
    /// Present (possibly empty) only when a manual table was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineFailure {
    /// 1-based.
    pub line_number: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentReport {
    pub entries: Vec<LineEntry>,
    /// The first manual-translation miss, in the form shown to users.
    pub first_warning: Option<String>,
    /// 1-based line numbers of non-blank lines with no manual translation.
    pub skipped_manual: Vec<usize>,
    pub failures: Vec<LineFailure>,
}

fn render_one(
    aligner: &Aligner<'_>,
    renderer: &(dyn Renderer + Sync),
    line: &str,
) -> Option<Result<String, AlignError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(
        aligner
            .align_line(line)
            .map(|units| renderer.render_line(&units)),
    )
}

/// Align and render every line in order.
pub fn process_lines<S: AsRef<str>>(
    aligner: &Aligner<'_>,
    renderer: &(dyn Renderer + Sync),
    lines: &[S],
    manual: Option<&ManualTranslations>,
) -> DocumentReport {
    let _span = debug_span!("process_lines", lines = lines.len()).entered();
    let rendered = lines
        .iter()
        .map(|l| render_one(aligner, renderer, l.as_ref()))
        .collect();
    assemble(lines, rendered, manual)
}

/// Same result as `process_lines`, with lines aligned on the rayon pool.
pub fn process_lines_parallel<S: AsRef<str> + Sync>(
    aligner: &Aligner<'_>,
    renderer: &(dyn Renderer + Sync),
    lines: &[S],
    manual: Option<&ManualTranslations>,
) -> DocumentReport {
    let _span = debug_span!("process_lines_parallel", lines = lines.len()).entered();
    let rendered = lines
        .par_iter()
        .map(|l| render_one(aligner, renderer, l.as_ref()))
        .collect();
    assemble(lines, rendered, manual)
}

fn assemble<S: AsRef<str>>(
    lines: &[S],
    rendered: Vec<Option<Result<String, AlignError>>>,
    manual: Option<&ManualTranslations>,
) -> DocumentReport {
    let paragraph_break = &settings().document.paragraph_break;
    let mut report = DocumentReport::default();

    for (i, (line, outcome)) in lines.iter().zip(rendered).enumerate() {
        let line = line.as_ref().trim();
        let jp_text = match outcome {
            None => paragraph_break.clone(),
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                warn!(line_number = i + 1, "{e}");
                report.failures.push(LineFailure {
                    line_number: i + 1,
                    message: e.to_string(),
                });
                line.to_string()
            }
        };

        let manual_text = manual.map(|table| {
            if line.is_empty() {
                return String::new();
            }
            match table.get(line) {
                Some(tr) => tr.to_string(),
                None => {
                    report.skipped_manual.push(i + 1);
                    if report.first_warning.is_none() {
                        report.first_warning = Some(format!(
                            "Partial manual translation: Japanese doesn't match from Row {}",
                            i + 2
                        ));
                    }
                    String::new()
                }
            }
        });

        report.entries.push(LineEntry {
            jp_text,
            manual: manual_text,
        });
    }

    info!(
        entries = report.entries.len(),
        failures = report.failures.len(),
        skipped_manual = report.skipped_manual.len(),
        "document processed"
    );
    report
}

/// Pretty JSON array, two-space indent, non-ASCII written as-is.
pub fn write_entries_json(path: &Path, entries: &[LineEntry]) -> Result<(), DocumentError> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}
