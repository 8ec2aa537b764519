//! Step-by-step trace of how a line was aligned.
//!
//! Used by `furitool explain` to show which counter spans matched, how the
//! oracle tokenized the rest, which route each token took and which
//! overrides fired.

use serde::Serialize;

use crate::aligner::{AlignError, Aligner, PipelineEvent, Route};
use crate::render::Renderer;
use crate::unit::AlignmentUnit;

/// A counter span annotated as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainCounter {
    pub surface: String,
    pub reading: String,
}

/// One oracle token and the units it produced before overrides.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainToken {
    pub orig: String,
    pub hira: String,
    pub route: Route,
    pub units: Vec<AlignmentUnit>,
}

/// A unit whose reading the override pass rewrote.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainOverride {
    pub index: usize,
    pub base: String,
    pub aligned: Option<String>,
    pub preferred: String,
}

/// Full explanation of one line.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainResult {
    pub line: String,
    pub counters: Vec<ExplainCounter>,
    pub tokens: Vec<ExplainToken>,
    pub overrides: Vec<ExplainOverride>,
    pub units: Vec<AlignmentUnit>,
    pub rendered: String,
}

/// Align `line` and record every pipeline step.
pub fn explain_line(
    aligner: &Aligner<'_>,
    renderer: &dyn Renderer,
    line: &str,
) -> Result<ExplainResult, AlignError> {
    let mut counters = Vec::new();
    let mut tokens = Vec::new();
    // Pre-override units, index-aligned with the final ones.
    let mut raw: Vec<AlignmentUnit> = Vec::new();

    let (units, applied) = aligner.run(line, &mut |event| match event {
        PipelineEvent::Counter { surface, reading } => {
            counters.push(ExplainCounter {
                surface: surface.to_string(),
                reading: reading.to_string(),
            });
            raw.push(AlignmentUnit::annotated(surface, reading));
        }
        PipelineEvent::Token {
            token,
            route,
            units,
        } => {
            raw.extend_from_slice(units);
            tokens.push(ExplainToken {
                orig: token.orig.clone(),
                hira: token.hira.clone(),
                route,
                units: units.to_vec(),
            });
        }
    })?;

    let overrides = applied
        .into_iter()
        .map(|i| ExplainOverride {
            index: i,
            base: units[i].base.clone(),
            aligned: raw.get(i).and_then(|u| u.reading.clone()),
            preferred: units[i].reading.clone().unwrap_or_default(),
        })
        .collect();

    let rendered = renderer.render_line(&units);
    Ok(ExplainResult {
        line: line.to_string(),
        counters,
        tokens,
        overrides,
        units,
        rendered,
    })
}

fn route_label(route: Route) -> &'static str {
    match route {
        Route::Katakana => "katakana",
        Route::NoKanji => "no-kanji",
        Route::AllKanji => "all-kanji",
        Route::Mixed => "mixed",
    }
}

fn unit_label(unit: &AlignmentUnit) -> String {
    match &unit.reading {
        Some(r) => format!("{}({})", unit.base, r),
        None => unit.base.clone(),
    }
}

/// Pad `s` to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let w = UnicodeWidthStr::width(s);
    if w < width {
        format!("{}{}", s, " ".repeat(width - w))
    } else {
        s.to_string()
    }
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Line \"{}\" ({} chars) ===\n",
        result.line,
        result.line.chars().count(),
    ));

    if !result.counters.is_empty() {
        out.push_str(&format!("\n=== Counters ({}) ===\n", result.counters.len()));
        for c in &result.counters {
            out.push_str(&format!("  {} -> {}\n", pad(&c.surface, 12), c.reading));
        }
    }

    out.push_str(&format!("\n=== Tokens ({}) ===\n", result.tokens.len()));
    for (i, t) in result.tokens.iter().enumerate() {
        let units: Vec<String> = t.units.iter().map(unit_label).collect();
        out.push_str(&format!(
            "  [{:<2}] {} {} {:<9} {}\n",
            i,
            pad(&t.orig, 12),
            pad(&t.hira, 16),
            route_label(t.route),
            units.join(" "),
        ));
    }

    if !result.overrides.is_empty() {
        out.push_str(&format!("\n=== Overrides ({}) ===\n", result.overrides.len()));
        for o in &result.overrides {
            out.push_str(&format!(
                "  unit[{}] {} {} -> {}\n",
                o.index,
                o.base,
                o.aligned.as_deref().unwrap_or("-"),
                o.preferred,
            ));
        }
    }

    out.push_str(&format!("\n=== Rendered ===\n  {}\n", result.rendered));
    out
}
