use std::path::Path;
use std::process;

use furigana_core::explain::{explain_line, format_text};
use furigana_core::oracle::LexiconTransliterator;
use furigana_core::render::{renderer_for, RenderFormat};
use furigana_core::settings::settings;
use furigana_core::Aligner;
use furigana_engine::document::{
    process_lines, process_lines_parallel, write_entries_json, ManualTranslations,
};

use super::read_lines;

pub struct AnnotateOptions<'a> {
    pub format: Option<RenderFormat>,
    pub manual: Option<&'a str>,
    pub json: Option<&'a str>,
    pub parallel: bool,
}

pub fn load_lexicon(file: &str) -> LexiconTransliterator {
    die!(
        LexiconTransliterator::open(Path::new(file)),
        "Error loading lexicon {file}: {}"
    )
}

pub fn annotate_cmd(input: &str, lexicon_file: &str, opts: &AnnotateOptions<'_>) {
    let lines = die!(read_lines(Path::new(input)), "Error reading {input}: {}");
    let lexicon = load_lexicon(lexicon_file);
    let manual = opts.manual.map(|file| {
        die!(
            ManualTranslations::open(Path::new(file)),
            "Error loading manual translations {file}: {}"
        )
    });

    let render = &settings().render;
    let renderer = renderer_for(opts.format.unwrap_or(render.format), render);
    let aligner = Aligner::new(&lexicon);

    let report = if opts.parallel {
        process_lines_parallel(&aligner, renderer.as_ref(), &lines, manual.as_ref())
    } else {
        process_lines(&aligner, renderer.as_ref(), &lines, manual.as_ref())
    };

    match opts.json {
        Some(out) => {
            die!(
                write_entries_json(Path::new(out), &report.entries),
                "Error writing {out}: {}"
            );
            eprintln!("Wrote {} entries to {out}", report.entries.len());
        }
        None => {
            for (line, entry) in lines.iter().zip(&report.entries) {
                if line.trim().is_empty() {
                    println!();
                } else {
                    println!("{}", entry.jp_text);
                }
            }
        }
    }

    if let Some(warning) = &report.first_warning {
        eprintln!("Warning: {warning}");
    }
    for failure in &report.failures {
        eprintln!("Error: line {}: {}", failure.line_number, failure.message);
    }
    if !report.failures.is_empty() {
        process::exit(1);
    }
}

pub fn explain_cmd(line: &str, lexicon_file: &str, format: Option<RenderFormat>, json: bool) {
    let lexicon = load_lexicon(lexicon_file);
    let render = &settings().render;
    let renderer = renderer_for(format.unwrap_or(render.format), render);
    let aligner = Aligner::new(&lexicon);

    let result = die!(explain_line(&aligner, renderer.as_ref(), line), "Error: {}");
    if json {
        let text = die!(serde_json::to_string_pretty(&result), "Error: {}");
        println!("{text}");
    } else {
        print!("{}", format_text(&result));
    }
}
