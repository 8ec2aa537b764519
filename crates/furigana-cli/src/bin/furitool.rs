use std::path::Path;

use clap::{Parser, Subcommand};

use furigana_cli::commands::{annotate_ops, config_ops, note_ops};
use furigana_core::render::RenderFormat;

#[derive(Parser)]
#[command(name = "furitool", about = "Furigana alignment and rendering tool")]
struct Cli {
    /// Custom settings TOML
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom counter readings TOML
    #[arg(long, global = true)]
    counters: Option<String>,
    /// Custom preferred readings TOML
    #[arg(long, global = true)]
    overrides: Option<String>,
    /// Write JSON-lines traces to this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate every line of a text file
    Annotate {
        /// Input text file (UTF-8, one line per lyric line)
        input: String,
        /// Lexicon TOML used as the reading oracle
        #[arg(long)]
        lexicon: String,
        /// Output markup: ruby_tag, brace or eq_field (default from settings)
        #[arg(long)]
        format: Option<RenderFormat>,
        /// Manual translations (.json object or two-column .tsv)
        #[arg(long)]
        manual: Option<String>,
        /// Write JSON entries here instead of printing lines
        #[arg(long)]
        json: Option<String>,
        /// Align lines on all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Show how a single line is aligned
    Explain {
        /// Japanese line
        line: String,
        /// Lexicon TOML used as the reading oracle
        #[arg(long)]
        lexicon: String,
        /// Output markup for the rendered line
        #[arg(long)]
        format: Option<RenderFormat>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a markdown lyric note with furigana
    Note {
        /// Lyrics text file
        input: String,
        /// Lexicon TOML used as the reading oracle
        #[arg(long)]
        lexicon: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        album: String,
        /// Track number (1-based)
        #[arg(long)]
        track: u32,
        /// Number of tracks on the album
        #[arg(long)]
        total: u32,
        /// Album track titles, one per line
        #[arg(long)]
        titles: Option<String>,
        /// Vault root; the note goes under <root>/Lyrics/<artist>/<album>/
        #[arg(long, default_value = ".")]
        out_root: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default counter readings as TOML
    CountersExport,
    /// Validate a custom counter readings TOML file
    CountersValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default preferred readings as TOML
    OverridesExport,
    /// Validate a custom preferred readings TOML file
    OverridesValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Validate a lexicon TOML file
    LexiconValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        furigana_engine::init_tracing(Path::new(dir));
    }
    config_ops::init_custom(
        cli.settings.as_deref(),
        cli.counters.as_deref(),
        cli.overrides.as_deref(),
    );

    match cli.command {
        Command::Annotate {
            input,
            lexicon,
            format,
            manual,
            json,
            parallel,
        } => {
            let opts = annotate_ops::AnnotateOptions {
                format,
                manual: manual.as_deref(),
                json: json.as_deref(),
                parallel,
            };
            annotate_ops::annotate_cmd(&input, &lexicon, &opts);
        }
        Command::Explain {
            line,
            lexicon,
            format,
            json,
        } => annotate_ops::explain_cmd(&line, &lexicon, format, json),
        Command::Note {
            input,
            lexicon,
            title,
            artist,
            album,
            track,
            total,
            titles,
            out_root,
        } => {
            let meta = note_ops::NoteMeta {
                title: &title,
                artist: &artist,
                album: &album,
                track,
                total,
                titles: titles.as_deref(),
            };
            note_ops::note_cmd(&input, &lexicon, &meta, &out_root);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::CountersExport => config_ops::counters_export(),
        Command::CountersValidate { file } => config_ops::counters_validate(&file),
        Command::OverridesExport => config_ops::overrides_export(),
        Command::OverridesValidate { file } => config_ops::overrides_validate(&file),
        Command::LexiconValidate { file } => config_ops::lexicon_validate(&file),
    }
}
