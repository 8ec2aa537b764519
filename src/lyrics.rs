//! Markdown lyric notes with brace furigana, one file per track, linked to
//! the neighbouring tracks of the album.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use furigana_core::aligner::{AlignError, Aligner};
use furigana_core::render::{BraceRenderer, Renderer};
use regex::Regex;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LyricError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("track {track} is outside 1..={total}")]
    InvalidTrack { track: u32, total: u32 },
    #[error("line {line_number}: {source}")]
    Align {
        line_number: usize,
        #[source]
        source: AlignError,
    },
}

/// Replace characters that are not allowed in file names with `_`.
pub fn sanitize_filename(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

fn track_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\s*[\.．]?\s*").expect("track prefix pattern must compile"))
}

/// Remove a leading track number (`03. `, `03．`, `3 `) from a title.
pub fn strip_track_number(title: &str) -> &str {
    let title = title.trim();
    match track_prefix().find(title) {
        Some(m) => title[m.end()..].trim(),
        None => title,
    }
}

#[derive(Debug, Clone)]
pub struct LyricNote {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// 1-based.
    pub track_number: u32,
    pub total_tracks: u32,
    /// Album track titles in order, possibly with track-number prefixes.
    pub track_titles: Vec<String>,
}

impl LyricNote {
    fn validate(&self) -> Result<(), LyricError> {
        if self.track_number == 0 || self.track_number > self.total_tracks {
            return Err(LyricError::InvalidTrack {
                track: self.track_number,
                total: self.total_tracks,
            });
        }
        Ok(())
    }

    /// `NN. Title` of another track, if it is listed.
    fn link_name(&self, track: u32) -> Option<String> {
        let title = self.track_titles.get(track.checked_sub(1)? as usize)?;
        Some(format!("{:02}. {}", track, strip_track_number(title)))
    }

    fn previous_link(&self) -> Option<String> {
        (self.track_number > 1)
            .then(|| self.link_name(self.track_number - 1))
            .flatten()
    }

    fn next_link(&self) -> Option<String> {
        (self.track_number < self.total_tracks)
            .then(|| self.link_name(self.track_number + 1))
            .flatten()
    }

    pub fn file_name(&self) -> String {
        format!(
            "{:02}. {}.md",
            self.track_number,
            sanitize_filename(&self.title)
        )
    }
}

/// Render the full note: frontmatter, navigation links and the lyrics with
/// `{base|reading}` furigana. Blank lyric lines stay blank.
pub fn render_lyric_note<S: AsRef<str>>(
    aligner: &Aligner<'_>,
    note: &LyricNote,
    lines: &[S],
) -> Result<String, LyricError> {
    note.validate()?;

    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!("title: {}\n", note.title));
    out.push_str(&format!("artist: {}\n", note.artist));
    out.push_str(&format!("album: {}\n", note.album));
    out.push_str(&format!("track: {}\n", note.track_number));
    out.push_str("tags: [lyrics, japanese, furigana]\n");
    out.push_str("language: ja\n");
    out.push_str("---\n");

    if let Some(prev) = note.previous_link() {
        out.push_str(&format!(" ← [[{prev}]]\n"));
    }
    out.push_str("[[link]]\n\n");

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if !line.is_empty() {
            let units = aligner.align_line(line).map_err(|source| LyricError::Align {
                line_number: i + 1,
                source,
            })?;
            out.push_str(&BraceRenderer.render_line(&units));
        }
        out.push('\n');
    }

    out.push('\n');
    if let Some(next) = note.next_link() {
        out.push_str(&format!("[[{next}]] → \n"));
    }
    out.push_str("\n[[link]]\n");
    Ok(out)
}

/// Write the note under `<root>/Lyrics/<artist>/<album>/` and return its path.
pub fn write_lyric_note<S: AsRef<str>>(
    root: &Path,
    aligner: &Aligner<'_>,
    note: &LyricNote,
    lines: &[S],
) -> Result<PathBuf, LyricError> {
    let content = render_lyric_note(aligner, note, lines)?;
    let dir = root
        .join("Lyrics")
        .join(sanitize_filename(&note.artist))
        .join(sanitize_filename(&note.album));
    fs::create_dir_all(&dir)?;
    let path = dir.join(note.file_name());
    fs::write(&path, content)?;
    info!(path = %path.display(), "lyric note written");
    Ok(path)
}
